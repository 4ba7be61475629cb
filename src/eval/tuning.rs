use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::ScoringConfig;
use crate::eval::runner::OutcomeSample;
use crate::scoring::{PredictionWeights, SuccessPredictor};

pub struct WeightTuner {
    pub samples: Vec<OutcomeSample>,
}

impl WeightTuner {
    pub fn new(samples: Vec<OutcomeSample>) -> Self {
        Self { samples }
    }

    pub fn tune(
        &self,
        initial_weights: PredictionWeights,
        config: &ScoringConfig,
    ) -> PredictionWeights {
        let mut rng = StdRng::seed_from_u64(42);
        let mut best = initial_weights.normalized();
        let mut best_score = objective(&best, &self.samples, config);

        let iterations = 200;
        let step = 0.2;

        for _ in 0..iterations {
            let candidate = perturb_weights(&best, &mut rng, step);
            let score = objective(&candidate, &self.samples, config);
            if score < best_score {
                best = candidate;
                best_score = score;
            }
        }

        best
    }
}

fn objective(
    weights: &PredictionWeights,
    data: &[OutcomeSample],
    config: &ScoringConfig,
) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut config = config.clone();
    config.prediction = weights.clone();
    let predictor = SuccessPredictor::from_config(&config);

    let mut total_error = 0.0;
    for sample in data {
        let item = sample.to_item();
        let predicted = predictor.predict(&item).probability;
        let actual = if sample.succeeded { 1.0 } else { 0.0 };
        total_error += (predicted - actual).powi(2);
    }

    total_error / data.len() as f64
}

fn perturb_weights(weights: &PredictionWeights, rng: &mut StdRng, scale: f64) -> PredictionWeights {
    let mut adjust =
        |value: f64| -> f64 { (value * (1.0 + rng.gen_range(-scale..scale))).max(0.0) };

    PredictionWeights {
        momentum: adjust(weights.momentum),
        progress: adjust(weights.progress),
        leader: adjust(weights.leader),
        location: adjust(weights.location),
        category: adjust(weights.category),
    }
    .normalized()
}
