use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::scoring::SuccessPredictor;
use crate::{mean, Category, PopupItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSample {
    pub popup_id: String,
    pub name: Option<String>,
    pub category: String,
    pub location: String,
    pub goal_participants: u32,
    pub participants_at_snapshot: u32,
    pub days_left_at_snapshot: u32,
    #[serde(default)]
    pub daily_momentum: Vec<f64>,
    pub leader_followers: Option<u64>,
    pub brand_popups: Option<u32>,
    pub succeeded: bool,
}

impl OutcomeSample {
    pub fn to_item(&self) -> PopupItem {
        PopupItem {
            id: self.popup_id.clone(),
            name: self.name.clone().unwrap_or_else(|| self.popup_id.clone()),
            category: Category::from_str(&self.category).unwrap_or(Category::Lifestyle),
            location: self.location.clone(),
            current_participants: self.participants_at_snapshot,
            goal_participants: self.goal_participants,
            days_left: self.days_left_at_snapshot,
            daily_momentum: self.daily_momentum.clone(),
            embedding: None,
            leader_followers: self.leader_followers,
            brand_popups: self.brand_popups,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvalMetrics {
    pub brier_score: f64,
    pub accuracy: f64,
    pub pairwise_ranking_accuracy: f64,
    pub mean_probability: f64,
    pub success_rate: f64,
    pub sample_count: usize,
}

pub struct EvalRunner {
    pub samples: Vec<OutcomeSample>,
}

impl EvalRunner {
    pub fn new(samples: Vec<OutcomeSample>) -> Self {
        Self { samples }
    }

    pub fn compute_metrics(&self, config: &ScoringConfig) -> EvalMetrics {
        if self.samples.is_empty() {
            return EvalMetrics::default();
        }

        let predictor = SuccessPredictor::from_config(config);

        let mut squared_errors = Vec::new();
        let mut probabilities = Vec::new();
        let mut outcomes = Vec::new();
        let mut correct = 0usize;
        let mut successes = 0usize;

        for sample in &self.samples {
            let item = sample.to_item();
            let prediction = predictor.predict(&item);
            let actual = if sample.succeeded { 1.0 } else { 0.0 };

            squared_errors.push((prediction.probability - actual).powi(2));
            if (prediction.probability >= 0.5) == sample.succeeded {
                correct += 1;
            }
            if sample.succeeded {
                successes += 1;
            }

            probabilities.push(prediction.probability);
            outcomes.push(actual);
        }

        EvalMetrics {
            brier_score: mean(&squared_errors),
            accuracy: correct as f64 / self.samples.len() as f64,
            pairwise_ranking_accuracy: pairwise_accuracy(&probabilities, &outcomes),
            mean_probability: mean(&probabilities),
            success_rate: successes as f64 / self.samples.len() as f64,
            sample_count: self.samples.len(),
        }
    }
}

// Counts pairs with one success and one failure where the success got the
// higher probability. Ties and same-outcome pairs are skipped.
fn pairwise_accuracy(predicted: &[f64], actual: &[f64]) -> f64 {
    let mut correct = 0usize;
    let mut total = 0usize;

    for i in 0..predicted.len() {
        for j in (i + 1)..predicted.len() {
            if actual[i] == actual[j] {
                continue;
            }
            total += 1;
            let success_first = actual[i] > actual[j];
            if (success_first && predicted[i] > predicted[j])
                || (!success_first && predicted[j] > predicted[i])
            {
                correct += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
