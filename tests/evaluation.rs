use zzik_score::config::ScoringConfig;
use zzik_score::eval::{EvalRunner, OutcomeSample, WeightTuner};
use zzik_score::scoring::PredictionWeights;

fn sample(id: &str, participants: u32, succeeded: bool) -> OutcomeSample {
    OutcomeSample {
        popup_id: id.to_string(),
        name: None,
        category: "fashion".to_string(),
        location: "Seongsu".to_string(),
        goal_participants: 100,
        participants_at_snapshot: participants,
        days_left_at_snapshot: 10,
        daily_momentum: vec![8.0; 7],
        leader_followers: None,
        brand_popups: None,
        succeeded,
    }
}

#[test]
fn metrics_separate_strong_from_weak_campaigns() {
    let samples = vec![
        sample("s1", 90, true),
        sample("s2", 85, true),
        sample("f1", 5, false),
        sample("f2", 10, false),
    ];

    let metrics = EvalRunner::new(samples).compute_metrics(&ScoringConfig::default());

    assert_eq!(metrics.sample_count, 4);
    assert!((metrics.accuracy - 1.0).abs() < 1e-6);
    assert!((metrics.pairwise_ranking_accuracy - 1.0).abs() < 1e-6);
    assert!((metrics.success_rate - 0.5).abs() < 1e-6);
    assert!(metrics.brier_score < 0.25);
}

#[test]
fn empty_samples_yield_default_metrics() {
    let metrics = EvalRunner::new(Vec::new()).compute_metrics(&ScoringConfig::default());

    assert_eq!(metrics.sample_count, 0);
    assert!((metrics.brier_score - 0.0).abs() < 1e-6);
    assert!((metrics.accuracy - 0.0).abs() < 1e-6);
}

#[test]
fn tuning_never_worsens_brier_score() {
    let samples = vec![
        sample("s1", 95, true),
        sample("s2", 70, true),
        sample("s3", 60, false),
        sample("f1", 20, false),
        sample("f2", 35, true),
        sample("f3", 15, false),
    ];
    let config = ScoringConfig::default();

    let initial = EvalRunner::new(samples.clone()).compute_metrics(&config);

    let tuner = WeightTuner::new(samples.clone());
    let tuned = tuner.tune(PredictionWeights::default(), &config);

    let mut tuned_config = config.clone();
    tuned_config.prediction = tuned;
    let after = EvalRunner::new(samples).compute_metrics(&tuned_config);

    assert!(after.brier_score <= initial.brier_score + 1e-9);
}

#[test]
fn tuned_weights_stay_normalized() {
    let samples = vec![
        sample("s1", 90, true),
        sample("f1", 10, false),
        sample("s2", 80, true),
        sample("f2", 25, false),
    ];

    let tuned = WeightTuner::new(samples).tune(PredictionWeights::default(), &ScoringConfig::default());
    let total = tuned.momentum + tuned.progress + tuned.leader + tuned.location + tuned.category;

    assert!((total - 1.0).abs() < 1e-6);
}
