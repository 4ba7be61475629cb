use zzik_score::scoring::{risk_level, PredictionWeights, RiskLevel, SuccessPredictor};
use zzik_score::{Category, PopupItem};

fn popup(id: &str, current: u32, goal: u32, days_left: u32) -> PopupItem {
    PopupItem {
        id: id.to_string(),
        name: id.to_string(),
        category: Category::Lifestyle,
        location: "Daejeon".to_string(),
        current_participants: current,
        goal_participants: goal,
        days_left,
        daily_momentum: Vec::new(),
        embedding: None,
        leader_followers: None,
        brand_popups: None,
    }
}

fn predictor() -> SuccessPredictor {
    SuccessPredictor::new(PredictionWeights::default(), 20.0)
}

#[test]
fn strong_campaign_predicts_low_risk() {
    let mut item = popup("a", 90, 100, 10);
    item.category = Category::Fashion;
    item.daily_momentum = vec![15.0; 7];
    item.leader_followers = Some(1_000_000);

    let prediction = predictor().predict(&item);

    assert!((prediction.probability - 0.7764285714285715).abs() < 1e-6);
    assert_eq!(prediction.risk, RiskLevel::Low);
}

#[test]
fn weak_campaign_predicts_high_risk() {
    let mut item = popup("b", 10, 100, 2);
    item.category = Category::Tech;
    item.daily_momentum = vec![1.0; 7];

    let prediction = predictor().predict(&item);

    assert!((prediction.probability - 0.234).abs() < 1e-6);
    assert_eq!(prediction.risk, RiskLevel::High);
}

#[test]
fn risk_tightens_near_deadline() {
    assert_eq!(risk_level(0.39, 30), RiskLevel::High);
    assert_eq!(risk_level(0.70, 2), RiskLevel::High);
    assert_eq!(risk_level(0.70, 10), RiskLevel::Low);
    assert_eq!(risk_level(0.50, 10), RiskLevel::Medium);
    assert_eq!(risk_level(0.80, 1), RiskLevel::Medium);
}

#[test]
fn batch_preserves_input_order() {
    let items = vec![popup("first", 10, 100, 5), popup("second", 90, 100, 5)];

    let predictions = predictor().batch(&items);

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].item_id, "first");
    assert_eq!(predictions[1].item_id, "second");
}

#[test]
fn at_risk_filters_and_sorts_ascending() {
    let items = vec![
        popup("healthy", 90, 100, 10),
        popup("failing", 0, 100, 10),
        popup("wobbly", 40, 100, 10),
    ];

    let flagged = predictor().at_risk(&items, 0.40);

    assert_eq!(flagged.len(), 2);
    assert_eq!(flagged[0].item_id, "failing");
    assert_eq!(flagged[1].item_id, "wobbly");
    assert!(flagged[0].probability <= flagged[1].probability);
}

#[test]
fn confidence_grows_with_momentum_history() {
    let bare = popup("a", 50, 100, 10);
    let mut tracked = popup("b", 50, 100, 10);
    tracked.daily_momentum = vec![5.0; 14];

    let predictor = predictor();
    let bare_confidence = predictor.predict(&bare).confidence;
    let tracked_confidence = predictor.predict(&tracked).confidence;

    assert!((bare_confidence - 0.3).abs() < 1e-6);
    assert!((tracked_confidence - 0.8).abs() < 1e-6);
}

#[test]
fn missing_leader_suggests_matching() {
    let item = popup("a", 50, 100, 10);

    let prediction = predictor().predict(&item);

    assert!(prediction
        .recommendations
        .iter()
        .any(|line| line.contains("leader matching")));
}

#[test]
fn flat_momentum_suggests_promotion() {
    let mut item = popup("a", 50, 100, 10);
    item.daily_momentum = vec![0.5; 7];

    let prediction = predictor().predict(&item);

    assert!(prediction
        .recommendations
        .iter()
        .any(|line| line.contains("promotion")));
}

#[test]
fn probability_bounded_for_extremes() {
    let mut maxed = popup("a", 200, 100, 10);
    maxed.category = Category::Fashion;
    maxed.location = "Seongsu".to_string();
    maxed.daily_momentum = vec![100.0; 14];
    maxed.leader_followers = Some(50_000_000);

    let zeroed = popup("b", 0, 0, 0);

    let predictor = predictor();
    let high = predictor.predict(&maxed).probability;
    let low = predictor.predict(&zeroed).probability;

    assert!(high <= 1.0);
    assert!(low >= 0.0);
    assert!(high > low);
}

#[test]
fn accelerating_momentum_beats_fading_momentum() {
    let mut rising = popup("rising", 50, 100, 10);
    rising.daily_momentum = vec![2.0, 2.0, 2.0, 8.0, 8.0, 8.0];
    let mut fading = popup("fading", 50, 100, 10);
    fading.daily_momentum = vec![8.0, 8.0, 8.0, 2.0, 2.0, 2.0];

    let predictor = predictor();
    let rising_momentum = predictor.momentum_factor(&rising);
    let fading_momentum = predictor.momentum_factor(&fading);

    assert!(rising_momentum > fading_momentum);
}
