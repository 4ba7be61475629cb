use std::collections::{HashMap, HashSet};

use zzik_score::profile::UserPreferences;
use zzik_score::scoring::{HybridScorer, HybridWeights};
use zzik_score::{cosine_similarity, Category, PopupItem};

fn popup(id: &str, category: Category, location: &str) -> PopupItem {
    PopupItem {
        id: id.to_string(),
        name: id.to_string(),
        category,
        location: location.to_string(),
        current_participants: 50,
        goal_participants: 100,
        days_left: 10,
        daily_momentum: vec![5.0; 7],
        embedding: None,
        leader_followers: None,
        brand_popups: None,
    }
}

fn scorer() -> HybridScorer {
    HybridScorer::new(HybridWeights::default(), 20.0)
}

#[test]
fn collaborative_is_zero_without_similar_users() {
    let item = popup("a", Category::Fashion, "Seongsu");
    let score = scorer().collaborative(&item, &[], &HashMap::new());

    assert!((score - 0.0).abs() < 1e-6);
}

#[test]
fn collaborative_counts_participating_fraction() {
    let item = popup("a", Category::Fashion, "Seongsu");
    let similar: Vec<String> = (0..4).map(|idx| format!("user-{}", idx)).collect();
    let mut participations = HashMap::new();
    participations.insert("user-0".to_string(), HashSet::from(["a".to_string()]));
    participations.insert("user-1".to_string(), HashSet::from(["a".to_string()]));
    participations.insert("user-2".to_string(), HashSet::from(["b".to_string()]));

    let half = scorer().collaborative(&item, &similar, &participations);
    assert!((half - 0.5).abs() < 1e-6);

    participations.insert("user-2".to_string(), HashSet::from(["a".to_string()]));
    participations.insert("user-3".to_string(), HashSet::from(["a".to_string()]));
    let full = scorer().collaborative(&item, &similar, &participations);
    assert!((full - 1.0).abs() < 1e-6);
}

#[test]
fn content_blends_category_and_location() {
    let mut prefs = UserPreferences::new("u");
    prefs.categories.insert(Category::Fashion, 1.0);
    prefs.preferred_locations = vec!["Seongsu".to_string()];
    let scorer = scorer();

    let both = scorer.content(&popup("a", Category::Fashion, "Seongsu"), &prefs);
    let category_only = scorer.content(&popup("b", Category::Fashion, "Hongdae"), &prefs);
    let location_only = scorer.content(&popup("c", Category::Tech, "Seongsu"), &prefs);

    assert!((both - 1.0).abs() < 1e-6);
    assert!((category_only - 0.7).abs() < 1e-6);
    assert!((location_only - 0.3).abs() < 1e-6);
}

#[test]
fn popularity_adds_urgency_near_deadline() {
    let scorer = scorer();
    let mut item = popup("a", Category::Food, "Yeonnam");

    assert!((scorer.popularity(&item) - 0.5).abs() < 1e-6);

    item.days_left = 7;
    assert!((scorer.popularity(&item) - 0.55).abs() < 1e-6);

    item.days_left = 3;
    assert!((scorer.popularity(&item) - 0.6).abs() < 1e-6);

    item.current_participants = 100;
    assert!((scorer.popularity(&item) - 1.0).abs() < 1e-6);
}

#[test]
fn trending_normalizes_momentum_against_ceiling() {
    let scorer = scorer();
    let mut item = popup("a", Category::Music, "Seongsu");

    item.daily_momentum = vec![10.0; 7];
    assert!((scorer.trending(&item) - 0.5).abs() < 1e-6);

    item.daily_momentum = vec![40.0; 7];
    assert!((scorer.trending(&item) - 1.0).abs() < 1e-6);

    item.daily_momentum.clear();
    assert!((scorer.trending(&item) - 0.0).abs() < 1e-6);
}

#[test]
fn ai_boost_zero_without_embeddings() {
    let prefs = UserPreferences::new("u");
    let item = popup("a", Category::Art, "Itaewon");

    let boost = scorer().ai_boost(&item, &prefs);
    assert!((boost - 0.0).abs() < 1e-6);
}

#[test]
fn ai_boost_maps_cosine_to_unit_range() {
    let mut prefs = UserPreferences::new("u");
    prefs.embedding = Some(vec![1.0, 0.0]);
    let mut item = popup("a", Category::Art, "Itaewon");
    let scorer = scorer();

    item.embedding = Some(vec![1.0, 0.0]);
    assert!((scorer.ai_boost(&item, &prefs) - 1.0).abs() < 1e-6);

    item.embedding = Some(vec![-1.0, 0.0]);
    assert!((scorer.ai_boost(&item, &prefs) - 0.0).abs() < 1e-6);
}

#[test]
fn cosine_similarity_guards_degenerate_inputs() {
    assert!((cosine_similarity(&[], &[]) - 0.0).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 2.0], &[1.0]) - 0.0).abs() < 1e-6);
    assert!((cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]) - 0.0).abs() < 1e-6);
    assert!((cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]) - 1.0).abs() < 1e-6);
}

#[test]
fn score_stays_in_unit_range() {
    let mut prefs = UserPreferences::new("u");
    prefs.categories.insert(Category::Fashion, 1.0);
    prefs.preferred_locations = vec!["Seongsu".to_string()];
    prefs.embedding = Some(vec![1.0, 0.0]);

    let mut item = popup("a", Category::Fashion, "Seongsu");
    item.current_participants = 100;
    item.days_left = 2;
    item.daily_momentum = vec![50.0; 7];
    item.embedding = Some(vec![1.0, 0.0]);

    let similar = vec!["user-0".to_string()];
    let mut participations = HashMap::new();
    participations.insert("user-0".to_string(), HashSet::from(["a".to_string()]));

    let maxed = scorer().score(&item, &prefs, &similar, &participations);
    assert!(maxed.score <= 1.0 + 1e-9);
    assert!((maxed.score - 1.0).abs() < 1e-6);

    let bare = popup("b", Category::Tech, "Busan");
    let floor = scorer().score(&bare, &UserPreferences::new("v"), &[], &HashMap::new());
    assert!(floor.score >= 0.0);
}

#[test]
fn recommend_excludes_participated_items() {
    let mut prefs = UserPreferences::new("u");
    prefs.participation_history = vec!["a".to_string()];

    let items = vec![
        popup("a", Category::Fashion, "Seongsu"),
        popup("b", Category::Fashion, "Seongsu"),
    ];

    let recommendations = scorer().recommend(&items, &prefs, &[], &HashMap::new(), None);

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].item_id, "b");
}

#[test]
fn recommend_sorts_descending_and_truncates() {
    let prefs = UserPreferences::new("u");

    let mut low = popup("low", Category::Food, "Yeonnam");
    low.current_participants = 10;
    let mut mid = popup("mid", Category::Food, "Yeonnam");
    mid.current_participants = 50;
    let mut high = popup("high", Category::Food, "Yeonnam");
    high.current_participants = 90;

    let items = vec![low, high, mid];
    let recommendations = scorer().recommend(&items, &prefs, &[], &HashMap::new(), Some(2));

    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0].item_id, "high");
    assert_eq!(recommendations[1].item_id, "mid");
    assert!(recommendations[0].breakdown.score >= recommendations[1].breakdown.score);
}

#[test]
fn recommend_empty_items_yields_empty() {
    let prefs = UserPreferences::new("u");
    let recommendations = scorer().recommend(&[], &prefs, &[], &HashMap::new(), None);

    assert!(recommendations.is_empty());
}

#[test]
fn near_goal_items_explain_themselves() {
    let prefs = UserPreferences::new("u");
    let mut item = popup("a", Category::Food, "Yeonnam");
    item.current_participants = 85;

    let breakdown = scorer().score(&item, &prefs, &[], &HashMap::new());

    assert!(breakdown
        .reasons
        .iter()
        .any(|reason| reason.contains("funding goal")));
}
