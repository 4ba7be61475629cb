use zzik_score::profile::UserPreferences;
use zzik_score::{Category, PopupItem};

fn popup(id: &str, category: Category) -> PopupItem {
    PopupItem {
        id: id.to_string(),
        name: id.to_string(),
        category,
        location: "Seongsu".to_string(),
        current_participants: 10,
        goal_participants: 100,
        days_left: 10,
        daily_momentum: Vec::new(),
        embedding: None,
        leader_followers: None,
        brand_popups: None,
    }
}

#[test]
fn interaction_nudges_category_weight_up() {
    let mut prefs = UserPreferences::new("u");

    prefs.update_from_interaction(&popup("a", Category::Fashion), None);
    let first = prefs.categories[&Category::Fashion];
    assert!((first - 0.2).abs() < 1e-6);

    prefs.update_from_interaction(&popup("b", Category::Fashion), None);
    let second = prefs.categories[&Category::Fashion];
    assert!((second - 0.36).abs() < 1e-6);
}

#[test]
fn repeated_interactions_stay_bounded() {
    let mut prefs = UserPreferences::new("u");

    for idx in 0..200 {
        prefs.update_from_interaction(&popup(&format!("item-{}", idx), Category::Food), None);
    }

    let weight = prefs.categories[&Category::Food];
    assert!(weight <= 1.0);
    assert!(weight > 0.95);
}

#[test]
fn interaction_decays_other_categories() {
    let mut prefs = UserPreferences::new("u");
    prefs.categories.insert(Category::Fashion, 0.5);

    prefs.update_from_interaction(&popup("a", Category::Food), None);

    assert!((prefs.categories[&Category::Fashion] - 0.4).abs() < 1e-6);
    assert!((prefs.categories[&Category::Food] - 0.2).abs() < 1e-6);
}

#[test]
fn history_caps_and_evicts_oldest() {
    let mut prefs = UserPreferences::new("u");

    for idx in 0..101 {
        prefs.update_from_interaction(&popup(&format!("item-{}", idx), Category::Art), None);
    }

    assert_eq!(prefs.participation_history.len(), 100);
    assert!(!prefs.has_participated("item-0"));
    assert!(prefs.has_participated("item-100"));
}

#[test]
fn history_dedupes_repeat_visits() {
    let mut prefs = UserPreferences::new("u");
    let item = popup("a", Category::Music);

    prefs.update_from_interaction(&item, None);
    prefs.update_from_interaction(&item, None);

    assert_eq!(prefs.participation_history.len(), 1);
}

#[test]
fn engagement_hour_follows_moving_average() {
    let mut prefs = UserPreferences::new("u");

    prefs.update_from_interaction(&popup("a", Category::Tech), Some(10));
    assert!((prefs.avg_engagement_hour.unwrap() - 10.0).abs() < 1e-6);

    prefs.update_from_interaction(&popup("b", Category::Tech), Some(20));
    assert!((prefs.avg_engagement_hour.unwrap() - 13.0).abs() < 1e-6);
}

#[test]
fn prefers_location_ignores_case() {
    let mut prefs = UserPreferences::new("u");
    prefs.preferred_locations = vec!["Seongsu".to_string()];

    assert!(prefs.prefers_location("seongsu"));
    assert!(prefs.prefers_location("SEONGSU"));
    assert!(!prefs.prefers_location("Hongdae"));
}
