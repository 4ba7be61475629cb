use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::config::ScoringConfig;
use crate::profile::UserPreferences;
use crate::{clamp01, cosine_similarity, PopupItem};

pub const DEFAULT_LIMIT: usize = 10;

const CATEGORY_SHARE: f64 = 0.7;
const LOCATION_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridWeights {
    pub collaborative: f64,
    pub content: f64,
    pub popularity: f64,
    pub trending: f64,
    pub ai_boost: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.35,
            content: 0.25,
            popularity: 0.20,
            trending: 0.10,
            ai_boost: 0.10,
        }
    }
}

impl HybridWeights {
    pub fn normalized(&self) -> Self {
        let total = self.collaborative + self.content + self.popularity + self.trending
            + self.ai_boost;
        if total <= 0.0 {
            return HybridWeights::default();
        }
        Self {
            collaborative: self.collaborative / total,
            content: self.content / total,
            popularity: self.popularity / total,
            trending: self.trending / total,
            ai_boost: self.ai_boost / total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub collaborative: f64,
    pub content: f64,
    pub popularity: f64,
    pub trending: f64,
    pub ai_boost: f64,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: String,
    pub name: String,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone)]
pub struct HybridScorer {
    weights: HybridWeights,
    momentum_ceiling: f64,
}

impl HybridScorer {
    pub fn new(weights: HybridWeights, momentum_ceiling: f64) -> Self {
        Self {
            weights: weights.normalized(),
            momentum_ceiling: momentum_ceiling.max(1.0),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.hybrid.clone(), config.momentum.ceiling)
    }

    pub fn collaborative(
        &self,
        item: &PopupItem,
        similar_users: &[String],
        participations: &HashMap<String, HashSet<String>>,
    ) -> f64 {
        if similar_users.is_empty() {
            return 0.0;
        }
        let hits = similar_users
            .iter()
            .filter(|user| {
                participations
                    .get(user.as_str())
                    .map(|items| items.contains(&item.id))
                    .unwrap_or(false)
            })
            .count();
        clamp01(hits as f64 / similar_users.len() as f64)
    }

    pub fn content(&self, item: &PopupItem, prefs: &UserPreferences) -> f64 {
        let category_weight = prefs
            .categories
            .get(&item.category)
            .copied()
            .unwrap_or(0.0);
        let location_match = if prefs.prefers_location(&item.location) {
            1.0
        } else {
            0.0
        };
        clamp01(CATEGORY_SHARE * clamp01(category_weight) + LOCATION_SHARE * location_match)
    }

    pub fn popularity(&self, item: &PopupItem) -> f64 {
        let urgency = if item.days_left <= 3 {
            0.10
        } else if item.days_left <= 7 {
            0.05
        } else {
            0.0
        };
        clamp01(item.progress() + urgency)
    }

    pub fn trending(&self, item: &PopupItem) -> f64 {
        clamp01(item.momentum_per_day() / self.momentum_ceiling)
    }

    pub fn ai_boost(&self, item: &PopupItem, prefs: &UserPreferences) -> f64 {
        match (prefs.embedding.as_deref(), item.embedding.as_deref()) {
            (Some(user), Some(popup)) => (cosine_similarity(user, popup) + 1.0) / 2.0,
            _ => 0.0,
        }
    }

    pub fn score(
        &self,
        item: &PopupItem,
        prefs: &UserPreferences,
        similar_users: &[String],
        participations: &HashMap<String, HashSet<String>>,
    ) -> ScoreBreakdown {
        let collaborative = self.collaborative(item, similar_users, participations);
        let content = self.content(item, prefs);
        let popularity = self.popularity(item);
        let trending = self.trending(item);
        let ai_boost = self.ai_boost(item, prefs);

        let score = clamp01(
            self.weights.collaborative * collaborative
                + self.weights.content * content
                + self.weights.popularity * popularity
                + self.weights.trending * trending
                + self.weights.ai_boost * ai_boost,
        );

        let reasons = build_reasons(item, prefs, collaborative, trending, ai_boost);

        ScoreBreakdown {
            collaborative,
            content,
            popularity,
            trending,
            ai_boost,
            score,
            reasons,
        }
    }

    pub fn recommend(
        &self,
        items: &[PopupItem],
        prefs: &UserPreferences,
        similar_users: &[String],
        participations: &HashMap<String, HashSet<String>>,
        limit: Option<usize>,
    ) -> Vec<Recommendation> {
        let mut ranked: Vec<Recommendation> = items
            .iter()
            .filter(|item| !prefs.has_participated(&item.id))
            .map(|item| Recommendation {
                item_id: item.id.clone(),
                name: item.name.clone(),
                breakdown: self.score(item, prefs, similar_users, participations),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.breakdown
                .score
                .partial_cmp(&a.breakdown.score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit.unwrap_or(DEFAULT_LIMIT));
        ranked
    }
}

fn build_reasons(
    item: &PopupItem,
    prefs: &UserPreferences,
    collaborative: f64,
    trending: f64,
    ai_boost: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let category_weight = prefs
        .categories
        .get(&item.category)
        .copied()
        .unwrap_or(0.0);

    if collaborative >= 0.5 {
        reasons.push("popular with users like you".to_string());
    }
    if category_weight >= 0.6 {
        reasons.push(format!("matches your interest in {}", item.category.label()));
    }
    if prefs.prefers_location(&item.location) {
        reasons.push(format!("near your preferred area {}", item.location));
    }
    if item.progress() >= 0.7 {
        reasons.push("close to funding goal".to_string());
    }
    if item.days_left <= 3 {
        reasons.push("ending soon".to_string());
    }
    if trending >= 0.6 {
        reasons.push("gaining momentum fast".to_string());
    }
    if ai_boost >= 0.75 {
        reasons.push("strong taste match".to_string());
    }

    reasons
}
