use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{clamp01, Category, PopupItem};

const INTEREST_ALPHA: f64 = 0.2;
const HOUR_ALPHA: f64 = 0.3;
const HISTORY_CAP: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub user_id: String,
    #[serde(default)]
    pub categories: HashMap<Category, f64>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub participation_history: Vec<String>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub avg_engagement_hour: Option<f64>,
}

impl UserPreferences {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            categories: HashMap::new(),
            preferred_locations: Vec::new(),
            participation_history: Vec::new(),
            embedding: None,
            avg_engagement_hour: None,
        }
    }

    pub fn has_participated(&self, item_id: &str) -> bool {
        self.participation_history.iter().any(|id| id == item_id)
    }

    pub fn prefers_location(&self, location: &str) -> bool {
        self.preferred_locations
            .iter()
            .any(|preferred| preferred.eq_ignore_ascii_case(location))
    }

    // Exponential moving average over a one-hot category signal. Every
    // interaction decays the whole map, then credits the touched category,
    // so weights stay in [0,1] without renormalizing.
    pub fn update_from_interaction(&mut self, item: &PopupItem, hour: Option<u8>) {
        for weight in self.categories.values_mut() {
            *weight *= 1.0 - INTEREST_ALPHA;
        }
        let entry = self.categories.entry(item.category).or_insert(0.0);
        *entry = clamp01(*entry + INTEREST_ALPHA);

        if !self.has_participated(&item.id) {
            self.participation_history.push(item.id.clone());
            if self.participation_history.len() > HISTORY_CAP {
                self.participation_history.remove(0);
            }
        }

        if let Some(hour) = hour {
            let hour = f64::from(hour.min(23));
            self.avg_engagement_hour = Some(match self.avg_engagement_hour {
                Some(avg) => avg * (1.0 - HOUR_ALPHA) + hour * HOUR_ALPHA,
                None => hour,
            });
        }
    }
}
