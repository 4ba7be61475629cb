use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::ScoringConfig;
use crate::{clamp01, log10_safe, mean, PopupItem};

const LEADER_LOG_CEILING: f64 = 7.0;
const HISTORY_FULL_DAYS: f64 = 14.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionWeights {
    pub momentum: f64,
    pub progress: f64,
    pub leader: f64,
    pub location: f64,
    pub category: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        Self {
            momentum: 0.30,
            progress: 0.25,
            leader: 0.20,
            location: 0.10,
            category: 0.15,
        }
    }
}

impl PredictionWeights {
    pub fn normalized(&self) -> Self {
        let total = self.momentum + self.progress + self.leader + self.location + self.category;
        if total <= 0.0 {
            return PredictionWeights::default();
        }
        Self {
            momentum: self.momentum / total,
            progress: self.progress / total,
            leader: self.leader / total,
            location: self.location / total,
            category: self.category / total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFactors {
    pub momentum: f64,
    pub progress: f64,
    pub leader: f64,
    pub location: f64,
    pub category: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessPrediction {
    pub item_id: String,
    pub probability: f64,
    pub risk: RiskLevel,
    pub confidence: f64,
    pub factors: PredictionFactors,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SuccessPredictor {
    weights: PredictionWeights,
    momentum_ceiling: f64,
}

impl SuccessPredictor {
    pub fn new(weights: PredictionWeights, momentum_ceiling: f64) -> Self {
        Self {
            weights: weights.normalized(),
            momentum_ceiling: momentum_ceiling.max(1.0),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.prediction.clone(), config.momentum.ceiling)
    }

    pub fn momentum_factor(&self, item: &PopupItem) -> f64 {
        let level = clamp01(mean(&item.daily_momentum) / self.momentum_ceiling);
        let trend = momentum_trend(&item.daily_momentum);
        clamp01(0.6 * level + 0.4 * trend)
    }

    pub fn leader_factor(&self, item: &PopupItem) -> f64 {
        match item.leader_followers {
            Some(followers) if followers > 0 => {
                clamp01(log10_safe(followers as f64) / LEADER_LOG_CEILING)
            }
            _ => 0.0,
        }
    }

    pub fn predict(&self, item: &PopupItem) -> SuccessPrediction {
        let factors = PredictionFactors {
            momentum: self.momentum_factor(item),
            progress: item.progress(),
            leader: self.leader_factor(item),
            location: location_desirability(&item.location),
            category: item.category.desirability(),
        };

        let probability = clamp01(
            self.weights.momentum * factors.momentum
                + self.weights.progress * factors.progress
                + self.weights.leader * factors.leader
                + self.weights.location * factors.location
                + self.weights.category * factors.category,
        );

        let risk = risk_level(probability, item.days_left);
        let confidence = confidence_for(item);
        let recommendations = build_recommendations(item, &factors);

        SuccessPrediction {
            item_id: item.id.clone(),
            probability,
            risk,
            confidence,
            factors,
            recommendations,
        }
    }

    pub fn batch(&self, items: &[PopupItem]) -> Vec<SuccessPrediction> {
        items.iter().map(|item| self.predict(item)).collect()
    }

    pub fn at_risk(&self, items: &[PopupItem], threshold: f64) -> Vec<SuccessPrediction> {
        let mut flagged: Vec<SuccessPrediction> = items
            .iter()
            .map(|item| self.predict(item))
            .filter(|prediction| prediction.probability < threshold)
            .collect();

        flagged.sort_by(|a, b| {
            a.probability
                .partial_cmp(&b.probability)
                .unwrap_or(Ordering::Equal)
        });
        flagged
    }
}

// Compares the recent half of the daily series against the early half.
// 0.5 means flat, above means accelerating.
fn momentum_trend(daily: &[f64]) -> f64 {
    if daily.len() < 2 {
        return 0.5;
    }
    let split = daily.len() / 2;
    let early = mean(&daily[..split]);
    let recent = mean(&daily[split..]);

    if early <= 0.0 {
        return if recent > 0.0 { 1.0 } else { 0.5 };
    }
    clamp01(0.5 + (recent - early) / (2.0 * early))
}

pub fn location_desirability(location: &str) -> f64 {
    match location.to_lowercase().as_str() {
        "seongsu" => 1.0,
        "hongdae" => 0.9,
        "gangnam" => 0.85,
        "hannam" => 0.8,
        "apgujeong" => 0.8,
        "yeonnam" => 0.75,
        "itaewon" => 0.7,
        "jamsil" => 0.65,
        "busan" => 0.6,
        _ => 0.5,
    }
}

pub fn risk_level(probability: f64, days_left: u32) -> RiskLevel {
    if probability < 0.40 {
        return RiskLevel::High;
    }
    if days_left <= 2 && probability < 0.75 {
        return RiskLevel::High;
    }
    if probability >= 0.65 && days_left > 3 {
        return RiskLevel::Low;
    }
    RiskLevel::Medium
}

fn confidence_for(item: &PopupItem) -> f64 {
    let history = clamp01(item.daily_momentum.len() as f64 / HISTORY_FULL_DAYS);
    let brand = if item.brand_popups.is_some() { 1.0 } else { 0.0 };
    clamp01(0.3 + 0.5 * history + 0.2 * brand)
}

fn build_recommendations(item: &PopupItem, factors: &PredictionFactors) -> Vec<String> {
    let mut recommendations = Vec::new();

    if item.leader_followers.is_none() {
        recommendations
            .push("No leader attached; run leader matching to extend reach.".to_string());
    }
    if factors.momentum < 0.3 {
        recommendations.push(
            "Daily sign-ups are flat; push a promotion or leader shout-out this week.".to_string(),
        );
    }
    if factors.progress < 0.25 && item.days_left <= 7 {
        recommendations.push(
            "Under a quarter funded with a week left; consider revising the goal.".to_string(),
        );
    }
    if factors.location <= 0.5 {
        recommendations.push(format!(
            "{} draws limited walk-in traffic; plan extra online promotion.",
            item.location
        ));
    }

    recommendations
}
