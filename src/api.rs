use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use zzik_score::profile::UserPreferences;
use zzik_score::scoring::{
    CostEstimate, LeaderMatch, MatchBreakdown, PredictionFactors, Recommendation,
    SuccessPrediction,
};
use zzik_score::{CampaignBrief, LeaderProfile, PopupItem};

#[derive(Debug, Deserialize)]
pub struct ApiRecommendRequest {
    pub user_id: Option<String>,
    pub profile: Option<UserPreferences>,
    pub items: Vec<PopupItem>,
    #[serde(default)]
    pub similar_user_ids: Vec<String>,
    #[serde(default)]
    pub participations: HashMap<String, Vec<String>>,
    pub limit: Option<usize>,
    pub use_embeddings: Option<bool>,
}

impl ApiRecommendRequest {
    pub fn participation_sets(&self) -> HashMap<String, HashSet<String>> {
        self.participations
            .iter()
            .map(|(user, items)| (user.clone(), items.iter().cloned().collect()))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRecommendResponse {
    pub user_id: String,
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMatchRequest {
    pub campaign: CampaignBrief,
    pub leaders: Vec<LeaderProfile>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApiMatchedLeader {
    pub leader_id: String,
    pub leader_name: String,
    pub tier: String,
    pub expected_participants: u64,
    pub breakdown: MatchBreakdown,
    pub cost: CostEstimate,
}

impl ApiMatchedLeader {
    pub fn from_match(matched: LeaderMatch, cost: CostEstimate) -> Self {
        Self {
            leader_id: matched.leader_id,
            leader_name: matched.leader_name,
            tier: matched.tier.label().to_string(),
            expected_participants: matched.expected_participants,
            breakdown: matched.breakdown,
            cost,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiMatchResponse {
    pub campaign_id: String,
    pub matches: Vec<ApiMatchedLeader>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPredictRequest {
    pub items: Vec<PopupItem>,
    pub at_risk_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ApiPredictionEntry {
    pub item_id: String,
    pub probability: f64,
    pub risk: String,
    pub confidence: f64,
    pub factors: PredictionFactors,
    pub recommendations: Vec<String>,
}

impl ApiPredictionEntry {
    pub fn from_prediction(prediction: SuccessPrediction) -> Self {
        Self {
            item_id: prediction.item_id,
            probability: prediction.probability,
            risk: prediction.risk.label().to_string(),
            confidence: prediction.confidence,
            factors: prediction.factors,
            recommendations: prediction.recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPredictResponse {
    pub predictions: Vec<ApiPredictionEntry>,
    pub at_risk: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiInteractionRequest {
    pub item: PopupItem,
    pub hour: Option<u8>,
}
