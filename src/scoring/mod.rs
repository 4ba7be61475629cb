pub mod matching;
pub mod predict;
pub mod recommend;
pub mod tiers;

pub use matching::{LeaderMatch, LeaderMatcher, MatchBreakdown, MatchWeights};
pub use predict::{
    risk_level, PredictionFactors, PredictionWeights, RiskLevel, SuccessPrediction,
    SuccessPredictor,
};
pub use recommend::{HybridScorer, HybridWeights, Recommendation, ScoreBreakdown};
pub use tiers::{
    estimate_campaign_cost, estimate_tier_cost, CostEstimate, CostRange, LeaderTier, TierPricing,
};
