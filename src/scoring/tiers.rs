use serde::{Deserialize, Serialize};

use crate::{CampaignBrief, Category, LeaderProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderTier {
    Nano,
    Micro,
    Mid,
    Macro,
    Mega,
}

impl LeaderTier {
    pub fn from_followers(followers: u64) -> Self {
        if followers < 1_000 {
            LeaderTier::Nano
        } else if followers < 10_000 {
            LeaderTier::Micro
        } else if followers < 100_000 {
            LeaderTier::Mid
        } else if followers < 1_000_000 {
            LeaderTier::Macro
        } else {
            LeaderTier::Mega
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeaderTier::Nano => "nano",
            LeaderTier::Micro => "micro",
            LeaderTier::Mid => "mid",
            LeaderTier::Macro => "macro",
            LeaderTier::Mega => "mega",
        }
    }

    // Per-campaign rates in KRW.
    pub fn pricing(self) -> TierPricing {
        match self {
            LeaderTier::Nano => TierPricing {
                min_rate: 100_000.0,
                base_rate: 200_000.0,
                max_rate: 350_000.0,
            },
            LeaderTier::Micro => TierPricing {
                min_rate: 300_000.0,
                base_rate: 600_000.0,
                max_rate: 1_000_000.0,
            },
            LeaderTier::Mid => TierPricing {
                min_rate: 1_000_000.0,
                base_rate: 2_500_000.0,
                max_rate: 4_000_000.0,
            },
            LeaderTier::Macro => TierPricing {
                min_rate: 4_000_000.0,
                base_rate: 8_000_000.0,
                max_rate: 15_000_000.0,
            },
            LeaderTier::Mega => TierPricing {
                min_rate: 15_000_000.0,
                base_rate: 30_000_000.0,
                max_rate: 60_000_000.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierPricing {
    pub min_rate: f64,
    pub base_rate: f64,
    pub max_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub tier: LeaderTier,
    pub estimated: f64,
    pub range: CostRange,
}

pub fn category_premium(category: Category) -> f64 {
    match category {
        Category::Fashion | Category::Beauty => 1.2,
        Category::Food
        | Category::Tech
        | Category::Art
        | Category::Music
        | Category::Lifestyle
        | Category::Sports => 1.0,
    }
}

pub fn estimate_campaign_cost(leader: &LeaderProfile, campaign: &CampaignBrief) -> CostEstimate {
    estimate_tier_cost(LeaderTier::from_followers(leader.followers), campaign)
}

pub fn estimate_tier_cost(tier: LeaderTier, campaign: &CampaignBrief) -> CostEstimate {
    let pricing = tier.pricing();
    let multiplier = campaign.priority.multiplier() * category_premium(campaign.category);

    CostEstimate {
        tier,
        estimated: pricing.base_rate * multiplier,
        range: CostRange {
            min: pricing.min_rate * multiplier,
            max: pricing.max_rate * multiplier,
        },
    }
}
