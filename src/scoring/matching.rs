use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::ScoringConfig;
use crate::scoring::tiers::LeaderTier;
use crate::{clamp01, log10_safe, AudienceProfile, CampaignBrief, LeaderProfile};

pub const DEFAULT_LIMIT: usize = 5;

const ENGAGEMENT_RATE_CEILING: f64 = 0.08;
const REACH_LOG_CEILING: f64 = 7.0;
const RECENCY_DECAY_DAYS: f64 = 180.0;
const CAMPAIGN_VOLUME_CEILING: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub audience: f64,
    pub engagement: f64,
    pub category: f64,
    pub performance: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            audience: 0.30,
            engagement: 0.25,
            category: 0.25,
            performance: 0.20,
        }
    }
}

impl MatchWeights {
    pub fn normalized(&self) -> Self {
        let total = self.audience + self.engagement + self.category + self.performance;
        if total <= 0.0 {
            return MatchWeights::default();
        }
        Self {
            audience: self.audience / total,
            engagement: self.engagement / total,
            category: self.category / total,
            performance: self.performance / total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub audience: f64,
    pub engagement: f64,
    pub category: f64,
    pub performance: f64,
    pub score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderMatch {
    pub leader_id: String,
    pub leader_name: String,
    pub tier: LeaderTier,
    pub expected_participants: u64,
    pub breakdown: MatchBreakdown,
}

#[derive(Debug, Clone)]
pub struct LeaderMatcher {
    weights: MatchWeights,
}

impl LeaderMatcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self {
            weights: weights.normalized(),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.matching.clone())
    }

    // Age, gender, and interests carry the score; shared top locations add a
    // small bonus on top, clamped back into range.
    pub fn audience_score(&self, leader: &AudienceProfile, target: &AudienceProfile) -> f64 {
        let age = leader.age_bands.overlap(&target.age_bands);
        let gender = 1.0 - (leader.female_ratio - target.female_ratio).abs();
        let interests = interest_overlap(leader, target);
        let locations = location_overlap(&leader.top_locations, &target.top_locations);

        clamp01(0.40 * age + 0.20 * clamp01(gender) + 0.40 * interests + 0.15 * locations)
    }

    // Raw engagement rate favors small accounts and follower reach favors
    // big ones. Taking the better of the two blends keeps nano and mega
    // leaders comparable on one scale.
    pub fn engagement_score(&self, leader: &LeaderProfile) -> f64 {
        let rate = clamp01(leader.engagement_rate / ENGAGEMENT_RATE_CEILING);
        let reach = clamp01(log10_safe(leader.followers as f64) / REACH_LOG_CEILING);
        clamp01((0.65 * rate + 0.35 * reach).max(0.35 * rate + 0.65 * reach))
    }

    pub fn category_score(&self, leader: &LeaderProfile, campaign: &CampaignBrief) -> f64 {
        if leader.category == campaign.category {
            1.0
        } else if leader.category.related().contains(&campaign.category) {
            0.6
        } else {
            0.1
        }
    }

    pub fn performance_score(&self, leader: &LeaderProfile) -> f64 {
        let volume = clamp01(leader.total_campaigns as f64 / CAMPAIGN_VOLUME_CEILING);
        let success = leader.success_rate();
        let recency = match leader.days_since_last_campaign {
            Some(days) => (-(days as f64) / RECENCY_DECAY_DAYS).exp(),
            None => 0.0,
        };
        clamp01(0.25 * volume + 0.55 * success + 0.20 * recency)
    }

    pub fn expected_participants(&self, leader: &LeaderProfile) -> u64 {
        (leader.followers as f64 * clamp01(leader.conversion_rate)).round() as u64
    }

    pub fn score(&self, leader: &LeaderProfile, campaign: &CampaignBrief) -> MatchBreakdown {
        let audience = self.audience_score(&leader.audience, &campaign.target_audience);
        let engagement = self.engagement_score(leader);
        let category = self.category_score(leader, campaign);
        let performance = self.performance_score(leader);

        let score = clamp01(
            self.weights.audience * audience
                + self.weights.engagement * engagement
                + self.weights.category * category
                + self.weights.performance * performance,
        );

        let reasons = build_reasons(
            leader,
            campaign,
            audience,
            engagement,
            performance,
            self.expected_participants(leader),
        );

        MatchBreakdown {
            audience,
            engagement,
            category,
            performance,
            score,
            reasons,
        }
    }

    pub fn match_leaders(
        &self,
        leaders: &[LeaderProfile],
        campaign: &CampaignBrief,
        limit: Option<usize>,
    ) -> Vec<LeaderMatch> {
        let mut ranked: Vec<LeaderMatch> = leaders
            .iter()
            .map(|leader| LeaderMatch {
                leader_id: leader.id.clone(),
                leader_name: leader.name.clone(),
                tier: LeaderTier::from_followers(leader.followers),
                expected_participants: self.expected_participants(leader),
                breakdown: self.score(leader, campaign),
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

    pub fn find_best(
        &self,
        leaders: &[LeaderProfile],
        campaign: &CampaignBrief,
    ) -> Option<LeaderMatch> {
        self.match_leaders(leaders, campaign, Some(1))
            .into_iter()
            .next()
    }
}

// Shared interest mass relative to what the campaign asks for. A campaign
// with no stated interests gets no credit here rather than a free 1.0.
fn interest_overlap(leader: &AudienceProfile, target: &AudienceProfile) -> f64 {
    let want: f64 = target.interests.values().map(|w| clamp01(*w)).sum();
    if want <= 0.0 {
        return 0.0;
    }
    let have: f64 = target
        .interests
        .iter()
        .map(|(category, want_weight)| {
            let have_weight = leader.interests.get(category).copied().unwrap_or(0.0);
            clamp01(have_weight).min(clamp01(*want_weight))
        })
        .sum();
    clamp01(have / want)
}

fn location_overlap(leader_locations: &[String], target_locations: &[String]) -> f64 {
    if target_locations.is_empty() {
        return 0.0;
    }
    let hits = target_locations
        .iter()
        .filter(|target| {
            leader_locations
                .iter()
                .any(|have| have.eq_ignore_ascii_case(target))
        })
        .count();
    hits as f64 / target_locations.len() as f64
}

fn build_reasons(
    leader: &LeaderProfile,
    campaign: &CampaignBrief,
    audience: f64,
    engagement: f64,
    performance: f64,
    expected_participants: u64,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if leader.category == campaign.category {
        reasons.push(format!("category match: {}", leader.category.label()));
    } else if leader.category.related().contains(&campaign.category) {
        reasons.push(format!(
            "adjacent category: {} audience overlaps {}",
            leader.category.label(),
            campaign.category.label()
        ));
    }
    if audience >= 0.7 {
        reasons.push(format!(
            "audience alignment {}",
            crate::format_percent(audience)
        ));
    }
    if engagement >= 0.7 {
        reasons.push("high engagement for tier".to_string());
    }
    if performance >= 0.7 {
        reasons.push("strong campaign track record".to_string());
    }
    if campaign.goal_participants > 0 && expected_participants >= campaign.goal_participants as u64
    {
        reasons.push("expected reach covers the participant goal".to_string());
    }

    reasons
}
