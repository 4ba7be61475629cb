pub mod config;
pub mod embedding;
pub mod eval;
pub mod profile;
pub mod scoring;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fashion,
    Beauty,
    Food,
    Tech,
    Art,
    Music,
    Lifestyle,
    Sports,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Fashion,
        Category::Beauty,
        Category::Food,
        Category::Tech,
        Category::Art,
        Category::Music,
        Category::Lifestyle,
        Category::Sports,
    ];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "fashion" | "apparel" | "clothing" | "streetwear" => Some(Category::Fashion),
            "beauty" | "cosmetics" | "skincare" => Some(Category::Beauty),
            "food" | "fnb" | "dessert" | "cafe" => Some(Category::Food),
            "tech" | "electronics" | "gadgets" => Some(Category::Tech),
            "art" | "design" | "exhibition" => Some(Category::Art),
            "music" | "kpop" | "vinyl" => Some(Category::Music),
            "lifestyle" | "living" | "home" => Some(Category::Lifestyle),
            "sports" | "fitness" | "outdoor" => Some(Category::Sports),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Fashion => "fashion",
            Category::Beauty => "beauty",
            Category::Food => "food",
            Category::Tech => "tech",
            Category::Art => "art",
            Category::Music => "music",
            Category::Lifestyle => "lifestyle",
            Category::Sports => "sports",
        }
    }

    // Hand-maintained relatedness table, kept symmetric. Pairs listed here
    // score 0.6 in leader matching; everything else falls to the baseline.
    pub fn related(self) -> &'static [Category] {
        match self {
            Category::Fashion => &[Category::Beauty, Category::Lifestyle],
            Category::Beauty => &[Category::Fashion, Category::Lifestyle],
            Category::Food => &[Category::Lifestyle],
            Category::Tech => &[],
            Category::Art => &[Category::Music],
            Category::Music => &[Category::Art],
            Category::Lifestyle => &[
                Category::Fashion,
                Category::Beauty,
                Category::Food,
                Category::Sports,
            ],
            Category::Sports => &[Category::Lifestyle],
        }
    }

    // How well a pop-up in this category draws walk-in crowds, per ZZIK
    // campaign outcomes to date.
    pub fn desirability(self) -> f64 {
        match self {
            Category::Fashion => 0.9,
            Category::Beauty => 0.85,
            Category::Food => 0.8,
            Category::Art => 0.7,
            Category::Music => 0.7,
            Category::Lifestyle => 0.65,
            Category::Tech => 0.6,
            Category::Sports => 0.55,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "normal" | "standard" => Some(Priority::Normal),
            "high" | "rush" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Priority::Low => 0.85,
            Priority::Normal => 1.0,
            Priority::High => 1.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub location: String,
    pub current_participants: u32,
    pub goal_participants: u32,
    pub days_left: u32,
    #[serde(default)]
    pub daily_momentum: Vec<f64>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub leader_followers: Option<u64>,
    #[serde(default)]
    pub brand_popups: Option<u32>,
}

impl PopupItem {
    pub fn progress(&self) -> f64 {
        if self.goal_participants == 0 {
            return 0.0;
        }
        clamp01(self.current_participants as f64 / self.goal_participants as f64)
    }

    pub fn momentum_per_day(&self) -> f64 {
        mean(&self.daily_momentum)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgeBands {
    pub teens: f64,
    pub twenties: f64,
    pub thirties: f64,
    pub forties_up: f64,
}

impl AgeBands {
    // Histogram intersection. Both sides normally sum to ~1, so the result
    // lands in [0,1]; clamped anyway for skewed inputs.
    pub fn overlap(&self, other: &AgeBands) -> f64 {
        clamp01(
            self.teens.min(other.teens)
                + self.twenties.min(other.twenties)
                + self.thirties.min(other.thirties)
                + self.forties_up.min(other.forties_up),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AudienceProfile {
    pub age_bands: AgeBands,
    pub female_ratio: f64,
    #[serde(default)]
    pub top_locations: Vec<String>,
    #[serde(default)]
    pub interests: HashMap<Category, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderProfile {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub followers: u64,
    pub engagement_rate: f64,
    pub audience: AudienceProfile,
    pub total_campaigns: u32,
    pub successful_campaigns: u32,
    #[serde(default)]
    pub days_since_last_campaign: Option<u32>,
    pub conversion_rate: f64,
}

impl LeaderProfile {
    pub fn success_rate(&self) -> f64 {
        if self.total_campaigns == 0 {
            return 0.0;
        }
        clamp01(self.successful_campaigns as f64 / self.total_campaigns as f64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignBrief {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub location: String,
    pub goal_participants: u32,
    #[serde(default)]
    pub target_audience: AudienceProfile,
    #[serde(default)]
    pub priority: Priority,
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 1e-12 || norm_b <= 1e-12 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn log10_safe(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        value.log10()
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
