use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;

use zzik_score::profile::UserPreferences;
use zzik_score::{
    AgeBands, AudienceProfile, CampaignBrief, Category, LeaderProfile, PopupItem, Priority,
};

const DEMO_SEED: u64 = 7;
const MOMENTUM_DAYS: usize = 7;

struct PopupBlueprint {
    name: &'static str,
    category: Category,
    location: &'static str,
}

const POPUPS: [PopupBlueprint; 8] = [
    PopupBlueprint {
        name: "Seongsu Vinyl Weekend",
        category: Category::Music,
        location: "Seongsu",
    },
    PopupBlueprint {
        name: "Hongdae Sneaker Drop",
        category: Category::Fashion,
        location: "Hongdae",
    },
    PopupBlueprint {
        name: "Hannam Clean Beauty Lab",
        category: Category::Beauty,
        location: "Hannam",
    },
    PopupBlueprint {
        name: "Gangnam Gadget Garage",
        category: Category::Tech,
        location: "Gangnam",
    },
    PopupBlueprint {
        name: "Yeonnam Dessert Alley",
        category: Category::Food,
        location: "Yeonnam",
    },
    PopupBlueprint {
        name: "Itaewon Print Fair",
        category: Category::Art,
        location: "Itaewon",
    },
    PopupBlueprint {
        name: "Jamsil Home Fragrance Week",
        category: Category::Lifestyle,
        location: "Jamsil",
    },
    PopupBlueprint {
        name: "Apgujeong Run Club Popup",
        category: Category::Sports,
        location: "Apgujeong",
    },
];

pub fn demo_popups() -> Vec<PopupItem> {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);

    POPUPS
        .iter()
        .map(|blueprint| {
            let goal = rng.gen_range(60..300);
            let progress = rng.gen_range(0.1..0.95);
            let base_rate: f64 = rng.gen_range(1.0..16.0);
            let daily_momentum = (0..MOMENTUM_DAYS)
                .map(|_| (base_rate * rng.gen_range(0.6..1.4)).round())
                .collect();
            let leader_followers = if rng.gen::<f64>() < 0.6 {
                Some(rng.gen_range(800..2_000_000))
            } else {
                None
            };

            PopupItem {
                id: stable_id("popup", blueprint.name),
                name: blueprint.name.to_string(),
                category: blueprint.category,
                location: blueprint.location.to_string(),
                current_participants: (goal as f64 * progress).round() as u32,
                goal_participants: goal,
                days_left: rng.gen_range(1..21),
                daily_momentum,
                embedding: None,
                leader_followers,
                brand_popups: if rng.gen::<f64>() < 0.5 {
                    Some(rng.gen_range(1..12))
                } else {
                    None
                },
            }
        })
        .collect()
}

pub fn demo_leaders() -> Vec<LeaderProfile> {
    vec![
        LeaderProfile {
            id: stable_id("leader", "dain.style"),
            name: "dain.style".to_string(),
            category: Category::Fashion,
            followers: 482_000,
            engagement_rate: 0.031,
            audience: AudienceProfile {
                age_bands: AgeBands {
                    teens: 0.18,
                    twenties: 0.52,
                    thirties: 0.22,
                    forties_up: 0.08,
                },
                female_ratio: 0.74,
                top_locations: vec!["Seongsu".to_string(), "Hongdae".to_string()],
                interests: HashMap::from([
                    (Category::Fashion, 0.9),
                    (Category::Beauty, 0.5),
                ]),
            },
            total_campaigns: 14,
            successful_campaigns: 11,
            days_since_last_campaign: Some(21),
            conversion_rate: 0.0016,
        },
        LeaderProfile {
            id: stable_id("leader", "glow.haeun"),
            name: "glow.haeun".to_string(),
            category: Category::Beauty,
            followers: 8_200,
            engagement_rate: 0.067,
            audience: AudienceProfile {
                age_bands: AgeBands {
                    teens: 0.24,
                    twenties: 0.58,
                    thirties: 0.14,
                    forties_up: 0.04,
                },
                female_ratio: 0.88,
                top_locations: vec!["Hannam".to_string()],
                interests: HashMap::from([
                    (Category::Beauty, 0.85),
                    (Category::Lifestyle, 0.4),
                ]),
            },
            total_campaigns: 5,
            successful_campaigns: 4,
            days_since_last_campaign: Some(9),
            conversion_rate: 0.012,
        },
        LeaderProfile {
            id: stable_id("leader", "seoul.eats"),
            name: "seoul.eats".to_string(),
            category: Category::Food,
            followers: 96_500,
            engagement_rate: 0.044,
            audience: AudienceProfile {
                age_bands: AgeBands {
                    teens: 0.08,
                    twenties: 0.44,
                    thirties: 0.34,
                    forties_up: 0.14,
                },
                female_ratio: 0.61,
                top_locations: vec!["Yeonnam".to_string(), "Itaewon".to_string()],
                interests: HashMap::from([
                    (Category::Food, 0.95),
                    (Category::Lifestyle, 0.35),
                ]),
            },
            total_campaigns: 22,
            successful_campaigns: 15,
            days_since_last_campaign: Some(4),
            conversion_rate: 0.004,
        },
        LeaderProfile {
            id: stable_id("leader", "technote.kr"),
            name: "technote.kr".to_string(),
            category: Category::Tech,
            followers: 1_350_000,
            engagement_rate: 0.018,
            audience: AudienceProfile {
                age_bands: AgeBands {
                    teens: 0.12,
                    twenties: 0.46,
                    thirties: 0.30,
                    forties_up: 0.12,
                },
                female_ratio: 0.32,
                top_locations: vec!["Gangnam".to_string(), "Jamsil".to_string()],
                interests: HashMap::from([(Category::Tech, 0.9)]),
            },
            total_campaigns: 31,
            successful_campaigns: 19,
            days_since_last_campaign: Some(45),
            conversion_rate: 0.0008,
        },
        LeaderProfile {
            id: stable_id("leader", "moon.atelier"),
            name: "moon.atelier".to_string(),
            category: Category::Art,
            followers: 640,
            engagement_rate: 0.092,
            audience: AudienceProfile {
                age_bands: AgeBands {
                    teens: 0.05,
                    twenties: 0.49,
                    thirties: 0.36,
                    forties_up: 0.10,
                },
                female_ratio: 0.57,
                top_locations: vec!["Itaewon".to_string()],
                interests: HashMap::from([
                    (Category::Art, 0.8),
                    (Category::Music, 0.6),
                ]),
            },
            total_campaigns: 2,
            successful_campaigns: 2,
            days_since_last_campaign: None,
            conversion_rate: 0.03,
        },
    ]
}

pub fn demo_profile() -> UserPreferences {
    let mut profile = UserPreferences::new("demo-user");
    profile.categories = HashMap::from([
        (Category::Fashion, 0.8),
        (Category::Beauty, 0.6),
        (Category::Food, 0.4),
    ]);
    profile.preferred_locations = vec!["Seongsu".to_string(), "Hongdae".to_string()];
    profile
}

pub fn demo_campaign() -> CampaignBrief {
    CampaignBrief {
        id: stable_id("campaign", "Hongdae Sneaker Drop"),
        name: "Hongdae Sneaker Drop".to_string(),
        category: Category::Fashion,
        location: "Hongdae".to_string(),
        goal_participants: 250,
        target_audience: AudienceProfile {
            age_bands: AgeBands {
                teens: 0.20,
                twenties: 0.55,
                thirties: 0.20,
                forties_up: 0.05,
            },
            female_ratio: 0.65,
            top_locations: vec!["Hongdae".to_string(), "Seongsu".to_string()],
            interests: HashMap::from([
                (Category::Fashion, 0.9),
                (Category::Lifestyle, 0.3),
            ]),
        },
        priority: Priority::High,
    }
}

pub fn demo_participations(popups: &[PopupItem]) -> HashMap<String, Vec<String>> {
    let mut rng = StdRng::seed_from_u64(DEMO_SEED + 1);
    let mut participations = HashMap::new();

    for idx in 0..6 {
        let joined = popups
            .iter()
            .filter(|_| rng.gen::<f64>() < 0.4)
            .map(|item| item.id.clone())
            .collect();
        participations.insert(format!("similar-user-{}", idx), joined);
    }

    participations
}

fn stable_id(prefix: &str, value: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    format!("{}_{:x}", prefix, u64::from_be_bytes(bytes))
}
