mod api;
mod demo;
mod server;

use clap::{Args, Parser, Subcommand};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use zzik_score::config::ScoringConfig;
use zzik_score::eval::{EvalRunner, OutcomeSample, WeightTuner};
use zzik_score::profile::UserPreferences;
use zzik_score::scoring::{estimate_tier_cost, HybridScorer, LeaderMatcher, SuccessPredictor};
use zzik_score::{
    format_float, format_number, format_percent, CampaignBrief, LeaderProfile, PopupItem,
};

#[derive(Parser)]
#[command(name = "zzik-score", about = "Pop-up campaign scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Recommend(RecommendArgs),
    Match(MatchArgs),
    Predict(PredictArgs),
    Evaluate(EvaluateArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long)]
    items: Option<PathBuf>,
    #[arg(long)]
    profile: Option<PathBuf>,
    #[arg(long)]
    participations: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    limit: usize,
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct MatchArgs {
    #[arg(long)]
    campaign: Option<PathBuf>,
    #[arg(long)]
    leaders: Option<PathBuf>,
    #[arg(long, default_value_t = 5)]
    limit: usize,
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    #[arg(long)]
    items: Option<PathBuf>,
    #[arg(long)]
    at_risk_threshold: Option<f64>,
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct EvaluateArgs {
    #[arg(long)]
    samples: PathBuf,
    #[arg(long)]
    tune: bool,
    #[arg(long)]
    write_config: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8790)]
    port: u16,
    #[arg(long, default_value = "data/profiles.json")]
    profiles: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Recommend(args) => run_recommend(args).await,
        Command::Match(args) => run_match(args).await,
        Command::Predict(args) => run_predict(args).await,
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::Serve(args) => server::serve(args).await,
    }
}

async fn run_recommend(args: RecommendArgs) -> Result<(), String> {
    let (config, _) = ScoringConfig::load(args.config.clone())?;

    let (items, prefs, participations) = if args.demo {
        let items = demo::demo_popups();
        let participations = demo::demo_participations(&items);
        (items, demo::demo_profile(), participations)
    } else {
        let items_path = args
            .items
            .ok_or_else(|| "missing --items (or pass --demo)".to_string())?;
        let profile_path = args
            .profile
            .ok_or_else(|| "missing --profile (or pass --demo)".to_string())?;
        let items: Vec<PopupItem> = read_json(&items_path)?;
        let prefs: UserPreferences = read_json(&profile_path)?;
        let participations: HashMap<String, Vec<String>> = match args.participations.as_ref() {
            Some(path) => read_json(path)?,
            None => HashMap::new(),
        };
        (items, prefs, participations)
    };

    let similar_users: Vec<String> = participations.keys().cloned().collect();
    let participation_sets = to_sets(&participations);

    let scorer = HybridScorer::from_config(&config);
    let recommendations = scorer.recommend(
        &items,
        &prefs,
        &similar_users,
        &participation_sets,
        Some(args.limit),
    );

    if recommendations.is_empty() {
        println!("No recommendations for {}.", prefs.user_id);
        return Ok(());
    }

    println!("Recommendations for {}:", prefs.user_id);
    for (rank, recommendation) in recommendations.iter().enumerate() {
        println!(
            "{}. {} (score {})",
            rank + 1,
            recommendation.name,
            format_float(recommendation.breakdown.score, 3)
        );
        println!(
            "   collaborative {} | content {} | popularity {} | trending {} | ai {}",
            format_float(recommendation.breakdown.collaborative, 2),
            format_float(recommendation.breakdown.content, 2),
            format_float(recommendation.breakdown.popularity, 2),
            format_float(recommendation.breakdown.trending, 2),
            format_float(recommendation.breakdown.ai_boost, 2)
        );
        if !recommendation.breakdown.reasons.is_empty() {
            println!("   {}", recommendation.breakdown.reasons.join("; "));
        }
    }

    Ok(())
}

async fn run_match(args: MatchArgs) -> Result<(), String> {
    let (config, _) = ScoringConfig::load(args.config.clone())?;

    let (campaign, leaders): (CampaignBrief, Vec<LeaderProfile>) = if args.demo {
        (demo::demo_campaign(), demo::demo_leaders())
    } else {
        let campaign_path = args
            .campaign
            .ok_or_else(|| "missing --campaign (or pass --demo)".to_string())?;
        let leaders_path = args
            .leaders
            .ok_or_else(|| "missing --leaders (or pass --demo)".to_string())?;
        (read_json(&campaign_path)?, read_json(&leaders_path)?)
    };

    let matcher = LeaderMatcher::from_config(&config);
    let matches = matcher.match_leaders(&leaders, &campaign, Some(args.limit));

    if matches.is_empty() {
        println!("No leaders to match for {}.", campaign.name);
        return Ok(());
    }

    println!(
        "Leader matches for {} ({}):",
        campaign.name,
        campaign.category.label()
    );
    for (rank, matched) in matches.iter().enumerate() {
        let cost = estimate_tier_cost(matched.tier, &campaign);
        println!(
            "{}. {} [{}] score {} | expected participants {}",
            rank + 1,
            matched.leader_name,
            matched.tier.label(),
            format_float(matched.breakdown.score, 3),
            format_number(matched.expected_participants as f64)
        );
        println!(
            "   audience {} | engagement {} | category {} | performance {}",
            format_float(matched.breakdown.audience, 2),
            format_float(matched.breakdown.engagement, 2),
            format_float(matched.breakdown.category, 2),
            format_float(matched.breakdown.performance, 2)
        );
        println!(
            "   cost {} KRW (range {} - {})",
            format_number(cost.estimated),
            format_number(cost.range.min),
            format_number(cost.range.max)
        );
        if !matched.breakdown.reasons.is_empty() {
            println!("   {}", matched.breakdown.reasons.join("; "));
        }
    }

    Ok(())
}

async fn run_predict(args: PredictArgs) -> Result<(), String> {
    let (config, _) = ScoringConfig::load(args.config.clone())?;

    let items: Vec<PopupItem> = if args.demo {
        demo::demo_popups()
    } else {
        let items_path = args
            .items
            .ok_or_else(|| "missing --items (or pass --demo)".to_string())?;
        read_json(&items_path)?
    };

    let predictor = SuccessPredictor::from_config(&config);
    let predictions = predictor.batch(&items);

    println!("Success outlook for {} pop-ups:", predictions.len());
    for prediction in &predictions {
        println!(
            "- {}: {} ({} risk, confidence {})",
            popup_name(&items, &prediction.item_id),
            format_percent(prediction.probability),
            prediction.risk.label(),
            format_percent(prediction.confidence)
        );
        for recommendation in &prediction.recommendations {
            println!("   * {}", recommendation);
        }
    }

    if let Some(threshold) = args.at_risk_threshold {
        let flagged = predictor.at_risk(&items, threshold);
        if flagged.is_empty() {
            println!("\nNo pop-ups below {}.", format_percent(threshold));
        } else {
            println!("\nAt risk (below {}):", format_percent(threshold));
            for prediction in &flagged {
                println!(
                    "- {}: {}",
                    popup_name(&items, &prediction.item_id),
                    format_percent(prediction.probability)
                );
            }
        }
    }

    Ok(())
}

async fn run_evaluate(args: EvaluateArgs) -> Result<(), String> {
    let samples: Vec<OutcomeSample> = read_json(&args.samples)?;
    let (mut config, _) = ScoringConfig::load(args.config.clone())?;

    let runner = EvalRunner::new(samples.clone());
    let metrics = runner.compute_metrics(&config);

    println!("Samples: {}", metrics.sample_count);
    println!("Brier score: {}", format_float(metrics.brier_score, 4));
    println!("Accuracy: {}", format_percent(metrics.accuracy));
    println!(
        "Pairwise ranking accuracy: {}",
        format_percent(metrics.pairwise_ranking_accuracy)
    );
    println!(
        "Mean predicted probability: {}",
        format_percent(metrics.mean_probability)
    );
    println!(
        "Observed success rate: {}",
        format_percent(metrics.success_rate)
    );

    if args.tune {
        let tuner = WeightTuner::new(samples);
        let tuned = tuner.tune(config.prediction.clone(), &config);
        config.prediction = tuned.clone();

        let tuned_metrics = EvalRunner::new(tuner.samples).compute_metrics(&config);

        println!(
            "\nTuned weights: momentum {} | progress {} | leader {} | location {} | category {}",
            format_float(tuned.momentum, 3),
            format_float(tuned.progress, 3),
            format_float(tuned.leader, 3),
            format_float(tuned.location, 3),
            format_float(tuned.category, 3)
        );
        println!(
            "Tuned Brier score: {}",
            format_float(tuned_metrics.brier_score, 4)
        );
        println!("Tuned accuracy: {}", format_percent(tuned_metrics.accuracy));
    }

    if let Some(path) = args.write_config.as_ref() {
        config.write(path)?;
        println!("Config written to {}", path.display());
    }

    Ok(())
}

fn popup_name<'a>(items: &'a [PopupItem], item_id: &'a str) -> &'a str {
    items
        .iter()
        .find(|item| item.id == item_id)
        .map(|item| item.name.as_str())
        .unwrap_or(item_id)
}

fn to_sets(participations: &HashMap<String, Vec<String>>) -> HashMap<String, HashSet<String>> {
    participations
        .iter()
        .map(|(user, items)| (user.clone(), items.iter().cloned().collect()))
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zzik_score=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
