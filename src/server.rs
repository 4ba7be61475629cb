use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

use crate::api::{
    ApiInteractionRequest, ApiMatchRequest, ApiMatchResponse, ApiMatchedLeader,
    ApiPredictRequest, ApiPredictResponse, ApiPredictionEntry, ApiRecommendRequest,
    ApiRecommendResponse,
};
use zzik_score::config::ScoringConfig;
use zzik_score::embedding::EmbeddingClient;
use zzik_score::profile::{ProfileStore, UserPreferences};
use zzik_score::scoring::{estimate_tier_cost, HybridScorer, LeaderMatcher, SuccessPredictor};

#[derive(Clone)]
struct AppState {
    config: Arc<ScoringConfig>,
    profiles: Arc<ProfileStore>,
    embeddings: Option<EmbeddingClient>,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, config_path) = ScoringConfig::load(args.config.clone())?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        info!(path = %path.display(), "scoring config loaded");
    }

    let profiles = Arc::new(ProfileStore::load(args.profiles.clone()).await?);

    let embeddings = match EmbeddingClient::from_config(&config) {
        Ok(client) => Some(client),
        Err(err) => {
            warn!(error = %err, "embedding client unavailable, similarity boost disabled");
            None
        }
    };

    let state = AppState {
        config: Arc::new(config),
        profiles,
        embeddings,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/recommend", post(recommend_handler))
        .route("/api/match", post(match_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/profiles", get(list_profiles).post(upsert_profile))
        .route(
            "/api/profiles/:user_id/interactions",
            post(record_interaction),
        )
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "scoring api listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn recommend_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRecommendRequest>,
) -> Result<Json<ApiRecommendResponse>, (StatusCode, String)> {
    let prefs = resolve_profile(&state, &request).await?;
    let participations = request.participation_sets();
    let use_embeddings = request.use_embeddings.unwrap_or(false);
    let mut items = request.items;
    let mut warnings = Vec::new();

    if use_embeddings {
        match (&state.embeddings, prefs.embedding.is_some()) {
            (None, _) => {
                warnings.push("embedding service not configured".to_string());
            }
            (Some(_), false) => {
                warnings.push("profile has no embedding, similarity boost skipped".to_string());
            }
            (Some(client), true) => {
                for item in items.iter_mut().filter(|item| item.embedding.is_none()) {
                    let text =
                        format!("{} {} {}", item.name, item.category.label(), item.location);
                    match client.embed(&text).await {
                        Ok(embedding) => item.embedding = Some(embedding),
                        Err(err) => {
                            warn!(error = %err, item = %item.id, "embedding lookup failed");
                            warnings.push(format!("embedding lookup failed: {}", err));
                            break;
                        }
                    }
                }
            }
        }
    }

    let scorer = HybridScorer::from_config(&state.config);
    let recommendations = scorer.recommend(
        &items,
        &prefs,
        &request.similar_user_ids,
        &participations,
        request.limit,
    );

    Ok(Json(ApiRecommendResponse {
        user_id: prefs.user_id,
        recommendations,
        warnings,
    }))
}

async fn resolve_profile(
    state: &AppState,
    request: &ApiRecommendRequest,
) -> Result<UserPreferences, (StatusCode, String)> {
    if let Some(profile) = request.profile.clone() {
        return Ok(profile);
    }
    let user_id = request
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "profile or user_id is required".to_string(),
            )
        })?;
    state.profiles.get(user_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("user profile not found: {}", user_id),
        )
    })
}

async fn match_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiMatchRequest>,
) -> Result<Json<ApiMatchResponse>, (StatusCode, String)> {
    let matcher = LeaderMatcher::from_config(&state.config);
    let matches = matcher
        .match_leaders(&request.leaders, &request.campaign, request.limit)
        .into_iter()
        .map(|matched| {
            let cost = estimate_tier_cost(matched.tier, &request.campaign);
            ApiMatchedLeader::from_match(matched, cost)
        })
        .collect();

    Ok(Json(ApiMatchResponse {
        campaign_id: request.campaign.id,
        matches,
    }))
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiPredictRequest>,
) -> Result<Json<ApiPredictResponse>, (StatusCode, String)> {
    let predictor = SuccessPredictor::from_config(&state.config);

    let at_risk = request.at_risk_threshold.map(|threshold| {
        predictor
            .at_risk(&request.items, threshold)
            .into_iter()
            .map(|prediction| prediction.item_id)
            .collect()
    });

    let predictions = predictor
        .batch(&request.items)
        .into_iter()
        .map(ApiPredictionEntry::from_prediction)
        .collect();

    Ok(Json(ApiPredictResponse {
        predictions,
        at_risk,
    }))
}

async fn list_profiles(State(state): State<AppState>) -> Json<Vec<UserPreferences>> {
    Json(state.profiles.list().await)
}

async fn upsert_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserPreferences>,
) -> Result<Json<UserPreferences>, (StatusCode, String)> {
    if profile.user_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "user_id is required".to_string()));
    }
    let stored = state
        .profiles
        .upsert(profile)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
    Ok(Json(stored))
}

async fn record_interaction(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ApiInteractionRequest>,
) -> Result<Json<UserPreferences>, (StatusCode, String)> {
    if state.profiles.get(&user_id).await.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            format!("user profile not found: {}", user_id),
        ));
    }
    let updated = state
        .profiles
        .record_interaction(&user_id, &request.item, request.hour)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;
    Ok(Json(updated))
}
