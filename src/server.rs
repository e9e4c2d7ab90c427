use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use adcopy_lab::cache::ScoreCache;
use adcopy_lab::config::EngineConfig;
use adcopy_lab::optimizer::{optimize_description, optimize_headline, OptimizationResult};
use adcopy_lab::predict::{PerformancePredictor, PredictionSet};
use adcopy_lab::scoring::{score_ad, AdScoreReport};
use adcopy_lab::winner::{WinnerDecision, WinnerSelector};
use adcopy_lab::{FieldKind, ScoredField};

use crate::api::{
    OptimizeRequest, PredictRequest, ScoreAdRequest, ScoreFieldRequest, WinnerRequest,
};

#[derive(Clone)]
struct AppState {
    cache: Arc<ScoreCache>,
    config: EngineConfig,
}

pub async fn serve(args: crate::ServeArgs, config: EngineConfig) -> Result<(), String> {
    let state = AppState {
        cache: Arc::new(ScoreCache::new()),
        config,
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/score", post(score_handler))
        .route("/api/score-ad", post(score_ad_handler))
        .route("/api/optimize", post(optimize_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/winner", post(winner_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(address = %addr, "serving ad copy API");

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

async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ScoreFieldRequest>,
) -> Result<Json<ScoredField>, (StatusCode, String)> {
    let (kind, text, keywords) = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    Ok(Json(state.cache.score(kind, &text, keywords.as_deref())))
}

async fn score_ad_handler(
    State(_state): State<AppState>,
    Json(request): Json<ScoreAdRequest>,
) -> Json<AdScoreReport> {
    Json(score_ad(
        &request.headlines,
        &request.descriptions,
        request.keywords.as_deref(),
    ))
}

async fn optimize_handler(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, (StatusCode, String)> {
    let (kind, text, keywords, target) = request
        .into_parts()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let target = target.unwrap_or(state.config.optimizer.target_score);
    let result = match kind {
        FieldKind::Headline => optimize_headline(&text, keywords.as_deref(), target),
        FieldKind::Description => optimize_description(&text, keywords.as_deref(), target),
    };
    Ok(Json(result))
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Json<PredictionSet> {
    let business_type = request
        .business_type
        .unwrap_or_else(|| state.config.predictor.business_type.clone());
    let variations: Vec<_> = request
        .variations
        .into_iter()
        .enumerate()
        .map(|(index, payload)| payload.into_variation(index))
        .collect();
    let predictor = PerformancePredictor::new(business_type);
    Json(predictor.predict_set(&variations))
}

async fn winner_handler(
    State(state): State<AppState>,
    Json(request): Json<WinnerRequest>,
) -> Json<WinnerDecision> {
    let selector = WinnerSelector::new(
        request.min_clicks.unwrap_or(state.config.winner.min_clicks),
        request
            .min_confidence
            .unwrap_or(state.config.winner.min_confidence),
    );
    Json(selector.recommend_winner(&request.variations))
}
