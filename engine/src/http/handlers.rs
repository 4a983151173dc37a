// Route handlers for the JSON gateway.
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::state::AppState;
use shared::models::{
    AnalysisRequest, HealthReport, RegimeResult, SentimentRequest, SentimentResult, TechnicalsResult,
};

pub async fn detect_regime(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Json<RegimeResult> {
    tracing::info!(
        symbol = %request.symbol,
        timeframe = %request.timeframe,
        bars = request.data.len(),
        "POST /detect-regime"
    );
    Json(state.detect_regime(&request).into_value())
}

pub async fn analyze_technicals(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Json<TechnicalsResult> {
    tracing::info!(
        symbol = %request.symbol,
        timeframe = %request.timeframe,
        bars = request.data.len(),
        "POST /analyze-technicals"
    );
    Json(state.analyze_technicals(&request).into_value())
}

pub async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SentimentRequest>,
) -> Json<SentimentResult> {
    tracing::info!(chars = request.text.chars().count(), "POST /analyze-sentiment");
    Json(state.analyze_sentiment(&request.text).await.into_value())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.health().await)
}
