// gRPC implementation of the AnalysisEngine service. Each RPC logs the
// request and dispatches to its handler module.
use super::{
    AnalysisEngine, HealthRequest, HealthResponse, RegimeResponse, SentimentRequest,
    SentimentResponse, SeriesRequest, TechnicalsResponse,
};
use crate::state::AppState;
use std::sync::Arc;
use tonic::{Request, Response, Status};

pub mod analyze_sentiment;
pub mod analyze_technicals;
pub mod detect_regime;
pub mod health;
pub mod helpers;

pub struct AnalysisService {
    state: Arc<AppState>,
}

impl AnalysisService {
    pub fn new(state: Arc<AppState>) -> Self {
        AnalysisService { state }
    }
}

#[tonic::async_trait]
impl AnalysisEngine for AnalysisService {
    async fn detect_regime(&self, request: Request<SeriesRequest>) -> Result<Response<RegimeResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            timeframe = %req_payload.timeframe,
            bars = req_payload.data.len(),
            "Received DetectRegime request"
        );
        detect_regime::handle_detect_regime(req_payload, self.state.clone()).await
    }

    async fn analyze_technicals(
        &self,
        request: Request<SeriesRequest>,
    ) -> Result<Response<TechnicalsResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            timeframe = %req_payload.timeframe,
            bars = req_payload.data.len(),
            "Received AnalyzeTechnicals request"
        );
        analyze_technicals::handle_analyze_technicals(req_payload, self.state.clone()).await
    }

    async fn analyze_sentiment(
        &self,
        request: Request<SentimentRequest>,
    ) -> Result<Response<SentimentResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(chars = req_payload.text.chars().count(), "Received AnalyzeSentiment request");
        analyze_sentiment::handle_analyze_sentiment(req_payload, self.state.clone()).await
    }

    async fn health(&self, _request: Request<HealthRequest>) -> Result<Response<HealthResponse>, Status> {
        tracing::debug!("Received Health request");
        health::handle_health(self.state.clone()).await
    }
}
