// Handler for the DetectRegime RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::{fallback_text, to_analysis_request};
use crate::services::{RegimeResponse, SeriesRequest};
use crate::state::AppState;

pub async fn handle_detect_regime(
    req_payload: SeriesRequest,
    state: Arc<AppState>,
) -> Result<Response<RegimeResponse>, Status> {
    let request = to_analysis_request(req_payload);
    let outcome = state.detect_regime(&request);
    let fallback_reason = fallback_text(&outcome);
    let result = outcome.into_value();

    Ok(Response::new(RegimeResponse {
        regime: result.regime.to_string(),
        volatility_score: result.volatility_score,
        trend_strength: result.trend_strength,
        fallback_reason,
    }))
}
