// Handler for the AnalyzeTechnicals RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::{fallback_text, to_analysis_request};
use crate::services::{SeriesRequest, TechnicalsResponse};
use crate::state::AppState;

pub async fn handle_analyze_technicals(
    req_payload: SeriesRequest,
    state: Arc<AppState>,
) -> Result<Response<TechnicalsResponse>, Status> {
    let request = to_analysis_request(req_payload);
    let outcome = state.analyze_technicals(&request);
    let fallback_reason = fallback_text(&outcome);
    let result = outcome.into_value();

    Ok(Response::new(TechnicalsResponse {
        macd_histogram: result.macd_histogram,
        bb_width: result.bb_width,
        adx: result.adx,
        rsi: result.rsi,
        fallback_reason,
    }))
}
