// Handler for the Health RPC
use std::sync::Arc;
use tonic::{Response, Status};

use crate::services::HealthResponse;
use crate::state::AppState;

pub async fn handle_health(state: Arc<AppState>) -> Result<Response<HealthResponse>, Status> {
    let report = state.health().await;
    Ok(Response::new(HealthResponse {
        status: report.status.to_string(),
        mode: report.mode,
        remote_status: report.remote_status.map(u32::from).unwrap_or(0),
        message: report.message.unwrap_or_default(),
        error: report.error.unwrap_or_default(),
    }))
}
