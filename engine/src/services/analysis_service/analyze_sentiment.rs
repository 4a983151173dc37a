// Handler for the AnalyzeSentiment RPC
use std::sync::Arc;
use tonic::{Response, Status};

use super::helpers::fallback_text;
use crate::services::{ProtoSentimentScores, SentimentRequest, SentimentResponse};
use crate::state::AppState;

pub async fn handle_analyze_sentiment(
    req_payload: SentimentRequest,
    state: Arc<AppState>,
) -> Result<Response<SentimentResponse>, Status> {
    let outcome = state.analyze_sentiment(&req_payload.text).await;
    let fallback_reason = fallback_text(&outcome);
    let result = outcome.into_value();

    Ok(Response::new(SentimentResponse {
        sentiment: result.sentiment.to_string(),
        confidence: result.confidence,
        scores: Some(ProtoSentimentScores {
            negative: result.scores.negative,
            neutral: result.scores.neutral,
            positive: result.scores.positive,
        }),
        fallback_reason,
    }))
}
