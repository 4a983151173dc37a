// HTTP client for the hosted sentiment classifier.
use super::labels::{interpret, Predictions};
use super::SentimentConfig;
use crate::error::EngineError;
use crate::outcome::{FallbackReason, Outcome};
use reqwest::{Client, StatusCode};
use shared::models::{HealthReport, HealthStatus, SentimentResult};
use std::sync::Arc;
use std::time::Duration;

const PREVIEW_CHARS: usize = 50;

/// Cheap to clone: the connection pool and configuration are shared.
#[derive(Clone)]
pub struct SentimentClient {
    http: Client,
    config: Arc<SentimentConfig>,
}

impl SentimentClient {
    pub fn new(config: SentimentConfig) -> Result<Self, EngineError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Classifies `text`, substituting the neutral answer on any failure.
    pub async fn analyze(&self, text: &str) -> Outcome<SentimentResult> {
        if text.trim().is_empty() {
            tracing::info!("Empty text received, returning neutral");
            return Outcome::fallback(SentimentResult::neutral(), FallbackReason::EmptyText);
        }

        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        tracing::info!(text = %preview, "Analyzing text");

        match self.classify(text).await {
            Ok(result) => {
                tracing::info!(
                    sentiment = %result.sentiment,
                    confidence = result.confidence,
                    "Sentiment classified"
                );
                Outcome::Computed(result)
            }
            Err(err) => {
                let reason = err.fallback_reason();
                tracing::warn!(error = %err, %reason, "Falling back to neutral sentiment");
                Outcome::fallback(SentimentResult::neutral(), reason)
            }
        }
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult, EngineError> {
        let response = self.post_inputs(text, self.config.request_timeout).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::RemoteStatus { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        let predictions: Predictions = serde_json::from_slice(&bytes)
            .map_err(|e| EngineError::RemotePayload(e.to_string()))?;
        interpret(&predictions.into_first())
    }

    async fn post_inputs(&self, inputs: &str, timeout: Duration) -> Result<reqwest::Response, EngineError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .timeout(timeout)
            .json(&serde_json::json!({ "inputs": inputs }))
            .send()
            .await?;
        Ok(response)
    }

    /// Probes the remote classifier with a throwaway input.
    pub async fn health(&self) -> HealthReport {
        match self.post_inputs("test", self.config.health_timeout).await {
            Ok(response) if response.status() == StatusCode::OK => HealthReport {
                status: HealthStatus::Healthy,
                mode: "api".to_string(),
                remote_status: Some(StatusCode::OK.as_u16()),
                message: Some("Connected to HuggingFace API".to_string()),
                error: None,
            },
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status, "Remote classifier degraded");
                HealthReport {
                    status: HealthStatus::Degraded,
                    mode: "api".to_string(),
                    remote_status: Some(status),
                    message: Some(format!("HF API error: {}", body)),
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Remote classifier health probe failed");
                HealthReport {
                    status: HealthStatus::Error,
                    mode: "api".to_string(),
                    remote_status: None,
                    message: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
