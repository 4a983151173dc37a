// Request-independent collaborators shared by the gRPC service and the HTTP gateway.
use crate::analysis::{RegimeClassifier, TechnicalsSummary};
use crate::outcome::Outcome;
use crate::sentiment::SentimentClient;
use shared::models::{AnalysisRequest, HealthReport, RegimeResult, SentimentResult, TechnicalsResult};

/// Holds no per-request data: the classifiers are pure and the client only
/// carries its connection pool and injected configuration.
pub struct AppState {
    regime: RegimeClassifier,
    technicals: TechnicalsSummary,
    sentiment: SentimentClient,
}

impl AppState {
    pub fn new(sentiment: SentimentClient) -> Self {
        AppState {
            regime: RegimeClassifier::new(),
            technicals: TechnicalsSummary::new(),
            sentiment,
        }
    }

    pub fn detect_regime(&self, request: &AnalysisRequest) -> Outcome<RegimeResult> {
        let span = tracing::info_span!("detect_regime", symbol = %request.symbol, timeframe = %request.timeframe);
        let _guard = span.enter();
        let outcome = self.regime.classify(&request.data);
        if let Some(reason) = outcome.fallback_reason() {
            tracing::warn!(bars = request.data.len(), %reason, "Regime response degraded");
        }
        outcome
    }

    pub fn analyze_technicals(&self, request: &AnalysisRequest) -> Outcome<TechnicalsResult> {
        let span = tracing::info_span!("analyze_technicals", symbol = %request.symbol, timeframe = %request.timeframe);
        let _guard = span.enter();
        let outcome = self.technicals.summarize(&request.data);
        if let Some(reason) = outcome.fallback_reason() {
            tracing::warn!(bars = request.data.len(), %reason, "Technicals response degraded");
        }
        outcome
    }

    pub async fn analyze_sentiment(&self, text: &str) -> Outcome<SentimentResult> {
        self.sentiment.analyze(text).await
    }

    pub async fn health(&self) -> HealthReport {
        self.sentiment.health().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::AppState;
    use crate::sentiment::{SentimentClient, SentimentConfig};
    use axum::routing::post;
    use axum::Router;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpListener;

    pub fn state_with_remote(api_url: String) -> Arc<AppState> {
        let client = SentimentClient::new(SentimentConfig {
            api_url,
            api_token: "test-token".to_string(),
            request_timeout: Duration::from_secs(2),
            health_timeout: Duration::from_secs(2),
        })
        .unwrap();
        Arc::new(AppState::new(client))
    }

    /// Remote classifier pointing at a closed port.
    pub fn offline_state() -> Arc<AppState> {
        let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = probe.local_addr().unwrap();
        drop(probe);
        state_with_remote(format!("http://{}/model", addr))
    }

    /// Answers every POST with 200 and `body`.
    pub async fn fake_classifier(body: &'static str) -> String {
        let app = Router::new().route("/model", post(move || async move { body }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/model", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::offline_state;
    use crate::indicators::test_support::trending;
    use shared::models::{AnalysisRequest, Regime, TechnicalsResult};

    fn request(len: usize) -> AnalysisRequest {
        AnalysisRequest {
            symbol: "ETHUSDT".to_string(),
            timeframe: "4h".to_string(),
            data: trending(len, 100.0, 0.5, 0.2),
        }
    }

    #[tokio::test]
    async fn test_state_routes_to_classifiers() {
        let state = offline_state();
        let regime = state.detect_regime(&request(40));
        assert_eq!(regime.value().regime, Regime::BullTrend);

        let technicals = state.analyze_technicals(&request(3));
        assert!(technicals.is_degraded());
        assert_eq!(*technicals.value(), TechnicalsResult::default());
    }

    #[tokio::test]
    async fn test_state_sentiment_degrades_when_remote_is_down() {
        let state = offline_state();
        assert!(state.analyze_sentiment("rates cut").await.is_degraded());
    }
}
