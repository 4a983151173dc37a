// JSON gateway mirroring the gRPC service; degraded answers show only in the logs.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/detect-regime", post(handlers::detect_regime))
        .route("/analyze-technicals", post(handlers::analyze_technicals))
        .route("/analyze-sentiment", post(handlers::analyze_sentiment))
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::trending;
    use crate::state::test_support::{fake_classifier, offline_state, state_with_remote};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_gateway(state: Arc<AppState>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn series_json(len: usize, step: f64, half_range: f64) -> Value {
        let data: Vec<Value> = trending(len, 100.0, step, half_range)
            .iter()
            .enumerate()
            .map(|(i, c)| {
                json!({
                    "timestamp": format!("2024-01-01T{:02}:00:00Z", i % 24),
                    "open": c.open, "high": c.high, "low": c.low, "close": c.close, "volume": c.volume
                })
            })
            .collect();
        json!({ "symbol": "BTCUSDT", "timeframe": "1h", "data": data })
    }

    async fn post_json(base: &str, path: &str, body: &Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}{}", base, path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_detect_regime_contract() {
        let base = spawn_gateway(offline_state()).await;
        let (status, body) = post_json(&base, "/detect-regime", &series_json(40, 0.5, 0.2)).await;
        assert_eq!(status, 200);
        assert_eq!(body["regime"], "BullTrend");
        assert!(body["trend_strength"].as_f64().unwrap() > 25.0);
        assert!(body["volatility_score"].is_f64());
        assert_eq!(body.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_detect_regime_empty_data() {
        let base = spawn_gateway(offline_state()).await;
        let (status, body) = post_json(&base, "/detect-regime", &json!({ "data": [] })).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "regime": "Ranging", "volatility_score": 0.0, "trend_strength": 0.0 }));
    }

    #[tokio::test]
    async fn test_float_timestamps_are_accepted() {
        let base = spawn_gateway(offline_state()).await;
        let mut body = series_json(40, 0.5, 0.2);
        for (i, bar) in body["data"].as_array_mut().unwrap().iter_mut().enumerate() {
            bar["timestamp"] = json!(1_700_000_000_000.0 + i as f64 * 60_000.0);
        }
        let (status, body) = post_json(&base, "/detect-regime", &body).await;
        assert_eq!(status, 200);
        assert_eq!(body["regime"], "BullTrend");
    }

    #[tokio::test]
    async fn test_analyze_technicals_contract() {
        let base = spawn_gateway(offline_state()).await;
        let (status, body) = post_json(&base, "/analyze-technicals", &series_json(5, 0.5, 0.2)).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "macd_histogram": 0.0, "bb_width": 0.0, "adx": 0.0, "rsi": 50.0 }));

        let (_, body) = post_json(&base, "/analyze-technicals", &series_json(60, 0.5, 0.2)).await;
        let rsi = body["rsi"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&rsi));
        assert!(body["bb_width"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_analyze_sentiment_contract() {
        let url = fake_classifier(r#"[[{"label": "LABEL_2", "score": 0.7}, {"label": "LABEL_1", "score": 0.2}, {"label": "LABEL_0", "score": 0.1}]]"#).await;
        let base = spawn_gateway(state_with_remote(url)).await;
        let (status, body) =
            post_json(&base, "/analyze-sentiment", &json!({ "text": "ETF approved" })).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "sentiment": "positive",
                "confidence": 0.7,
                "scores": { "negative": 0.1, "neutral": 0.2, "positive": 0.7 }
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_sentiment_fallback() {
        let base = spawn_gateway(offline_state()).await;
        let (status, body) = post_json(&base, "/analyze-sentiment", &json!({ "text": "" })).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "sentiment": "neutral",
                "confidence": 1.0,
                "scores": { "negative": 0.0, "neutral": 1.0, "positive": 0.0 }
            })
        );
    }

    #[tokio::test]
    async fn test_health_reports_error_when_remote_is_down() {
        let base = spawn_gateway(offline_state()).await;
        let body: Value = reqwest::get(format!("{}/health", base)).await.unwrap().json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["mode"], "api");
        assert!(body.get("hf_status").is_none());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let base = spawn_gateway(offline_state()).await;
        let response = reqwest::Client::new()
            .post(format!("{}/detect-regime", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
