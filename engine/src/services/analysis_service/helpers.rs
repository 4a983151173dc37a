// Conversions between generated gRPC messages and domain models
use crate::outcome::Outcome;
use crate::services::{ProtoCandle, SeriesRequest};
use shared::models::{AnalysisRequest, Candle, Timestamp};

pub fn from_grpc_timestamp(raw: &str) -> Timestamp {
    match raw.trim().parse::<i64>() {
        Ok(millis) => Timestamp::Millis(millis),
        Err(_) => Timestamp::Text(raw.to_string()),
    }
}

pub fn to_domain_candle(candle: &ProtoCandle) -> Candle {
    Candle {
        timestamp: from_grpc_timestamp(&candle.timestamp),
        open: candle.open,
        high: candle.high,
        low: candle.low,
        close: candle.close,
        volume: candle.volume,
    }
}

pub fn to_analysis_request(request: SeriesRequest) -> AnalysisRequest {
    AnalysisRequest {
        data: request.data.iter().map(to_domain_candle).collect(),
        symbol: request.symbol,
        timeframe: request.timeframe,
    }
}

/// Empty when the value was fully computed.
pub fn fallback_text<T>(outcome: &Outcome<T>) -> String {
    outcome
        .fallback_reason()
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FallbackReason;

    #[test]
    fn test_timestamps_keep_their_form() {
        assert_eq!(from_grpc_timestamp("1700000000000"), Timestamp::Millis(1_700_000_000_000));
        assert_eq!(
            from_grpc_timestamp("2024-12-30T18:20:00Z"),
            Timestamp::Text("2024-12-30T18:20:00Z".to_string())
        );
    }

    #[test]
    fn test_request_conversion_preserves_order() {
        let request = SeriesRequest {
            symbol: "BTCUSDT".to_string(),
            timeframe: "1h".to_string(),
            data: (0..3)
                .map(|i| ProtoCandle {
                    timestamp: i.to_string(),
                    open: 1.0, high: 2.0, low: 0.5, close: 1.0 + i as f64,
                    volume: 10.0,
                })
                .collect(),
        };
        let converted = to_analysis_request(request);
        assert_eq!(converted.symbol, "BTCUSDT");
        let closes: Vec<f64> = converted.data.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_fallback_text() {
        assert_eq!(fallback_text(&Outcome::Computed(1)), "");
        assert_eq!(fallback_text(&Outcome::fallback(1, FallbackReason::EmptyText)), "empty text");
    }
}
