// Simple Moving Average (SMA) indicator implementation
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

/// Trailing mean over `period` values; shared with Bollinger Bands.
/// Each window is summed on its own, as offsets from its first value, so a
/// window of identical values yields exactly that value.
pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; period - 1];
    results.extend(values.windows(period).map(|window| {
        let base = window[0];
        let offset: f64 = window.iter().map(|v| v - base).sum();
        finite(base + offset / period as f64)
    }));
    results
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        rolling_mean(&closes, self.period)
    }
}
