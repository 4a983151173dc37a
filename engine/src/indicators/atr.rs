// Average True Range (ATR) indicator implementation
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

/// max(high - low, |high - prev_close|, |low - prev_close|)
pub(crate) fn true_range(candle: &Candle, prev_close: f64) -> f64 {
    (candle.high - candle.low)
        .max((candle.high - prev_close).abs())
        .max((candle.low - prev_close).abs())
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if self.period == 0 || data.len() < self.period {
            return vec![None; data.len()];
        }

        // The first bar has no previous close, so its range stands in.
        let ranges: Vec<f64> = data
            .iter()
            .enumerate()
            .map(|(i, c)| if i == 0 { c.high - c.low } else { true_range(c, data[i - 1].close) })
            .collect();

        let period = self.period as f64;
        let mut results = vec![None; self.period - 1];
        let mut atr = ranges.iter().take(self.period).sum::<f64>() / period;
        results.push(finite(atr));

        for tr in ranges.iter().skip(self.period) {
            atr = (atr * (period - 1.0) + tr) / period;
            results.push(finite(atr));
        }
        results
    }
}
