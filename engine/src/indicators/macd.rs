// MACD histogram indicator implementation
use super::ema::ema_values;
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

/// MACD line = EMA(fast) - EMA(slow); signal = EMA(signal) of the MACD line;
/// histogram = line - signal.
pub struct MacdHistogram {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdHistogram {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }

    pub fn macd_line(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        let fast = ema_values(&closes, self.fast);
        let slow = ema_values(&closes, self.slow);
        fast.iter()
            .zip(slow.iter())
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => finite(f - s),
                _ => None,
            })
            .collect()
    }
}

impl IndicatorCalculator for MacdHistogram {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let line = self.macd_line(data);
        let Some(start) = line.iter().position(Option::is_some) else {
            return vec![None; data.len()];
        };

        // The signal EMA runs over the defined part of the MACD line only.
        let defined: Vec<f64> = line[start..].iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let signal = ema_values(&defined, self.signal);

        let mut results = vec![None; start];
        for (value, signal) in defined.iter().zip(signal.iter()) {
            results.push(signal.and_then(|s| finite(value - s)));
        }
        results
    }
}
