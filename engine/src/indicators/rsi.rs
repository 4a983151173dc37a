// Relative Strength Index (RSI) indicator implementation
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            // No losses: saturated, unless the window was completely flat.
            return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
        }
        let rs = avg_gain / avg_loss;
        finite(100.0 - (100.0 / (1.0 + rs))).map(|v| v.clamp(0.0, 100.0))
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        if data.len() <= self.period || self.period == 0 {
            return vec![None; data.len()];
        }

        let mut results = vec![None; self.period]; // RSI needs 'period' initial changes

        let mut gains = 0.0;
        let mut losses = 0.0;

        for i in 1..=self.period {
            let change = data[i].close - data[i - 1].close;
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change; // losses are positive values
            }
        }

        let period = self.period as f64;
        let mut avg_gain = gains / period;
        let mut avg_loss = losses / period;
        results.push(Self::value(avg_gain, avg_loss));

        // Wilder smoothing for the rest of the series
        for i in (self.period + 1)..data.len() {
            let change = data[i].close - data[i - 1].close;
            let (current_gain, current_loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };

            avg_gain = (avg_gain * (period - 1.0) + current_gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + current_loss) / period;
            results.push(Self::value(avg_gain, avg_loss));
        }
        results
    }
}
