// Bollinger Band width indicator implementation
use super::sma::rolling_mean;
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

/// Width of SMA(period) +/- k population standard deviations, as a
/// percentage of the middle band: (upper - lower) / middle * 100.
pub struct BollingerWidth {
    name: String,
    period: usize,
    num_std: f64,
}

impl BollingerWidth {
    pub fn new(period: usize, num_std: f64) -> Self {
        Self {
            name: format!("BBW({},{})", period, num_std),
            period,
            num_std,
        }
    }
}

impl IndicatorCalculator for BollingerWidth {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "std_dev": self.num_std })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let closes: Vec<f64> = data.iter().map(|c| c.close).collect();
        let middle = rolling_mean(&closes, self.period);

        middle
            .iter()
            .enumerate()
            .map(|(i, mean)| {
                let mean = (*mean)?;
                if mean <= 0.0 {
                    return None;
                }
                let window = &closes[i + 1 - self.period..=i];
                let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>()
                    / self.period as f64;
                let std_dev = variance.sqrt();
                let upper = mean + self.num_std * std_dev;
                let lower = mean - self.num_std * std_dev;
                finite((upper - lower) / mean * 100.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candle};

    #[test]
    fn test_bollinger_width_flat_series() {
        let candles = vec![candle(100.0); 20];
        let results = BollingerWidth::new(20, 2.0).calculate(&candles);
        assert!(results[..19].iter().all(Option::is_none));
        assert_close(results[19], 0.0);
    }

    #[test]
    fn test_bollinger_width_flat_tail_after_drift() {
        let mut candles: Vec<Candle> = (0..40).map(|i| candle(100.0 + 0.0007 * i as f64)).collect();
        let last = candles[39].close;
        candles.extend((0..20).map(|_| candle(last)));
        let results = BollingerWidth::new(20, 2.0).calculate(&candles);
        assert_eq!(results[59], Some(0.0));
    }

    #[test]
    fn test_bollinger_width_known_window() {
        // Closes alternate 99/101: mean 100, population std dev 1.
        let candles: Vec<Candle> = (0..20)
            .map(|i| candle(if i % 2 == 0 { 99.0 } else { 101.0 }))
            .collect();
        let results = BollingerWidth::new(20, 2.0).calculate(&candles);
        // (upper - lower) = 4 sigma = 4, over a middle band of 100
        assert_close(results[19], 4.0);
    }

    #[test]
    fn test_bollinger_width_insufficient_data() {
        let candles = vec![candle(1.0); 19];
        assert_eq!(BollingerWidth::new(20, 2.0).calculate(&candles), vec![None; 19]);
    }
}
