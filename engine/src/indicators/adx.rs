// Average Directional Index (ADX) indicator implementation
use super::atr::true_range;
use super::{finite, IndicatorCalculator};
use serde_json::Value;
use shared::models::Candle;

/// Wilder's ADX.
///
/// +DM/-DM and true range start at bar 1 and are Wilder-smoothed from their
/// first `period` sums (bar `period`). DX is defined from bar `period`; the
/// first ADX is the mean of `period` DX values (bar `2 * period - 1`), after
/// which ADX is itself Wilder-smoothed. Output is clamped to [0, 100].
pub struct Adx {
    name: String,
    period: usize,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ADX({})", period),
            period,
        }
    }

    fn directional_movement(current: &Candle, previous: &Candle) -> (f64, f64) {
        let up_move = current.high - previous.high;
        let down_move = previous.low - current.low;

        let plus_dm = if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 };
        let minus_dm = if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 };
        (plus_dm, minus_dm)
    }

    fn dx(smoothed_plus_dm: f64, smoothed_minus_dm: f64, smoothed_tr: f64) -> f64 {
        if smoothed_tr <= 0.0 {
            return 0.0;
        }
        let plus_di = 100.0 * smoothed_plus_dm / smoothed_tr;
        let minus_di = 100.0 * smoothed_minus_dm / smoothed_tr;
        let di_sum = plus_di + minus_di;
        if di_sum <= 0.0 {
            0.0
        } else {
            100.0 * (plus_di - minus_di).abs() / di_sum
        }
    }
}

impl IndicatorCalculator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>> {
        let first_adx = (2 * self.period).saturating_sub(1);
        if self.period == 0 || data.len() <= first_adx {
            return vec![None; data.len()];
        }

        let period = self.period as f64;
        let mut smoothed_plus_dm = 0.0;
        let mut smoothed_minus_dm = 0.0;
        let mut smoothed_tr = 0.0;
        let mut dx_values = Vec::with_capacity(data.len() - self.period);

        for i in 1..data.len() {
            let (plus_dm, minus_dm) = Self::directional_movement(&data[i], &data[i - 1]);
            let tr = true_range(&data[i], data[i - 1].close);

            if i <= self.period {
                smoothed_plus_dm += plus_dm;
                smoothed_minus_dm += minus_dm;
                smoothed_tr += tr;
                if i < self.period {
                    continue;
                }
            } else {
                smoothed_plus_dm = smoothed_plus_dm - smoothed_plus_dm / period + plus_dm;
                smoothed_minus_dm = smoothed_minus_dm - smoothed_minus_dm / period + minus_dm;
                smoothed_tr = smoothed_tr - smoothed_tr / period + tr;
            }
            dx_values.push(Self::dx(smoothed_plus_dm, smoothed_minus_dm, smoothed_tr));
        }

        let mut results = vec![None; first_adx];
        let mut adx = dx_values.iter().take(self.period).sum::<f64>() / period;
        results.push(finite(adx).map(|v| v.clamp(0.0, 100.0)));

        for dx in dx_values.iter().skip(self.period) {
            adx = (adx * (period - 1.0) + dx) / period;
            results.push(finite(adx).map(|v| v.clamp(0.0, 100.0)));
        }
        results
    }
}
