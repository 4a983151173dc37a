// Exponential Moving Average (EMA) over raw values
use super::finite;

/// EMA seeded with the SMA of the first `period` values, multiplier 2/(n+1).
/// MACD reuses this for its signal line.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; period - 1];
    let multiplier = 2.0 / (period as f64 + 1.0);

    let initial_sum: f64 = values.iter().take(period).sum();
    let mut previous_ema = initial_sum / period as f64;
    results.push(finite(previous_ema));

    for value in values.iter().skip(period) {
        let ema = (value - previous_ema) * multiplier + previous_ema;
        results.push(finite(ema));
        previous_ema = ema;
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_calculation() {
        let results = ema_values(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        // SMA for first 3: (10+11+12)/3 = 11.0
        // EMA for 13: (13 - 11.0) * 0.5 + 11.0 = 12.0
        // EMA for 14: (14 - 12.0) * 0.5 + 12.0 = 13.0
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_eq!(results[2], Some(11.0));
        assert_eq!(results[3], Some(12.0));
        assert_eq!(results[4], Some(13.0));
    }

    #[test]
    fn test_ema_insufficient_data() {
        assert_eq!(ema_values(&[1.0; 4], 5), vec![None; 4]);
    }
}
