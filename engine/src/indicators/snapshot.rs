// Full-window indicator computation feeding the regime and technicals extractors.
use super::{
    last_value, Adx, Atr, BollingerWidth, IndicatorCalculator, MacdHistogram, Rsi, Sma,
    ADX_PERIOD, ATR_PERIOD, BOLLINGER_PERIOD, BOLLINGER_STD_DEV, MACD_FAST_PERIOD,
    MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD, RSI_PERIOD, SMA_PERIOD,
};
use serde_json::{Map, Value};
use shared::models::Candle;

/// Per-bar output of every indicator the service reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub adx: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub sma: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub bb_width: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

/// Last-bar values; `None` marks an indicator that is undefined on that bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub adx: Option<f64>,
    pub atr: Option<f64>,
    pub sma: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_width: Option<f64>,
    pub rsi: Option<f64>,
    pub last_close: Option<f64>,
}

pub struct IndicatorEngine {
    adx: Adx,
    atr: Atr,
    sma: Sma,
    macd: MacdHistogram,
    bollinger: BollingerWidth,
    rsi: Rsi,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorEngine {
    pub fn new() -> Self {
        IndicatorEngine {
            adx: Adx::new(ADX_PERIOD),
            atr: Atr::new(ATR_PERIOD),
            sma: Sma::new(SMA_PERIOD),
            macd: MacdHistogram::new(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD),
            bollinger: BollingerWidth::new(BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
            rsi: Rsi::new(RSI_PERIOD),
        }
    }

    pub fn compute(&self, data: &[Candle]) -> IndicatorSeries {
        let series = IndicatorSeries {
            adx: self.adx.calculate(data),
            atr: self.atr.calculate(data),
            sma: self.sma.calculate(data),
            macd_histogram: self.macd.calculate(data),
            bb_width: self.bollinger.calculate(data),
            rsi: self.rsi.calculate(data),
        };
        tracing::trace!(bars = data.len(), "Computed indicator series");
        series
    }

    /// Calculators in `IndicatorSeries` field order, keyed by field name.
    pub fn calculators(&self) -> [(&'static str, &dyn IndicatorCalculator); 6] {
        [
            ("adx", &self.adx),
            ("atr", &self.atr),
            ("sma", &self.sma),
            ("macd_histogram", &self.macd),
            ("bb_width", &self.bollinger),
            ("rsi", &self.rsi),
        ]
    }

    /// `{field: {name, parameters}}` for every configured calculator.
    pub fn catalog(&self) -> Value {
        let entries: Map<String, Value> = self
            .calculators()
            .iter()
            .map(|(field, calc)| {
                (
                    field.to_string(),
                    serde_json::json!({ "name": calc.name(), "parameters": calc.parameters() }),
                )
            })
            .collect();
        Value::Object(entries)
    }

    pub fn snapshot(&self, data: &[Candle]) -> IndicatorSnapshot {
        let series = self.compute(data);
        IndicatorSnapshot {
            adx: last_value(&series.adx),
            atr: last_value(&series.atr),
            sma: last_value(&series.sma),
            macd_histogram: last_value(&series.macd_histogram),
            bb_width: last_value(&series.bb_width),
            rsi: last_value(&series.rsi),
            last_close: data.last().map(|c| c.close).filter(|c| c.is_finite()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{ohlc, trending};

    #[test]
    fn test_series_are_aligned_with_input() {
        let candles = trending(50, 100.0, 0.3, 0.5);
        let series = IndicatorEngine::new().compute(&candles);
        for s in [&series.adx, &series.atr, &series.sma, &series.macd_histogram, &series.bb_width, &series.rsi] {
            assert_eq!(s.len(), 50);
        }
    }

    #[test]
    fn test_snapshot_marks_warm_up_indicators_undefined() {
        // 25 bars: SMA/ATR/RSI/BB are warm, ADX (28 bars) and MACD (34 bars) are not.
        let candles = vec![ohlc(100.0, 101.0, 99.0, 100.0); 25];
        let snapshot = IndicatorEngine::new().snapshot(&candles);
        assert_eq!(snapshot.adx, None);
        assert_eq!(snapshot.macd_histogram, None);
        assert_eq!(snapshot.sma, Some(100.0));
        assert_eq!(snapshot.atr, Some(2.0));
        assert_eq!(snapshot.rsi, Some(50.0));
        assert_eq!(snapshot.bb_width, Some(0.0));
        assert_eq!(snapshot.last_close, Some(100.0));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let candles = trending(60, 42.0, -0.17, 0.9);
        let engine = IndicatorEngine::new();
        let first = engine.compute(&candles);
        let second = engine.compute(&candles);
        let bits = |s: &IndicatorSeries| -> Vec<Option<u64>> {
            s.adx.iter().chain(&s.atr).chain(&s.sma).chain(&s.macd_histogram)
                .chain(&s.bb_width).chain(&s.rsi)
                .map(|v| v.map(f64::to_bits))
                .collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn test_catalog_describes_windows() {
        let catalog = IndicatorEngine::new().catalog();
        assert_eq!(catalog["adx"]["name"], "ADX(14)");
        assert_eq!(catalog["sma"]["parameters"]["period"], 20);
        assert_eq!(catalog["macd_histogram"]["parameters"]["slow"], 26);
        assert_eq!(catalog["bb_width"]["parameters"]["std_dev"], 2.0);
        assert_eq!(catalog.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_snapshot_of_empty_series() {
        let snapshot = IndicatorEngine::new().snapshot(&[]);
        assert_eq!(snapshot.adx, None);
        assert_eq!(snapshot.last_close, None);
    }
}
