// Flat last-bar summary of MACD histogram, Bollinger width, ADX and RSI.
use super::validate_series;
use crate::indicators::IndicatorEngine;
use crate::outcome::{FallbackReason, Outcome};
use shared::models::{Candle, TechnicalsResult};

#[derive(Default)]
pub struct TechnicalsSummary {
    indicators: IndicatorEngine,
}

impl TechnicalsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summarize(&self, data: &[Candle]) -> Outcome<TechnicalsResult> {
        if let Err(reason) = validate_series(data) {
            tracing::debug!(bars = data.len(), %reason, "Technicals fall back to defaults");
            return Outcome::fallback(TechnicalsResult::default(), reason);
        }

        let snapshot = self.indicators.snapshot(data);
        let mut undefined = Vec::new();
        let mut pick = |name: &'static str, value: Option<f64>, default: f64| {
            value.unwrap_or_else(|| {
                undefined.push(name);
                default
            })
        };

        let result = TechnicalsResult {
            macd_histogram: pick("macd_histogram", snapshot.macd_histogram, TechnicalsResult::DEFAULT_MACD_HISTOGRAM),
            bb_width: pick("bb_width", snapshot.bb_width, TechnicalsResult::DEFAULT_BB_WIDTH),
            adx: pick("adx", snapshot.adx, TechnicalsResult::DEFAULT_ADX),
            rsi: pick("rsi", snapshot.rsi, TechnicalsResult::DEFAULT_RSI),
        };

        if undefined.is_empty() {
            Outcome::Computed(result)
        } else {
            let reason = FallbackReason::UndefinedIndicator { fields: undefined };
            tracing::debug!(bars = data.len(), %reason, "Technicals computed with defaulted indicators");
            Outcome::fallback(result, reason)
        }
    }
}
