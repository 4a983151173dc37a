// Market regime classification from last-bar ADX, ATR, SMA-20 and close.
use super::validate_series;
use crate::indicators::{IndicatorEngine, IndicatorSnapshot};
use crate::outcome::{FallbackReason, Outcome};
use shared::models::{Candle, Regime, RegimeResult};

/// ADX above this marks the bar as trending.
pub const ADX_TREND_THRESHOLD: f64 = 25.0;
/// ATR as a percentage of the close above which volatility overrides trend.
pub const VOLATILITY_BREAKOUT_THRESHOLD: f64 = 2.0;

#[derive(Default)]
pub struct RegimeClassifier {
    indicators: IndicatorEngine,
}

impl RegimeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, data: &[Candle]) -> Outcome<RegimeResult> {
        if let Err(reason) = validate_series(data) {
            tracing::debug!(bars = data.len(), %reason, "Regime falls back to Ranging");
            return Outcome::fallback(RegimeResult::insufficient_data(), reason);
        }

        let snapshot = self.indicators.snapshot(data);
        let result = decide(&snapshot);

        let undefined: Vec<&'static str> = [
            ("adx", snapshot.adx),
            ("atr", snapshot.atr),
            ("sma", snapshot.sma),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

        tracing::debug!(
            regime = %result.regime,
            volatility_score = result.volatility_score,
            trend_strength = result.trend_strength,
            "Classified market regime"
        );

        if undefined.is_empty() {
            Outcome::Computed(result)
        } else {
            let reason = FallbackReason::UndefinedIndicator { fields: undefined };
            tracing::debug!(bars = data.len(), %reason, "Regime computed with defaulted indicators");
            Outcome::fallback(result, reason)
        }
    }
}

/// The decision procedure. Order matters: the volatility check runs last
/// and overrides any trend label. Undefined inputs make their condition false.
pub fn decide(snapshot: &IndicatorSnapshot) -> RegimeResult {
    let volatility_score = match (snapshot.atr, snapshot.last_close) {
        (Some(atr), Some(close)) if close > 0.0 => {
            let score = atr * 100.0 / close;
            if score.is_finite() { score } else { 0.0 }
        }
        _ => 0.0,
    };

    let mut regime = Regime::Ranging;

    if let Some(adx) = snapshot.adx.filter(|adx| *adx > ADX_TREND_THRESHOLD) {
        let above_sma = match (snapshot.last_close, snapshot.sma) {
            (Some(close), Some(sma)) => close > sma,
            _ => false,
        };
        regime = if above_sma { Regime::BullTrend } else { Regime::BearTrend };
        tracing::trace!(adx, above_sma, "Trend detected");
    }

    if volatility_score > VOLATILITY_BREAKOUT_THRESHOLD {
        regime = Regime::VolatileBreakout;
    }

    RegimeResult {
        regime,
        volatility_score,
        trend_strength: snapshot.adx.unwrap_or(0.0),
    }
}
