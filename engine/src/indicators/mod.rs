// Technical indicators module
pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod snapshot;
pub mod sma;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerWidth;
pub use macd::MacdHistogram;
pub use rsi::Rsi;
pub use snapshot::{IndicatorEngine, IndicatorSeries, IndicatorSnapshot};
pub use sma::Sma;

use serde_json::Value;
use shared::models::Candle;

pub const ADX_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const RSI_PERIOD: usize = 14;
pub const SMA_PERIOD: usize = 20;
pub const MACD_FAST_PERIOD: usize = 12;
pub const MACD_SLOW_PERIOD: usize = 26;
pub const MACD_SIGNAL_PERIOD: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    /// Window sizes and multipliers of this instance, for reports.
    fn parameters(&self) -> Value;
    /// One entry per input bar; `None` where the indicator is undefined
    /// (warm-up bars, or arithmetic that produced a non-finite value).
    fn calculate(&self, data: &[Candle]) -> Vec<Option<f64>>;
}

/// Maps NaN and infinities to the undefined marker.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Last entry of an indicator series, if that bar is defined.
pub fn last_value(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
