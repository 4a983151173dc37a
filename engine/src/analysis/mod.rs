// Regime classification and technicals extraction over a candle window.
pub mod regime;
pub mod technicals;

pub use regime::RegimeClassifier;
pub use technicals::TechnicalsSummary;

use crate::outcome::FallbackReason;
use shared::models::Candle;

/// Bars needed by the slowest indicator window (SMA-20 / Bollinger-20).
pub const MIN_BARS: usize = 20;

/// Size and sanity check shared by both extractors.
pub(crate) fn validate_series(data: &[Candle]) -> Result<(), FallbackReason> {
    if data.len() < MIN_BARS {
        return Err(FallbackReason::InsufficientData { bars: data.len(), required: MIN_BARS });
    }
    match data.iter().position(|c| !c.is_well_formed()) {
        Some(index) => Err(FallbackReason::MalformedInput { index }),
        None => Ok(()),
    }
}
