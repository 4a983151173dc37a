// Fail-soft results: every analysis path yields a value, and says when it degraded.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Fewer bars than the slowest indicator window.
    InsufficientData { bars: usize, required: usize },
    /// A candle with a non-finite or non-positive price, or negative volume.
    MalformedInput { index: usize },
    /// Indicators that were undefined on the last bar and replaced by defaults.
    UndefinedIndicator { fields: Vec<&'static str> },
    EmptyText,
    RemoteStatus(u16),
    RemoteTransport(String),
    MalformedResponse(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::InsufficientData { bars, required } => {
                write!(f, "insufficient data: {} bars, {} required", bars, required)
            }
            FallbackReason::MalformedInput { index } => write!(f, "malformed candle at index {}", index),
            FallbackReason::UndefinedIndicator { fields } => {
                write!(f, "undefined indicator(s): {}", fields.join(", "))
            }
            FallbackReason::EmptyText => f.write_str("empty text"),
            FallbackReason::RemoteStatus(status) => write!(f, "remote classifier returned {}", status),
            FallbackReason::RemoteTransport(msg) => write!(f, "remote classifier unreachable: {}", msg),
            FallbackReason::MalformedResponse(msg) => write!(f, "unexpected remote response: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Computed(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Outcome::Fallback { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Computed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Computed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::Computed(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let computed = Outcome::Computed(3);
        assert_eq!(*computed.value(), 3);
        assert!(!computed.is_degraded());
        assert_eq!(computed.fallback_reason(), None);

        let degraded = Outcome::fallback(0, FallbackReason::EmptyText);
        assert!(degraded.is_degraded());
        assert_eq!(degraded.fallback_reason(), Some(&FallbackReason::EmptyText));
        assert_eq!(degraded.into_value(), 0);
    }

    #[test]
    fn test_reason_messages() {
        let reason = FallbackReason::UndefinedIndicator { fields: vec!["adx", "macd_histogram"] };
        assert_eq!(reason.to_string(), "undefined indicator(s): adx, macd_histogram");
        let reason = FallbackReason::InsufficientData { bars: 3, required: 20 };
        assert_eq!(reason.to_string(), "insufficient data: 3 bars, 20 required");
    }
}
