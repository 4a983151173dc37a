use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ordering key of a candle. Clients send epoch millis (integer or
/// float) or a string (the .NET client stringifies its `long`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Millis(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{}", ms),
            Timestamp::Fractional(ms) => write!(f, "{}", ms),
            Timestamp::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(default)]
    pub timestamp: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Prices must be finite and positive, volume finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p > 0.0)
            && self.volume.is_finite()
            && self.volume >= 0.0
    }
}

/// Inbound payload shared by the regime and technicals endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub data: Vec<Candle>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Regime {
    Ranging,
    BullTrend,
    BearTrend,
    VolatileBreakout,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::Ranging => "Ranging",
            Regime::BullTrend => "BullTrend",
            Regime::BearTrend => "BearTrend",
            Regime::VolatileBreakout => "VolatileBreakout",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub volatility_score: f64,
    pub trend_strength: f64,
}

impl RegimeResult {
    /// Response used whenever the series cannot be classified.
    pub fn insufficient_data() -> Self {
        RegimeResult {
            regime: Regime::Ranging,
            volatility_score: 0.0,
            trend_strength: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalsResult {
    pub macd_histogram: f64,
    pub bb_width: f64,
    pub adx: f64,
    pub rsi: f64,
}

impl TechnicalsResult {
    pub const DEFAULT_MACD_HISTOGRAM: f64 = 0.0;
    pub const DEFAULT_BB_WIDTH: f64 = 0.0;
    pub const DEFAULT_ADX: f64 = 0.0;
    /// RSI's neutral midpoint.
    pub const DEFAULT_RSI: f64 = 50.0;
}

impl Default for TechnicalsResult {
    fn default() -> Self {
        TechnicalsResult {
            macd_histogram: Self::DEFAULT_MACD_HISTOGRAM,
            bb_width: Self::DEFAULT_BB_WIDTH,
            adx: Self::DEFAULT_ADX,
            rsi: Self::DEFAULT_RSI,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
}

impl SentimentScores {
    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    pub fn set(&mut self, sentiment: Sentiment, score: f64) {
        match sentiment {
            Sentiment::Negative => self.negative = score,
            Sentiment::Neutral => self.neutral = score,
            Sentiment::Positive => self.positive = score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub scores: SentimentScores,
}

impl SentimentResult {
    /// Fixed answer substituted for any failed classification.
    pub fn neutral() -> Self {
        SentimentResult {
            sentiment: Sentiment::Neutral,
            confidence: 1.0,
            scores: SentimentScores {
                negative: 0.0,
                neutral: 1.0,
                positive: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Error,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub mode: String,
    #[serde(rename = "hf_status", skip_serializing_if = "Option::is_none", default)]
    pub remote_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}
