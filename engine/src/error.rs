use crate::outcome::FallbackReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Remote classifier transport error: {source}")]
    RemoteTransport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Remote classifier returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Unexpected remote classifier payload: {0}")]
    RemotePayload(String),
}

impl EngineError {
    /// Fallback reason reported when a remote failure is absorbed.
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            EngineError::RemoteTransport { source } => FallbackReason::RemoteTransport(source.to_string()),
            EngineError::RemoteStatus { status, .. } => FallbackReason::RemoteStatus(*status),
            EngineError::RemotePayload(msg) => FallbackReason::MalformedResponse(msg.clone()),
            other => FallbackReason::MalformedResponse(other.to_string()),
        }
    }
}
