// Engine settings: an optional JSON file (ENGINE_CONFIG) overlaid by environment variables.
use crate::error::EngineError;
use crate::sentiment::SentimentConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HF_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-roberta-base-sentiment";
const DEV_TOKEN_PLACEHOLDER: &str = "dev_token_placeholder";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub grpc_port: u16,
    pub http_port: u16,
    pub hf_api_url: String,
    /// Bearer token for the inference API. Missing is tolerated for local development.
    pub hf_token: Option<String>,
    pub hf_timeout_ms: u64,
    pub hf_health_timeout_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "0.0.0.0".to_string(),
            grpc_port: 50051,
            http_port: 8000,
            hf_api_url: DEFAULT_HF_API_URL.to_string(),
            hf_token: None,
            hf_timeout_ms: 10_000,
            hf_health_timeout_ms: 5_000,
        }
    }
}

fn lookup_str(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn lookup_parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    current: T,
) -> Result<T, EngineError> {
    match lookup_str(lookup, name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| EngineError::ConfigError(format!("{} has an invalid value '{}'", name, raw))),
        None => Ok(current),
    }
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mut settings = match lookup_str(&lookup, "ENGINE_CONFIG") {
            Some(path) => Self::from_json_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(host) = lookup_str(&lookup, "ENGINE_HOST") {
            settings.host = host;
        }
        settings.grpc_port = lookup_parse(&lookup, "ENGINE_GRPC_PORT", settings.grpc_port)?;
        settings.http_port = lookup_parse(&lookup, "ENGINE_HTTP_PORT", settings.http_port)?;
        if let Some(url) = lookup_str(&lookup, "HF_API_URL") {
            settings.hf_api_url = url;
        }
        if let Some(token) = lookup_str(&lookup, "HF_TOKEN") {
            settings.hf_token = Some(token);
        }
        settings.hf_timeout_ms = lookup_parse(&lookup, "HF_TIMEOUT_MS", settings.hf_timeout_ms)?;
        settings.hf_health_timeout_ms =
            lookup_parse(&lookup, "HF_HEALTH_TIMEOUT_MS", settings.hf_health_timeout_ms)?;

        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings file '{}': {}", path.display(), e)))
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr, EngineError> {
        Self::socket_addr(&self.host, self.grpc_port)
    }

    pub fn http_addr(&self) -> Result<SocketAddr, EngineError> {
        Self::socket_addr(&self.host, self.http_port)
    }

    fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, EngineError> {
        format!("{}:{}", host, port)
            .parse()
            .map_err(|e| EngineError::ConfigError(format!("Invalid bind address {}:{}: {}", host, port, e)))
    }

    pub fn sentiment_config(&self) -> SentimentConfig {
        let api_token = match &self.hf_token {
            Some(token) => token.clone(),
            None => {
                tracing::error!("HF_TOKEN is not set; remote sentiment calls will be rejected");
                DEV_TOKEN_PLACEHOLDER.to_string()
            }
        };
        SentimentConfig {
            api_url: self.hf_api_url.clone(),
            api_token,
            request_timeout: Duration::from_millis(self.hf_timeout_ms),
            health_timeout: Duration::from_millis(self.hf_health_timeout_ms),
        }
    }
}
