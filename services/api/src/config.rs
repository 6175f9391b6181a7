use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::session::DEFAULT_SESSION_TTL;

/// Placeholder shipped in sample `.env` files; treated as "no key configured".
const PLACEHOLDER_API_KEY: &str = "your_openai_key_here";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub chat_model: String,
    pub log_level: Level,
    pub lesson_content_path: PathBuf,
    pub session_ttl: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY);

        let openai_api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let lesson_content_path = std::env::var("LESSON_CONTENT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./lessons/lesson_content.json"));

        let session_ttl = match std::env::var("SESSION_TTL_SECS") {
            Ok(value) => value.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                ConfigError::InvalidValue("SESSION_TTL_SECS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_SESSION_TTL,
        };

        Ok(Self {
            bind_address,
            openai_api_key,
            openai_api_base,
            chat_model,
            log_level,
            lesson_content_path,
            session_ttl,
        })
    }

    /// Whether an LLM backend can be used for response generation.
    pub fn has_ai_backend(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
