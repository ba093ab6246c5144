//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once at startup and handed to the router through `AppState`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    BODY_LIMIT_OVERHEAD_BYTES, DEFAULT_ENGINE_BIN, DEFAULT_ENGINE_OUTPUT_GRACE_MS,
    DEFAULT_ENGINE_TIMEOUT_SECONDS, DEFAULT_LOG_FILTER, DEFAULT_MAX_CODE_BYTES,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, ENGINE_BIN_ENV, JSON_ESCAPE_FACTOR,
};

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    /// Upper bound on an inbound request body
    pub max_body_bytes: usize,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Execution engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the sentinel binary
    pub binary: PathBuf,
    /// Wall-clock limit for one invocation
    pub timeout: Duration,
    /// Grace period for draining output after the engine exits or is killed
    pub output_grace: Duration,
    /// Maximum UTF-8 byte length of submitted code
    pub max_code_bytes: usize,
    /// Directory that holds workspace files
    pub workspace_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
            max_body_bytes: default_body_limit(DEFAULT_MAX_CODE_BYTES),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_ENGINE_BIN),
            timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECONDS),
            output_grace: Duration::from_millis(DEFAULT_ENGINE_OUTPUT_GRACE_MS),
            max_code_bytes: DEFAULT_MAX_CODE_BYTES,
            workspace_dir: env::temp_dir(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let engine = EngineConfig::from_env()?;
        let server = ServerConfig::from_env(engine.max_code_bytes)?;

        Ok(Self { server, engine })
    }
}

impl ServerConfig {
    fn from_env(max_code_bytes: usize) -> Result<Self, ConfigError> {
        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::Text,
        };

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            log_format,
            max_body_bytes: match env::var("MAX_BODY_BYTES") {
                Ok(value) => parse_positive("MAX_BODY_BYTES", &value)?,
                Err(_) => default_body_limit(max_code_bytes),
            },
        })
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = parse_positive(
            "ENGINE_TIMEOUT_SECONDS",
            &env::var("ENGINE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_ENGINE_TIMEOUT_SECONDS.to_string()),
        )?;
        let grace_ms: u64 = env::var("ENGINE_OUTPUT_GRACE_MS")
            .unwrap_or_else(|_| DEFAULT_ENGINE_OUTPUT_GRACE_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("ENGINE_OUTPUT_GRACE_MS".to_string()))?;

        Ok(Self {
            binary: PathBuf::from(
                env::var(ENGINE_BIN_ENV).unwrap_or_else(|_| DEFAULT_ENGINE_BIN.to_string()),
            ),
            timeout: Duration::from_secs(timeout_secs),
            output_grace: Duration::from_millis(grace_ms),
            max_code_bytes: parse_positive(
                "MAX_CODE_BYTES",
                &env::var("MAX_CODE_BYTES").unwrap_or_else(|_| DEFAULT_MAX_CODE_BYTES.to_string()),
            )?,
            workspace_dir: env::var("WORKSPACE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
        })
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

/// Body limit large enough for a maximal submission after JSON escaping
fn default_body_limit(max_code_bytes: usize) -> usize {
    max_code_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_LIMIT_OVERHEAD_BYTES)
}

fn parse_positive<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
