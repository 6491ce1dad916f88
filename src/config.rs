//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::PathBuf;

use crate::alert::DEFAULT_ALERT_TIMEOUT_MS;
use crate::api::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Where the native front end persists the session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

#[cfg(feature = "native")]
fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("studyhub").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./studyhub_session.json".to_string())
}

#[cfg(not(feature = "native"))]
fn default_session_file() -> String {
    "./studyhub_session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_alert_timeout")]
    pub alert_timeout_ms: u64,
}

fn default_alert_timeout() -> u64 {
    DEFAULT_ALERT_TIMEOUT_MS
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_timeout_ms: default_alert_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str, path: &std::path::Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from a file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content, path)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("studyhub").join("config.toml")),
            Some(PathBuf::from("./studyhub.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STUDYHUB_API_URL") {
            self.api.base_url = url;
        }

        if let Ok(file) = std::env::var("STUDYHUB_SESSION_FILE") {
            self.session.file = file;
        }

        if let Ok(timeout) = std::env::var("STUDYHUB_ALERT_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.ui.alert_timeout_ms = ms;
            }
        }

        if let Ok(level) = std::env::var("STUDYHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STUDYHUB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# StudyHub Configuration
#
# Environment variables override these settings:
# - STUDYHUB_API_URL
# - STUDYHUB_SESSION_FILE
# - STUDYHUB_ALERT_TIMEOUT_MS
# - STUDYHUB_LOG_LEVEL
# - STUDYHUB_LOG_FORMAT

[api]
# Backend base URL, including the /api prefix
base_url = "http://localhost:8000/api"

[session]
# File holding the persisted token and username
# file = "~/.local/share/studyhub/session.json"

[ui]
# How long alerts stay visible (ms)
alert_timeout_ms = 4000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
