use std::str::FromStr;

use tracing::Level;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const API_URL_VAR: &str = "STORERATE_API_URL";
pub const LOG_LEVEL_VAR: &str = "STORERATE_LOG";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}: `{value}` is not a log level (expected trace, debug, info, warn or error)")]
    InvalidLogLevel { key: &'static str, value: String },
}

/// Deployment settings of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub log_level: Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ClientConfig {
    /// Reads each variable through `lookup`; missing or blank values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = read(API_URL_VAR)
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => Level::from_str(&value).map_err(|_| ConfigError::InvalidLogLevel {
                key: LOG_LEVEL_VAR,
                value,
            })?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            api_base_url,
            log_level,
        })
    }

    /// Values baked in at compile time (`STORERATE_API_URL=... trunk build`).
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            API_URL_VAR => option_env!("STORERATE_API_URL").map(str::to_string),
            LOG_LEVEL_VAR => option_env!("STORERATE_LOG").map(str::to_string),
            _ => None,
        })
    }
}
