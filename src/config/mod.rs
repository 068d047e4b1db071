//! Configuration module for SmartPay.
//!
//! Structured configuration loading from environment variables, organized
//! by concern: Backend and Observability.

mod backend_config;
mod observability_config;

pub use backend_config::{BackendEnvConfig, DEFAULT_TIMEOUT_SECS};
pub use observability_config::ObservabilityEnvConfig;

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_HISTORY_DISPLAY_LIMIT: usize = 8;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendEnvConfig,
    pub observability: ObservabilityEnvConfig,
    /// How many history entries front-ends show; the history itself is unbounded
    pub history_display_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend =
            BackendEnvConfig::from_vars(&lookup).context("Failed to load backend config")?;
        let observability = ObservabilityEnvConfig::from_vars(&lookup);

        let history_display_limit = match lookup("HISTORY_DISPLAY_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid HISTORY_DISPLAY_LIMIT: {}", raw))?,
            None => DEFAULT_HISTORY_DISPLAY_LIMIT,
        };

        Ok(Self {
            backend,
            observability,
            history_display_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_vars_defaults() {
        let config = Config::from_vars(|_| None).expect("Should parse with defaults");
        assert!(!config.backend.is_configured());
        assert!(config.observability.enabled);
        assert_eq!(config.history_display_limit, 8);
    }

    #[test]
    fn test_config_composes_sub_configs() {
        let config = Config::from_vars(|key| match key {
            "BACKEND_URL" => Some("http://127.0.0.1:8000/".to_string()),
            "API_KEY" => Some("k".to_string()),
            "HISTORY_DISPLAY_LIMIT" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.backend.base_url.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(config.backend.api_key.as_deref(), Some("k"));
        assert_eq!(config.history_display_limit, 3);
    }

    #[test]
    fn test_invalid_display_limit_is_reported() {
        let err = Config::from_vars(|key| {
            (key == "HISTORY_DISPLAY_LIMIT").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("HISTORY_DISPLAY_LIMIT"));
    }
}
