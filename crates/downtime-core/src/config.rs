//! Client configuration for the downtime resource adapter
//!
//! This module defines how a [`crate::DowntimeApi`] client is configured.
//! Resource-level configuration (the user's downtime block) lives in
//! [`crate::resource::config`].

use serde::{Deserialize, Serialize};
use std::env;

/// Default Datadog API endpoint
pub const DEFAULT_API_URL: &str = "https://api.datadoghq.com";

/// API client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiConfig {
    /// Datadog REST API
    Datadog {
        /// Datadog API key
        api_key: String,
        /// Datadog application key
        app_key: String,
        /// Base URL of the API (site specific)
        #[serde(default = "default_api_url")]
        api_url: String,
        /// Per-request timeout in seconds
        #[serde(default = "default_http_timeout_secs")]
        http_timeout_secs: u64,
    },

    /// Custom client
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ApiConfig {
    /// Create a Datadog configuration with default endpoint and timeout
    pub fn datadog(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        ApiConfig::Datadog {
            api_key: api_key.into(),
            app_key: app_key.into(),
            api_url: default_api_url(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }

    /// Load a Datadog configuration from environment variables
    ///
    /// Recognized variables (the `DATADOG_*` spelling is accepted as fallback):
    ///
    /// - `DD_API_KEY` / `DATADOG_API_KEY` (required)
    /// - `DD_APP_KEY` / `DATADOG_APP_KEY` (required)
    /// - `DD_HOST` / `DATADOG_HOST` (default: `https://api.datadoghq.com`)
    /// - `DD_HTTP_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, crate::Error> {
        let api_key = env_any(&["DD_API_KEY", "DATADOG_API_KEY"])
            .ok_or_else(|| crate::Error::config("DD_API_KEY is required"))?;
        let app_key = env_any(&["DD_APP_KEY", "DATADOG_APP_KEY"])
            .ok_or_else(|| crate::Error::config("DD_APP_KEY is required"))?;
        let api_url = env_any(&["DD_HOST", "DATADOG_HOST"]).unwrap_or_else(default_api_url);
        let http_timeout_secs = match env::var("DD_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                crate::Error::config(format!("DD_HTTP_TIMEOUT_SECS is not a number: {}", e))
            })?,
            Err(_) => default_http_timeout_secs(),
        };

        let config = ApiConfig::Datadog {
            api_key,
            app_key,
            api_url,
            http_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ApiConfig::Datadog {
                api_key,
                app_key,
                api_url,
                http_timeout_secs,
            } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("Datadog API key cannot be empty"));
                }
                if app_key.is_empty() {
                    return Err(crate::Error::config(
                        "Datadog application key cannot be empty",
                    ));
                }
                if !api_url.starts_with("https://") && !api_url.starts_with("http://") {
                    return Err(crate::Error::config(format!(
                        "Datadog API URL must use HTTP or HTTPS scheme. Got: {}",
                        api_url
                    )));
                }
                if *http_timeout_secs == 0 {
                    return Err(crate::Error::config("HTTP timeout must be > 0"));
                }
                Ok(())
            }
            ApiConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom client factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom client config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the client type name
    pub fn type_name(&self) -> &str {
        match self {
            ApiConfig::Datadog { .. } => "datadog",
            ApiConfig::Custom { factory, .. } => factory,
        }
    }
}

// Key material never shows up in Debug output
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiConfig::Datadog {
                api_url,
                http_timeout_secs,
                ..
            } => f
                .debug_struct("Datadog")
                .field("api_key", &"<REDACTED>")
                .field("app_key", &"<REDACTED>")
                .field("api_url", api_url)
                .field("http_timeout_secs", http_timeout_secs)
                .finish(),
            ApiConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datadog_defaults_from_json() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "type": "datadog",
            "api_key": "k",
            "app_key": "a",
        }))
        .unwrap();

        match &config {
            ApiConfig::Datadog {
                api_url,
                http_timeout_secs,
                ..
            } => {
                assert_eq!(api_url, DEFAULT_API_URL);
                assert_eq!(*http_timeout_secs, 30);
            }
            other => panic!("unexpected config: {other:?}"),
        }
        assert!(config.validate().is_ok());
        assert_eq!(config.type_name(), "datadog");
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert!(ApiConfig::datadog("", "app").validate().is_err());
        assert!(ApiConfig::datadog("api", "").validate().is_err());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let config = ApiConfig::Datadog {
            api_key: "k".into(),
            app_key: "a".into(),
            api_url: "ftp://api.datadoghq.com".into(),
            http_timeout_secs: 30,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn custom_requires_factory_and_config() {
        let config = ApiConfig::Custom {
            factory: String::new(),
            config: serde_json::json!({}),
        };
        assert!(config.validate().is_err());

        let config = ApiConfig::Custom {
            factory: "mock".into(),
            config: serde_json::Value::Null,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_hides_keys() {
        let config = ApiConfig::datadog("secret_api_key_123", "secret_app_key_456");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret_api_key_123"));
        assert!(!rendered.contains("secret_app_key_456"));
        assert!(rendered.contains("<REDACTED>"));
    }
}
