//! Configuration settings structures for notify-sdk
//!
//! This module defines the configuration structures that can be loaded from
//! TOML files and environment variables.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};

/// Endpoint used when no override is configured.
pub const DEFAULT_NOTIFICATION_ENDPOINT: &str = "http://localhost:9012/v1/notification/send/sync";

// ============================================================================
// Default value functions
// ============================================================================

fn default_endpoint() -> String {
    DEFAULT_NOTIFICATION_ENDPOINT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Notification Configuration
// ============================================================================

/// Where and how notifications are delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Downstream send endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Treat non-2xx downstream responses as errors instead of successes
    #[serde(default)]
    pub reject_error_status: bool,
}

impl NotificationConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Validate the notification configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::validation(
                "notification.endpoint".to_string(),
                format!("invalid URL '{}': {}", self.endpoint, e),
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "notification.endpoint".to_string(),
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            ));
        }

        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            reject_error_status: false,
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Logger settings as they appear in configuration sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: full, compact or json
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert into the logger module's runtime configuration
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self.parse_format()?;
        Ok(LoggerConfig {
            level: self.level,
            format,
            colored: self.colored,
        })
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format.parse::<LogFormat>().map_err(|_| {
            ConfigError::validation(
                "logger.format".to_string(),
                format!(
                    "invalid format '{}', expected one of: full, compact, json",
                    self.format
                ),
            )
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notification.validate()?;
        self.logger.parse_format()?;
        Ok(())
    }
}
