use crate::config::error::ConfigError;
use crate::external::TransportError;
use thiserror::Error;

/// Crate-wide error type.
///
/// Every outcome of a notification send is funneled through this enum, so
/// callers match on one type whether the failure came from the transport,
/// the downstream service, or local configuration.
#[derive(Error, Debug)]
pub enum AppError {
    /// The transport could not obtain any response (connection refused,
    /// DNS failure, broken connection). The source is the transport's own
    /// error, unchanged.
    #[error("Notification transport failed")]
    Transport {
        #[from]
        source: TransportError,
    },

    /// The downstream service answered with a non-2xx status. Only produced
    /// when `reject_error_status` is enabled.
    #[error("Notification service responded with status {status}")]
    Downstream {
        status: u16,
        body: serde_json::Value,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to serialize notification envelope")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            ConfigError::FileNotFound(path) => path.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
