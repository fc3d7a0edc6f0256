//! Error handling for the Flood Guard core services

use thiserror::Error;

/// Failures of the persisted key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store cannot be reached at all (disabled, private mode, no window)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Core service error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for front-ends
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Storage(StorageError::QuotaExceeded { .. }) => "STORAGE_QUOTA_EXCEEDED",
            CoreError::Storage(_) => "STORAGE_UNAVAILABLE",
            CoreError::Validation { .. } => "VALIDATION_ERROR",
            CoreError::Serialization(_) => "SERIALIZATION_ERROR",
            CoreError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Configuration(err.to_string())
    }
}

/// Result type alias for core services
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let quota = CoreError::from(StorageError::QuotaExceeded {
            key: "history".into(),
        });
        assert_eq!(quota.code(), "STORAGE_QUOTA_EXCEEDED");
        assert_eq!(quota.to_string(), "Storage quota exceeded while writing history");

        let invalid = CoreError::validation("report", "Please enter a report.");
        assert_eq!(invalid.code(), "VALIDATION_ERROR");
        assert_eq!(invalid.to_string(), "Validation error: Please enter a report.");
    }
}
