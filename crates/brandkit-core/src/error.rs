//! Centralized error types for brandkit.

use thiserror::Error;

/// Main error type for brandkit operations.
#[derive(Error, Debug)]
pub enum BrandkitError {
    #[error("Invalid hex color: '{0}' (expected #RRGGBB)")]
    InvalidHex(String),

    #[error("Design system not found: {0}")]
    DesignSystemNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] brandkit_redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for brandkit operations.
pub type BrandkitResult<T> = Result<T, BrandkitError>;

impl BrandkitError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error was caused by caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHex(_) | Self::ValidationError(_) | Self::DesignSystemNotFound(_)
        )
    }
}
