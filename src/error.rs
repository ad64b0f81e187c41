//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout resmon.
//! Every failure maps to a stable error code so callers (and the CLI's JSON
//! output) can branch on the cause instead of parsing messages.
//!
//! # Error Categories
//! - `Validation`: Options rejected before any statement is rendered or sent
//! - `Render`: A value could not be converted into its SQL text
//! - `Transport`: Failure reported by the executor, passed through unchanged
//! - `Decode`: A result row column held malformed content
//! - `InvalidEnum`: A result row column held text outside a closed enum set
//! - `NotFound`: No resource monitor matched the requested identifier exactly
//! - `CapabilityViolation`: DDL attempted through a read-only client
//! - `Config`: Configuration file errors

use thiserror::Error;

/// Main error type for resmon operations
#[derive(Error, Debug)]
pub enum ResmonError {
    /// Options failed validation (bad identifier, inconsistent field pairing)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Statement builder could not encode a field
    #[error("Render failed: {0}")]
    Render(String),

    /// Executor error, opaque to this crate
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed row content
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Row content outside the allowed set of values
    #[error("Invalid {kind} value: {value}")]
    InvalidEnum { kind: &'static str, value: String },

    /// Object does not exist or is not visible to the current role
    #[error("Object does not exist or not authorized: {0}")]
    NotFound(String),

    /// Operation blocked by the client's read-only configuration
    #[error("Capability violation: {0}")]
    CapabilityViolation(String),

    /// Configuration error (file not found, invalid JSON, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResmonError {
    /// Convert error to error code string for JSON output
    ///
    /// Error codes are stable and suitable for programmatic handling.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidEnum { .. } => "INVALID_ENUM",
            Self::NotFound(_) => "NOT_FOUND",
            Self::CapabilityViolation(_) => "CAPABILITY_VIOLATION",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get human-readable error message
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an invalid enum error
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnum {
            kind,
            value: value.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a capability violation error
    pub fn capability_violation(message: impl Into<String>) -> Self {
        Self::CapabilityViolation(message.into())
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias for resmon operations
pub type Result<T> = std::result::Result<T, ResmonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ResmonError::validation("test").error_code(), "VALIDATION_ERROR");
        assert_eq!(ResmonError::render("test").error_code(), "RENDER_ERROR");
        assert_eq!(ResmonError::transport("test").error_code(), "TRANSPORT_ERROR");
        assert_eq!(ResmonError::decode("test").error_code(), "DECODE_ERROR");
        assert_eq!(ResmonError::invalid_enum("frequency", "x").error_code(), "INVALID_ENUM");
        assert_eq!(ResmonError::not_found("test").error_code(), "NOT_FOUND");
        assert_eq!(
            ResmonError::capability_violation("test").error_code(),
            "CAPABILITY_VIOLATION"
        );
        assert_eq!(ResmonError::config_error("test").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_messages() {
        let err = ResmonError::invalid_enum("frequency", "FORTNIGHTLY");
        assert_eq!(err.message(), "Invalid frequency value: FORTNIGHTLY");

        let err = ResmonError::not_found("\"MONITOR\"");
        assert!(err.message().contains("does not exist"));
        assert!(err.message().contains("MONITOR"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(ResmonError::validation("x"), ResmonError::Validation(_)));
        assert!(matches!(ResmonError::render("x"), ResmonError::Render(_)));
        assert!(matches!(ResmonError::transport("x"), ResmonError::Transport(_)));
        assert!(matches!(ResmonError::decode("x"), ResmonError::Decode(_)));
        assert!(matches!(
            ResmonError::invalid_enum("frequency", "x"),
            ResmonError::InvalidEnum { kind: "frequency", .. }
        ));
        assert!(matches!(ResmonError::not_found("x"), ResmonError::NotFound(_)));
        assert!(matches!(ResmonError::config_error("x"), ResmonError::Config(_)));
    }
}
