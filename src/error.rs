//! Error handling module for learnrelay
//!
//! Two failure families matter to callers: validation errors, raised
//! synchronously before any derivation or dispatch, and transport errors,
//! surfaced unmodified from the delivery collaborator. Everything else is
//! plumbing (configuration, serialization, IO).

use thiserror::Error;

use crate::models::ValidationError;
use crate::transport::TransportError;

/// Result type alias for learnrelay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for learnrelay
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Field validation failures for inbound events
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Delivery failures, surfaced from the transport collaborator
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// The underlying field failure, when this is a validation error
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error came from the transport collaborator
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Convert from anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ValidationError, ValidationErrorKind};

    #[test]
    fn test_validation_error_is_inspectable() {
        let error: Error =
            ValidationError::new(ValidationErrorKind::MissingField, "assignment").into();

        let inner = error.as_validation().unwrap();
        assert_eq!(inner.field, "assignment");
        assert!(!error.is_transport());
    }

    #[test]
    fn test_transport_error_conversion() {
        let error: Error = TransportError::permanent("receiver said no").into();
        assert!(error.is_transport());
        assert!(error.to_string().contains("receiver said no"));
    }

    #[test]
    fn test_config_error_constructor() {
        let error = Error::config("missing PLATFORM_ID");
        assert!(matches!(error, Error::Config(_)));
    }
}
