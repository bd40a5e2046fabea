//! Validation error types for learnrelay models
//!
//! Field validation reports exactly one failure per call: the first field
//! that is missing or type-mismatched, in rule-declaration order.

use std::fmt;

use thiserror::Error;

use super::validation::FieldKind;

/// A single field-validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The kind of validation failure
    pub kind: ValidationErrorKind,
    /// The field that failed validation
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }

    /// True when the failure is a missing required field
    pub fn is_missing(&self) -> bool {
        self.kind == ValidationErrorKind::MissingField
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Specific validation failure kinds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Field is required but missing or blank
    #[error("required field is missing")]
    MissingField,

    /// Field is present but does not conform to its declared kind
    #[error("expected a {expected} value")]
    WrongType { expected: FieldKind },
}

/// Result type alias for validation operations
pub type ValidationResult = Result<(), ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new(ValidationErrorKind::MissingField, "assignment");
        let display = error.to_string();
        assert!(display.contains("assignment"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_validation_error_with_context() {
        let error = ValidationError::with_context(
            ValidationErrorKind::WrongType {
                expected: FieldKind::Uri,
            },
            "id",
            "got a number",
        );
        assert_eq!(error.field, "id");
        assert_eq!(error.context.as_deref(), Some("got a number"));
        assert!(error.to_string().contains("uri"));
    }

    #[test]
    fn test_is_missing() {
        assert!(ValidationError::new(ValidationErrorKind::MissingField, "f").is_missing());
        assert!(!ValidationError::new(
            ValidationErrorKind::WrongType {
                expected: FieldKind::Number,
            },
            "f"
        )
        .is_missing());
    }
}
