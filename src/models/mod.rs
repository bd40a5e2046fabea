//! Data models for learnrelay
//!
//! This module contains the domain models used throughout the pipeline:
//! the caller-supplied event structures, the tagged metadata value model,
//! and the declarative field-validation layer.

pub mod error;
pub mod event;
pub mod validation;

// Re-export commonly used types
pub use error::{ValidationError, ValidationErrorKind};
pub use event::{Actor, Event, MetaValue, Metadata};
pub use validation::{validate, FieldKind, FieldRule};
