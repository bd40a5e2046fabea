//! learnrelay library
//!
//! learnrelay converts learning-platform domain events into two analytics
//! statement formats, a flat activity-stream statement and a structured
//! typed event, and delivers both through a pluggable transport. The
//! statement engine (validation, deterministic identifier derivation,
//! dual-format rendering) lives under [`statement`] and [`models`]; the
//! per-event declarative builders live under [`events`].

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod statement;
pub mod test_utils;
pub mod transport;
pub mod vocab;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{Error, Result};

// Re-export model types
pub use models::{Actor, Event, MetaValue, Metadata, ValidationError, ValidationErrorKind};

// Re-export engine types
pub use statement::{Outcome, RenderedStatement};

// Re-export the transport boundary
pub use transport::{Delivery, HttpTransport, Transport, TransportError};

// Re-export the event vocabulary
pub use vocab::EventKind;
