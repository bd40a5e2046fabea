//! Transport boundary for finished statements
//!
//! The engine hands every rendered statement pair to a transport
//! collaborator and relays its outcome. Whether that is an HTTP emitter, a
//! queue publish, or an in-memory capture is the collaborator's business;
//! the engine only needs a single completion signal per dispatch.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use thiserror::Error;

use crate::statement::caliper::CaliperEvent;
use crate::statement::xapi::XapiStatement;

/// Opaque transport failure, surfaced to callers unmodified
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub retryable: bool,
}

impl TransportError {
    /// A failure worth retrying inside a transport implementation
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    /// A failure that will not improve on retry
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

/// Receipt for a delivered statement pair
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Where the statement pair went
    pub endpoint: String,

    /// Implementation-specific detail for logs
    pub detail: Option<String>,
}

/// Delivery collaborator for finished dual-format statements
///
/// Implementations own their retries, timeouts, and batching; the engine
/// dispatches once per processed statement and reports exactly one
/// outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one statement pair, returning a receipt or an opaque error
    async fn send(
        &self,
        flat: &XapiStatement,
        structured: &CaliperEvent,
    ) -> Result<Delivery, TransportError>;
}
