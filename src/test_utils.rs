//! Test utilities for learnrelay
//!
//! This module provides the in-memory transport mock and event fixtures
//! used by unit and integration tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::config::{Config, DeliveryConfig, PlatformConfig, RuntimeConfig};
use crate::models::{Actor, Event, MetaValue};
use crate::statement::caliper::CaliperEvent;
use crate::statement::xapi::XapiStatement;
use crate::transport::{Delivery, Transport, TransportError};

/// In-memory transport capturing every dispatched statement pair
#[derive(Debug, Clone)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<(XapiStatement, CaliperEvent)>>>,
    fail_next: Arc<Mutex<Option<String>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(None)),
        }
    }

    /// Configure the mock to fail the next send
    pub fn fail_next_operation(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    /// All statement pairs delivered so far
    pub fn sent(&self) -> Vec<(XapiStatement, CaliperEvent)> {
        self.sent.lock().unwrap().clone()
    }

    /// Clear captured statements
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        flat: &XapiStatement,
        structured: &CaliperEvent,
    ) -> Result<Delivery, TransportError> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(TransportError::permanent(message));
        }

        self.sent
            .lock()
            .unwrap()
            .push((flat.clone(), structured.clone()));

        Ok(Delivery {
            endpoint: "mock".to_string(),
            detail: None,
        })
    }
}

/// Create a test configuration
pub fn test_config() -> Config {
    Config {
        platform: PlatformConfig {
            platform_id: "https://lms.example.edu".to_string(),
            language_tag: "en-US".to_string(),
        },
        delivery: DeliveryConfig {
            lrs_url: "https://lrs.example.edu/statements".to_string(),
            lrs_auth_token: None,
            caliper_url: "https://events.example.edu/caliper".to_string(),
            caliper_auth_token: None,
            send_timeout_secs: 5,
            retry_base_ms: 10,
        },
        runtime: RuntimeConfig {
            log_level: "debug".to_string(),
            environment: "test".to_string(),
        },
    }
}

/// Create an event at a fixed timestamp with the given metadata fields
pub fn event_at(
    actor_id: &str,
    timestamp: DateTime<Utc>,
    fields: &[(&str, MetaValue)],
) -> Event {
    let mut event = Event::new(Actor::new(actor_id), timestamp);
    for (name, value) in fields {
        event.metadata.insert(name.to_string(), value.clone());
    }
    event
}

/// Shorthand for a textual metadata value
pub fn text(value: &str) -> MetaValue {
    MetaValue::Text(value.to_string())
}
