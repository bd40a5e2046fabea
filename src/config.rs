//! Configuration module for learnrelay
//!
//! Configuration is loaded from environment variables into strongly-typed
//! nested sections. The platform identity doubles as the namespace seed
//! for statement identifier derivation, so it must be stable across
//! deployments of the same tenant.

use envconfig::Envconfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure for learnrelay
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct Config {
    /// Platform identity
    #[serde(flatten)]
    #[envconfig(nested)]
    pub platform: PlatformConfig,

    /// Statement delivery configuration
    #[serde(flatten)]
    #[envconfig(nested)]
    pub delivery: DeliveryConfig,

    /// Runtime configuration
    #[serde(flatten)]
    #[envconfig(nested)]
    pub runtime: RuntimeConfig,
}

/// Platform identity configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct PlatformConfig {
    /// Stable deployment/tenant identifier; seeds identifier derivation
    /// and scopes flat-format accounts and structured-format person ids
    #[envconfig(from = "PLATFORM_ID")]
    pub platform_id: String,

    /// Language tag for display maps
    #[envconfig(from = "LANGUAGE_TAG", default = "en-US")]
    pub language_tag: String,
}

/// Statement delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct DeliveryConfig {
    /// Endpoint receiving flat-format statements
    #[envconfig(from = "LRS_URL")]
    pub lrs_url: String,

    /// Bearer token for the flat-format endpoint
    #[envconfig(from = "LRS_AUTH_TOKEN")]
    pub lrs_auth_token: Option<String>,

    /// Endpoint receiving structured-format events
    #[envconfig(from = "CALIPER_URL")]
    pub caliper_url: String,

    /// Bearer token for the structured-format endpoint
    #[envconfig(from = "CALIPER_AUTH_TOKEN")]
    pub caliper_auth_token: Option<String>,

    /// Per-request timeout in seconds
    #[envconfig(from = "SEND_TIMEOUT_SECS", default = "30")]
    pub send_timeout_secs: u64,

    /// Base retry delay in milliseconds for transient delivery failures
    #[envconfig(from = "RETRY_BASE_MS", default = "100")]
    pub retry_base_ms: u64,
}

impl DeliveryConfig {
    /// Get the send timeout as a Duration
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// Get the base retry delay as a Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_ms)
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Deserialize, Serialize, Envconfig)]
pub struct RuntimeConfig {
    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,
}

impl RuntimeConfig {
    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Mask a credential for logging
fn masked(token: &Option<String>) -> &'static str {
    if token.is_some() {
        "***"
    } else {
        "(none)"
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.platform.platform_id.trim().is_empty() {
            return Err(Error::config("Platform id cannot be empty"));
        }

        if self.delivery.lrs_url.trim().is_empty() {
            return Err(Error::config("LRS URL cannot be empty"));
        }

        if self.delivery.caliper_url.trim().is_empty() {
            return Err(Error::config("Caliper URL cannot be empty"));
        }

        if self.delivery.send_timeout_secs == 0 {
            return Err(Error::config("Send timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// Log configuration (with credentials masked)
    pub fn log_config(&self) {
        tracing::info!(
            platform_id = %self.platform.platform_id,
            language_tag = %self.platform.language_tag,
            "Platform configuration"
        );

        tracing::info!(
            lrs_url = %self.delivery.lrs_url,
            lrs_auth = masked(&self.delivery.lrs_auth_token),
            caliper_url = %self.delivery.caliper_url,
            caliper_auth = masked(&self.delivery.caliper_auth_token),
            send_timeout_secs = %self.delivery.send_timeout_secs,
            "Delivery configuration"
        );

        tracing::info!(
            environment = %self.runtime.environment,
            log_level = %self.runtime.log_level,
            "Runtime configuration"
        );
    }
}
