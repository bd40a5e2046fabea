//! HTTP transport posting statements to their receiving stores
//!
//! Posts the flat statement to the LRS endpoint and the structured event
//! to the event-store endpoint, with bearer auth and exponential-backoff
//! retry of transient failures. Client errors are permanent; server errors
//! and connection failures are retried until the backoff budget runs out.

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Delivery, Transport, TransportError};
use crate::config::DeliveryConfig;
use crate::statement::caliper::CaliperEvent;
use crate::statement::xapi::XapiStatement;

const XAPI_VERSION_HEADER: &str = "X-Experience-API-Version";
const XAPI_VERSION: &str = "1.0.3";

/// HTTP emitter for both statement formats
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: DeliveryConfig,
}

impl HttpTransport {
    /// Build a transport from the delivery configuration
    pub fn new(config: &DeliveryConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.send_timeout())
            .build()
            .map_err(|e| TransportError::permanent(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn retry_policy(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.config.retry_base_delay(),
            multiplier: 2.0,
            max_interval: Duration::from_secs(10),
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        }
    }

    /// Post one JSON body with retry of transient failures
    async fn post_with_retry(
        &self,
        url: &str,
        auth: Option<&str>,
        extra_headers: &[(&str, &str)],
        body: &str,
    ) -> Result<(), TransportError> {
        let operation = || async {
            let mut request = self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());

            for (name, value) in extra_headers.iter().copied() {
                request = request.header(name, value);
            }
            if let Some(token) = auth {
                request = request.bearer_auth(token);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(url = url, status = %response.status(), "Statement accepted");
                    Ok(())
                },
                Ok(response) if response.status().is_server_error() => {
                    warn!(url = url, status = %response.status(), "Receiver error, will retry");
                    Err(backoff::Error::transient(TransportError::transient(
                        format!("{} responded {}", url, response.status()),
                    )))
                },
                Ok(response) => Err(backoff::Error::permanent(TransportError::permanent(
                    format!("{} responded {}", url, response.status()),
                ))),
                Err(err) => {
                    warn!(url = url, error = %err, "Request failed, will retry");
                    Err(backoff::Error::transient(TransportError::transient(
                        format!("Request to {} failed: {}", url, err),
                    )))
                },
            }
        };

        backoff::future::retry(self.retry_policy(), operation).await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        flat: &XapiStatement,
        structured: &CaliperEvent,
    ) -> Result<Delivery, TransportError> {
        let flat_body = serde_json::to_string(flat)
            .map_err(|e| TransportError::permanent(format!("Failed to serialize statement: {}", e)))?;
        let structured_body = serde_json::to_string(structured)
            .map_err(|e| TransportError::permanent(format!("Failed to serialize event: {}", e)))?;

        self.post_with_retry(
            &self.config.lrs_url,
            self.config.lrs_auth_token.as_deref(),
            &[(XAPI_VERSION_HEADER, XAPI_VERSION)],
            &flat_body,
        )
        .await?;

        self.post_with_retry(
            &self.config.caliper_url,
            self.config.caliper_auth_token.as_deref(),
            &[],
            &structured_body,
        )
        .await?;

        Ok(Delivery {
            endpoint: self.config.lrs_url.clone(),
            detail: Some(format!("structured copy to {}", self.config.caliper_url)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn test_transport_creation() {
        let config = test_config();
        assert!(HttpTransport::new(&config.delivery).is_ok());
    }

    #[test]
    fn test_retry_policy_uses_configured_base() {
        let config = test_config();
        let transport = HttpTransport::new(&config.delivery).unwrap();
        let policy = transport.retry_policy();
        assert_eq!(policy.initial_interval, config.delivery.retry_base_delay());
    }
}
