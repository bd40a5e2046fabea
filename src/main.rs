//! learnrelay - learning-analytics statement pipeline
//!
//! This binary reads newline-delimited JSON event envelopes from stdin,
//! renders each as a flat statement and a structured event, and delivers
//! both over HTTP to the configured receiving stores.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Instrument;

use learnrelay::error::Result;
use learnrelay::events::{self, EventEnvelope};
use learnrelay::statement_span;
use learnrelay::{Config, HttpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    learnrelay::logging::init_tracing(&config.runtime.log_level, &config.runtime.environment)?;

    // Log configuration (with credentials masked)
    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting learnrelay");

    let transport = HttpTransport::new(&config.delivery)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let envelope: EventEnvelope = match serde_json::from_str(line) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(error = %err, "Skipping malformed event envelope");
                continue;
            },
        };

        let span = statement_span!(envelope.kind);
        match events::dispatch(&config, envelope.kind, &envelope.event, &transport)
            .instrument(span)
            .await
        {
            Ok(outcome) => {
                tracing::info!(
                    kind = %envelope.kind,
                    statement_id = %outcome.statement.id,
                    endpoint = %outcome.delivery.endpoint,
                    "Event processed"
                );
            },
            Err(err) => {
                tracing::error!(
                    kind = %envelope.kind,
                    error = %err,
                    "Event rejected"
                );
            },
        }
    }

    tracing::info!("learnrelay shutdown complete");
    Ok(())
}
