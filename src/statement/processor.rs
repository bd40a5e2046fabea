//! Statement processing core
//!
//! The processor orchestrates a single atomic derive-render-dispatch
//! sequence: derive the primary identifier from the descriptor's part
//! list, assemble both target-format payloads around the common envelope
//! (actor, verb, timestamp), and hand the pair to the transport. The
//! transport await is the only suspension point, and every call reports
//! exactly one outcome.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::models::Event;
use crate::statement::caliper::{render_person, CaliperEvent};
use crate::statement::descriptor::{
    DerivedValues, FlatFacet, RenderContext, StatementDescriptor, StructuredFacet,
};
use crate::statement::id::derive_statement_id;
use crate::statement::xapi::{render_agent, XapiStatement, XapiVerb};
use crate::transport::{Delivery, Transport};
use crate::vocab;

/// The engine's output: two sibling payloads sharing one primary identifier
#[derive(Debug, Clone)]
pub struct RenderedStatement {
    pub id: Uuid,
    pub flat: XapiStatement,
    pub structured: CaliperEvent,
}

/// A rendered statement together with the transport's receipt
#[derive(Debug, Clone)]
pub struct Outcome {
    pub statement: RenderedStatement,
    pub delivery: Delivery,
}

/// Render both target formats for an already-validated event
///
/// Pure with respect to the event: repeated calls with identical inputs
/// produce identical payloads, including the derived identifier.
pub fn render_statement(
    config: &Config,
    event: &Event,
    descriptor: &StatementDescriptor,
    derived: &DerivedValues,
) -> RenderedStatement {
    let ctx = RenderContext {
        platform: &config.platform.platform_id,
        language: &config.platform.language_tag,
    };

    let parts = (descriptor.id_parts)(event);
    let id = derive_statement_id(ctx.platform, descriptor.verb.uri, &parts);

    debug!(
        kind = %descriptor.kind,
        statement_id = %id,
        parts = parts.len(),
        "Derived statement identifier"
    );

    let FlatFacet { object, result } = (descriptor.flat)(event, derived, &ctx);
    let flat = XapiStatement {
        id,
        actor: render_agent(&event.actor, ctx.platform),
        verb: XapiVerb::from_term(descriptor.verb, ctx.language),
        object,
        result,
        timestamp: event.timestamp,
    };

    let StructuredFacet {
        object,
        generated,
        target,
    } = (descriptor.structured)(event, derived, &ctx);
    let structured = CaliperEvent {
        context: vocab::STRUCTURED_CONTEXT,
        id: CaliperEvent::urn(id),
        event_type: vocab::structured_event_type(descriptor.kind),
        action: descriptor.verb.action,
        actor: render_person(&event.actor, ctx.platform),
        object,
        generated,
        target,
        event_time: event.timestamp,
    };

    RenderedStatement {
        id,
        flat,
        structured,
    }
}

/// Render and dispatch a statement, reporting exactly one outcome
///
/// Validation happens before this call in the event-builders; a transport
/// failure is surfaced unmodified and nothing is retried here.
pub async fn process_statement<T>(
    config: &Config,
    event: &Event,
    descriptor: &StatementDescriptor,
    derived: &DerivedValues,
    transport: &T,
) -> Result<Outcome>
where
    T: Transport + ?Sized,
{
    let statement = render_statement(config, event, descriptor, derived);

    let delivery = transport.send(&statement.flat, &statement.structured).await?;

    info!(
        kind = %descriptor.kind,
        statement_id = %statement.id,
        endpoint = %delivery.endpoint,
        "Statement dispatched"
    );

    Ok(Outcome {
        statement,
        delivery,
    })
}

/// Deterministic rendering of a timestamp identifier part
pub fn timestamp_part(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}
