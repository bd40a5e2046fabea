//! Assignment event-builders
//!
//! Declarative definitions for the assignment lifecycle: creation,
//! modification, and viewing. Each builder is a rule slice plus a
//! statement descriptor; the engine owns everything else.

use crate::config::Config;
use crate::error::Result;
use crate::models::{Event, FieldKind, FieldRule, MetaValue};
use crate::statement::caliper::Entity;
use crate::statement::descriptor::{
    DerivedValues, FlatFacet, RenderContext, StatementDescriptor, StructuredFacet,
};
use crate::statement::processor::{timestamp_part, Outcome};
use crate::statement::xapi::XapiActivity;
use crate::transport::Transport;
use crate::vocab::{self, EventKind};

/// Fields checked for create and update events
pub const ASSIGNMENT_RULES: &[FieldRule] = &[
    FieldRule::required("id", FieldKind::Uri),
    FieldRule::required("title", FieldKind::Text),
    FieldRule::optional("description", FieldKind::Text),
    FieldRule::optional("due_at", FieldKind::Date),
    FieldRule::optional("max_points", FieldKind::Number),
    FieldRule::optional("submission_types", FieldKind::Sequence),
];

/// Fields checked for view events
pub const VIEW_ASSIGNMENT_RULES: &[FieldRule] =
    &[FieldRule::required("assignment", FieldKind::Uri)];

fn sequence_json(items: &[MetaValue]) -> serde_json::Value {
    serde_json::Value::Array(items.iter().map(MetaValue::to_json).collect())
}

fn assignment_id_parts(event: &Event) -> Vec<String> {
    vec![event.meta_uri("id").unwrap_or_default()]
}

fn assignment_flat(
    event: &Event,
    _derived: &DerivedValues,
    ctx: &RenderContext<'_>,
) -> FlatFacet {
    let object = XapiActivity::new(
        event.meta_uri("id").unwrap_or_default(),
        vocab::activity::ASSIGNMENT,
    )
    .named(ctx.language, event.meta_text("title"))
    .described(ctx.language, event.meta_text("description"))
    .extension(
        vocab::xapi_ext::DUE_DATE,
        event
            .meta_date("due_at")
            .map(|d| serde_json::Value::String(d.to_rfc3339())),
    )
    .extension(
        vocab::xapi_ext::MAX_POINTS,
        event.meta_number("max_points").map(serde_json::Value::from),
    )
    .extension(
        vocab::xapi_ext::SUBMISSION_TYPES,
        event.meta_sequence("submission_types").map(sequence_json),
    );

    FlatFacet {
        object,
        result: None,
    }
}

fn assignment_structured(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    let object = Entity::new(
        vocab::entity::ASSIGNABLE,
        event.meta_uri("id").unwrap_or_default(),
    )
    .attr("name", event.meta_text("title"))
    .attr("description", event.meta_text("description"))
    .attr("dateToSubmit", event.meta_date("due_at").map(|d| d.to_rfc3339()))
    .attr("maxScore", event.meta_number("max_points"))
    .extensions([(
        vocab::caliper_ext::SUBMISSION_TYPES,
        event.meta_sequence("submission_types").map(sequence_json),
    )]);

    StructuredFacet {
        object: Some(object),
        ..Default::default()
    }
}

fn view_assignment_id_parts(event: &Event) -> Vec<String> {
    vec![
        timestamp_part(event.timestamp),
        event.meta_uri("assignment").unwrap_or_default(),
        event.actor.user_id().to_string(),
    ]
}

fn view_assignment_flat(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> FlatFacet {
    FlatFacet {
        object: XapiActivity::new(
            event.meta_uri("assignment").unwrap_or_default(),
            vocab::activity::ASSIGNMENT,
        ),
        result: None,
    }
}

fn view_assignment_structured(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    StructuredFacet {
        object: Some(Entity::new(
            vocab::entity::ASSIGNABLE,
            event.meta_uri("assignment").unwrap_or_default(),
        )),
        ..Default::default()
    }
}

pub(super) fn created_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::AssignmentCreated,
        verb: vocab::verb(EventKind::AssignmentCreated),
        id_parts: assignment_id_parts,
        flat: assignment_flat,
        structured: assignment_structured,
    }
}

pub(super) fn updated_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::AssignmentUpdated,
        verb: vocab::verb(EventKind::AssignmentUpdated),
        id_parts: assignment_id_parts,
        flat: assignment_flat,
        structured: assignment_structured,
    }
}

pub(super) fn viewed_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::AssignmentViewed,
        verb: vocab::verb(EventKind::AssignmentViewed),
        id_parts: view_assignment_id_parts,
        flat: view_assignment_flat,
        structured: view_assignment_structured,
    }
}

/// Announce a newly created assignment
pub async fn create_assignment<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::AssignmentCreated, event, transport).await
}

/// Announce a modified assignment
pub async fn update_assignment<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::AssignmentUpdated, event, transport).await
}

/// Record that an assignment was viewed
pub async fn view_assignment<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::AssignmentViewed, event, transport).await
}
