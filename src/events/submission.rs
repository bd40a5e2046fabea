//! Submission event-builders
//!
//! Declarative definitions for the submission lifecycle: handing in,
//! grading, instructor feedback, and viewing. The scaled-score derivation
//! is the single piece of computed state, evaluated here before the engine
//! runs.

use crate::config::Config;
use crate::error::Result;
use crate::models::{Event, FieldKind, FieldRule};
use crate::statement::caliper::Entity;
use crate::statement::descriptor::{
    DerivedValues, FlatFacet, RenderContext, StatementDescriptor, StructuredFacet,
};
use crate::statement::processor::{timestamp_part, Outcome};
use crate::statement::xapi::{XapiActivity, XapiResult, XapiScore};
use crate::transport::Transport;
use crate::vocab::{self, EventKind};

/// Fields checked when a submission is handed in
pub const SUBMIT_RULES: &[FieldRule] = &[
    FieldRule::required("id", FieldKind::Uri),
    FieldRule::required("assignment", FieldKind::Uri),
    FieldRule::optional("submission", FieldKind::Text),
];

/// Fields checked when a submission is graded
pub const GRADE_RULES: &[FieldRule] = &[
    FieldRule::required("id", FieldKind::Uri),
    FieldRule::required("assignment", FieldKind::Uri),
    FieldRule::required("grade", FieldKind::Number),
    FieldRule::optional("grade_min", FieldKind::Number),
    FieldRule::optional("grade_max", FieldKind::Number),
];

/// Fields checked when feedback is left on a submission
pub const COMMENT_RULES: &[FieldRule] = &[
    FieldRule::required("id", FieldKind::Uri),
    FieldRule::required("submission", FieldKind::Uri),
    FieldRule::required("feedback", FieldKind::Text),
];

/// Fields checked when a submission is viewed
pub const VIEW_SUBMISSION_RULES: &[FieldRule] =
    &[FieldRule::required("submission", FieldKind::Uri)];

/// Normalized score, defined only when a non-zero maximum is supplied
///
/// An absent maximum yields an absent score, never a defaulted zero.
pub fn scaled_score(event: &Event) -> Option<f64> {
    let raw = event.meta_number("grade")?;
    let max = event.meta_number("grade_max")?;
    if max == 0.0 {
        return None;
    }
    Some(raw / max)
}

fn record_id_parts(event: &Event) -> Vec<String> {
    vec![event.meta_uri("id").unwrap_or_default()]
}

fn submit_flat(event: &Event, _derived: &DerivedValues, _ctx: &RenderContext<'_>) -> FlatFacet {
    let object = XapiActivity::new(
        event.meta_uri("id").unwrap_or_default(),
        vocab::activity::SOLUTION,
    )
    .extension(
        vocab::xapi_ext::ASSIGNMENT,
        event
            .meta_uri("assignment")
            .map(serde_json::Value::String),
    );

    let result = XapiResult {
        response: event.meta_text("submission").map(str::to_string),
        ..Default::default()
    };

    FlatFacet {
        object,
        result: result.into_option(),
    }
}

fn attempt_entity(event: &Event, id_field: &str) -> Entity {
    Entity::new(
        vocab::entity::ATTEMPT,
        event.meta_uri(id_field).unwrap_or_default(),
    )
    .attr("assignable", event.meta_uri("assignment"))
}

fn submit_structured(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    StructuredFacet {
        object: Some(attempt_entity(event, "id")),
        ..Default::default()
    }
}

fn grade_flat(event: &Event, derived: &DerivedValues, _ctx: &RenderContext<'_>) -> FlatFacet {
    let object = XapiActivity::new(
        event.meta_uri("id").unwrap_or_default(),
        vocab::activity::SOLUTION,
    )
    .extension(
        vocab::xapi_ext::ASSIGNMENT,
        event
            .meta_uri("assignment")
            .map(serde_json::Value::String),
    );

    let result = XapiResult {
        score: Some(XapiScore {
            raw: event.meta_number("grade"),
            min: event.meta_number("grade_min"),
            max: event.meta_number("grade_max"),
            scaled: derived.scaled_score,
        }),
        response: None,
    };

    FlatFacet {
        object,
        result: result.into_option(),
    }
}

fn grade_structured(
    event: &Event,
    derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    let attempt = attempt_entity(event, "id");

    let score_id = format!("{}/score", event.meta_uri("id").unwrap_or_default());
    let score = Entity::new(vocab::entity::SCORE, score_id)
        .attr("scoreGiven", event.meta_number("grade"))
        .attr("minScore", event.meta_number("grade_min"))
        .attr("maxScore", event.meta_number("grade_max"))
        .attr("scaledScore", derived.scaled_score);

    StructuredFacet {
        object: Some(attempt),
        generated: Some(score),
        ..Default::default()
    }
}

fn comment_flat(event: &Event, _derived: &DerivedValues, _ctx: &RenderContext<'_>) -> FlatFacet {
    let object = XapiActivity::new(
        event.meta_uri("id").unwrap_or_default(),
        vocab::activity::COMMENT,
    );

    let result = XapiResult {
        response: event.meta_text("feedback").map(str::to_string),
        ..Default::default()
    };

    FlatFacet {
        object,
        result: result.into_option(),
    }
}

fn comment_structured(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    let attempt = Entity::new(
        vocab::entity::ATTEMPT,
        event.meta_uri("submission").unwrap_or_default(),
    );

    let comment = Entity::new(
        vocab::entity::COMMENT,
        event.meta_uri("id").unwrap_or_default(),
    )
    .attr("commentValue", event.meta_text("feedback"));

    StructuredFacet {
        object: Some(attempt),
        generated: Some(comment),
        ..Default::default()
    }
}

fn view_submission_id_parts(event: &Event) -> Vec<String> {
    vec![
        timestamp_part(event.timestamp),
        event.meta_uri("submission").unwrap_or_default(),
        event.actor.user_id().to_string(),
    ]
}

fn view_submission_flat(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> FlatFacet {
    FlatFacet {
        object: XapiActivity::new(
            event.meta_uri("submission").unwrap_or_default(),
            vocab::activity::SOLUTION,
        ),
        result: None,
    }
}

fn view_submission_structured(
    event: &Event,
    _derived: &DerivedValues,
    _ctx: &RenderContext<'_>,
) -> StructuredFacet {
    StructuredFacet {
        object: Some(Entity::new(
            vocab::entity::ATTEMPT,
            event.meta_uri("submission").unwrap_or_default(),
        )),
        ..Default::default()
    }
}

pub(super) fn submitted_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::SubmissionCreated,
        verb: vocab::verb(EventKind::SubmissionCreated),
        id_parts: record_id_parts,
        flat: submit_flat,
        structured: submit_structured,
    }
}

pub(super) fn graded_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::SubmissionGraded,
        verb: vocab::verb(EventKind::SubmissionGraded),
        id_parts: record_id_parts,
        flat: grade_flat,
        structured: grade_structured,
    }
}

pub(super) fn commented_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::SubmissionCommented,
        verb: vocab::verb(EventKind::SubmissionCommented),
        id_parts: record_id_parts,
        flat: comment_flat,
        structured: comment_structured,
    }
}

pub(super) fn viewed_descriptor() -> StatementDescriptor {
    StatementDescriptor {
        kind: EventKind::SubmissionViewed,
        verb: vocab::verb(EventKind::SubmissionViewed),
        id_parts: view_submission_id_parts,
        flat: view_submission_flat,
        structured: view_submission_structured,
    }
}

/// Record that a submission was handed in
pub async fn submit_assignment<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::SubmissionCreated, event, transport).await
}

/// Record a grade on a submission
pub async fn grade_submission<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::SubmissionGraded, event, transport).await
}

/// Record instructor feedback on a submission
pub async fn comment_on_submission<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::SubmissionCommented, event, transport).await
}

/// Record that a submission was viewed
pub async fn view_submission<T: Transport + ?Sized>(
    config: &Config,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    super::dispatch(config, EventKind::SubmissionViewed, event, transport).await
}
