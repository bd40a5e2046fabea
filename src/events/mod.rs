//! Event-builder registry
//!
//! One declarative builder per domain event, registered in a static table
//! keyed by event kind. The registry exposes the per-kind rule set and
//! statement descriptor, plus a generic dispatch used by callers that
//! route by kind (the service binary, replayers).

pub mod assignment;
pub mod submission;

pub use assignment::{create_assignment, update_assignment, view_assignment};
pub use submission::{
    comment_on_submission, grade_submission, submit_assignment, view_submission,
};

use serde::Deserialize;

use crate::config::Config;
use crate::error::Result;
use crate::models::{validate, Event, FieldRule};
use crate::statement::descriptor::{DerivedValues, StatementDescriptor};
use crate::statement::processor::{process_statement, Outcome};
use crate::transport::Transport;
use crate::vocab::EventKind;

/// Wire envelope for kind-routed events
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub kind: EventKind,

    #[serde(flatten)]
    pub event: Event,
}

/// Statement descriptor for an event kind
pub fn descriptor(kind: EventKind) -> StatementDescriptor {
    match kind {
        EventKind::AssignmentCreated => assignment::created_descriptor(),
        EventKind::AssignmentUpdated => assignment::updated_descriptor(),
        EventKind::AssignmentViewed => assignment::viewed_descriptor(),
        EventKind::SubmissionCreated => submission::submitted_descriptor(),
        EventKind::SubmissionGraded => submission::graded_descriptor(),
        EventKind::SubmissionCommented => submission::commented_descriptor(),
        EventKind::SubmissionViewed => submission::viewed_descriptor(),
    }
}

/// Validation rule set for an event kind
pub fn rules(kind: EventKind) -> &'static [FieldRule] {
    match kind {
        EventKind::AssignmentCreated | EventKind::AssignmentUpdated => {
            assignment::ASSIGNMENT_RULES
        },
        EventKind::AssignmentViewed => assignment::VIEW_ASSIGNMENT_RULES,
        EventKind::SubmissionCreated => submission::SUBMIT_RULES,
        EventKind::SubmissionGraded => submission::GRADE_RULES,
        EventKind::SubmissionCommented => submission::COMMENT_RULES,
        EventKind::SubmissionViewed => submission::VIEW_SUBMISSION_RULES,
    }
}

fn derived_values(kind: EventKind, event: &Event) -> DerivedValues {
    match kind {
        EventKind::SubmissionGraded => DerivedValues {
            scaled_score: submission::scaled_score(event),
        },
        _ => DerivedValues::default(),
    }
}

/// Validate, render, and dispatch one event by kind
///
/// A validation failure short-circuits before any derivation or dispatch;
/// the transport is never invoked for an invalid event.
pub async fn dispatch<T: Transport + ?Sized>(
    config: &Config,
    kind: EventKind,
    event: &Event,
    transport: &T,
) -> Result<Outcome> {
    validate(rules(kind), &event.metadata)?;

    let descriptor = descriptor(kind);
    let derived = derived_values(kind, event);

    process_statement(config, event, &descriptor, &derived, transport).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::EventKind;

    #[test]
    fn test_every_kind_is_registered() {
        for kind in EventKind::ALL {
            let descriptor = descriptor(kind);
            assert_eq!(descriptor.kind, kind);
            assert!(!rules(kind).is_empty());
        }
    }

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "kind": "assignment_created",
            "actor": {"id": "u1"},
            "timestamp": "2024-03-01T12:00:00Z",
            "metadata": {"id": "https://x/a1", "title": "Essay"}
        }"#;

        let envelope: EventEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.kind, EventKind::AssignmentCreated);
        assert_eq!(envelope.event.actor.id, "u1");
        assert_eq!(envelope.event.meta_text("title"), Some("Essay"));
    }
}
