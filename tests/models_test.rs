//! Integration tests for learnrelay data models
//!
//! These tests verify the end-to-end behavior of envelope deserialization,
//! the tagged metadata value model, and rule-table validation.

use chrono::Utc;
use learnrelay::events::{self, EventEnvelope};
use learnrelay::models::{validate, Event, FieldKind, MetaValue, ValidationErrorKind};
use learnrelay::vocab::EventKind;
use serde_json::json;

/// Helper to create a valid create-assignment envelope JSON
fn valid_envelope_json() -> serde_json::Value {
    json!({
        "kind": "assignment_created",
        "actor": {"id": "u1", "name": "Ada"},
        "timestamp": Utc::now().to_rfc3339(),
        "metadata": {
            "id": "https://lms.example.edu/assignments/1",
            "title": "Essay",
            "max_points": 50,
            "submission_types": ["online_text", "online_url"]
        }
    })
}

#[test]
fn test_envelope_deserialization_valid() {
    let envelope: EventEnvelope =
        serde_json::from_value(valid_envelope_json()).expect("Should deserialize valid envelope");

    assert_eq!(envelope.kind, EventKind::AssignmentCreated);
    assert_eq!(envelope.event.actor.name.as_deref(), Some("Ada"));
    assert_eq!(envelope.event.meta_number("max_points"), Some(50.0));
    assert_eq!(
        envelope.event.meta_sequence("submission_types").map(|s| s.len()),
        Some(2)
    );
}

#[test]
fn test_envelope_deserialization_missing_optional_fields() {
    let json = json!({
        "kind": "assignment_viewed",
        "actor": {"id": "u1"},
        "timestamp": Utc::now().to_rfc3339(),
        "metadata": {"assignment": "https://lms.example.edu/assignments/1"}
    });

    let envelope: EventEnvelope =
        serde_json::from_value(json).expect("Should deserialize with missing optional fields");

    assert_eq!(envelope.kind, EventKind::AssignmentViewed);
    assert!(envelope.event.actor.name.is_none());
    assert!(envelope.event.actor.email.is_none());
    assert!(envelope.event.meta("title").is_none());
}

#[test]
fn test_unknown_kind_rejected_at_deserialization() {
    let mut json = valid_envelope_json();
    json["kind"] = json!("course_deleted");

    let result: Result<EventEnvelope, _> = serde_json::from_value(json);
    assert!(result.is_err());
}

#[test]
fn test_json_values_map_onto_tags() {
    let envelope: EventEnvelope = serde_json::from_value(valid_envelope_json()).unwrap();
    let metadata = &envelope.event.metadata;

    assert!(matches!(metadata["title"], MetaValue::Text(_)));
    assert!(matches!(metadata["max_points"], MetaValue::Number(_)));
    assert!(matches!(metadata["submission_types"], MetaValue::Sequence(_)));
}

#[test]
fn test_validation_accepts_wire_shaped_metadata() {
    // Everything arrives as Text/Number/Sequence off the wire; the uri and
    // date rules coerce from text.
    let envelope: EventEnvelope = serde_json::from_value(valid_envelope_json()).unwrap();

    let rules = events::rules(EventKind::AssignmentCreated);
    assert!(validate(rules, &envelope.event.metadata).is_ok());
}

#[test]
fn test_validation_rejects_malformed_uri_text() {
    let mut json = valid_envelope_json();
    json["metadata"]["id"] = json!("assignments/1");

    let envelope: EventEnvelope = serde_json::from_value(json).unwrap();
    let rules = events::rules(EventKind::AssignmentCreated);

    let err = validate(rules, &envelope.event.metadata).unwrap_err();
    assert_eq!(err.field, "id");
    assert_eq!(
        err.kind,
        ValidationErrorKind::WrongType {
            expected: FieldKind::Uri,
        }
    );
}

#[test]
fn test_validation_rejects_non_rfc3339_due_date() {
    let mut json = valid_envelope_json();
    json["metadata"]["due_at"] = json!("2024-06-01 12:00:00");

    let envelope: EventEnvelope = serde_json::from_value(json).unwrap();
    let rules = events::rules(EventKind::AssignmentCreated);

    let err = validate(rules, &envelope.event.metadata).unwrap_err();
    assert_eq!(err.field, "due_at");
}

#[test]
fn test_validation_reports_first_failure_in_declared_order() {
    // id precedes title in the rule set; with both broken, id is reported.
    let mut json = valid_envelope_json();
    json["metadata"]["id"] = json!("not a uri");
    json["metadata"]["title"] = json!("");

    let envelope: EventEnvelope = serde_json::from_value(json).unwrap();
    let rules = events::rules(EventKind::AssignmentCreated);

    let err = validate(rules, &envelope.event.metadata).unwrap_err();
    assert_eq!(err.field, "id");
}

#[test]
fn test_every_rule_set_declares_required_fields() {
    for kind in EventKind::ALL {
        let rules = events::rules(kind);
        assert!(
            rules.iter().any(|rule| rule.required),
            "every event kind declares at least one required field"
        );
    }
}

#[test]
fn test_timezone_handling() {
    let timestamps = vec![
        "2024-03-01T12:00:00Z",
        "2024-03-01T12:00:00+00:00",
        "2024-03-01T07:00:00-05:00",
        "2024-03-01T20:00:00+08:00",
    ];

    for timestamp in timestamps {
        let mut json = valid_envelope_json();
        json["timestamp"] = json!(timestamp);
        json["metadata"]["due_at"] = json!(timestamp);

        let envelope: EventEnvelope = serde_json::from_value(json).unwrap();

        // Event timestamps and coerced dates land in UTC.
        assert_eq!(envelope.event.timestamp.timezone(), Utc);
        assert!(envelope.event.meta_date("due_at").is_some());
    }
}

#[test]
fn test_event_serialization_round_trip() {
    let envelope: EventEnvelope = serde_json::from_value(valid_envelope_json()).unwrap();

    let serialized = serde_json::to_value(&envelope.event).unwrap();
    assert_eq!(serialized["actor"]["id"], "u1");
    assert_eq!(serialized["metadata"]["title"], "Essay");
    assert_eq!(serialized["metadata"]["max_points"], 50.0);

    let back: Event = serde_json::from_value(serialized).unwrap();
    assert_eq!(back.metadata, envelope.event.metadata);
}
