//! Controlled vocabulary for learnrelay statements
//!
//! Two parallel lookup tables indexed by the same semantic event kinds:
//! verb terms for the flat activity-stream format and type/action terms for
//! the structured event format. All data here is immutable, process-wide
//! static lookup material; the `EventKind` enum is closed, so a lookup for
//! an unknown kind is unrepresentable.

use serde::{Deserialize, Serialize};

/// Semantic event kinds supported by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AssignmentCreated,
    AssignmentUpdated,
    AssignmentViewed,
    SubmissionCreated,
    SubmissionGraded,
    SubmissionCommented,
    SubmissionViewed,
}

impl EventKind {
    /// All supported kinds, in declaration order
    pub const ALL: [EventKind; 7] = [
        EventKind::AssignmentCreated,
        EventKind::AssignmentUpdated,
        EventKind::AssignmentViewed,
        EventKind::SubmissionCreated,
        EventKind::SubmissionGraded,
        EventKind::SubmissionCommented,
        EventKind::SubmissionViewed,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AssignmentCreated => "assignment_created",
            EventKind::AssignmentUpdated => "assignment_updated",
            EventKind::AssignmentViewed => "assignment_viewed",
            EventKind::SubmissionCreated => "submission_created",
            EventKind::SubmissionGraded => "submission_graded",
            EventKind::SubmissionCommented => "submission_commented",
            EventKind::SubmissionViewed => "submission_viewed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shared controlled-vocabulary verb term
///
/// `uri` and `display` feed the flat format; `action` is the structured
/// format's rendering of the same semantic verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbTerm {
    pub uri: &'static str,
    pub display: &'static str,
    pub action: &'static str,
}

const CREATED: VerbTerm = VerbTerm {
    uri: "http://activitystrea.ms/schema/1.0/create",
    display: "created",
    action: "Created",
};

const UPDATED: VerbTerm = VerbTerm {
    uri: "http://activitystrea.ms/schema/1.0/update",
    display: "updated",
    action: "Modified",
};

const VIEWED: VerbTerm = VerbTerm {
    uri: "http://id.tincanapi.com/verb/viewed",
    display: "viewed",
    action: "Viewed",
};

const SUBMITTED: VerbTerm = VerbTerm {
    uri: "http://activitystrea.ms/schema/1.0/submit",
    display: "submitted",
    action: "Submitted",
};

const SCORED: VerbTerm = VerbTerm {
    uri: "http://adlnet.gov/expapi/verbs/scored",
    display: "scored",
    action: "Graded",
};

const COMMENTED: VerbTerm = VerbTerm {
    uri: "http://adlnet.gov/expapi/verbs/commented",
    display: "commented",
    action: "Commented",
};

/// Verb term for an event kind
pub fn verb(kind: EventKind) -> &'static VerbTerm {
    match kind {
        EventKind::AssignmentCreated => &CREATED,
        EventKind::AssignmentUpdated => &UPDATED,
        EventKind::AssignmentViewed => &VIEWED,
        EventKind::SubmissionCreated => &SUBMITTED,
        EventKind::SubmissionGraded => &SCORED,
        EventKind::SubmissionCommented => &COMMENTED,
        EventKind::SubmissionViewed => &VIEWED,
    }
}

/// Flat-format activity type identifiers
pub mod activity {
    pub const ASSIGNMENT: &str = "http://id.tincanapi.com/activitytype/school-assignment";
    pub const SOLUTION: &str = "http://id.tincanapi.com/activitytype/solution";
    pub const COMMENT: &str = "http://activitystrea.ms/schema/1.0/comment";
}

/// Flat-format activity type for the object of an event kind
pub fn activity_type(kind: EventKind) -> &'static str {
    match kind {
        EventKind::AssignmentCreated
        | EventKind::AssignmentUpdated
        | EventKind::AssignmentViewed => activity::ASSIGNMENT,
        EventKind::SubmissionCreated
        | EventKind::SubmissionGraded
        | EventKind::SubmissionViewed => activity::SOLUTION,
        EventKind::SubmissionCommented => activity::COMMENT,
    }
}

/// Structured-format entity type terms
pub mod entity {
    pub const PERSON: &str = "Person";
    pub const ASSIGNABLE: &str = "AssignableDigitalResource";
    pub const ATTEMPT: &str = "Attempt";
    pub const SCORE: &str = "Score";
    pub const COMMENT: &str = "Comment";
}

/// Structured-format serialization context
pub const STRUCTURED_CONTEXT: &str = "http://purl.imsglobal.org/ctx/caliper/v1p1";

/// Structured-format event type for an event kind
///
/// Graded and commented events carry no type term: the source vocabulary
/// leaves them blank pending product-owner clarification, and the envelope
/// prunes the absent tag.
pub fn structured_event_type(kind: EventKind) -> Option<&'static str> {
    match kind {
        EventKind::AssignmentCreated
        | EventKind::AssignmentUpdated
        | EventKind::SubmissionCreated => Some("AssignableEvent"),
        EventKind::AssignmentViewed | EventKind::SubmissionViewed => Some("ViewEvent"),
        EventKind::SubmissionGraded | EventKind::SubmissionCommented => None,
    }
}

/// Flat-format extension keys (IRI style)
pub mod xapi_ext {
    pub const DUE_DATE: &str = "https://w3id.org/learnrelay/extensions/due-date";
    pub const MAX_POINTS: &str = "https://w3id.org/learnrelay/extensions/max-points";
    pub const SUBMISSION_TYPES: &str = "https://w3id.org/learnrelay/extensions/submission-types";
    pub const ASSIGNMENT: &str = "https://w3id.org/learnrelay/extensions/assignment";
}

/// Structured-format extension keys (reverse-domain style)
pub mod caliper_ext {
    pub const SUBMISSION_TYPES: &str = "org.learnrelay.submissionTypes";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names_round_trip() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));

            let back: EventKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_every_kind_has_parallel_table_entries() {
        for kind in EventKind::ALL {
            assert!(!verb(kind).uri.is_empty());
            assert!(!verb(kind).action.is_empty());
            assert!(!activity_type(kind).is_empty());
        }
    }

    #[test]
    fn test_graded_and_commented_have_no_structured_type() {
        assert_eq!(structured_event_type(EventKind::SubmissionGraded), None);
        assert_eq!(structured_event_type(EventKind::SubmissionCommented), None);
        assert!(structured_event_type(EventKind::AssignmentCreated).is_some());
    }

    #[test]
    fn test_view_kinds_share_the_viewed_verb() {
        assert_eq!(
            verb(EventKind::AssignmentViewed),
            verb(EventKind::SubmissionViewed)
        );
    }
}
