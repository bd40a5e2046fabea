//! Per-event statement descriptors
//!
//! A descriptor is the static template pairing a verb with builders for
//! both target formats. Event-builder modules construct one descriptor per
//! event kind; the processor is generic over them and owns no per-event
//! knowledge.

use crate::models::Event;
use crate::statement::caliper::Entity;
use crate::statement::xapi::{XapiActivity, XapiResult};
use crate::vocab::{EventKind, VerbTerm};

/// Rendering inputs shared by both formats
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Platform identity: namespace seed, account home page, person id base
    pub platform: &'a str,
    /// Language tag for display maps
    pub language: &'a str,
}

/// Cross-field values computed by an event-builder before processing
///
/// The processor performs no domain arithmetic; anything derived from
/// multiple metadata fields (the scaled score) is computed up front and
/// passed through the templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedValues {
    /// Normalized score, present only when a non-zero maximum was supplied
    pub scaled_score: Option<f64>,
}

/// Flat-format fields beyond the common envelope
#[derive(Debug, Clone)]
pub struct FlatFacet {
    pub object: XapiActivity,
    pub result: Option<XapiResult>,
}

/// Structured-format entities beyond the common envelope
#[derive(Debug, Clone, Default)]
pub struct StructuredFacet {
    pub object: Option<Entity>,
    pub generated: Option<Entity>,
    pub target: Option<Entity>,
}

/// Static per-event-kind statement template
pub struct StatementDescriptor {
    pub kind: EventKind,

    pub verb: &'static VerbTerm,

    /// Ordered identifier parts feeding the deterministic derivation
    pub id_parts: fn(&Event) -> Vec<String>,

    /// Flat-format object and result builder
    pub flat: fn(&Event, &DerivedValues, &RenderContext<'_>) -> FlatFacet,

    /// Structured-format entity builder
    pub structured: fn(&Event, &DerivedValues, &RenderContext<'_>) -> StructuredFacet,
}

impl std::fmt::Debug for StatementDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementDescriptor")
            .field("kind", &self.kind)
            .field("verb", &self.verb.uri)
            .finish()
    }
}
