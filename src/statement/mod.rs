//! Statement-processing engine
//!
//! This module holds the format-agnostic core: deterministic identifier
//! derivation, the per-format renderers, the static descriptor type, and
//! the processor that ties them to the transport boundary.

pub mod caliper;
pub mod descriptor;
pub mod id;
pub mod processor;
pub mod xapi;

pub use caliper::{CaliperEvent, Entity};
pub use descriptor::{DerivedValues, FlatFacet, RenderContext, StatementDescriptor, StructuredFacet};
pub use id::derive_statement_id;
pub use processor::{process_statement, render_statement, timestamp_part, Outcome, RenderedStatement};
pub use xapi::{XapiActivity, XapiResult, XapiScore, XapiStatement};
