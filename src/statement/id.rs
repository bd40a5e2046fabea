//! Deterministic statement identifier derivation
//!
//! Statements are addressed by a version-5 UUID derived from the platform
//! identity, the verb, and an ordered list of event-specific parts. The
//! derivation is a pure function: re-sending the same logical event (a
//! retried call, a replayed queue message) re-derives the same identifier,
//! so downstream stores can deduplicate instead of double-counting.

use uuid::Uuid;

/// Derive the primary identifier for a statement
///
/// The platform seeds the namespace; the name is the verb URI and each part
/// framed by an 8-byte little-endian length prefix. Length framing keeps
/// distinct part sequences distinct even when their concatenations agree.
pub fn derive_statement_id(platform: &str, verb_uri: &str, parts: &[String]) -> Uuid {
    let namespace = Uuid::new_v5(&Uuid::NAMESPACE_URL, platform.as_bytes());

    let mut name = Vec::with_capacity(64);
    push_framed(&mut name, verb_uri);
    for part in parts {
        push_framed(&mut name, part);
    }

    Uuid::new_v5(&namespace, &name)
}

fn push_framed(buf: &mut Vec<u8>, part: &str) {
    buf.extend_from_slice(&(part.len() as u64).to_le_bytes());
    buf.extend_from_slice(part.as_bytes());
}
