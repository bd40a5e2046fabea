//! Event data models for learnrelay
//!
//! This module defines the caller-facing event structures: the actor who
//! performed an action, the event timestamp, and a loosely-shaped metadata
//! map whose values are carried as tagged variants.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// Identity of the person performing an action
///
/// The same actor value feeds both target formats: the flat format renders
/// it as an agent (mbox or platform account), the structured format as a
/// person entity. Both extract the same stable user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable user identifier within the platform
    pub id: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Actor {
    /// Create an actor from a bare user id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }

    /// The stable user reference shared by both renderers
    pub fn user_id(&self) -> &str {
        &self.id
    }
}

/// A single metadata value, tagged by kind
///
/// Inbound JSON maps onto the tags structurally: strings become `Text`,
/// numbers become `Number`, arrays become `Sequence`. The `Uri` and `Date`
/// tags are produced by programmatic callers; textual values reach them
/// through the validator's coercion rules.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Uri(Url),
    Sequence(Vec<MetaValue>),
}

impl MetaValue {
    /// A blank textual value counts as absent for required-field checks
    pub fn is_blank(&self) -> bool {
        matches!(self, MetaValue::Text(t) if t.trim().is_empty())
    }

    /// Textual content, if this value is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(t) => Some(t),
            MetaValue::Uri(u) => Some(u.as_str()),
            _ => None,
        }
    }

    /// Numeric content
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Calendar timestamp, coercing RFC 3339 text
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            MetaValue::Date(d) => Some(*d),
            MetaValue::Text(t) => DateTime::parse_from_rfc3339(t)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Absolute URI, coercing text that parses as one
    pub fn as_uri(&self) -> Option<Url> {
        match self {
            MetaValue::Uri(u) => Some(u.clone()),
            MetaValue::Text(t) => Url::parse(t).ok(),
            _ => None,
        }
    }

    /// Ordered sequence content
    pub fn as_sequence(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Render as a JSON value for extension payloads
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MetaValue::Text(t) => serde_json::Value::String(t.clone()),
            MetaValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            MetaValue::Date(d) => serde_json::Value::String(d.to_rfc3339()),
            MetaValue::Uri(u) => serde_json::Value::String(u.to_string()),
            MetaValue::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(MetaValue::to_json).collect())
            },
        }
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaValue::Text(t) => serializer.serialize_str(t),
            MetaValue::Number(n) => serializer.serialize_f64(*n),
            MetaValue::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            MetaValue::Uri(u) => serializer.serialize_str(u.as_str()),
            MetaValue::Sequence(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MetaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetaValueVisitor;

        impl<'de> Visitor<'de> for MetaValueVisitor {
            type Value = MetaValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, a number, or an array")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<MetaValue, E> {
                Ok(MetaValue::Text(v.to_owned()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<MetaValue, E> {
                Ok(MetaValue::Number(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<MetaValue, E> {
                Ok(MetaValue::Number(v as f64))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<MetaValue, E> {
                Ok(MetaValue::Number(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<MetaValue, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(MetaValue::Sequence(items))
            }
        }

        deserializer.deserialize_any(MetaValueVisitor)
    }
}

/// Event-specific metadata, keyed by field name
pub type Metadata = BTreeMap<String, MetaValue>;

/// Deserialize metadata, dropping explicit nulls
///
/// A null value on the wire means the same thing as a missing key, so it
/// never reaches the validator or the templates.
fn metadata_dropping_nulls<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Metadata, D::Error> {
    let raw = BTreeMap::<String, Option<MetaValue>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect())
}

/// The caller-supplied unit of work
///
/// Constructed by the caller, consumed read-only by the engine, never
/// mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Who performed the action
    pub actor: Actor,

    /// When the action occurred
    pub timestamp: DateTime<Utc>,

    /// Event-specific fields (e.g. `id`, `title`, `grade`)
    #[serde(default, deserialize_with = "metadata_dropping_nulls")]
    pub metadata: Metadata,
}

impl Event {
    /// Create an event with empty metadata
    pub fn new(actor: Actor, timestamp: DateTime<Utc>) -> Self {
        Self {
            actor,
            timestamp,
            metadata: Metadata::new(),
        }
    }

    /// Look up a metadata field
    pub fn meta(&self, field: &str) -> Option<&MetaValue> {
        self.metadata.get(field)
    }

    /// Textual metadata field; blank text propagates as absence
    pub fn meta_text(&self, field: &str) -> Option<&str> {
        self.meta(field)
            .and_then(MetaValue::as_text)
            .filter(|text| !text.trim().is_empty())
    }

    /// Numeric metadata field
    pub fn meta_number(&self, field: &str) -> Option<f64> {
        self.meta(field).and_then(MetaValue::as_number)
    }

    /// Timestamp metadata field
    pub fn meta_date(&self, field: &str) -> Option<DateTime<Utc>> {
        self.meta(field).and_then(MetaValue::as_date)
    }

    /// Absolute-URI metadata field, rendered as a string
    pub fn meta_uri(&self, field: &str) -> Option<String> {
        self.meta(field).and_then(|v| v.as_uri()).map(|u| u.to_string())
    }

    /// Sequence metadata field
    pub fn meta_sequence(&self, field: &str) -> Option<&[MetaValue]> {
        self.meta(field).and_then(MetaValue::as_sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_value_json_mapping() {
        let json = r#"{"title": "Essay", "max_points": 50, "submission_types": ["online_text", "online_url"]}"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata["title"], MetaValue::Text("Essay".to_string()));
        assert_eq!(metadata["max_points"], MetaValue::Number(50.0));
        assert_eq!(
            metadata["submission_types"],
            MetaValue::Sequence(vec![
                MetaValue::Text("online_text".to_string()),
                MetaValue::Text("online_url".to_string()),
            ])
        );
    }

    #[test]
    fn test_uri_coercion_from_text() {
        let value = MetaValue::Text("https://example.edu/assignments/1".to_string());
        assert!(value.as_uri().is_some());

        let relative = MetaValue::Text("/assignments/1".to_string());
        assert!(relative.as_uri().is_none());

        let not_a_uri = MetaValue::Text("just words".to_string());
        assert!(not_a_uri.as_uri().is_none());
    }

    #[test]
    fn test_date_coercion_from_text() {
        let value = MetaValue::Text("2024-03-01T12:00:00Z".to_string());
        assert!(value.as_date().is_some());

        let not_a_date = MetaValue::Text("2024-03-01".to_string());
        assert!(not_a_date.as_date().is_none());
    }

    #[test]
    fn test_blank_text_counts_as_absent() {
        assert!(MetaValue::Text("".to_string()).is_blank());
        assert!(MetaValue::Text("   ".to_string()).is_blank());
        assert!(!MetaValue::Text("x".to_string()).is_blank());
        assert!(!MetaValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_event_accessors() {
        let mut event = Event::new(Actor::new("u1"), Utc::now());
        event.metadata.insert(
            "id".to_string(),
            MetaValue::Text("https://example.edu/assignments/1".to_string()),
        );
        event
            .metadata
            .insert("grade".to_string(), MetaValue::Number(45.0));

        assert_eq!(
            event.meta_uri("id").as_deref(),
            Some("https://example.edu/assignments/1")
        );
        assert_eq!(event.meta_number("grade"), Some(45.0));
        assert_eq!(event.meta_text("missing"), None);
    }

    #[test]
    fn test_null_metadata_values_are_dropped() {
        let json = r#"{
            "actor": {"id": "u1"},
            "timestamp": "2024-03-01T12:00:00Z",
            "metadata": {"id": "https://x/a1", "description": null}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.meta("id").is_some());
        assert!(event.meta("description").is_none());
    }

    #[test]
    fn test_blank_text_absent_through_accessor() {
        let mut event = Event::new(Actor::new("u1"), Utc::now());
        event
            .metadata
            .insert("description".to_string(), MetaValue::Text("  ".to_string()));

        assert_eq!(event.meta_text("description"), None);
    }

    #[test]
    fn test_actor_round_trip() {
        let actor = Actor {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            email: None,
        };

        let json = serde_json::to_string(&actor).unwrap();
        assert!(!json.contains("email"));

        let back: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actor);
    }
}
