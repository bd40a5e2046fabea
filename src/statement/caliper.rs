//! Structured-format (typed event object) rendering
//!
//! The structured format nests typed entities: every entity is a kind tag
//! from the controlled vocabulary plus an attribute map. Attributes whose
//! values are absent are omitted entirely, never emitted as nulls; an
//! extensions map is merged in untouched under the same pruning rule.
//! Renderers never fail, they only omit.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Actor;
use crate::vocab;

/// A typed sub-object of the structured format
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    #[serde(rename = "type")]
    kind: &'static str,

    #[serde(flatten)]
    attributes: BTreeMap<String, serde_json::Value>,
}

impl Entity {
    /// Create an entity with its kind tag and identifier
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), serde_json::Value::String(id.into()));
        Self { kind, attributes }
    }

    /// Attach an attribute when its value is present
    pub fn attr<V: Into<serde_json::Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.attributes.insert(key.to_string(), value.into());
        }
        self
    }

    /// Merge an extensions map, pruning absent values
    pub fn extensions<'a, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<serde_json::Value>)>,
    {
        let present: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect();

        if !present.is_empty() {
            self.attributes.insert(
                "extensions".to_string(),
                serde_json::Value::Object(present),
            );
        }
        self
    }

    /// Kind tag, for assertions and logging
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Render the generic actor as a structured-format person
///
/// The person id embeds the same stable user reference the flat-format
/// agent carries in its account name.
pub fn render_person(actor: &Actor, platform: &str) -> Entity {
    let id = format!(
        "{}/users/{}",
        platform.trim_end_matches('/'),
        actor.user_id()
    );

    Entity::new(vocab::entity::PERSON, id).attr("name", actor.name.clone())
}

/// A complete structured-format event
#[derive(Debug, Clone, Serialize)]
pub struct CaliperEvent {
    #[serde(rename = "@context")]
    pub context: &'static str,

    /// Primary identifier, shared with the flat-format envelope
    pub id: String,

    /// Event type term; absent for kinds the vocabulary leaves blank
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<&'static str>,

    pub action: &'static str,

    pub actor: Entity,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<Entity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<Entity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Entity>,

    #[serde(rename = "eventTime")]
    pub event_time: DateTime<Utc>,
}

impl CaliperEvent {
    /// URN rendering of a statement identifier
    pub fn urn(id: Uuid) -> String {
        format!("urn:uuid:{}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_prunes_absent_attributes() {
        let entity = Entity::new(vocab::entity::ASSIGNABLE, "https://x/a1")
            .attr("name", Some("Essay"))
            .attr("description", None::<&str>);

        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "AssignableDigitalResource");
        assert_eq!(json["id"], "https://x/a1");
        assert_eq!(json["name"], "Essay");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_extensions_merged_with_pruning() {
        let entity = Entity::new(vocab::entity::ASSIGNABLE, "https://x/a1").extensions([
            (
                vocab::caliper_ext::SUBMISSION_TYPES,
                Some(serde_json::json!(["online_text"])),
            ),
            ("org.learnrelay.absent", None),
        ]);

        let json = serde_json::to_value(&entity).unwrap();
        let extensions = &json["extensions"];
        assert_eq!(extensions[vocab::caliper_ext::SUBMISSION_TYPES][0], "online_text");
        assert!(extensions.get("org.learnrelay.absent").is_none());
    }

    #[test]
    fn test_empty_extensions_key_is_omitted() {
        let entity = Entity::new(vocab::entity::ATTEMPT, "https://x/s1")
            .extensions([("org.learnrelay.absent", None)]);

        let json = serde_json::to_value(&entity).unwrap();
        assert!(json.get("extensions").is_none());
    }

    #[test]
    fn test_person_embeds_stable_user_reference() {
        let person = render_person(&Actor::new("u1"), "https://lms.example.edu/");
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["type"], "Person");
        assert_eq!(json["id"], "https://lms.example.edu/users/u1");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_event_type_pruned_when_absent() {
        let event = CaliperEvent {
            context: vocab::STRUCTURED_CONTEXT,
            id: CaliperEvent::urn(Uuid::nil()),
            event_type: None,
            action: "Graded",
            actor: render_person(&Actor::new("u1"), "https://lms.example.edu"),
            object: None,
            generated: None,
            target: None,
            event_time: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("type").is_none());
        assert_eq!(json["action"], "Graded");
        assert_eq!(json["id"], "urn:uuid:00000000-0000-0000-0000-000000000000");
    }
}
