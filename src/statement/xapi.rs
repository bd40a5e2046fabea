//! Flat-format (activity stream) statement rendering
//!
//! Statements are plain serde structs shaped to the flat schema's field
//! names. Optional attributes are `Option` fields skipped during
//! serialization, which is how the pruning invariant is enforced: an absent
//! value never appears as a null placeholder.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Actor;
use crate::vocab::VerbTerm;

/// Language-tagged text map, e.g. `{"en-US": "Essay"}`
pub type LanguageMap = BTreeMap<String, String>;

/// Build a single-entry language map
pub fn lang_map(language: &str, text: &str) -> LanguageMap {
    let mut map = LanguageMap::new();
    map.insert(language.to_string(), text.to_string());
    map
}

/// A complete flat-format statement
#[derive(Debug, Clone, Serialize)]
pub struct XapiStatement {
    pub id: Uuid,
    pub actor: XapiActor,
    pub verb: XapiVerb,
    pub object: XapiActivity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<XapiResult>,
    pub timestamp: DateTime<Utc>,
}

/// The agent performing the action
#[derive(Debug, Clone, Serialize)]
pub struct XapiActor {
    #[serde(rename = "objectType")]
    pub object_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbox: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<XapiAccount>,
}

/// Platform-scoped account identity
#[derive(Debug, Clone, Serialize)]
pub struct XapiAccount {
    #[serde(rename = "homePage")]
    pub home_page: String,
    pub name: String,
}

/// Render the generic actor as a flat-format agent
///
/// An actor with an email renders as an mbox agent; otherwise the stable
/// user id is scoped to the platform as an account. Either way the agent
/// carries the same underlying user reference the structured-format person
/// renderer extracts.
pub fn render_agent(actor: &Actor, platform: &str) -> XapiActor {
    match &actor.email {
        Some(email) => XapiActor {
            object_type: "Agent",
            name: actor.name.clone(),
            mbox: Some(format!("mailto:{}", email)),
            account: None,
        },
        None => XapiActor {
            object_type: "Agent",
            name: actor.name.clone(),
            mbox: None,
            account: Some(XapiAccount {
                home_page: platform.to_string(),
                name: actor.user_id().to_string(),
            }),
        },
    }
}

/// Verb reference with display text
#[derive(Debug, Clone, Serialize)]
pub struct XapiVerb {
    pub id: String,
    pub display: LanguageMap,
}

impl XapiVerb {
    /// Render a controlled-vocabulary verb term
    pub fn from_term(term: &VerbTerm, language: &str) -> Self {
        Self {
            id: term.uri.to_string(),
            display: lang_map(language, term.display),
        }
    }
}

/// The activity an action was performed on
#[derive(Debug, Clone, Serialize)]
pub struct XapiActivity {
    pub id: String,

    #[serde(rename = "objectType")]
    pub object_type: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<XapiActivityDefinition>,
}

/// Activity definition: type, names, free-form extensions
#[derive(Debug, Clone, Default, Serialize)]
pub struct XapiActivityDefinition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LanguageMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LanguageMap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<BTreeMap<String, serde_json::Value>>,
}

impl XapiActivity {
    /// Create an activity with its controlled-vocabulary type
    pub fn new(id: impl Into<String>, activity_type: &'static str) -> Self {
        Self {
            id: id.into(),
            object_type: "Activity",
            definition: Some(XapiActivityDefinition {
                activity_type: Some(activity_type.to_string()),
                ..Default::default()
            }),
        }
    }

    /// Attach a display name when one is present
    pub fn named(mut self, language: &str, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.definition.get_or_insert_with(Default::default).name =
                Some(lang_map(language, name));
        }
        self
    }

    /// Attach a description when one is present
    pub fn described(mut self, language: &str, description: Option<&str>) -> Self {
        if let Some(description) = description {
            self.definition.get_or_insert_with(Default::default).description =
                Some(lang_map(language, description));
        }
        self
    }

    /// Attach an extension value when one is present
    pub fn extension(mut self, key: &str, value: Option<serde_json::Value>) -> Self {
        if let Some(value) = value {
            self.definition
                .get_or_insert_with(Default::default)
                .extensions
                .get_or_insert_with(BTreeMap::new)
                .insert(key.to_string(), value);
        }
        self
    }
}

/// Outcome attached to grading and submission statements
#[derive(Debug, Clone, Default, Serialize)]
pub struct XapiResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<XapiScore>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl XapiResult {
    /// Collapse an empty result so the whole key is pruned
    pub fn into_option(self) -> Option<Self> {
        if self.score.is_none() && self.response.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

/// Numeric score with optional bounds and normalized value
#[derive(Debug, Clone, Default, Serialize)]
pub struct XapiScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled: Option<f64>,
}
