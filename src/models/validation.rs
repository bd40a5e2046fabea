//! Declarative field validation for learnrelay models
//!
//! Each event kind declares an ordered slice of field rules; `validate`
//! walks the rules in declaration order and reports the first failure.
//! Fields present in the metadata but not declared in the rules are
//! ignored: a rule set is a whitelist of checked fields, not an exhaustive
//! schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};
use super::event::{MetaValue, Metadata};

/// Declared kind of a metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Textual value
    Text,
    /// Numeric value
    Number,
    /// Calendar date/time
    Date,
    /// Syntactically valid absolute URI
    Uri,
    /// Ordered sequence
    Sequence,
}

impl FieldKind {
    /// Check a present value against this kind, applying coercion rules
    ///
    /// Coercion is deliberately narrow: textual values may stand in for
    /// dates and URIs when they parse as such, and a URI counts as text.
    pub fn matches(&self, value: &MetaValue) -> bool {
        match self {
            FieldKind::Text => matches!(value, MetaValue::Text(_) | MetaValue::Uri(_)),
            FieldKind::Number => matches!(value, MetaValue::Number(_)),
            FieldKind::Date => value.as_date().is_some(),
            FieldKind::Uri => value.as_uri().is_some(),
            FieldKind::Sequence => matches!(value, MetaValue::Sequence(_)),
        }
    }

    /// String representation used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Uri => "uri",
            FieldKind::Sequence => "sequence",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field rule: name, declared kind, and whether it must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    /// A field that must be present and conform
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// A field that is checked only when present
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Validate metadata against an ordered rule slice
///
/// Returns on the first failure. A required field that is absent or blank
/// fails as missing; a present field that does not conform to its declared
/// kind fails as wrong-type. Pure function of its inputs.
pub fn validate(rules: &[FieldRule], metadata: &Metadata) -> ValidationResult {
    for rule in rules {
        let value = metadata.get(rule.name).filter(|v| !v.is_blank());

        match value {
            None => {
                if rule.required {
                    return Err(ValidationError::new(
                        ValidationErrorKind::MissingField,
                        rule.name,
                    ));
                }
            },
            Some(value) => {
                if !rule.kind.matches(value) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::WrongType {
                            expected: rule.kind,
                        },
                        rule.name,
                    ));
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use url::Url;

    const RULES: &[FieldRule] = &[
        FieldRule::required("id", FieldKind::Uri),
        FieldRule::required("title", FieldKind::Text),
        FieldRule::optional("due_at", FieldKind::Date),
        FieldRule::optional("max_points", FieldKind::Number),
        FieldRule::optional("submission_types", FieldKind::Sequence),
    ];

    fn valid_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert(
            "id".to_string(),
            MetaValue::Text("https://example.edu/assignments/1".to_string()),
        );
        metadata.insert("title".to_string(), MetaValue::Text("Essay".to_string()));
        metadata
    }

    #[test]
    fn test_valid_metadata_passes() {
        assert!(validate(RULES, &valid_metadata()).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let mut metadata = valid_metadata();
        metadata.remove("title");

        let err = validate(RULES, &metadata).unwrap_err();
        assert_eq!(err.field, "title");
        assert!(err.is_missing());
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let mut metadata = valid_metadata();
        metadata.insert("title".to_string(), MetaValue::Text("  ".to_string()));

        let err = validate(RULES, &metadata).unwrap_err();
        assert_eq!(err.field, "title");
        assert!(err.is_missing());
    }

    #[test]
    fn test_wrong_type_reported_with_expected_kind() {
        let mut metadata = valid_metadata();
        metadata.insert("max_points".to_string(), MetaValue::Text("fifty".to_string()));

        let err = validate(RULES, &metadata).unwrap_err();
        assert_eq!(err.field, "max_points");
        assert_eq!(
            err.kind,
            ValidationErrorKind::WrongType {
                expected: FieldKind::Number,
            }
        );
    }

    #[test]
    fn test_short_circuit_reports_first_failure_only() {
        // Both id and title are invalid; id is declared first.
        let mut metadata = Metadata::new();
        metadata.insert("id".to_string(), MetaValue::Number(1.0));

        let err = validate(RULES, &metadata).unwrap_err();
        assert_eq!(err.field, "id");
    }

    #[test]
    fn test_undeclared_fields_ignored() {
        let mut metadata = valid_metadata();
        metadata.insert("unrelated".to_string(), MetaValue::Number(1.0));

        assert!(validate(RULES, &metadata).is_ok());
    }

    #[test]
    fn test_uri_rule_accepts_uri_variant_and_uri_text() {
        let mut metadata = valid_metadata();
        metadata.insert(
            "id".to_string(),
            MetaValue::Uri(Url::parse("https://example.edu/assignments/1").unwrap()),
        );
        assert!(validate(RULES, &metadata).is_ok());

        metadata.insert("id".to_string(), MetaValue::Text("not a uri".to_string()));
        let err = validate(RULES, &metadata).unwrap_err();
        assert_eq!(err.field, "id");
    }

    #[test]
    fn test_date_rule_accepts_date_variant_and_rfc3339_text() {
        let mut metadata = valid_metadata();
        metadata.insert("due_at".to_string(), MetaValue::Date(Utc::now()));
        assert!(validate(RULES, &metadata).is_ok());

        metadata.insert(
            "due_at".to_string(),
            MetaValue::Text("2024-06-01T00:00:00Z".to_string()),
        );
        assert!(validate(RULES, &metadata).is_ok());

        metadata.insert("due_at".to_string(), MetaValue::Text("tomorrow".to_string()));
        assert!(validate(RULES, &metadata).is_err());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        // Only the two required fields are present.
        assert!(validate(RULES, &valid_metadata()).is_ok());
    }
}
