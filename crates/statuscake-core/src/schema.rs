//! Static schema description and attribute validation.
//!
//! A [`ResourceSchema`] is a table of [`FieldSchema`] entries known at compile
//! time. The host validates a configuration bag against it before invoking
//! any lifecycle operation, so adapters only ever see well-typed input.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// The type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 string
    String,
    /// Signed integer
    Int,
    /// Boolean
    Bool,
    /// JSON array
    List,
    /// JSON object
    Map,
}

impl ValueType {
    /// Whether a JSON value has this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Bool => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Map => value.is_object(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "integer"),
            Self::Bool => write!(f, "boolean"),
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
        }
    }
}

/// Whether a field must, may, or cannot be set by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Must be present in configuration
    Required,
    /// May be omitted; a default may apply
    Optional,
    /// Populated by the remote service only
    Computed,
}

/// A compile-time default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Integer default
    Int(i64),
    /// Boolean default
    Bool(bool),
    /// String default
    Str(&'static str),
}

impl DefaultValue {
    /// Convert to a JSON value.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Int(i) => Value::from(i),
            Self::Bool(b) => Value::Bool(b),
            Self::Str(s) => Value::from(s),
        }
    }
}

/// Description of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Attribute name
    pub name: &'static str,
    /// Attribute type
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Presence rule
    pub presence: Presence,
    /// Default applied when an optional attribute is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Human-readable description
    pub description: &'static str,
}

impl FieldSchema {
    const fn new(name: &'static str, value_type: ValueType, presence: Presence) -> Self {
        Self {
            name,
            value_type,
            presence,
            default: None,
            description: "",
        }
    }

    /// A field the user must set.
    #[must_use]
    pub const fn required(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, value_type, Presence::Required)
    }

    /// A field the user may set.
    #[must_use]
    pub const fn optional(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, value_type, Presence::Optional)
    }

    /// A field only the remote service sets.
    #[must_use]
    pub const fn computed(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, value_type, Presence::Computed)
    }

    /// Attach a default value.
    #[must_use]
    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a description.
    #[must_use]
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Whether users may set this field.
    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.presence != Presence::Computed
    }
}

/// Validation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The bag must describe a complete resource (create).
    Full,
    /// The bag may carry any subset of settable fields (update).
    Partial,
}

/// A single validation problem tied to an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Offending attribute
    pub attribute: String,
    /// What is wrong with it
    pub summary: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(attribute: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            summary: summary.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.summary)
    }
}

/// Schema of a resource type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResourceSchema {
    /// Resource type name as the host knows it
    pub type_name: &'static str,
    /// Field table
    pub fields: &'static [FieldSchema],
}

impl ResourceSchema {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSchema> {
        let fields = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    /// Fields the user may set.
    pub fn settable_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        let fields = self.fields;
        fields.iter().filter(|f| f.is_settable())
    }

    /// Validate a configuration bag.
    ///
    /// All problems are collected rather than stopping at the first one.
    /// `null` values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] listing every problem found.
    pub fn validate(&self, attributes: &Map<String, Value>, mode: Mode) -> Result<(), SchemaError> {
        let mut diagnostics = Vec::new();

        for (name, value) in attributes {
            if value.is_null() {
                continue;
            }

            let Some(field) = self.field(name) else {
                diagnostics.push(Diagnostic::new(name, "unsupported attribute"));
                continue;
            };

            if !field.is_settable() {
                diagnostics.push(Diagnostic::new(
                    name,
                    "attribute is computed by the service and cannot be set",
                ));
                continue;
            }

            if !field.value_type.matches(value) {
                diagnostics.push(Diagnostic::new(
                    name,
                    format!("expected {}, got {}", field.value_type, json_type_name(value)),
                ));
            }
        }

        if mode == Mode::Full {
            for field in self.fields {
                let present = attributes.get(field.name).is_some_and(|v| !v.is_null());
                if field.presence == Presence::Required && !present {
                    diagnostics.push(Diagnostic::new(field.name, "required attribute is missing"));
                }
            }
        }

        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid(diagnostics))
        }
    }

    /// Fill in defaults for optional fields that are absent or `null`.
    pub fn apply_defaults(&self, attributes: &mut Map<String, Value>) {
        for field in self.fields {
            let Some(default) = field.default else {
                continue;
            };
            let absent = attributes.get(field.name).map_or(true, Value::is_null);
            if absent {
                attributes.insert(field.name.to_string(), default.to_value());
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced by schema validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// One or more attributes failed validation
    #[error("invalid configuration: {}", join_diagnostics(.0))]
    Invalid(Vec<Diagnostic>),
}

impl SchemaError {
    /// The individual problems.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Invalid(d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSchema] = &[
        FieldSchema::computed("id", ValueType::String),
        FieldSchema::required("name", ValueType::String),
        FieldSchema::optional("interval", ValueType::Int).with_default(DefaultValue::Int(60)),
        FieldSchema::required("enabled", ValueType::Bool),
        FieldSchema::computed("score", ValueType::String),
    ];

    const SCHEMA: ResourceSchema = ResourceSchema {
        type_name: "test_resource",
        fields: FIELDS,
    };

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn full_config_is_valid() {
        let a = attrs(json!({"name": "x", "enabled": true, "interval": 5}));
        assert!(SCHEMA.validate(&a, Mode::Full).is_ok());
    }

    #[test]
    fn missing_required_reported_in_full_mode_only() {
        let a = attrs(json!({"interval": 5}));

        let err = SCHEMA.validate(&a, Mode::Full).unwrap_err();
        let names: Vec<_> = err.diagnostics().iter().map(|d| d.attribute.as_str()).collect();
        assert_eq!(names, vec!["name", "enabled"]);

        assert!(SCHEMA.validate(&a, Mode::Partial).is_ok());
    }

    #[test]
    fn null_counts_as_absent() {
        let a = attrs(json!({"name": null, "enabled": true}));
        let err = SCHEMA.validate(&a, Mode::Full).unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].attribute, "name");
    }

    #[test]
    fn type_mismatch_reported() {
        let a = attrs(json!({"name": 3, "enabled": "yes", "interval": 1.5}));
        let err = SCHEMA.validate(&a, Mode::Partial).unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
        assert!(err.to_string().contains("name: expected string, got integer"));
        assert!(err.to_string().contains("interval: expected integer, got number"));
    }

    #[test]
    fn unknown_and_computed_attributes_rejected() {
        let a = attrs(json!({"name": "x", "enabled": true, "colour": "red", "score": "A"}));
        let err = SCHEMA.validate(&a, Mode::Full).unwrap_err();
        let summaries: Vec<_> = err.diagnostics().iter().map(ToString::to_string).collect();
        assert!(summaries.contains(&"colour: unsupported attribute".to_string()));
        assert!(summaries
            .iter()
            .any(|s| s.starts_with("score: attribute is computed")));
    }

    #[test]
    fn defaults_fill_absent_and_null_only() {
        let mut a = attrs(json!({"name": "x"}));
        SCHEMA.apply_defaults(&mut a);
        assert_eq!(a["interval"], json!(60));

        let mut b = attrs(json!({"interval": null}));
        SCHEMA.apply_defaults(&mut b);
        assert_eq!(b["interval"], json!(60));

        let mut c = attrs(json!({"interval": 10}));
        SCHEMA.apply_defaults(&mut c);
        assert_eq!(c["interval"], json!(10));
    }

    #[test]
    fn field_partitions() {
        assert_eq!(SCHEMA.settable_fields().count(), 3);
        assert_eq!(SCHEMA.field("interval").unwrap().default, Some(DefaultValue::Int(60)));
        assert!(SCHEMA.field("missing").is_none());
    }
}
