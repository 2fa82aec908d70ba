//! Typed views of the attribute bag.
//!
//! [`SslTestConfig`] is the complete desired state used on create.
//! [`SslTestPatch`] carries only the attributes set in the bag and is used on
//! update, so anything the user leaves out stays as it is remotely.
//!
//! Both are built by validating the settable part of the bag against
//! [`SSL_TEST_SCHEMA`] first. Computed attributes a host may have copied into
//! the bag from a previous read are ignored.

use crate::schema::{attr, SSL_TEST_SCHEMA};
use serde::Deserialize;
use serde_json::{Map, Value};
use statuscake_client::PartialSsl;
use statuscake_core::{Diagnostic, Mode, ResourceData, ResourceId, SchemaError};

/// Complete desired configuration of an SSL test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SslTestConfig {
    /// Monitored domain
    pub domain: String,
    /// Contact groups, comma separated
    #[serde(default)]
    pub contact_groups: Option<String>,
    /// Seconds between checks
    pub check_rate: u32,
    /// Alert thresholds
    pub alert_at: String,
    /// Reminder alerts
    pub alert_reminder: bool,
    /// Expiry alerts
    pub alert_expiry: bool,
    /// Broken certificate alerts
    pub alert_broken: bool,
}

impl SslTestConfig {
    /// Validate the bag and build the full configuration, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns every missing or ill-typed attribute.
    pub fn from_data(data: &ResourceData) -> Result<Self, SchemaError> {
        let mut attributes = settable_attributes(data);
        SSL_TEST_SCHEMA.validate(&attributes, Mode::Full)?;
        SSL_TEST_SCHEMA.apply_defaults(&mut attributes);
        check_values(&attributes)?;
        decode(attributes)
    }

    /// Creation payload carrying every field.
    #[must_use]
    pub fn to_partial(&self) -> PartialSsl {
        PartialSsl {
            id: None,
            domain: Some(self.domain.clone()),
            check_rate: Some(self.check_rate),
            contact_groups: self.contact_groups.clone(),
            alert_at: Some(self.alert_at.clone()),
            alert_reminder: Some(self.alert_reminder),
            alert_expiry: Some(self.alert_expiry),
            alert_broken: Some(self.alert_broken),
        }
    }
}

/// The subset of settable attributes present in the bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SslTestPatch {
    /// Monitored domain
    #[serde(default)]
    pub domain: Option<String>,
    /// Contact groups, comma separated
    #[serde(default)]
    pub contact_groups: Option<String>,
    /// Seconds between checks
    #[serde(default)]
    pub check_rate: Option<u32>,
    /// Alert thresholds
    #[serde(default)]
    pub alert_at: Option<String>,
    /// Reminder alerts
    #[serde(default)]
    pub alert_reminder: Option<bool>,
    /// Expiry alerts
    #[serde(default)]
    pub alert_expiry: Option<bool>,
    /// Broken certificate alerts
    #[serde(default)]
    pub alert_broken: Option<bool>,
}

impl SslTestPatch {
    /// Validate the bag and collect the attributes it sets.
    ///
    /// Unlike [`SslTestConfig::from_data`], required attributes may be absent
    /// and no defaults are applied.
    ///
    /// # Errors
    ///
    /// Returns every ill-typed attribute.
    pub fn from_data(data: &ResourceData) -> Result<Self, SchemaError> {
        let attributes = settable_attributes(data);
        SSL_TEST_SCHEMA.validate(&attributes, Mode::Partial)?;
        check_values(&attributes)?;
        decode(attributes)
    }

    /// Whether the patch sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Update payload for the given test.
    #[must_use]
    pub fn to_partial(&self, id: ResourceId) -> PartialSsl {
        PartialSsl {
            id: Some(id.get()),
            domain: self.domain.clone(),
            check_rate: self.check_rate,
            contact_groups: self.contact_groups.clone(),
            alert_at: self.alert_at.clone(),
            alert_reminder: self.alert_reminder,
            alert_expiry: self.alert_expiry,
            alert_broken: self.alert_broken,
        }
    }
}

/// Strict check of a configuration bag.
///
/// Unlike [`SslTestConfig::from_data`] and [`SslTestPatch::from_data`],
/// unknown and computed attributes are reported rather than ignored.
///
/// # Errors
///
/// Returns every problem found by the schema, or else by the typed decode.
pub fn validate_config(data: &ResourceData, mode: Mode) -> Result<(), SchemaError> {
    SSL_TEST_SCHEMA.validate(data.attributes(), mode)?;
    match mode {
        Mode::Full => SslTestConfig::from_data(data).map(drop),
        Mode::Partial => SslTestPatch::from_data(data).map(drop),
    }
}

/// Copy out the user-settable attributes, dropping `null`s.
fn settable_attributes(data: &ResourceData) -> Map<String, Value> {
    SSL_TEST_SCHEMA
        .settable_fields()
        .filter_map(|field| {
            data.get(field.name)
                .map(|value| (field.name.to_string(), value.clone()))
        })
        .collect()
}

/// Value checks beyond what the field types express.
fn check_values(attributes: &Map<String, Value>) -> Result<(), SchemaError> {
    let mut diagnostics = Vec::new();

    if let Some(value) = attributes.get(attr::CHECK_RATE) {
        let in_range = value
            .as_u64()
            .is_some_and(|v| v >= 1 && u32::try_from(v).is_ok());
        if !in_range {
            diagnostics.push(Diagnostic::new(
                attr::CHECK_RATE,
                format!("must be between 1 and {} seconds, got {value}", u32::MAX),
            ));
        }
    }

    // No groups is stored remotely as an empty list, which reads back as unset
    let empty_groups = attributes
        .get(attr::CONTACT_GROUPS)
        .and_then(Value::as_str)
        .is_some_and(|groups| groups.trim().is_empty());
    if empty_groups {
        diagnostics.push(Diagnostic::new(
            attr::CONTACT_GROUPS,
            "must not be empty, omit it to notify no contact groups",
        ));
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Invalid(diagnostics))
    }
}

fn decode<T: for<'de> Deserialize<'de>>(attributes: Map<String, Value>) -> Result<T, SchemaError> {
    serde_json::from_value(Value::Object(attributes)).map_err(|e| {
        SchemaError::Invalid(vec![Diagnostic::new(SSL_TEST_SCHEMA.type_name, e.to_string())])
    })
}
