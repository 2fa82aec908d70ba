//! The attribute bag exchanged between host and adapter.

use crate::id::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-call resource state: the identifier (once assigned) plus a flat map
/// of attribute values.
///
/// The host owns persistence of this value; adapters read configuration from
/// it and write remote state back into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ResourceId>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// An empty bag with no identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bag holding the given attributes and no identifier.
    #[must_use]
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Builder-style identifier assignment.
    #[must_use]
    pub fn with_id(mut self, id: ResourceId) -> Self {
        self.id = Some(id);
        self
    }

    /// The identifier, if the resource exists remotely.
    #[must_use]
    pub fn id(&self) -> Option<ResourceId> {
        self.id
    }

    /// Record the identifier assigned by the remote service.
    pub fn set_id(&mut self, id: ResourceId) {
        self.id = Some(id);
    }

    /// All attributes, including `null` entries.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Look up an attribute. `null` is reported as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Whether an attribute is explicitly set.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String attribute.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer attribute.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Boolean attribute.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Set an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Drop every attribute and the identifier.
    pub fn clear(&mut self) {
        self.id = None;
        self.attributes.clear();
    }
}
