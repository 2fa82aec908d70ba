//! Wire types for the SSL test endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An SSL test as returned by `GET /SSL`.
///
/// The API is loose about types: ids and scores arrive as strings or
/// numbers, and unset fields as `null`. Both are normalized here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssl {
    /// Test identifier
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub id: u64,
    /// Monitored domain
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// Seconds between checks
    #[serde(rename = "checkrate", default, deserialize_with = "null_as_default")]
    pub check_rate: u32,
    /// Contact group identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_groups: Vec<String>,
    /// Days before expiry at which to alert, comma separated
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_at: String,
    /// Send reminders
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_reminder: bool,
    /// Alert on expiry
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_expiry: bool,
    /// Alert when the certificate is broken
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_broken: bool,
    /// Alert on mixed content
    #[serde(default, deserialize_with = "null_as_default")]
    pub alert_mixed: bool,
    /// Whether checks are paused
    #[serde(default, deserialize_with = "null_as_default")]
    pub paused: bool,
    /// Certificate issuer common name
    #[serde(default, deserialize_with = "null_as_default")]
    pub issuer_cn: String,
    /// Certificate score
    #[serde(default, deserialize_with = "string_or_number")]
    pub cert_score: String,
    /// Cipher score
    #[serde(default, deserialize_with = "string_or_number")]
    pub cipher_score: String,
    /// Certificate status
    #[serde(default, deserialize_with = "null_as_default")]
    pub cert_status: String,
    /// Negotiated cipher suite
    #[serde(default, deserialize_with = "null_as_default")]
    pub cipher: String,
    /// Certificate validity start
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_from_utc: String,
    /// Certificate validity end
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_until_utc: String,
    /// Mixed content findings
    #[serde(default, deserialize_with = "null_as_default")]
    pub mixed_content: Vec<BTreeMap<String, String>>,
    /// Boolean certificate flags (`is_extended`, `has_pfs`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: BTreeMap<String, bool>,
    /// Timestamp of the last reminder
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_reminder: i64,
    /// Timestamp of the last check
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated_utc: String,
}

/// Upsert request payload. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSsl {
    /// Target test; `None` creates a new one
    pub id: Option<u64>,
    /// Monitored domain
    pub domain: Option<String>,
    /// Seconds between checks
    pub check_rate: Option<u32>,
    /// Contact group identifiers, comma separated
    pub contact_groups: Option<String>,
    /// Days before expiry at which to alert, comma separated
    pub alert_at: Option<String>,
    /// Send reminders
    pub alert_reminder: Option<bool>,
    /// Alert on expiry
    pub alert_expiry: Option<bool>,
    /// Alert when the certificate is broken
    pub alert_broken: Option<bool>,
}

impl PartialSsl {
    /// Whether this payload creates a new test.
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.id.is_none()
    }
}

/// Response body of `PUT` and `DELETE` on `/SSL/Update`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpdateResponse {
    #[serde(rename = "Success", default)]
    pub success: bool,
    #[serde(rename = "Message", default)]
    pub message: Value,
}

impl UpdateResponse {
    /// The message as display text.
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// The message as an identifier, as sent back on create.
    pub fn message_id(&self) -> Option<u64> {
        match &self.message {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id {s:?}"))),
        other => Err(serde::de::Error::custom(format!("invalid id {other}"))),
    }
}
