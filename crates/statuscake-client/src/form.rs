//! Form encoding of upsert payloads.
//!
//! The update endpoint takes `application/x-www-form-urlencoded` bodies.
//! Only fields that are set are emitted; the remote side leaves every other
//! field as it is. Booleans are sent as `true`/`false`.

use crate::types::PartialSsl;

/// Form field names understood by `PUT /SSL/Update`.
pub mod fields {
    /// Test identifier
    pub const ID: &str = "id";
    /// Monitored domain
    pub const DOMAIN: &str = "domain";
    /// Seconds between checks
    pub const CHECK_RATE: &str = "checkrate";
    /// Contact groups, comma separated
    pub const CONTACT_GROUPS: &str = "contact_groups";
    /// Alert thresholds
    pub const ALERT_AT: &str = "alert_at";
    /// Reminder alerts
    pub const ALERT_REMINDER: &str = "alert_reminder";
    /// Expiry alerts
    pub const ALERT_EXPIRY: &str = "alert_expiry";
    /// Broken certificate alerts
    pub const ALERT_BROKEN: &str = "alert_broken";
}

/// Encode a payload as ordered form pairs.
///
/// # Examples
///
/// ```
/// use statuscake_client::{encode_form, PartialSsl};
///
/// let patch = PartialSsl {
///     id: Some(12345),
///     check_rate: Some(600),
///     ..Default::default()
/// };
/// let form = encode_form(&patch);
/// assert_eq!(
///     form,
///     vec![("id", "12345".to_string()), ("checkrate", "600".to_string())]
/// );
/// ```
#[must_use]
pub fn encode_form(test: &PartialSsl) -> Vec<(&'static str, String)> {
    let mut form = Vec::new();

    if let Some(id) = test.id {
        form.push((fields::ID, id.to_string()));
    }
    if let Some(domain) = &test.domain {
        form.push((fields::DOMAIN, domain.clone()));
    }
    if let Some(check_rate) = test.check_rate {
        form.push((fields::CHECK_RATE, check_rate.to_string()));
    }
    if let Some(groups) = &test.contact_groups {
        form.push((fields::CONTACT_GROUPS, groups.clone()));
    }
    if let Some(alert_at) = &test.alert_at {
        form.push((fields::ALERT_AT, alert_at.clone()));
    }

    let flags = [
        (fields::ALERT_REMINDER, test.alert_reminder),
        (fields::ALERT_EXPIRY, test.alert_expiry),
        (fields::ALERT_BROKEN, test.alert_broken),
    ];
    for (name, value) in flags {
        if let Some(value) = value {
            form.push((name, value.to_string()));
        }
    }

    form
}
