//! Declared attributes of the `statuscake_ssl` resource.

use statuscake_core::{DefaultValue, FieldSchema, ResourceSchema, ValueType};

/// Attribute names.
pub mod attr {
    /// Remote-assigned identifier
    pub const ID: &str = "id";
    /// Monitored domain
    pub const DOMAIN: &str = "domain";
    /// Contact groups, comma separated
    pub const CONTACT_GROUPS: &str = "contact_groups";
    /// Seconds between checks
    pub const CHECK_RATE: &str = "check_rate";
    /// Alert thresholds
    pub const ALERT_AT: &str = "alert_at";
    /// Reminder alerts
    pub const ALERT_REMINDER: &str = "alert_reminder";
    /// Expiry alerts
    pub const ALERT_EXPIRY: &str = "alert_expiry";
    /// Broken certificate alerts
    pub const ALERT_BROKEN: &str = "alert_broken";
    /// Mixed content alerts
    pub const ALERT_MIXED: &str = "alert_mixed";
    /// Whether checks are paused
    pub const PAUSED: &str = "paused";
    /// Certificate issuer
    pub const ISSUER_CN: &str = "issuer_cn";
    /// Certificate score
    pub const CERT_SCORE: &str = "cert_score";
    /// Certificate status
    pub const CERT_STATUS: &str = "cert_status";
    /// Cipher suite
    pub const CIPHER: &str = "cipher";
    /// Cipher score
    pub const CIPHER_SCORE: &str = "cipher_score";
    /// Validity start
    pub const VALID_FROM_UTC: &str = "valid_from_utc";
    /// Validity end
    pub const VALID_UNTIL_UTC: &str = "valid_until_utc";
    /// Mixed content findings
    pub const MIXED_CONTENT: &str = "mixed_content";
    /// Certificate flags
    pub const FLAGS: &str = "flags";
    /// Last reminder timestamp
    pub const LAST_REMINDER: &str = "last_reminder";
    /// Last check timestamp
    pub const LAST_UPDATED_UTC: &str = "last_updated_utc";
}

/// Default number of seconds between checks.
pub const DEFAULT_CHECK_RATE: i64 = 3600;

const FIELDS: &[FieldSchema] = &[
    FieldSchema::computed(attr::ID, ValueType::String)
        .with_description("Identifier assigned by StatusCake"),
    FieldSchema::required(attr::DOMAIN, ValueType::String)
        .with_description("Domain whose certificate is monitored"),
    FieldSchema::optional(attr::CONTACT_GROUPS, ValueType::String)
        .with_description("Comma-separated contact group ids to notify"),
    FieldSchema::optional(attr::CHECK_RATE, ValueType::Int)
        .with_default(DefaultValue::Int(DEFAULT_CHECK_RATE))
        .with_description("Seconds between checks"),
    FieldSchema::required(attr::ALERT_AT, ValueType::String)
        .with_description("Comma-separated days before expiry at which to alert"),
    FieldSchema::required(attr::ALERT_REMINDER, ValueType::Bool)
        .with_description("Send reminder alerts"),
    FieldSchema::required(attr::ALERT_EXPIRY, ValueType::Bool)
        .with_description("Alert when the certificate is about to expire"),
    FieldSchema::required(attr::ALERT_BROKEN, ValueType::Bool)
        .with_description("Alert when the certificate is broken"),
    FieldSchema::computed(attr::ALERT_MIXED, ValueType::Bool),
    FieldSchema::computed(attr::PAUSED, ValueType::Bool),
    FieldSchema::computed(attr::ISSUER_CN, ValueType::String),
    FieldSchema::computed(attr::CERT_SCORE, ValueType::String),
    FieldSchema::computed(attr::CERT_STATUS, ValueType::String),
    FieldSchema::computed(attr::CIPHER, ValueType::String),
    FieldSchema::computed(attr::CIPHER_SCORE, ValueType::String),
    FieldSchema::computed(attr::VALID_FROM_UTC, ValueType::String),
    FieldSchema::computed(attr::VALID_UNTIL_UTC, ValueType::String),
    FieldSchema::computed(attr::MIXED_CONTENT, ValueType::List),
    FieldSchema::computed(attr::FLAGS, ValueType::Map),
    FieldSchema::computed(attr::LAST_REMINDER, ValueType::Int),
    FieldSchema::computed(attr::LAST_UPDATED_UTC, ValueType::String),
];

/// Schema of the `statuscake_ssl` resource.
pub const SSL_TEST_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "statuscake_ssl",
    fields: FIELDS,
};
