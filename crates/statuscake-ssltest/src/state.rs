//! Projection of the remote record onto the attribute bag.

use crate::schema::attr;
use serde_json::{Map, Value};
use statuscake_client::Ssl;
use statuscake_core::ResourceData;

/// Overwrite every attribute in `data` with the remote record's values.
///
/// An empty contact group list is written as `null` so that a configuration
/// that never set `contact_groups` reads back unchanged.
pub fn apply_remote(data: &mut ResourceData, ssl: &Ssl) {
    data.set(attr::ID, ssl.id.to_string());
    data.set(attr::DOMAIN, ssl.domain.as_str());
    data.set(attr::CHECK_RATE, ssl.check_rate);
    data.set(attr::CONTACT_GROUPS, join_contact_groups(&ssl.contact_groups));
    data.set(attr::ALERT_AT, ssl.alert_at.as_str());
    data.set(attr::ALERT_REMINDER, ssl.alert_reminder);
    data.set(attr::ALERT_EXPIRY, ssl.alert_expiry);
    data.set(attr::ALERT_BROKEN, ssl.alert_broken);
    data.set(attr::ALERT_MIXED, ssl.alert_mixed);
    data.set(attr::PAUSED, ssl.paused);
    data.set(attr::ISSUER_CN, ssl.issuer_cn.as_str());
    data.set(attr::CERT_SCORE, ssl.cert_score.as_str());
    data.set(attr::CERT_STATUS, ssl.cert_status.as_str());
    data.set(attr::CIPHER, ssl.cipher.as_str());
    data.set(attr::CIPHER_SCORE, ssl.cipher_score.as_str());
    data.set(attr::VALID_FROM_UTC, ssl.valid_from_utc.as_str());
    data.set(attr::VALID_UNTIL_UTC, ssl.valid_until_utc.as_str());
    data.set(attr::MIXED_CONTENT, mixed_content(ssl));
    data.set(attr::FLAGS, flags(ssl));
    data.set(attr::LAST_REMINDER, ssl.last_reminder);
    data.set(attr::LAST_UPDATED_UTC, ssl.last_updated_utc.as_str());
}

fn join_contact_groups(groups: &[String]) -> Value {
    if groups.is_empty() {
        Value::Null
    } else {
        Value::String(groups.join(","))
    }
}

fn mixed_content(ssl: &Ssl) -> Value {
    ssl.mixed_content
        .iter()
        .map(|entry| {
            entry
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<_, _>>()
        })
        .map(Value::Object)
        .collect()
}

fn flags(ssl: &Ssl) -> Value {
    ssl.flags
        .iter()
        .map(|(k, v)| (k.clone(), Value::Bool(*v)))
        .collect::<Map<_, _>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn remote() -> Ssl {
        Ssl {
            id: 12345,
            domain: "example.com".to_string(),
            check_rate: 3600,
            contact_groups: vec!["10".to_string(), "20".to_string()],
            alert_at: "1,2,3".to_string(),
            alert_reminder: true,
            alert_expiry: true,
            alert_broken: false,
            cert_score: "95".to_string(),
            cipher: "TLS_AES_128_GCM_SHA256".to_string(),
            mixed_content: vec![BTreeMap::from([(
                "src".to_string(),
                "http://example.com/a.js".to_string(),
            )])],
            flags: BTreeMap::from([("has_pfs".to_string(), true)]),
            last_reminder: 1_700_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn projects_config_and_computed_fields() {
        let mut data = ResourceData::new();
        apply_remote(&mut data, &remote());

        assert_eq!(data.get_str(attr::ID), Some("12345"));
        assert_eq!(data.get_str(attr::DOMAIN), Some("example.com"));
        assert_eq!(data.get_i64(attr::CHECK_RATE), Some(3600));
        assert_eq!(data.get_str(attr::CONTACT_GROUPS), Some("10,20"));
        assert_eq!(data.get_bool(attr::ALERT_BROKEN), Some(false));
        assert_eq!(data.get_str(attr::CERT_SCORE), Some("95"));
        assert_eq!(data.get_i64(attr::LAST_REMINDER), Some(1_700_000_000));
        assert_eq!(
            data.get(attr::MIXED_CONTENT),
            Some(&json!([{"src": "http://example.com/a.js"}]))
        );
        assert_eq!(data.get(attr::FLAGS), Some(&json!({"has_pfs": true})));
    }

    #[test]
    fn empty_contact_groups_read_as_unset() {
        let mut data = ResourceData::new();
        let ssl = Ssl {
            contact_groups: Vec::new(),
            ..remote()
        };
        apply_remote(&mut data, &ssl);
        assert!(!data.is_set(attr::CONTACT_GROUPS));
    }

    #[test]
    fn overwrites_stale_values() {
        let mut data = ResourceData::new();
        data.set(attr::DOMAIN, "old.example.com");
        data.set(attr::CHECK_RATE, 60);

        apply_remote(&mut data, &remote());
        assert_eq!(data.get_str(attr::DOMAIN), Some("example.com"));
        assert_eq!(data.get_i64(attr::CHECK_RATE), Some(3600));
    }
}
