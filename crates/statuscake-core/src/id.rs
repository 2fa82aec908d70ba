//! Remote-assigned resource identifiers.
//!
//! The remote service hands out positive integers. The host persists them as
//! decimal strings, so the string form is parsed exactly once, when the bag is
//! loaded, and the integer travels unchanged down to the API client.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Identifier of a remote resource.
///
/// Zero is not a valid identifier: the remote upsert call treats a missing
/// or zero id as "create", so accepting it would silently turn an update
/// into a new resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(NonZeroU64);

impl ResourceId {
    /// Wrap a raw identifier. Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The integer form expected by the remote API.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError::Empty);
        }

        let value: u64 = s.parse().map_err(|e: std::num::ParseIntError| IdParseError::Invalid {
            input: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::new(value).ok_or(IdParseError::Zero)
    }
}

impl TryFrom<u64> for ResourceId {
    type Error = IdParseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(IdParseError::Zero)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Self::try_from(n).map_err(serde::de::Error::custom),
        }
    }
}

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The identifier string was empty
    #[error("resource id is empty")]
    Empty,
    /// The identifier was zero
    #[error("resource id must be a positive integer, got 0")]
    Zero,
    /// The identifier was not a decimal integer
    #[error("resource id {input:?} is not a positive integer: {reason}")]
    Invalid {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal() {
        let id: ResourceId = "12345".parse().unwrap();
        assert_eq!(id.get(), 12345);
        assert_eq!(id.to_string(), "12345");
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = "abc".parse::<ResourceId>().unwrap_err();
        assert!(matches!(err, IdParseError::Invalid { ref input, .. } if input == "abc"));
    }

    #[test]
    fn parse_rejects_zero_and_empty() {
        assert_eq!("0".parse::<ResourceId>(), Err(IdParseError::Zero));
        assert_eq!("".parse::<ResourceId>(), Err(IdParseError::Empty));
    }

    #[test]
    fn parse_rejects_negative_and_padded() {
        assert!("-5".parse::<ResourceId>().is_err());
        assert!(" 5".parse::<ResourceId>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let id = ResourceId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn deserializes_from_string_or_number() {
        let a: ResourceId = serde_json::from_str("\"7\"").unwrap();
        let b: ResourceId = serde_json::from_str("7").unwrap();
        assert_eq!(a, b);

        assert!(serde_json::from_str::<ResourceId>("\"seven\"").is_err());
        assert!(serde_json::from_str::<ResourceId>("0").is_err());
    }
}
