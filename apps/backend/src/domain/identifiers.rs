//! Distribution and sequence numbers.
//!
//! Both are arbitrary-precision non-negative integers. They only ever feed
//! the key-derivation message as decimal text, so `DealNumber` keeps the
//! canonical decimal string rather than a numeric value.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

/// Upper bound on accepted decimal digits.
pub const MAX_DIGITS: usize = 128;

/// Canonical decimal text of a non-negative integer (no sign, no leading zeros).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DealNumber(String);

impl DealNumber {
    /// Parse `[0-9]+`, normalizing leading zeros away.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(invalid(raw, "must not be empty"));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(raw, "must be a non-negative decimal integer"));
        }
        let trimmed = raw.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        if canonical.len() > MAX_DIGITS {
            return Err(invalid(raw, "exceeds the maximum number of digits"));
        }
        Ok(Self(canonical.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(raw: &str, why: &str) -> DomainError {
    // Raw input can be arbitrarily long; only echo a prefix.
    let shown: String = raw.chars().take(32).collect();
    DomainError::validation(
        ValidationKind::InvalidIdentifier,
        format!("Invalid deal number {shown:?}: {why}"),
    )
}

impl From<u64> for DealNumber {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<u128> for DealNumber {
    fn from(n: u128) -> Self {
        Self(n.to_string())
    }
}

impl FromStr for DealNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DealNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DealNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for DealNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

struct DealNumberVisitor;

impl Visitor<'_> for DealNumberVisitor {
    type Value = DealNumber;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or its decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DealNumber::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(DealNumber::from)
            .map_err(|_| E::custom(format!("deal number must not be negative: {v}")))
    }

    // serde_json hands integers past u64 over as floats, which have already lost digits.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "deal number must be an exact integer, got {v}; send values above 2^64-1 as decimal strings"
        )))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        DealNumber::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for DealNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DealNumberVisitor)
    }
}
