//! Public hash codes for distributions.
//!
//! A hash code is a short, opaque, non-invertible handle derived from the
//! identifiers under its own key-derivation context, so it reveals nothing
//! about the seed or the deck order.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::identifiers::DealNumber;
use super::seed_derivation::derivation_message;
use crate::errors::domain::{DomainError, ValidationKind};

/// BLAKE3 key-derivation context for hash codes (protocol v1).
pub const HASH_CODE_CONTEXT: &str = "tarot-deal 2024 hash code v1";

/// Crockford Base32 alphabet (no I, L, O, U).
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

pub const HASH_CODE_LEN: usize = 10;
const BITS_PER_CHAR: usize = 5;
const CODE_BITS: usize = HASH_CODE_LEN * BITS_PER_CHAR;

/// Ten-character uppercase Crockford Base32 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashCode(String);

impl HashCode {
    /// Validate a user-supplied code. Surrounding whitespace and lowercase are tolerated.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() != HASH_CODE_LEN {
            return Err(DomainError::validation(
                ValidationKind::InvalidHashCode,
                format!("Hash code must be {HASH_CODE_LEN} characters"),
            ));
        }
        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(DomainError::validation(
                ValidationKind::InvalidHashCode,
                "Hash code contains characters outside the Crockford Base32 alphabet",
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HashCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HashCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HashCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Derive the public hash code for a distribution.
///
/// Takes the first 50 bits of the derived key (big-endian bit order) and
/// emits them five bits per character, most significant first.
pub fn hash_code(distribution_number: &DealNumber, sequence_number: &DealNumber) -> HashCode {
    let message = derivation_message(distribution_number, sequence_number);
    let key = blake3::derive_key(HASH_CODE_CONTEXT, message.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&key[..8]);
    let bits = u64::from_be_bytes(head) >> (64 - CODE_BITS);

    let code: String = (0..HASH_CODE_LEN)
        .map(|i| {
            let shift = CODE_BITS - BITS_PER_CHAR * (i + 1);
            ALPHABET[((bits >> shift) & 0x1f) as usize] as char
        })
        .collect();
    HashCode(code)
}
