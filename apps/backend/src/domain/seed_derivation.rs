//! RNG seed derivation for deterministic dealing.
//!
//! The seed is a pure function of the distribution identifiers. Changing the
//! context string or the message layout breaks every previously issued deal.

use super::identifiers::DealNumber;

/// BLAKE3 key-derivation context for shuffle seeds (protocol v1).
pub const SEED_CONTEXT: &str = "tarot-deal 2024 seed v1";

/// Key-derivation input shared by the seed and hash-code derivations.
///
/// The `:` separator keeps the encoding injective over decimal pairs.
pub fn derivation_message(distribution_number: &DealNumber, sequence_number: &DealNumber) -> String {
    format!("{distribution_number}:{sequence_number}")
}

/// Derive the 64-bit shuffle seed for a distribution.
///
/// # Arguments
///
/// * `distribution_number` - Distribution identifier
/// * `sequence_number` - Sequence identifier within the distribution
///
/// # Returns
///
/// The first 8 bytes of the BLAKE3 derived key, read little-endian.
pub fn derive_seed(distribution_number: &DealNumber, sequence_number: &DealNumber) -> u64 {
    let message = derivation_message(distribution_number, sequence_number);
    let key = blake3::derive_key(SEED_CONTEXT, message.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[..8]);
    u64::from_le_bytes(bytes)
}
