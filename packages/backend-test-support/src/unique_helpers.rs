//! Test helpers for generating unique test data
//!
//! Integration tests share one schema per process, so every distribution a
//! test creates needs identifiers nobody else will pick. ULIDs give us 128
//! bits of uniqueness, which also conveniently exercises identifiers wider
//! than 64 bits.

use ulid::Ulid;

/// Generate a unique non-negative integer rendered as decimal text.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_decimal;
///
/// let a = unique_decimal();
/// let b = unique_decimal();
/// assert_ne!(a, b);
/// assert!(a.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn unique_decimal() -> String {
    Ulid::new().0.to_string()
}
