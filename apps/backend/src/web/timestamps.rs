//! Timestamp rendering for response bodies.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// RFC 3339 text for `ts`, falling back to the `Display` form.
pub fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
