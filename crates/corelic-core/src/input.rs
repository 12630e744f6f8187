//! Coercion of raw numeric input into license and core counts.
//!
//! Text fields are parsed leniently: the leading integer is taken, anything
//! unparseable becomes 0, and negative values never reach the allocator.

use tracing::debug;

use crate::types::LicensePool;

/// Parse a raw count the way a lenient integer field does.
///
/// - surrounding whitespace is ignored
/// - an optional `+`/`-` sign is accepted
/// - the leading run of ASCII digits is used (`"12abc"` → 12, `"3.9"` → 3)
/// - no digits → 0, negative → 0, overflow saturates at `u32::MAX`
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    if digits.is_empty() {
        if !trimmed.is_empty() {
            debug!(raw, "non-numeric count coerced to 0");
        }
        return 0;
    }

    if negative {
        debug!(raw, "negative count clamped to 0");
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Build a pool from the two raw entitlement fields.
pub fn parse_pool(standard: &str, datacenter: &str) -> LicensePool {
    LicensePool {
        standard: parse_count(standard),
        datacenter: parse_count(datacenter),
    }
}

/// Clamp a signed count into the non-negative range.
pub fn clamp_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
