// Licensed under the Apache-2.0 license

//! Bounded parsing of registry code points.

/// Parses `raw` as a base-10 unsigned integer that fits in `bits` bits.
///
/// Only ASCII digits are accepted: no sign, no surrounding whitespace, no
/// range expressions such as `6-7`. Returns `None` for anything that does not
/// parse or does not fit; callers drop such records.
///
/// # Examples
/// ```
/// use iana_registries_generator::value::parse_bounded;
/// assert_eq!(parse_bounded("65", 8), Some(65));
/// assert_eq!(parse_bounded("300", 8), None);
/// assert_eq!(parse_bounded("6-7", 8), None);
/// ```
pub fn parse_bounded(raw: &str, bits: u32) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = raw.parse().ok()?;
    match 1u64.checked_shl(bits) {
        Some(limit) if value >= limit => None,
        _ => Some(value),
    }
}
