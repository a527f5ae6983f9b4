// Licensed under the Apache-2.0 license

//! Utility functions for description cleanup and identifier formatting.

/// Collapses every run of whitespace (including newlines) into a single space
/// and trims both ends.
///
/// IANA wraps some long descriptions across lines with column padding; this
/// turns them back into the single line shown on the registry web page.
///
/// # Examples
/// ```
/// use iana_registries_generator::util::collapse_whitespace;
/// assert_eq!(
///     collapse_whitespace("used     \nfor unicast"),
///     "used for unicast"
/// );
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the part of `s` before the first `delim`.
///
/// A delimiter in the first position is ignored so that the result is never
/// emptied by it.
pub fn truncate_before(s: &str, delim: char) -> &str {
    match s.find(delim) {
        Some(n) if n > 0 => &s[..n],
        _ => s,
    }
}

/// Forces `s` into the `[A-Z0-9_]` alphabet.
///
/// Any other character becomes an underscore, runs of underscores collapse
/// into one and leading/trailing underscores are dropped. Lowercase ASCII is
/// not upper-cased here; callers upper-case first.
///
/// # Examples
/// ```
/// use iana_registries_generator::util::sanitize_identifier;
/// assert_eq!(sanitize_identifier("802_+_ETHERNET"), "802_ETHERNET");
/// assert_eq!(sanitize_identifier("(LCAF)"), "LCAF");
/// ```
pub fn sanitize_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        let c = if c.is_ascii_uppercase() || c.is_ascii_digit() {
            c
        } else {
            '_'
        };
        if c == '_' && (result.is_empty() || result.ends_with('_')) {
            continue;
        }
        result.push(c);
    }
    while result.ends_with('_') {
        result.pop();
    }
    result
}

/// Returns true if `s` is a non-empty `[A-Z0-9_]+` identifier suffix.
#[cfg(test)]
pub(crate) fn is_identifier_suffix(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}
