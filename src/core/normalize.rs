//! Movie record normalization.
//!
//! Converts loosely-typed wire fields into comparable values:
//! - Tag lists split on `,`, `|` or `/`
//! - Years and ratings accepted as numbers or strings
//!
//! Unparseable numbers come back as `None`. Callers sort `None` after every
//! known value and treat it as failing any numeric threshold.

use crate::models::movie::LooseNumber;
use std::cmp::Ordering;

/// Delimiters accepted between genre tags.
const TAG_DELIMITERS: &[char] = &[',', '|', '/'];

/// Split a delimited tag string.
///
/// Tokens are trimmed and empty ones dropped. Order and repetition are kept.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_DELIMITERS)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a comma-delimited language string.
pub fn split_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a release year.
///
/// Strings use their leading integer (`"2016-05-01"` is 2016); numbers are
/// truncated toward zero.
pub fn parse_year(value: &LooseNumber) -> Option<i32> {
    match value {
        LooseNumber::Number(n) if n.is_finite() => Some(n.trunc() as i32),
        LooseNumber::Number(_) => None,
        LooseNumber::Text(s) => {
            let prefix = leading_number(s, false)?;
            prefix.parse::<i32>().ok()
        }
    }
}

/// Parse a rating.
///
/// Strings use their leading decimal number (`"8.1/10"` is 8.1).
pub fn parse_rating(value: &LooseNumber) -> Option<f64> {
    let parsed = match value {
        LooseNumber::Number(n) => *n,
        LooseNumber::Text(s) => leading_number(s, true)?.parse::<f64>().ok()?,
    };
    parsed.is_finite().then_some(parsed)
}

/// Extract the leading `[+-]?digits[.digits]` prefix of a trimmed string.
fn leading_number(s: &str, allow_fraction: bool) -> Option<&str> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    has_digits.then(|| &s[..end])
}

/// Descending order on optional keys with unknown values last.
pub fn cmp_desc_unknown_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
