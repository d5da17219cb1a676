//! # Numeric Sanitization
//!
//! Form fields and hand-edited workbooks routinely carry blanks, `null`s or
//! numbers stored as strings. These helpers coerce such values to `f64` the
//! same forgiving way everywhere: anything that is not a number becomes `0`.
//!
//! This is the only input treatment the pricing engine relies on. Range
//! checks live in [`crate::workbook::Workbook::validate`] and are the
//! caller's business.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Parse a user-entered amount, falling back to `0.0`.
///
/// Only the leading decimal number is read, so trailing units or typos are
/// ignored (`"12abc"` is `12`). Spelled-out or overflowing infinities are
/// not amounts and come back as `0.0`.
///
/// ```rust
/// use pricing_core::sanitize::parse_amount;
///
/// assert_eq!(parse_amount(" 12.5 "), 12.5);
/// assert_eq!(parse_amount("3.5kg"), 3.5);
/// assert_eq!(parse_amount(""), 0.0);
/// assert_eq!(parse_amount("abc"), 0.0);
/// assert_eq!(parse_amount("inf"), 0.0);
/// ```
pub fn parse_amount(raw: &str) -> f64 {
    numeric_prefix(raw.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` slice of `raw`.
fn numeric_prefix(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = digits_from(exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }
    &raw[..end]
}

/// Replace NaN with `0.0`. Infinities pass through untouched.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Serde `deserialize_with` helper accepting numbers, numeric strings,
/// empty strings and `null`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64)
}

/// Serde `deserialize_with` helper for string-keyed amount maps, applying
/// [`lenient_f64`] to every value.
pub fn lenient_f64_map<'de, D>(deserializer: D) -> Result<HashMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Amount(#[serde(deserialize_with = "lenient_f64")] f64);

    let raw = HashMap::<String, Amount>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, Amount(value))| (key, value)).collect())
}

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(sanitize_amount(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        Ok(parse_amount(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientF64)
    }
}
