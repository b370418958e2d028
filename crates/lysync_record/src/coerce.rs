//! Safe scalar coercion.
//!
//! Total functions converting arbitrary remote JSON scalars into typed
//! local values. Every function returns `None` on any conversion failure;
//! none of them can panic or error. This mirrors the tolerance required of
//! the mirror engine: a malformed upstream value degrades to an absent
//! local value, never to an aborted record.

use crate::value::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

/// Allowed values for yes/no single-character flags.
pub const YES_NO: &[&str] = &["S", "N"];

/// Epoch values above this magnitude are millisecond-scale.
const MILLIS_THRESHOLD: f64 = 1e12;

/// Coerces a value to an integer.
///
/// Accepts JSON integers, floats (truncated toward zero, as the original
/// upstream feeds fractional counts occasionally), numeric strings, and
/// booleans (1/0).
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            if !f.is_finite() || f < i64::MIN as f64 || f > i64::MAX as f64 {
                return None;
            }
            Some(f.trunc() as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Coerces a value to a float.
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Coerces a value to a trimmed string.
///
/// Numbers and booleans render to their canonical string form. Null is
/// absent; an empty string stays an empty string (the upstream
/// distinguishes the two).
pub fn to_trimmed_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerces a value to a UTC timestamp.
///
/// Numeric inputs are epoch values; magnitudes above 10^12 are taken as
/// milliseconds and scaled down to seconds. String inputs are ISO-8601-like;
/// a trailing `Z` or UTC offset is stripped before naive parsing. The
/// offset is tolerated, not validated: the mirror stores wall-clock values
/// as the remote emits them.
pub fn to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let mut epoch = n.as_f64()?;
            if !epoch.is_finite() {
                return None;
            }
            if epoch.abs() > MILLIS_THRESHOLD {
                epoch /= 1000.0;
            }
            let secs = epoch.trunc() as i64;
            let nanos = (epoch.fract().abs() * 1_000_000_000.0) as u32;
            DateTime::from_timestamp(secs, nanos)
        }
        Value::String(s) => parse_iso_like(s.trim()),
        _ => None,
    }
}

/// Coerces a value to a member of a bounded flag set.
///
/// Matching is case-insensitive; the returned value is the canonical
/// (allowed-list) spelling. Anything outside the set yields `None`.
pub fn to_bounded_flag(value: &Value, allowed: &[&str]) -> Option<String> {
    let s = to_trimmed_string(value)?;
    allowed
        .iter()
        .find(|a| a.eq_ignore_ascii_case(&s))
        .map(|a| (*a).to_string())
}

fn parse_iso_like(s: &str) -> Option<DateTime<Utc>> {
    let naive = strip_utc_offset(s);
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Strips a trailing `Z` marker or `+HH:MM` / `-HH:MM` offset.
///
/// Offsets can only appear after the date portion, so a sign past index 10
/// is an offset and a sign before it is a date separator.
fn strip_utc_offset(s: &str) -> &str {
    if let Some(stripped) = s.strip_suffix('Z') {
        return stripped;
    }
    if let Some(pos) = s.rfind(['+', '-']) {
        if pos > 10 {
            return &s[..pos];
        }
    }
    s
}

/// A coercion applied by a field rule.
///
/// One variant per target type, so a field map stays a plain inspectable
/// value rather than a table of function pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Coerce to [`FieldValue::Int`].
    Int,
    /// Coerce to [`FieldValue::Float`].
    Float,
    /// Coerce to a trimmed [`FieldValue::Str`].
    TrimmedString,
    /// Coerce to [`FieldValue::Timestamp`].
    Timestamp,
    /// Coerce to a member of a bounded flag set, stored as a string.
    Flag(&'static [&'static str]),
}

impl Coercion {
    /// Applies the coercion to a raw scalar.
    ///
    /// Total: returns `None` for null, absent, or unconvertible values.
    pub fn apply(&self, value: &Value) -> Option<FieldValue> {
        match self {
            Coercion::Int => to_int(value).map(FieldValue::Int),
            Coercion::Float => to_float(value).map(FieldValue::Float),
            Coercion::TrimmedString => to_trimmed_string(value).map(FieldValue::Str),
            Coercion::Timestamp => to_timestamp(value).map(FieldValue::Timestamp),
            Coercion::Flag(allowed) => to_bounded_flag(value, allowed).map(FieldValue::Str),
        }
    }
}
