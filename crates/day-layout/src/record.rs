//! Raw event records and their conversion into [`Interval`]s.
//!
//! Records arrive as loosely typed JSON: a bound may be an integer, a float,
//! a numeric string such as `"90"` or `"90px"`, or something else entirely.
//! Parsing is explicit and total. Every input either yields a whole-minute
//! bound or a [`LayoutError::InvalidBoundType`].

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::interval::{Interval, DAY_START};

/// One side of a raw record, before parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBound {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RawBound {
    fn default() -> Self {
        RawBound::Other(serde_json::Value::Null)
    }
}

impl From<i64> for RawBound {
    fn from(n: i64) -> Self {
        RawBound::Integer(n)
    }
}

impl From<&str> for RawBound {
    fn from(s: &str) -> Self {
        RawBound::Text(s.to_string())
    }
}

/// An unvalidated `{start, end}` record as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub start: RawBound,
    #[serde(default)]
    pub end: RawBound,
}

impl EventRecord {
    /// A record with integer bounds.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: RawBound::Integer(start),
            end: RawBound::Integer(end),
        }
    }

    /// Parse both bounds and build a validated [`Interval`].
    ///
    /// The start bound is fully checked (type, then range) before the end
    /// bound is parsed, so the first failing check is the one reported.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidBoundType`] for a non-numeric bound, otherwise
    /// whatever [`Interval::new`] rejects.
    pub fn to_interval(&self) -> Result<Interval> {
        let start = parse_bound("start", &self.start)?;
        if start < DAY_START {
            return Err(LayoutError::OutOfRangeStart(start));
        }
        let end = parse_bound("end", &self.end)?;
        Interval::new(start, end)
    }
}

/// Parse a raw bound to whole minutes, truncating fractional values.
pub fn parse_bound(field: &'static str, raw: &RawBound) -> Result<i64> {
    let invalid = || LayoutError::InvalidBoundType {
        field,
        value: describe(raw),
    };

    match raw {
        RawBound::Integer(n) => Ok(*n),
        // `as` saturates for out-of-range floats; range checks reject them later.
        RawBound::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        RawBound::Float(_) => Err(invalid()),
        RawBound::Text(s) => parse_integer_prefix(s).ok_or_else(invalid),
        RawBound::Other(_) => Err(invalid()),
    }
}

/// Leading whitespace, an optional sign, then the longest run of ASCII digits.
fn parse_integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}

fn describe(raw: &RawBound) -> String {
    match raw {
        RawBound::Integer(n) => n.to_string(),
        RawBound::Float(f) => f.to_string(),
        RawBound::Text(s) => format!("'{s}'"),
        RawBound::Other(v) => v.to_string(),
    }
}
