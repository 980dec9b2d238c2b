use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use super::{ErrorKind, ValidationError, DATE, TEMPERATURE, ZIPCODE};

pub const MIN_TEMPERATURE: f64 = -100.0;
pub const MAX_TEMPERATURE: f64 = 150.0;

const NON_NUMERIC_MSG: &str = "Temperature must be a numeric value";
const OUT_OF_RANGE_MSG: &str = "Temperature must be between -100°F and 150°F";
const DATE_MSG: &str = "Invalid date format. Use YYYY-MM-DD";
const ZIPCODE_MSG: &str = "Invalid zipcode format. Must be 5 digits";

// ASCII classes only: `\d` would also match non-ASCII digits.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern")
    })
}

/// Validates a temperature taken from an untyped JSON body.
///
/// Only JSON numbers are accepted; a numeric string such as `"75"` is
/// rejected as non-numeric, never coerced.
pub fn validate_temperature(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(t) => check_temperature(t),
            None => Err(non_numeric()),
        },
        _ => Err(non_numeric()),
    }
}

/// Type check first (NaN and infinities are non-numeric), then the inclusive
/// range check.
pub fn check_temperature(t: f64) -> Result<(), ValidationError> {
    if !t.is_finite() {
        return Err(non_numeric());
    }
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) {
        return Err(ValidationError::new(
            TEMPERATURE,
            ErrorKind::OutOfRange,
            OUT_OF_RANGE_MSG,
        ));
    }
    Ok(())
}

fn non_numeric() -> ValidationError {
    ValidationError::new(TEMPERATURE, ErrorKind::NonNumeric, NON_NUMERIC_MSG)
}

pub fn validate_date(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) => check_date(s).map(|_| ()),
        None => Err(bad_date()),
    }
}

/// Parses a strict `YYYY-MM-DD` string into a calendar date.
///
/// Both a malformed string and an impossible date (Feb 30, month 13, Feb 29 of
/// a common year) produce the same `bad-format` error.
pub fn check_date(s: &str) -> Result<NaiveDate, ValidationError> {
    if !date_pattern().is_match(s) {
        return Err(bad_date());
    }
    let mut parts = s.split('-');
    let year = parts.next().and_then(|p| p.parse::<i32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.parse::<u32>().ok());
    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).ok_or_else(bad_date),
        _ => Err(bad_date()),
    }
}

fn bad_date() -> ValidationError {
    ValidationError::new(DATE, ErrorKind::BadFormat, DATE_MSG)
}

pub fn validate_zipcode(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) => check_zipcode(s),
        None => Err(bad_zipcode()),
    }
}

/// Exactly five ASCII digits. Leading zeros are kept and valid.
pub fn check_zipcode(s: &str) -> Result<(), ValidationError> {
    if s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(bad_zipcode())
    }
}

fn bad_zipcode() -> ValidationError {
    ValidationError::new(ZIPCODE, ErrorKind::BadFormat, ZIPCODE_MSG)
}

/// Reports every named field that is absent, `null`, or the empty string.
///
/// Any other value counts as present, including `0`, `false` and strings of
/// whitespace. Errors come back in the order of `fields`. A body that is not a
/// JSON object has every field missing.
pub fn validate_required_fields(data: &Value, fields: &[&str]) -> Vec<ValidationError> {
    fields
        .iter()
        .filter(|field| is_missing(data.get(**field)))
        .map(|field| {
            ValidationError::new(
                *field,
                ErrorKind::Missing,
                format!("{} is required", capitalize(field)),
            )
        })
        .collect()
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
