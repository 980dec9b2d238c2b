//! Field validation for incoming weather readings.
//!
//! Every check returns a structured [`ValidationError`]; nothing here panics on
//! malformed input. Failures for a whole reading are collected into an
//! [`ErrorResponse`], the `{ "errors": { field: message } }` body the HTTP layer
//! hands back to clients.

pub mod fields;
pub mod reading;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fields::{
    check_date, check_temperature, check_zipcode, validate_date, validate_required_fields,
    validate_temperature, validate_zipcode, MAX_TEMPERATURE, MIN_TEMPERATURE,
};
pub use reading::{parse_reading, validate_weather_data, WeatherReading};

pub const TEMPERATURE: &str = "temperature";
pub const DATE: &str = "date";
pub const ZIPCODE: &str = "zipcode";

/// Fields a submitted reading must carry, in the order errors are reported.
pub const READING_FIELDS: [&str; 3] = [TEMPERATURE, DATE, ZIPCODE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Field absent, null, or an empty string.
    Missing,
    NonNumeric,
    OutOfRange,
    /// Date or zipcode failed its pattern or calendar check.
    BadFormat,
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Field-keyed error mapping returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// Single-entry mapping, used for body and server errors that have no
    /// corresponding reading field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self { errors }
    }

    pub fn push(&mut self, err: ValidationError) {
        self.errors.insert(err.field, err.message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self::single(err.field, err.message)
    }
}

impl FromIterator<ValidationError> for ErrorResponse {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut resp = ErrorResponse::default();
        for err in iter {
            resp.push(err);
        }
        resp
    }
}
