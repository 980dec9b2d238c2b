use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{validate_date, validate_required_fields, validate_temperature, validate_zipcode};
use super::{ErrorResponse, DATE, READING_FIELDS, TEMPERATURE, ZIPCODE};

/// A reading that has passed every field check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub zipcode: String,
    pub date: String,
    pub temperature: f64,
}

/// Runs all three field validators without short-circuiting.
///
/// Returns `None` when the data is well formed. Required-field checking is a
/// separate pass (see [`parse_reading`]).
pub fn validate_weather_data(data: &Value) -> Option<ErrorResponse> {
    let null = Value::Null;
    let temperature = data.get(TEMPERATURE).unwrap_or(&null);
    let date = data.get(DATE).unwrap_or(&null);
    let zipcode = data.get(ZIPCODE).unwrap_or(&null);

    let resp: ErrorResponse = [
        validate_temperature(temperature),
        validate_date(date),
        validate_zipcode(zipcode),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if resp.is_empty() {
        None
    } else {
        Some(resp)
    }
}

/// Turns an untyped request body into a [`WeatherReading`].
///
/// Missing fields are reported on their own; format and range checks only run
/// once every required field is present.
pub fn parse_reading(data: &Value) -> Result<WeatherReading, ErrorResponse> {
    let missing = validate_required_fields(data, &READING_FIELDS);
    if !missing.is_empty() {
        return Err(missing.into_iter().collect());
    }
    if let Some(errors) = validate_weather_data(data) {
        return Err(errors);
    }

    // Every field has been type checked above.
    match (
        data[ZIPCODE].as_str(),
        data[DATE].as_str(),
        data[TEMPERATURE].as_f64(),
    ) {
        (Some(zipcode), Some(date), Some(temperature)) => Ok(WeatherReading {
            zipcode: zipcode.to_string(),
            date: date.to_string(),
            temperature,
        }),
        _ => Err(ErrorResponse::single("body", "Invalid weather reading")),
    }
}
