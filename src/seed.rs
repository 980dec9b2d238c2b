//! Sample data for the admin page: two weeks of random temperatures around a
//! given day.

use std::ops::RangeInclusive;

use anyhow::anyhow;
use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::dashboard::format_date;
use crate::storage::WeatherStore;
use crate::validation::WeatherReading;

pub const DAYS_BEFORE: u64 = 7;
pub const DAYS_AFTER: u64 = 6;
pub const TEMPERATURE_RANGE: RangeInclusive<i32> = 20..=90;

/// One reading per day from `today - 7` to `today + 6`, whole-degree
/// temperatures drawn from 20..=90.
pub fn generate<R: Rng>(
    zipcode: &str,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<Vec<WeatherReading>> {
    let first = today
        .checked_sub_days(Days::new(DAYS_BEFORE))
        .ok_or_else(|| anyhow!("cannot seed before {today}"))?;

    (0..=DAYS_BEFORE + DAYS_AFTER)
        .map(|offset| {
            let date = first
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| anyhow!("cannot seed after {today}"))?;
            Ok(WeatherReading {
                zipcode: zipcode.to_string(),
                date: format_date(date),
                temperature: f64::from(rng.gen_range(TEMPERATURE_RANGE)),
            })
        })
        .collect()
}

/// Writes every reading through the regular upsert path.
pub fn apply(store: &mut WeatherStore, readings: &[WeatherReading]) {
    for r in readings {
        store.put(&r.zipcode, &r.date, r.temperature);
    }
}
