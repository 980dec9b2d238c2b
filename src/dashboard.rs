//! Dashboard feed: today's temperature plus the days either side of it.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::WeatherStore;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub date: String,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFeed {
    pub zipcode: String,
    pub today: String,
    pub current: Option<f64>,
    /// The `window_days` days before today, oldest first.
    pub history: Vec<DailyTemperature>,
    /// The `window_days` days after today.
    pub forecast: Vec<DailyTemperature>,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn build_feed(
    store: &WeatherStore,
    zipcode: &str,
    today: NaiveDate,
    window_days: u32,
) -> DashboardFeed {
    let days = u64::from(window_days);
    let first = today.checked_sub_days(Days::new(days)).unwrap_or(today);
    let last = today.checked_add_days(Days::new(days)).unwrap_or(today);

    let known: BTreeMap<String, f64> = store
        .range(zipcode, &format_date(first), &format_date(last))
        .into_iter()
        .collect();
    let day = |date: NaiveDate| {
        let date = format_date(date);
        DailyTemperature {
            temperature: known.get(&date).copied(),
            date,
        }
    };

    let history = (1..=days)
        .rev()
        .filter_map(|i| today.checked_sub_days(Days::new(i)))
        .map(day)
        .collect();
    let forecast = (1..=days)
        .filter_map(|i| today.checked_add_days(Days::new(i)))
        .map(day)
        .collect();

    let today_key = format_date(today);
    DashboardFeed {
        zipcode: zipcode.to_string(),
        current: known.get(&today_key).copied(),
        today: today_key,
        history,
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn empty_store_gives_null_windows() {
        let store = WeatherStore::new();
        let feed = build_feed(&store, "12345", date("2025-11-14"), 7);
        assert_eq!(feed.current, None);
        assert_eq!(feed.history.len(), 7);
        assert_eq!(feed.forecast.len(), 7);
        assert!(feed.history.iter().all(|d| d.temperature.is_none()));
        assert!(feed.forecast.iter().all(|d| d.temperature.is_none()));
    }

    #[test]
    fn windows_exclude_today_and_cross_month_boundaries() {
        let mut store = WeatherStore::new();
        store.put("12345", "2025-11-14", 72.0);
        store.put("12345", "2025-11-07", 60.0);
        store.put("12345", "2025-11-21", 65.0);
        store.put("12345", "2025-11-06", 1.0);
        store.put("54321", "2025-11-13", 99.0);

        let feed = build_feed(&store, "12345", date("2025-11-14"), 7);
        assert_eq!(feed.today, "2025-11-14");
        assert_eq!(feed.current, Some(72.0));

        assert_eq!(feed.history.first().unwrap().date, "2025-11-07");
        assert_eq!(feed.history.first().unwrap().temperature, Some(60.0));
        assert_eq!(feed.history.last().unwrap().date, "2025-11-13");
        assert_eq!(feed.history.last().unwrap().temperature, None);

        assert_eq!(feed.forecast.first().unwrap().date, "2025-11-15");
        assert_eq!(feed.forecast.last().unwrap().date, "2025-11-21");
        assert_eq!(feed.forecast.last().unwrap().temperature, Some(65.0));

        let feed = build_feed(&store, "12345", date("2025-12-30"), 3);
        let dates: Vec<_> = feed.forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-12-31", "2026-01-01", "2026-01-02"]);
    }

    #[test]
    fn zero_window() {
        let mut store = WeatherStore::new();
        store.put("12345", "2025-11-14", 72.0);
        let feed = build_feed(&store, "12345", date("2025-11-14"), 0);
        assert_eq!(feed.current, Some(72.0));
        assert!(feed.history.is_empty());
        assert!(feed.forecast.is_empty());
    }
}
