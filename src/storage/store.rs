use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory temperature readings keyed by zipcode, then by `YYYY-MM-DD` date.
///
/// The store does no validation of its own; callers hand it readings that
/// already passed [`crate::validation::parse_reading`]. A zipcode entry is only
/// ever created by [`WeatherStore::put`], so no zipcode maps to an empty set of
/// dates.
#[derive(Debug, Default)]
pub struct WeatherStore {
    // zipcode -> date -> temperature. Date keys sort chronologically.
    readings: BTreeMap<String, BTreeMap<String, f64>>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self { readings: BTreeMap::new() }
    }

    /// Upsert: a second write to the same (zipcode, date) replaces the first.
    pub fn put(&mut self, zipcode: &str, date: &str, temperature: f64) {
        self.readings
            .entry(zipcode.to_string())
            .or_default()
            .insert(date.to_string(), temperature);
    }

    pub fn get(&self, zipcode: &str, date: &str) -> Option<f64> {
        self.readings.get(zipcode)?.get(date).copied()
    }

    /// Snapshot of every date recorded for `zipcode`, or `None` if the zipcode
    /// was never written. The returned map is a copy.
    pub fn get_all(&self, zipcode: &str) -> Option<BTreeMap<String, f64>> {
        self.readings.get(zipcode).cloned()
    }

    /// Readings for `zipcode` with `from <= date <= to`, oldest first.
    pub fn range(&self, zipcode: &str, from: &str, to: &str) -> Vec<(String, f64)> {
        if from > to {
            return Vec::new();
        }
        match self.readings.get(zipcode) {
            Some(dates) => dates
                .range::<str, _>((Bound::Included(from), Bound::Included(to)))
                .map(|(d, t)| (d.clone(), *t))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }

    /// Total number of (zipcode, date) readings held.
    pub fn len(&self) -> usize {
        self.readings.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn zipcode_count(&self) -> usize {
        self.readings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut store = WeatherStore::new();
        store.put("12345", "2025-11-14", 72.0);
        assert_eq!(store.get("12345", "2025-11-14"), Some(72.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_keys_are_none() {
        let mut store = WeatherStore::new();
        assert_eq!(store.get("12345", "2025-11-14"), None);
        store.put("12345", "2025-11-14", 72.0);
        assert_eq!(store.get("12345", "2025-11-15"), None);
        assert_eq!(store.get("54321", "2025-11-14"), None);
    }

    #[test]
    fn last_write_wins() {
        let mut store = WeatherStore::new();
        store.put("12345", "2025-01-01", 10.0);
        store.put("12345", "2025-01-01", 20.0);
        assert_eq!(store.get("12345", "2025-01-01"), Some(20.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repeated_put_is_idempotent() {
        let mut once = WeatherStore::new();
        once.put("12345", "2025-01-01", 55.5);

        let mut twice = WeatherStore::new();
        twice.put("12345", "2025-01-01", 55.5);
        twice.put("12345", "2025-01-01", 55.5);

        assert_eq!(once.get_all("12345"), twice.get_all("12345"));
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn zipcodes_are_isolated() {
        let mut store = WeatherStore::new();
        store.put("11111", "2025-01-01", 5.0);
        assert_eq!(store.get("22222", "2025-01-01"), None);
        assert_eq!(store.get_all("22222"), None);
        assert_eq!(store.zipcode_count(), 1);
    }

    #[test]
    fn get_all_returns_snapshot() {
        let mut store = WeatherStore::new();
        assert!(store.get_all("12345").is_none());

        store.put("12345", "2025-11-14", 72.0);
        let mut snapshot = store.get_all("12345").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("2025-11-14"), Some(&72.0));

        snapshot.insert("2025-11-15".to_string(), 99.0);
        assert_eq!(store.get("12345", "2025-11-15"), None);
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let mut store = WeatherStore::new();
        store.put("10001", "2025-11-18", 75.0);
        store.put("10001", "2025-11-16", 70.0);
        store.put("10001", "2025-11-17", 72.0);
        store.put("10001", "2025-11-20", 80.0);

        let got = store.range("10001", "2025-11-16", "2025-11-18");
        assert_eq!(
            got,
            vec![
                ("2025-11-16".to_string(), 70.0),
                ("2025-11-17".to_string(), 72.0),
                ("2025-11-18".to_string(), 75.0),
            ]
        );
        assert!(store.range("10001", "2025-11-19", "2025-11-16").is_empty());
        assert!(store.range("99999", "2025-01-01", "2025-12-31").is_empty());

        let single = store.range("10001", "2025-11-20", "2025-11-20");
        assert_eq!(single, vec![("2025-11-20".to_string(), 80.0)]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = WeatherStore::new();
        store.put("11111", "2025-01-01", 1.0);
        store.put("22222", "2025-01-02", 2.0);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("11111", "2025-01-01"), None);
        assert_eq!(store.get_all("11111"), None);
        assert_eq!(store.get_all("22222"), None);

        store.put("11111", "2025-01-03", 3.0);
        assert_eq!(store.get_all("11111").map(|m| m.len()), Some(1));
    }
}
