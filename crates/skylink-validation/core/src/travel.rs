//! Travel date and flight search checks

use chrono::NaiveDate;

use crate::host::FieldValues;
use crate::notice::Notice;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields the search form cannot be sent without
pub const REQUIRED_SEARCH_FIELDS: &[&str] = &["departure_airport", "arrival_airport", "departure_date"];

/// `trip_type` radio values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "one-way" => Some(Self::OneWay),
            "round-trip" => Some(Self::RoundTrip),
            _ => None,
        }
    }

    /// One-way trips disable (and clear) the return date input
    pub fn return_date_enabled(&self) -> bool {
        matches!(self, Self::RoundTrip)
    }
}

/// Whether the return date input is enabled for a raw `trip_type` value.
///
/// Only an explicit one-way trip disables it.
pub fn return_date_enabled(trip_type: &str) -> bool {
    TripType::parse(trip_type).map_or(true, |t| t.return_date_enabled())
}

/// The `min` attribute for every date input: no travel in the past.
pub fn earliest_travel_date(today: NaiveDate) -> String {
    today.format(DATE_FORMAT).to_string()
}

/// A return date on or before departure is rejected; the caller clears it.
///
/// Only applies once both values are real dates.
pub fn check_return_date(departure: &str, return_date: &str) -> Result<(), Notice> {
    let (Ok(departure), Ok(return_date)) = (
        NaiveDate::parse_from_str(departure.trim(), DATE_FORMAT),
        NaiveDate::parse_from_str(return_date.trim(), DATE_FORMAT),
    ) else {
        return Ok(());
    };

    if return_date <= departure {
        return Err(Notice::warning("Return date must be after departure date"));
    }
    Ok(())
}

/// Pre-submit check for the flight search form.
pub fn check_flight_search(values: &dyn FieldValues) -> Result<(), Notice> {
    let missing = |name: &str| values.value_of(name).map_or(true, |v| v.is_empty());

    if REQUIRED_SEARCH_FIELDS.iter().any(|name| missing(name)) {
        return Err(Notice::warning("Please fill in all required fields"));
    }

    let trip_type = values.value_of("trip_type").and_then(|v| TripType::parse(&v));
    if trip_type == Some(TripType::RoundTrip) && missing("return_date") {
        return Err(Notice::warning("Please select a return date for round trips"));
    }

    if let (Some(departure), Some(return_date)) =
        (values.value_of("departure_date"), values.value_of("return_date"))
    {
        check_return_date(&departure, &return_date)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn search(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_trip_type() {
        assert_eq!(TripType::parse("one-way"), Some(TripType::OneWay));
        assert_eq!(TripType::parse("round-trip"), Some(TripType::RoundTrip));
        assert_eq!(TripType::parse("multi-city"), None);
        assert!(!TripType::OneWay.return_date_enabled());
        assert!(TripType::RoundTrip.return_date_enabled());
    }

    #[rstest]
    #[case("one-way", false)]
    #[case("round-trip", true)]
    #[case("", true)]
    #[case("multi-city", true)]
    fn test_return_date_enabled_for_raw_value(#[case] trip_type: &str, #[case] enabled: bool) {
        assert_eq!(return_date_enabled(trip_type), enabled);
    }

    #[test]
    fn test_earliest_travel_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(earliest_travel_date(today), "2026-03-09");
    }

    #[rstest]
    #[case("2026-05-01", "2026-05-02", true)]
    #[case("2026-05-01", "2026-05-01", false)]
    #[case("2026-05-01", "2026-04-30", false)]
    #[case("", "2026-04-30", true)]
    #[case("2026-05-01", "", true)]
    #[case("soon", "2026-04-30", true)]
    fn test_check_return_date(#[case] departure: &str, #[case] ret: &str, #[case] ok: bool) {
        assert_eq!(check_return_date(departure, ret).is_ok(), ok);
    }

    #[test]
    fn test_flight_search_required_fields() {
        let err = check_flight_search(&search(&[
            ("departure_airport", "JFK"),
            ("departure_date", "2026-05-01"),
        ]))
        .unwrap_err();
        assert_eq!(err, Notice::warning("Please fill in all required fields"));
    }

    #[test]
    fn test_flight_search_round_trip_needs_return() {
        let mut values = search(&[
            ("departure_airport", "JFK"),
            ("arrival_airport", "LHR"),
            ("departure_date", "2026-05-01"),
            ("trip_type", "round-trip"),
        ]);
        let err = check_flight_search(&values).unwrap_err();
        assert_eq!(err.message, "Please select a return date for round trips");

        values.insert("return_date".to_string(), "2026-05-08".to_string());
        assert!(check_flight_search(&values).is_ok());

        values.insert("trip_type".to_string(), "one-way".to_string());
        values.insert("return_date".to_string(), String::new());
        assert!(check_flight_search(&values).is_ok());
    }

    #[test]
    fn test_flight_search_return_before_departure() {
        let values = search(&[
            ("departure_airport", "JFK"),
            ("arrival_airport", "LHR"),
            ("departure_date", "2026-05-08"),
            ("trip_type", "round-trip"),
            ("return_date", "2026-05-01"),
        ]);
        assert!(check_flight_search(&values).is_err());
    }
}
