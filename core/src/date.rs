// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use jiff::{Span, Zoned};
use serde::de;

use crate::repeat::RepeatError;

/// Stable text form of a date, also used as the storage format.
pub(crate) const STABLE_FORMAT_DATEONLY: &str = "%Y%m%d";

const MAX_YEAR: i32 = 9999;
const MIN_YEAR: i32 = -9999;

/// A whole calendar day without time or timezone, written as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskDate(Date);

impl TaskDate {
    /// Creates a date from its parts, failing if the day does not exist.
    pub fn new(year: i16, month: i8, day: i8) -> Result<Self, RepeatError> {
        Date::new(year, month, day)
            .map(Self)
            .map_err(|_| RepeatError::DateMalformed(format!("{year:04}{month:02}{day:02}")))
    }

    /// The current date in the system timezone.
    pub fn today() -> Self {
        Self(Zoned::now().date())
    }

    /// Parses the stable `YYYYMMDD` form. Nothing else is accepted.
    pub fn parse_stable(s: &str) -> Result<Self, RepeatError> {
        let malformed = || RepeatError::DateMalformed(s.to_string());
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let year: i16 = s[0..4].parse().map_err(|_| malformed())?;
        let month: i8 = s[4..6].parse().map_err(|_| malformed())?;
        let day: i8 = s[6..8].parse().map_err(|_| malformed())?;
        Date::new(year, month, day).map(Self).map_err(|_| malformed())
    }

    /// Parses the `DD.MM.YYYY` form people type when searching.
    pub fn parse_search(s: &str) -> Option<Self> {
        let mut parts = s.split('.');
        let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || day.len() != 2 || month.len() != 2 || year.len() != 4 {
            return None;
        }

        let digits = |a: &str| a.bytes().all(|b| b.is_ascii_digit());
        if !(digits(day) && digits(month) && digits(year)) {
            return None;
        }

        Date::new(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
            .ok()
            .map(Self)
    }

    /// Formats the date as `YYYYMMDD`.
    pub fn format_stable(&self) -> String {
        self.0.strftime(STABLE_FORMAT_DATEONLY).to_string()
    }

    pub fn year(&self) -> i16 {
        self.0.year()
    }

    pub fn month(&self) -> i8 {
        self.0.month()
    }

    pub fn day(&self) -> i8 {
        self.0.day()
    }

    /// Day of the week, Monday is 1 and Sunday is 7.
    pub fn weekday(&self) -> i8 {
        self.0.weekday().to_monday_one_offset()
    }

    /// Adds a number of days, rolling over months and years.
    pub fn add_days(self, days: i64) -> Result<Self, RepeatError> {
        let span = Span::new()
            .try_days(days)
            .map_err(|_| RepeatError::DateOutOfRange)?;
        self.0
            .checked_add(span)
            .map(Self)
            .map_err(|_| RepeatError::DateOutOfRange)
    }

    /// Moves the date into another year, keeping month and day.
    ///
    /// Returns `Ok(None)` when the day does not exist in that year, which only
    /// happens to February 29.
    pub fn with_year(self, year: i32) -> Result<Option<Self>, RepeatError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(RepeatError::DateOutOfRange);
        }

        let year = i16::try_from(year).map_err(|_| RepeatError::DateOutOfRange)?;
        Ok(Date::new(year, self.month(), self.day()).ok().map(Self))
    }

    /// The underlying civil date.
    pub fn date(&self) -> Date {
        self.0
    }
}

impl From<Date> for TaskDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_stable())
    }
}

impl FromStr for TaskDate {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_stable(s)
    }
}

impl serde::Serialize for TaskDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_stable())
    }
}

impl<'de> serde::Deserialize<'de> for TaskDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DateVisitor;

        impl de::Visitor<'_> for DateVisitor {
            type Value = TaskDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date string like \"20240131\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                TaskDate::parse_stable(value).map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> TaskDate {
        TaskDate::parse_stable(s).unwrap()
    }

    #[test]
    fn parses_and_formats_stable_form() {
        let d = date("20240131");
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 1);
        assert_eq!(d.day(), 31);
        assert_eq!(d.format_stable(), "20240131");
        assert_eq!(d.to_string(), "20240131");
    }

    #[test]
    fn rejects_malformed_stable_form() {
        for s in [
            "", "2024013", "202401311", "2024-01-31", "20241301", "20240230", "2023022a",
            " 2024013", "+2024013",
        ] {
            assert!(
                matches!(TaskDate::parse_stable(s), Err(RepeatError::DateMalformed(_))),
                "expected {s:?} to be rejected"
            );
        }
    }

    #[test]
    fn accepts_leap_day_only_in_leap_years() {
        assert!(TaskDate::parse_stable("20240229").is_ok());
        assert!(TaskDate::parse_stable("20000229").is_ok());
        assert!(TaskDate::parse_stable("19000229").is_err());
        assert!(TaskDate::parse_stable("20230229").is_err());
    }

    #[test]
    fn parses_search_form() {
        assert_eq!(TaskDate::parse_search("08.02.2024"), Some(date("20240208")));
        assert_eq!(TaskDate::parse_search("8.2.2024"), None);
        assert_eq!(TaskDate::parse_search("31.02.2024"), None);
        assert_eq!(TaskDate::parse_search("08.02.2024.1"), None);
        assert_eq!(TaskDate::parse_search("meeting"), None);
    }

    #[test]
    fn add_days_rolls_over_boundaries() {
        assert_eq!(date("20240131").add_days(1).unwrap(), date("20240201"));
        assert_eq!(date("20240228").add_days(1).unwrap(), date("20240229"));
        assert_eq!(date("20230228").add_days(1).unwrap(), date("20230301"));
        assert_eq!(date("20231231").add_days(1).unwrap(), date("20240101"));
        assert_eq!(date("20240101").add_days(366).unwrap(), date("20250101"));
    }

    #[test]
    fn add_days_past_supported_range_fails() {
        assert_eq!(
            date("99991231").add_days(1),
            Err(RepeatError::DateOutOfRange)
        );
    }

    #[test]
    fn with_year_skips_missing_leap_day() {
        assert_eq!(date("20240229").with_year(2025).unwrap(), None);
        assert_eq!(
            date("20240229").with_year(2028).unwrap(),
            Some(date("20280229"))
        );
        assert_eq!(
            date("20240315").with_year(2025).unwrap(),
            Some(date("20250315"))
        );
        assert_eq!(
            date("20240315").with_year(10_000),
            Err(RepeatError::DateOutOfRange)
        );
    }

    #[test]
    fn weekday_starts_on_monday() {
        assert_eq!(date("20240101").weekday(), 1); // Monday
        assert_eq!(date("20240105").weekday(), 5); // Friday
        assert_eq!(date("20240107").weekday(), 7); // Sunday
    }

    #[test]
    fn ordering_follows_the_calendar() {
        assert!(date("20231231") < date("20240101"));
        assert!(date("20240101") == date("20240101"));
        assert!(date("20240102") > date("20240101"));
    }

    #[test]
    fn serde_uses_stable_form() {
        let json = serde_json::to_string(&date("20240208")).unwrap();
        assert_eq!(json, "\"20240208\"");

        let parsed: TaskDate = serde_json::from_str("\"20240208\"").unwrap();
        assert_eq!(parsed, date("20240208"));
        assert!(serde_json::from_str::<TaskDate>("\"2024-02-08\"").is_err());
    }
}
