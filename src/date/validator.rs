//! Calendar date validation
//!
//! A date is built the lenient way (month and day offsets roll over into
//! the next month or year) and then checked against the inputs, so any
//! rollover shows up as a mismatch.

use std::fmt;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use thiserror::Error;

/// Errors raised while validating submitted date fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The fields do not form a real calendar date
    #[error("Ngày, tháng hoặc năm không hợp lệ.")]
    InvalidDateInput { day: String, month: String, year: String },
}

/// A calendar date that has passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectedDate(NaiveDate);

impl SelectedDate {
    /// The current local date
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Wrap a date that is already known to be valid
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for SelectedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl From<SelectedDate> for NaiveDate {
    fn from(date: SelectedDate) -> Self {
        date.0
    }
}

/// Build a date from a zero-based month offset and a one-based day,
/// rolling overflow into neighbouring months and years.
fn normalize(year: i32, month_offset: i64, day: i64) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;

    let months = u32::try_from(month_offset.unsigned_abs()).ok()?;
    let shifted = if month_offset >= 0 {
        start.checked_add_months(Months::new(months))?
    } else {
        start.checked_sub_months(Months::new(months))?
    };

    let day_offset = day.checked_sub(1)?;
    let days = Days::new(day_offset.unsigned_abs());
    if day_offset >= 0 {
        shifted.checked_add_days(days)
    } else {
        shifted.checked_sub_days(days)
    }
}

/// Check whether (day, month, year) is a real proleptic Gregorian date
pub fn is_valid_date(day: i64, month: i64, year: i64) -> bool {
    to_date(day, month, year).is_some()
}

fn to_date(day: i64, month: i64, year: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let date = normalize(year, month.checked_sub(1)?, day)?;

    let round_trips = i64::from(date.year()) == i64::from(year)
        && i64::from(date.month()) == month
        && i64::from(date.day()) == day;

    round_trips.then_some(date)
}

/// Validate numeric fields into a [`SelectedDate`]
pub fn validate(day: i64, month: i64, year: i64) -> Result<SelectedDate, DateError> {
    to_date(day, month, year)
        .map(SelectedDate)
        .ok_or_else(|| DateError::InvalidDateInput {
            day: day.to_string(),
            month: month.to_string(),
            year: year.to_string(),
        })
}

/// Parse the three text fields and validate them
///
/// Text that is not a number (or does not fit) is reported the same way as
/// an impossible date.
pub fn parse_and_validate(day: &str, month: &str, year: &str) -> Result<SelectedDate, DateError> {
    let invalid = || DateError::InvalidDateInput {
        day: day.to_string(),
        month: month.to_string(),
        year: year.to_string(),
    };

    let parse = |text: &str| text.trim().parse::<i64>().map_err(|_| invalid());
    let (d, m, y) = (parse(day)?, parse(month)?, parse(year)?);

    validate(d, m, y).map_err(|_| invalid())
}

/// Short `D-M-YYYY` description of a tapped calendar day
pub fn day_info(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_real_dates() {
        assert!(is_valid_date(1, 1, 2024));
        assert!(is_valid_date(31, 12, 1999));
        assert!(is_valid_date(30, 4, 2024));
        assert!(is_valid_date(28, 2, 2023));
    }

    #[test]
    fn test_rejects_rollover() {
        // April has 30 days
        assert!(!is_valid_date(31, 4, 2024));
        assert!(!is_valid_date(30, 2, 2024));
        assert!(!is_valid_date(32, 1, 2024));
        assert!(!is_valid_date(1, 13, 2024));
    }

    #[test]
    fn test_rejects_zero_fields() {
        assert!(!is_valid_date(0, 5, 2024));
        assert!(!is_valid_date(5, 0, 2024));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_valid_date(29, 2, 2024));
        assert!(is_valid_date(29, 2, 2000));
        assert!(!is_valid_date(29, 2, 2023));
        assert!(!is_valid_date(29, 2, 1900));
    }

    #[test]
    fn test_every_day_of_a_year_is_accepted() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while date.year() == 2024 {
            let (d, m, y) = (date.day() as i64, date.month() as i64, date.year() as i64);
            let selected = validate(d, m, y).unwrap();
            assert_eq!(selected.to_string(), format!("{:04}-{:02}-{:02}", y, m, d));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_normalized_output_is_zero_padded() {
        let date = validate(5, 3, 2024).unwrap();
        assert_eq!(date.to_string(), "2024-03-05");

        let early = validate(1, 1, 7).unwrap();
        assert_eq!(early.to_string(), "0007-01-01");
    }

    #[test]
    fn test_parse_and_validate() {
        let date = parse_and_validate("09", "11", "2023").unwrap();
        assert_eq!(date.to_string(), "2023-11-09");

        assert!(matches!(
            parse_and_validate("31", "4", "2024"),
            Err(DateError::InvalidDateInput { .. })
        ));
        assert!(parse_and_validate("x", "4", "2024").is_err());
        assert!(parse_and_validate("1", "1", "99999999999999999999").is_err());
    }

    #[test]
    fn test_extreme_values_are_rejected() {
        assert!(!is_valid_date(i64::MIN, 1, 2024));
        assert!(!is_valid_date(1, i64::MIN, 2024));
        assert!(!is_valid_date(i64::MAX, i64::MAX, 2024));
        assert!(matches!(
            parse_and_validate("1", "-9223372036854775808", "2024"),
            Err(DateError::InvalidDateInput { .. })
        ));
        assert!(parse_and_validate("-9223372036854775808", "1", "2024").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = validate(31, 4, 2024).unwrap_err();
        assert_eq!(err.to_string(), "Ngày, tháng hoặc năm không hợp lệ.");
    }

    #[test]
    fn test_day_info_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(day_info(date), "5-3-2024");
    }
}
