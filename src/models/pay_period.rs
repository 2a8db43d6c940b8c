//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, the inclusive date range a
//! payroll query covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// An inclusive range of calendar days.
///
/// A period whose end lies before its start is valid and simply has no
/// days; summaries over it are empty rather than errors.
///
/// # Example
///
/// ```
/// use wijk_payroll::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 11, 13).unwrap(),
/// );
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()));
/// assert_eq!(period.days().count(), 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a period from its first and last day.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// A period covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns an error unless `date` lies inside the period.
    pub fn ensure_contains(&self, date: NaiveDate) -> PayrollResult<()> {
        if self.contains_date(date) {
            Ok(())
        } else {
            Err(PayrollError::DateOutsidePeriod {
                date,
                start: self.start_date,
                end: self.end_date,
            })
        }
    }

    /// True when the period has no days.
    pub fn is_empty(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Number of days in the period; zero when inverted.
    pub fn day_count(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end_date - self.start_date).num_days() + 1
        }
    }

    /// Returns a validation error when the period spans more than `max_days`.
    pub fn ensure_max_days(&self, max_days: i64) -> PayrollResult<()> {
        if self.day_count() > max_days {
            return Err(PayrollError::validation(
                "end",
                format!(
                    "range {}..={} spans {} days; at most {} allowed",
                    self.start_date,
                    self.end_date,
                    self.day_count(),
                    max_days
                ),
            ));
        }
        Ok(())
    }

    /// Iterates over every day of the period in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_november_period() -> PayPeriod {
        PayPeriod::new(date(2025, 11, 1), date(2025, 11, 13))
    }

    #[test]
    fn test_contains_date_within_period() {
        let period = create_november_period();
        assert!(period.contains_date(date(2025, 11, 5)));
    }

    #[test]
    fn test_contains_date_on_boundaries() {
        let period = create_november_period();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_contains_date_outside_period() {
        let period = create_november_period();
        assert!(!period.contains_date(date(2025, 10, 31)));
        assert!(!period.contains_date(date(2025, 11, 14)));
    }

    #[test]
    fn test_ensure_contains_reports_range() {
        let period = create_november_period();
        assert!(period.ensure_contains(date(2025, 11, 13)).is_ok());
        match period.ensure_contains(date(2025, 11, 14)) {
            Err(PayrollError::DateOutsidePeriod { date: d, start, end }) => {
                assert_eq!(d, date(2025, 11, 14));
                assert_eq!(start, period.start_date);
                assert_eq!(end, period.end_date);
            }
            other => panic!("Expected DateOutsidePeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_days_are_inclusive_and_ordered() {
        let period = create_november_period();
        let days: Vec<NaiveDate> = period.days().collect();
        assert_eq!(days.len(), 13);
        assert_eq!(days.first(), Some(&date(2025, 11, 1)));
        assert_eq!(days.last(), Some(&date(2025, 11, 13)));
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let period = PayPeriod::new(date(2025, 11, 13), date(2025, 11, 1));
        assert!(period.is_empty());
        assert_eq!(period.days().count(), 0);
    }

    #[test]
    fn test_single_day_period() {
        let period = PayPeriod::single_day(date(2025, 11, 3));
        assert!(!period.is_empty());
        assert_eq!(period.days().count(), 1);
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{"start_date": "2025-11-01", "end_date": "2025-11-13"}"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, create_november_period());
    }

    #[test]
    fn test_day_count() {
        assert_eq!(create_november_period().day_count(), 13);
        assert_eq!(PayPeriod::single_day(date(2025, 11, 3)).day_count(), 1);
        assert_eq!(
            PayPeriod::new(date(2025, 11, 13), date(2025, 11, 1)).day_count(),
            0
        );
    }

    #[test]
    fn test_ensure_max_days() {
        let year = PayPeriod::new(date(2024, 1, 1), date(2024, 12, 31));
        assert!(year.ensure_max_days(366).is_ok());

        let huge = PayPeriod::new(date(1, 1, 1), date(9999, 12, 31));
        assert!(matches!(
            huge.ensure_max_days(366),
            Err(PayrollError::ValidationError { .. })
        ));
    }
}
