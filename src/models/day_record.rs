//! Earnings result models.
//!
//! This module contains the derived records produced by the earnings
//! aggregator: the per-day [`DayRecord`], the per-period [`PeriodSummary`]
//! and the dashboard-style [`EmployeeOverview`]. None of them are stored;
//! they are recomputed from assignments on every query.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// Whether an employee worked on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// At least one zone was worked.
    On,
    /// Sunday, or no zones worked.
    Off,
}

/// Earnings contributed by one zone on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEarning {
    /// Zone name.
    pub name: String,
    /// Segment count the price was derived from.
    pub segments: u32,
    /// Periodic zone price.
    pub price: Decimal,
    /// Price spread over the working-days divisor.
    pub daily_earn: Decimal,
}

/// A malformed upstream record that was left out of the sums.
///
/// Warnings never abort a calculation; they tell the caller which inputs
/// contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

impl CalculationWarning {
    /// Creates a warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Earnings for one employee on one calendar day.
///
/// Monetary fields keep full decimal precision; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The employee the record is for.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// On or off.
    pub status: DayStatus,
    /// Zones that contributed to the wijk earnings.
    pub zones: Vec<ZoneEarning>,
    /// Distance the trip cost was computed from.
    pub trip_distance_km: Decimal,
    /// Transportation allowance for the day.
    pub trip_cost: Decimal,
    /// Sum of the zones' daily earnings.
    pub wijk_earn: Decimal,
    /// `wijk_earn + trip_cost`.
    pub total: Decimal,
    /// Number of upstream records ignored as malformed.
    pub skipped_records: u32,
    /// Details for every skipped record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CalculationWarning>,
}

impl DayRecord {
    /// An off day with every monetary field at zero.
    pub fn off(employee_id: &str, date: NaiveDate, weekday: Weekday) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            weekday,
            status: DayStatus::Off,
            zones: Vec::new(),
            trip_distance_km: Decimal::ZERO,
            trip_cost: Decimal::ZERO,
            wijk_earn: Decimal::ZERO,
            total: Decimal::ZERO,
            skipped_records: 0,
            warnings: Vec::new(),
        }
    }

    /// True if the employee worked this day.
    pub fn is_on(&self) -> bool {
        self.status == DayStatus::On
    }

    /// True if the day is a Sunday.
    pub fn is_sunday(&self) -> bool {
        self.weekday == Weekday::Sun
    }
}

/// Aggregated totals over a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Days with status on.
    pub on_days: u32,
    /// Days with status off, Sundays included.
    pub off_days: u32,
    /// Sundays in the period.
    pub sunday_days: u32,
    /// Sum of the daily wijk earnings.
    pub wijk_earn: Decimal,
    /// Sum of the daily trip costs.
    pub trip_cost: Decimal,
    /// Sum of the daily totals.
    pub total: Decimal,
    /// Malformed records skipped across the period.
    pub skipped_records: u32,
}

impl PeriodTotals {
    /// Adds one day to the running totals without rounding.
    pub fn add_day(&mut self, day: &DayRecord) {
        if day.is_on() {
            self.on_days += 1;
        } else {
            self.off_days += 1;
        }
        if day.is_sunday() {
            self.sunday_days += 1;
        }
        self.wijk_earn += day.wijk_earn;
        self.trip_cost += day.trip_cost;
        self.total += day.total;
        self.skipped_records += day.skipped_records;
    }
}

/// Day records and totals for one employee over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// The period covered.
    pub period: PayPeriod,
    /// One record per day, in date order.
    pub days: Vec<DayRecord>,
    /// Totals over `days`.
    pub totals: PeriodTotals,
}

/// One row of the manager overview table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeOverview {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Days in the selected range.
    pub total_days: u32,
    /// Days worked.
    pub on_days: u32,
    /// Days off.
    pub off_days: u32,
    /// Total earnings over the range.
    pub total: Decimal,
    /// Malformed records skipped over the range.
    pub skipped_records: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn create_on_day(total: Decimal) -> DayRecord {
        DayRecord {
            employee_id: "masoud".to_string(),
            date: date(3),
            weekday: Weekday::Mon,
            status: DayStatus::On,
            zones: vec![],
            trip_distance_km: Decimal::new(60, 0),
            trip_cost: Decimal::new(960, 2),
            wijk_earn: total - Decimal::new(960, 2),
            total,
            skipped_records: 1,
            warnings: vec![],
        }
    }

    #[test]
    fn test_off_day_is_all_zero() {
        let day = DayRecord::off("masoud", date(2), Weekday::Sun);
        assert_eq!(day.status, DayStatus::Off);
        assert!(day.is_sunday());
        assert_eq!(day.trip_cost, Decimal::ZERO);
        assert_eq!(day.wijk_earn, Decimal::ZERO);
        assert_eq!(day.total, Decimal::ZERO);
        assert!(day.zones.is_empty());
    }

    #[test]
    fn test_totals_accumulate_without_rounding() {
        let third = Decimal::ONE / Decimal::new(3, 0);
        let mut totals = PeriodTotals::default();
        totals.add_day(&create_on_day(third + Decimal::new(960, 2)));
        totals.add_day(&create_on_day(third + Decimal::new(960, 2)));
        totals.add_day(&DayRecord::off("masoud", date(2), Weekday::Sun));

        assert_eq!(totals.on_days, 2);
        assert_eq!(totals.off_days, 1);
        assert_eq!(totals.sunday_days, 1);
        assert_eq!(totals.skipped_records, 2);
        assert_eq!(totals.wijk_earn, third + third);
        assert_eq!(totals.trip_cost, Decimal::new(1920, 2));
    }

    #[test]
    fn test_warnings_omitted_when_empty() {
        let day = DayRecord::off("masoud", date(2), Weekday::Sun);
        let json = serde_json::to_string(&day).unwrap();
        assert!(!json.contains("warnings"));
        assert!(json.contains("\"status\":\"off\""));
        assert!(json.contains("\"weekday\":\"Sun\""));
    }
}
