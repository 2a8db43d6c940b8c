//! Aggregation over date ranges.

use chrono::NaiveDate;
use tracing::info;

use crate::config::PayrollConfig;
use crate::error::PayrollResult;
use crate::models::{DayRecord, Employee, EmployeeOverview, PayPeriod, PeriodSummary, PeriodTotals};

use super::day_earn::calculate_day_earn;
use super::schedule::{ScheduleResolver, resolve_zones};

/// Resolves and prices one day inside `period`.
pub fn calculate_day<R: ScheduleResolver + ?Sized>(
    employee: &Employee,
    date: NaiveDate,
    period: &PayPeriod,
    resolver: &R,
    config: &PayrollConfig,
) -> PayrollResult<DayRecord> {
    let zones = resolve_zones(resolver, &employee.id, date, period)?;
    Ok(calculate_day_earn(employee, date, &zones, config))
}

/// Builds the day records and totals for one employee over `period`.
///
/// Totals are exact sums of the daily amounts. An empty period yields an
/// empty summary with zero totals.
pub fn calculate_period_summary<R: ScheduleResolver + ?Sized>(
    employee: &Employee,
    period: &PayPeriod,
    resolver: &R,
    config: &PayrollConfig,
) -> PayrollResult<PeriodSummary> {
    let mut days = Vec::new();
    let mut totals = PeriodTotals::default();

    for date in period.days() {
        let day = calculate_day(employee, date, period, resolver, config)?;
        totals.add_day(&day);
        days.push(day);
    }

    info!(
        employee_id = %employee.id,
        start = %period.start_date,
        end = %period.end_date,
        on_days = totals.on_days,
        total = %totals.total,
        skipped = totals.skipped_records,
        "Calculated period summary"
    );

    Ok(PeriodSummary {
        employee_id: employee.id.clone(),
        period: *period,
        days,
        totals,
    })
}

/// Summarises worked and off days per employee, like the manager overview
/// table of the dashboard.
pub fn calculate_overview<'a, R, I>(
    employees: I,
    period: &PayPeriod,
    resolver: &R,
    config: &PayrollConfig,
) -> PayrollResult<Vec<EmployeeOverview>>
where
    R: ScheduleResolver + ?Sized,
    I: IntoIterator<Item = &'a Employee>,
{
    employees
        .into_iter()
        .map(|employee| {
            let summary = calculate_period_summary(employee, period, resolver, config)?;
            Ok(EmployeeOverview {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                total_days: summary.days.len() as u32,
                on_days: summary.totals.on_days,
                off_days: summary.totals.off_days,
                total: summary.totals.total,
                skipped_records: summary.totals.skipped_records,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{StaticSchedule, round_cents};
    use crate::config::{
        AdHocSegmentPolicy, DayOverride, OffDayTripPolicy, PayrollSettings, PricingConfig,
        ScheduleRule,
    };
    use crate::error::PayrollError;
    use crate::models::{DayStatus, Role, Zone};
    use chrono::Weekday;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn employee(id: &str, km: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_string(),
            role: Role::Employee,
            trip_distance_km: Some(dec(km)),
            manager: None,
        }
    }

    fn rule(zones: &[&str], overrides: Vec<DayOverride>) -> ScheduleRule {
        ScheduleRule {
            zones: zones.iter().map(|z| z.to_string()).collect(),
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ],
            overrides,
        }
    }

    fn create_test_config() -> PayrollConfig {
        PayrollConfig::new(
            PayrollSettings {
                company: "Delvero".to_string(),
                pricing: PricingConfig::default(),
                off_day_trip_policy: OffDayTripPolicy::NoCharge,
                ad_hoc_segments: AdHocSegmentPolicy::default(),
            },
            vec![],
            vec![
                Zone {
                    name: "Chaam1".to_string(),
                    segments: 3,
                    flat_price: None,
                    depot: None,
                },
                Zone {
                    name: "Chaam4".to_string(),
                    segments: 4,
                    flat_price: None,
                    depot: None,
                },
                Zone {
                    name: "Galder1".to_string(),
                    segments: 2,
                    flat_price: None,
                    depot: None,
                },
            ],
            BTreeMap::new(),
        )
    }

    fn create_schedule() -> StaticSchedule {
        StaticSchedule::new([
            (
                "hossein".to_string(),
                rule(
                    &["Chaam1", "Chaam4", "Galder1"],
                    vec![DayOverride {
                        day_of_month: 12,
                        zones: vec![],
                    }],
                ),
            ),
            ("masoud".to_string(), rule(&["Rotterdam1", "Rotterdam2"], vec![])),
        ])
    }

    #[test]
    fn test_period_summary_counts_days() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(1), date(13));
        let hossein = employee("hossein", "120");

        let summary = calculate_period_summary(&hossein, &period, &schedule, &config).unwrap();

        assert_eq!(summary.days.len(), 13);
        assert_eq!(summary.totals.sunday_days, 2);
        // 13 days - 2 Sundays - the 12th
        assert_eq!(summary.totals.on_days, 10);
        assert_eq!(summary.totals.off_days, 3);
        assert_eq!(summary.days[11].status, DayStatus::Off);
    }

    #[test]
    fn test_period_totals_are_unrounded_sums() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(1), date(13));
        let masoud = employee("masoud", "60");

        let summary = calculate_period_summary(&masoud, &period, &schedule, &config).unwrap();

        let summed: Decimal = summary.days.iter().map(|d| d.total).sum();
        assert_eq!(summary.totals.total, summed);
        assert_eq!(summary.totals.on_days, 11);
        // 11 x (1500/26 + 9.60) = 634.6153... + 105.60
        assert_eq!(round_cents(summary.totals.total), dec("740.22"));
        let rounded_daily: Decimal = summary.days.iter().map(|d| round_cents(d.total)).sum();
        assert_eq!(rounded_daily, dec("740.19"));
    }

    #[test]
    fn test_empty_period_returns_zero_summary() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(13), date(1));
        let hossein = employee("hossein", "120");

        let summary = calculate_period_summary(&hossein, &period, &schedule, &config).unwrap();
        assert!(summary.days.is_empty());
        assert_eq!(summary.totals, PeriodTotals::default());
    }

    #[test]
    fn test_employee_without_schedule_gets_zero_summary() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(1), date(7));
        let newcomer = employee("newcomer", "10");

        let summary = calculate_period_summary(&newcomer, &period, &schedule, &config).unwrap();
        assert_eq!(summary.totals.on_days, 0);
        assert_eq!(summary.totals.off_days, 7);
        assert_eq!(summary.totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_calculate_day_outside_period_fails() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(1), date(13));
        let hossein = employee("hossein", "120");

        let result = calculate_day(&hossein, date(20), &period, &schedule, &config);
        assert!(matches!(result, Err(PayrollError::DateOutsidePeriod { .. })));
    }

    #[test]
    fn test_overview_per_employee() {
        let config = create_test_config();
        let schedule = create_schedule();
        let period = PayPeriod::new(date(1), date(13));
        let staff = [employee("hossein", "120"), employee("masoud", "60")];

        let overview = calculate_overview(staff.iter(), &period, &schedule, &config).unwrap();

        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].employee_id, "hossein");
        assert_eq!(overview[0].total_days, 13);
        assert_eq!(overview[0].on_days, 10);
        assert_eq!(overview[1].on_days, 11);
        assert_eq!(overview[1].off_days, 2);
    }
}
