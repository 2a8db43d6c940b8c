//! Schedule resolution.
//!
//! A schedule resolver answers which zones an employee worked on a date.
//! Two strategies exist: a fixed weekly pattern from configuration
//! ([`StaticSchedule`]) and submitted assignment rows ([`StoredSchedule`]).
//! An empty answer is a valid day off, never an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::trace;

use crate::config::{PayrollConfig, ScheduleRule};
use crate::error::PayrollResult;
use crate::models::{PayPeriod, WorkedZone};
use crate::store::AssignmentStore;

/// Resolves the zones an employee worked on a date.
///
/// Implementations must not mutate shared state when resolving, so one
/// resolver can serve concurrent calculations.
pub trait ScheduleResolver: Send + Sync {
    /// Returns the zones worked, in order. Empty means a day off.
    fn zones_for(&self, employee_id: &str, date: NaiveDate) -> PayrollResult<Vec<WorkedZone>>;
}

/// Resolves zones for `date` after checking it lies in `period`.
///
/// # Errors
///
/// Returns `DateOutsidePeriod` when `date` is not part of `period`.
pub fn resolve_zones<R: ScheduleResolver + ?Sized>(
    resolver: &R,
    employee_id: &str,
    date: NaiveDate,
    period: &PayPeriod,
) -> PayrollResult<Vec<WorkedZone>> {
    period.ensure_contains(date)?;
    resolver.zones_for(employee_id, date)
}

/// Fixed weekly patterns per employee.
///
/// # Example
///
/// ```
/// use wijk_payroll::calculation::{ScheduleResolver, StaticSchedule};
/// use wijk_payroll::config::ScheduleRule;
/// use chrono::{NaiveDate, Weekday};
///
/// let schedule = StaticSchedule::new([(
///     "masoud".to_string(),
///     ScheduleRule {
///         zones: vec!["Rotterdam1".to_string()],
///         working_days: vec![Weekday::Mon],
///         overrides: vec![],
///     },
/// )]);
///
/// let monday = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
/// assert_eq!(schedule.zones_for("masoud", monday).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSchedule {
    rules: BTreeMap<String, ScheduleRule>,
}

impl StaticSchedule {
    /// Creates a schedule from employee rules.
    pub fn new(rules: impl IntoIterator<Item = (String, ScheduleRule)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Builds the schedule from the configured rules.
    pub fn from_config(config: &PayrollConfig) -> Self {
        Self::new(
            config
                .schedules()
                .iter()
                .map(|(id, rule)| (id.clone(), rule.clone())),
        )
    }
}

impl ScheduleResolver for StaticSchedule {
    fn zones_for(&self, employee_id: &str, date: NaiveDate) -> PayrollResult<Vec<WorkedZone>> {
        let Some(rule) = self.rules.get(employee_id) else {
            return Ok(Vec::new());
        };
        if date.weekday() == Weekday::Sun {
            return Ok(Vec::new());
        }

        let names = match rule.overrides.iter().find(|o| o.day_of_month == date.day()) {
            Some(day_override) => &day_override.zones,
            None if rule.working_days.contains(&date.weekday()) => &rule.zones,
            None => return Ok(Vec::new()),
        };

        Ok(names.iter().map(WorkedZone::named).collect())
    }
}

/// Zones from previously submitted assignments.
///
/// Rows of every review status count; the status is metadata only.
#[derive(Clone)]
pub struct StoredSchedule {
    store: Arc<dyn AssignmentStore>,
}

impl StoredSchedule {
    /// Wraps an assignment store.
    pub fn new(store: Arc<dyn AssignmentStore>) -> Self {
        Self { store }
    }
}

impl ScheduleResolver for StoredSchedule {
    fn zones_for(&self, employee_id: &str, date: NaiveDate) -> PayrollResult<Vec<WorkedZone>> {
        let rows = self.store.list(employee_id, &PayPeriod::single_day(date))?;
        trace!(employee_id, %date, rows = rows.len(), "Resolved stored assignments");
        Ok(rows.iter().map(|a| a.worked_zone()).collect())
    }
}
