//! Request types for the payroll API.
//!
//! JSON bodies for login and assignment submission, and the query strings
//! of the listing endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{AssignmentStatus, PayPeriod};

/// Longest date range the earnings endpoints compute, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

fn bounded_period(start: NaiveDate, end: NaiveDate) -> PayrollResult<PayPeriod> {
    let period = PayPeriod::new(start, end);
    period.ensure_max_days(MAX_RANGE_DAYS)?;
    Ok(period)
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Employee id.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Request body for `POST /assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAssignmentRequest {
    /// The day worked.
    pub date: NaiveDate,
    /// Zone name.
    pub zone: String,
    /// Segment count for zones outside the catalog.
    #[serde(default)]
    pub segments: Option<u32>,
    /// Employee the assignment is for. Defaults to the caller.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// `?start=&end=` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl RangeQuery {
    /// The queried period, at most [`MAX_RANGE_DAYS`] long.
    pub fn period(&self) -> PayrollResult<PayPeriod> {
        bounded_period(self.start, self.end)
    }
}

/// Query for `GET /overview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewQuery {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
    /// Comma-separated employee ids. All visible employees when absent.
    #[serde(default)]
    pub employees: Option<String>,
}

impl OverviewQuery {
    /// The queried period, at most [`MAX_RANGE_DAYS`] long.
    pub fn period(&self) -> PayrollResult<PayPeriod> {
        bounded_period(self.start, self.end)
    }

    /// Requested employee ids, or `None` for everyone visible.
    pub fn employee_ids(&self) -> Option<Vec<String>> {
        self.employees.as_ref().map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// Query for `GET /assignments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentQuery {
    /// Only this employee.
    #[serde(default)]
    pub employee: Option<String>,
    /// First day, inclusive. Requires `end`.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Last day, inclusive. Requires `start`.
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Only this status (`pending`, `approved`, `rejected`).
    #[serde(default)]
    pub status: Option<String>,
}

impl AssignmentQuery {
    /// The period filter, if both ends are given.
    pub fn period(&self) -> PayrollResult<Option<PayPeriod>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok(Some(PayPeriod::new(start, end))),
            (None, None) => Ok(None),
            _ => Err(PayrollError::validation(
                "start",
                "start and end must be given together",
            )),
        }
    }

    /// The status filter.
    pub fn status(&self) -> PayrollResult<Option<AssignmentStatus>> {
        self.status.as_deref().map(str::parse).transpose()
    }
}
