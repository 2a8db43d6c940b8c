//! Response types for the payroll API.
//!
//! This module defines the error response structures, the error mapping
//! from [`PayrollError`], and the display wrappers that add cent-rounded
//! amounts next to the full-precision figures.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::format_euros;
use crate::error::PayrollError;
use crate::models::{DayRecord, Employee, PeriodSummary};

use super::menu::MenuItem;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            PayrollError::CredentialError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CREDENTIAL_ERROR", "Credential check failed"),
            ),
            PayrollError::TaskFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Request could not be completed"),
            ),
            PayrollError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            PayrollError::AssignmentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("ASSIGNMENT_NOT_FOUND", message),
            ),
            PayrollError::InvalidDistance { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DISTANCE", message),
            ),
            PayrollError::DateOutsidePeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("DATE_OUTSIDE_PERIOD", message),
            ),
            PayrollError::ValidationError { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
            PayrollError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    "Only pending assignments can be approved or rejected",
                ),
            ),
            PayrollError::Unauthorized { .. } => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
            }
            PayrollError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
        };
        ApiErrorResponse { status, error }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                warn!(error = %body_text, "JSON data error");
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                warn!(error = %err, "JSON syntax error");
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::bad_request(error)
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(ApiError::validation_error(rejection.body_text()))
    }
}

/// Cent-rounded amounts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAmounts {
    /// Rounded wijk earnings.
    pub wijk_earn: String,
    /// Rounded trip cost.
    pub trip_cost: String,
    /// Rounded total.
    pub total: String,
}

impl DisplayAmounts {
    fn new(wijk_earn: Decimal, trip_cost: Decimal, total: Decimal) -> Self {
        Self {
            wijk_earn: format_euros(wijk_earn),
            trip_cost: format_euros(trip_cost),
            total: format_euros(total),
        }
    }
}

/// A day record with its display amounts.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecordView {
    /// The full-precision record.
    #[serde(flatten)]
    pub record: DayRecord,
    /// Rounded amounts.
    pub display: DisplayAmounts,
}

impl From<DayRecord> for DayRecordView {
    fn from(record: DayRecord) -> Self {
        let display = DisplayAmounts::new(record.wijk_earn, record.trip_cost, record.total);
        Self { record, display }
    }
}

/// A period summary with display amounts for its totals.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummaryView {
    /// The full-precision summary.
    #[serde(flatten)]
    pub summary: PeriodSummary,
    /// Rounded totals.
    pub display: DisplayAmounts,
}

impl From<PeriodSummary> for PeriodSummaryView {
    fn from(summary: PeriodSummary) -> Self {
        let totals = &summary.totals;
        let display = DisplayAmounts::new(totals.wijk_earn, totals.trip_cost, totals.total);
        Self { summary, display }
    }
}

/// Body returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The logged-in employee.
    pub employee: Employee,
    /// Menu entries for the employee's role.
    pub menu: Vec<MenuItem>,
}
