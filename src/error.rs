//! Error types for the wijk payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing zones, resolving
//! schedules and reviewing assignments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::AssignmentStatus;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use wijk_payroll::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound {
///     id: "nobody".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: nobody");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its content is inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The employee is not known to the directory.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee identifier that was looked up.
        id: String,
    },

    /// A trip distance was negative.
    #[error("Invalid trip distance {distance_km} km: distance must not be negative")]
    InvalidDistance {
        /// The rejected distance.
        distance_km: Decimal,
    },

    /// A date was requested outside the payroll period being queried.
    #[error("Date {date} is outside the pay period {start}..={end}")]
    DateOutsidePeriod {
        /// The requested date.
        date: NaiveDate,
        /// First day of the queried period.
        start: NaiveDate,
        /// Last day of the queried period.
        end: NaiveDate,
    },

    /// No assignment exists with the given identifier.
    #[error("Assignment not found: {id}")]
    AssignmentNotFound {
        /// The missing assignment id.
        id: Uuid,
    },

    /// An assignment status change that the review workflow does not allow.
    #[error("Assignment {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The assignment id.
        id: Uuid,
        /// The current status.
        from: AssignmentStatus,
        /// The requested status.
        to: AssignmentStatus,
    },

    /// Input failed validation.
    #[error("Invalid field '{field}': {message}")]
    ValidationError {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller is not authenticated.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why authentication failed.
        message: String,
    },

    /// The caller is authenticated but lacks the required role.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Why access was refused.
        message: String,
    },

    /// A stored credential could not be processed.
    #[error("Credential error: {message}")]
    CredentialError {
        /// A description of the failure.
        message: String,
    },

    /// A blocking task was cancelled or panicked before it returned.
    #[error("Background task failed: {message}")]
    TaskFailed {
        /// The join failure.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
