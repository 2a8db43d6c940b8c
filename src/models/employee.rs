//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! delivery staff and their place in the review hierarchy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role an employee holds in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees and reviews everything.
    Admin,
    /// Sees and reviews their direct reports.
    Manager,
    /// Sees only their own records.
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

/// Represents a member of the delivery staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier (login username) for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The employee's role.
    pub role: Role,
    /// Fixed round-trip distance driven on a working day, in kilometers.
    ///
    /// `None` marks an upstream record without a usable distance; the
    /// calculator charges no trip cost for it and reports it as skipped.
    #[serde(default)]
    pub trip_distance_km: Option<Decimal>,
    /// Identifier of the employee's manager, if any.
    #[serde(default)]
    pub manager: Option<String>,
}

impl Employee {
    /// Returns true if this employee may see `other`'s records.
    ///
    /// # Examples
    ///
    /// ```
    /// use wijk_payroll::models::{Employee, Role};
    ///
    /// let boss = Employee {
    ///     id: "mina".to_string(),
    ///     name: "Mina".to_string(),
    ///     role: Role::Manager,
    ///     trip_distance_km: None,
    ///     manager: None,
    /// };
    /// let driver = Employee {
    ///     id: "masoud".to_string(),
    ///     name: "Masoud".to_string(),
    ///     role: Role::Employee,
    ///     trip_distance_km: None,
    ///     manager: Some("mina".to_string()),
    /// };
    /// assert!(boss.can_view(&driver));
    /// assert!(!driver.can_view(&boss));
    /// ```
    pub fn can_view(&self, other: &Employee) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager => self.id == other.id || self.manages(other),
            Role::Employee => self.id == other.id,
        }
    }

    /// Returns true if this employee may approve or reject `other`'s assignments.
    pub fn can_review(&self, other: &Employee) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager => self.manages(other),
            Role::Employee => false,
        }
    }

    fn manages(&self, other: &Employee) -> bool {
        other.manager.as_deref() == Some(self.id.as_str())
    }
}
