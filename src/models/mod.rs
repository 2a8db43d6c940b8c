//! Core data models for the wijk payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod day_record;
mod employee;
mod pay_period;
mod zone;

pub use assignment::{Assignment, AssignmentStatus, NewAssignment};
pub use day_record::{
    CalculationWarning, DayRecord, DayStatus, EmployeeOverview, PeriodSummary, PeriodTotals,
    ZoneEarning,
};
pub use employee::{Employee, Role};
pub use pay_period::PayPeriod;
pub use zone::{WorkedZone, Zone};
