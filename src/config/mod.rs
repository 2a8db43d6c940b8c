//! Configuration loading and management for the wijk payroll engine.
//!
//! This module provides functionality to load the payroll configuration
//! from YAML files: the pricing table and policies, the employee
//! directory, the zone catalog and the static weekly schedules.
//!
//! # Example
//!
//! ```no_run
//! use wijk_payroll::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/delvero").unwrap();
//! println!("Loaded payroll for: {}", loader.config().settings().company);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdHocSegmentPolicy, DayOverride, EmployeesConfig, OffDayTripPolicy, PayrollConfig,
    PayrollSettings, PricingConfig, ScheduleRule, SchedulesConfig, ZonesConfig,
};
