//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Zone};

use super::types::{
    EmployeesConfig, PayrollConfig, PayrollSettings, SchedulesConfig, ZonesConfig,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/delvero/
/// ├── payroll.yaml     # Pricing table and policies
/// ├── employees.yaml   # Employee directory
/// ├── zones.yaml       # Zone catalog
/// └── schedules.yaml   # Static weekly schedules (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use wijk_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/delvero").unwrap();
/// let employee = loader.get_employee("hossein").unwrap();
/// println!("Trip distance: {:?}", employee.trip_distance_km);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The files are inconsistent with each other
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;
        let zones = Self::load_yaml::<ZonesConfig>(&path.join("zones.yaml"))?;

        let schedules_path = path.join("schedules.yaml");
        let schedules = if schedules_path.exists() {
            Self::load_yaml::<SchedulesConfig>(&schedules_path)?
        } else {
            debug!(path = %schedules_path.display(), "No static schedules configured");
            SchedulesConfig::default()
        };

        let config = PayrollConfig::new(
            settings,
            employees.employees,
            zones.zones,
            schedules.schedules,
        );
        config.validate()?;

        info!(
            path = %path.display(),
            company = %config.settings().company,
            employees = config.employees().count(),
            zones = config.zones().len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> PayrollResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Gets an employee by id.
    ///
    /// Returns `EmployeeNotFound` for ids missing from the directory.
    pub fn get_employee(&self, id: &str) -> PayrollResult<&Employee> {
        self.config
            .employee(id)
            .ok_or_else(|| PayrollError::EmployeeNotFound { id: id.to_string() })
    }

    /// Gets a catalog zone by name, if the catalog lists it.
    pub fn get_zone(&self, name: &str) -> Option<&Zone> {
        self.config.zone(name)
    }
}
