//! Configuration type definitions.
//!
//! This module contains the data structures that represent the payroll
//! configuration loaded from YAML files.

use std::collections::{BTreeMap, HashMap};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Zone};

/// Piece-rate pricing constants.
///
/// # Example
///
/// ```
/// use wijk_payroll::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig::default();
/// assert_eq!(pricing.segment_prices[&3], Decimal::new(750, 0));
/// assert_eq!(pricing.working_days_divisor, Decimal::new(26, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat periodic price per segment count.
    pub segment_prices: BTreeMap<u32, Decimal>,
    /// Base of the linear price for unlisted segment counts.
    pub fallback_base: Decimal,
    /// Per-segment step of the linear price for unlisted segment counts.
    pub fallback_per_segment: Decimal,
    /// Paid working days per pay period.
    pub working_days_divisor: Decimal,
    /// Trip allowance per kilometer.
    pub trip_rate_per_km: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            segment_prices: BTreeMap::from([
                (2, Decimal::new(650, 0)),
                (3, Decimal::new(750, 0)),
                (4, Decimal::new(850, 0)),
            ]),
            fallback_base: Decimal::new(500, 0),
            fallback_per_segment: Decimal::new(100, 0),
            working_days_divisor: Decimal::new(26, 0),
            trip_rate_per_km: Decimal::new(16, 2),
        }
    }
}

/// Whether a non-Sunday day without zones still earns the trip allowance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffDayTripPolicy {
    /// Off days earn nothing.
    #[default]
    NoCharge,
    /// Off days earn the employee's trip cost. Sundays still earn nothing.
    ChargeTrip,
}

/// How zones outside the catalog get a segment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AdHocSegmentPolicy {
    /// Use a fixed segment count when none was entered.
    Default {
        /// The segment count to assume.
        segments: u32,
    },
    /// The submitter must enter a segment count.
    RequireExplicit,
}

impl Default for AdHocSegmentPolicy {
    fn default() -> Self {
        AdHocSegmentPolicy::Default { segments: 3 }
    }
}

impl AdHocSegmentPolicy {
    /// The segment count to use for an ad-hoc zone, if any.
    pub fn resolve(self, explicit: Option<u32>) -> Option<u32> {
        match (explicit, self) {
            (Some(segments), _) => Some(segments),
            (None, AdHocSegmentPolicy::Default { segments }) => Some(segments),
            (None, AdHocSegmentPolicy::RequireExplicit) => None,
        }
    }
}

/// Settings from `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Company the payroll is run for.
    pub company: String,
    /// Pricing constants.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Trip allowance policy for off days.
    #[serde(default)]
    pub off_day_trip_policy: OffDayTripPolicy,
    /// Segment policy for ad-hoc zones.
    #[serde(default)]
    pub ad_hoc_segments: AdHocSegmentPolicy,
}

/// A day-of-month exception to a weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverride {
    /// Day of the month (1-31) the override applies to.
    pub day_of_month: u32,
    /// Zones worked that day; empty means a day off.
    #[serde(default)]
    pub zones: Vec<String>,
}

fn default_working_days() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ]
}

/// A fixed weekly pattern for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// Zones worked on every working day.
    #[serde(default)]
    pub zones: Vec<String>,
    /// Weekdays the default zones apply to.
    #[serde(default = "default_working_days")]
    pub working_days: Vec<Weekday>,
    /// Exceptions by day of month; they win over the weekly pattern.
    #[serde(default)]
    pub overrides: Vec<DayOverride>,
}

/// Employee directory file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// All employees.
    pub employees: Vec<Employee>,
}

/// Zone catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ZonesConfig {
    /// All catalog zones.
    pub zones: Vec<Zone>,
}

/// Static schedules file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulesConfig {
    /// Weekly rule per employee id.
    #[serde(default)]
    pub schedules: BTreeMap<String, ScheduleRule>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    settings: PayrollSettings,
    employees: BTreeMap<String, Employee>,
    zones: HashMap<String, Zone>,
    schedules: BTreeMap<String, ScheduleRule>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        settings: PayrollSettings,
        employees: Vec<Employee>,
        zones: Vec<Zone>,
        schedules: BTreeMap<String, ScheduleRule>,
    ) -> Self {
        Self {
            settings,
            employees: employees.into_iter().map(|e| (e.id.clone(), e)).collect(),
            zones: zones.into_iter().map(|z| (z.name.clone(), z)).collect(),
            schedules,
        }
    }

    /// Checks the cross-file consistency of the configuration.
    pub fn validate(&self) -> PayrollResult<()> {
        let pricing = &self.settings.pricing;
        if pricing.working_days_divisor <= Decimal::ZERO {
            return Err(PayrollError::InvalidConfig {
                message: "working_days_divisor must be positive".to_string(),
            });
        }
        if pricing.trip_rate_per_km.is_sign_negative() {
            return Err(PayrollError::InvalidConfig {
                message: "trip_rate_per_km must not be negative".to_string(),
            });
        }
        for employee in self.employees.values() {
            if employee.trip_distance_km.is_some_and(|d| d.is_sign_negative()) {
                return Err(PayrollError::InvalidConfig {
                    message: format!("employee '{}' has a negative trip distance", employee.id),
                });
            }
            if let Some(manager) = &employee.manager {
                if !self.employees.contains_key(manager) {
                    return Err(PayrollError::InvalidConfig {
                        message: format!(
                            "employee '{}' reports to unknown manager '{}'",
                            employee.id, manager
                        ),
                    });
                }
            }
        }
        if let Some(zone) = self
            .zones
            .values()
            .find(|z| z.flat_price.is_some_and(|p| p.is_sign_negative() && !p.is_zero()))
        {
            return Err(PayrollError::InvalidConfig {
                message: format!("zone '{}' has a negative flat price", zone.name),
            });
        }
        for (employee_id, rule) in &self.schedules {
            if !self.employees.contains_key(employee_id) {
                return Err(PayrollError::InvalidConfig {
                    message: format!("schedule for unknown employee '{}'", employee_id),
                });
            }
            if let Some(bad) = rule
                .overrides
                .iter()
                .find(|o| o.day_of_month == 0 || o.day_of_month > 31)
            {
                return Err(PayrollError::InvalidConfig {
                    message: format!(
                        "schedule for '{}' overrides invalid day of month {}",
                        employee_id, bad.day_of_month
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the pricing constants.
    pub fn pricing(&self) -> &PricingConfig {
        &self.settings.pricing
    }

    /// Returns all employees ordered by id.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    /// Looks up a catalog zone by name.
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Returns all catalog zones.
    pub fn zones(&self) -> &HashMap<String, Zone> {
        &self.zones
    }

    /// Returns the static schedules.
    pub fn schedules(&self) -> &BTreeMap<String, ScheduleRule> {
        &self.schedules
    }
}
