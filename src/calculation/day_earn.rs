//! Per-day earnings.
//!
//! This module turns the zones an employee worked on one day into a
//! [`DayRecord`]: one daily rate per priced zone plus a single trip
//! allowance. Malformed inputs contribute nothing and are reported as
//! skipped records instead of failing the day.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{OffDayTripPolicy, PayrollConfig};
use crate::models::{
    CalculationWarning, DayRecord, DayStatus, Employee, WorkedZone, ZoneEarning,
};

use super::pricing::{daily_rate, price_for, price_for_segments, trip_cost_for};

/// Warning code for a zone without a catalog entry or segment count.
pub const UNPRICED_ZONE: &str = "UNPRICED_ZONE";
/// Warning code for an employee record without a trip distance.
pub const MISSING_DISTANCE: &str = "MISSING_DISTANCE";
/// Warning code for an employee record with a negative trip distance.
pub const NEGATIVE_DISTANCE: &str = "NEGATIVE_DISTANCE";

/// Prices one worked zone, returning its segment count and periodic price.
///
/// Catalog entries win. Zones outside the catalog use the submitted segment
/// count, or the configured ad-hoc policy when none was entered. A negative
/// price is never summed; it comes back as an `UNPRICED_ZONE` warning.
pub fn price_worked_zone(
    zone: &WorkedZone,
    config: &PayrollConfig,
) -> Result<ZoneEarning, CalculationWarning> {
    let pricing = config.pricing();
    let (segments, price) = match config.zone(&zone.name) {
        Some(catalog) => {
            let price = price_for(catalog, pricing);
            if price.is_sign_negative() && !price.is_zero() {
                return Err(CalculationWarning::new(
                    UNPRICED_ZONE,
                    format!("zone '{}' has a negative price {}", zone.name, price),
                ));
            }
            (catalog.segments, price)
        }
        None => {
            let segments = config
                .settings()
                .ad_hoc_segments
                .resolve(zone.segments)
                .ok_or_else(|| {
                    CalculationWarning::new(
                        UNPRICED_ZONE,
                        format!(
                            "zone '{}' is not in the catalog and has no segment count",
                            zone.name
                        ),
                    )
                })?;
            (segments, price_for_segments(segments, pricing))
        }
    };

    Ok(ZoneEarning {
        name: zone.name.clone(),
        segments,
        price,
        daily_earn: daily_rate(price, pricing),
    })
}

/// Calculates one employee's earnings for one day.
///
/// # Rules
///
/// - Sundays are off with every amount at zero, whatever `zones` holds.
/// - No zones means an off day; the trip allowance then follows the
///   configured [`OffDayTripPolicy`].
/// - Otherwise the day total is the sum of `price / divisor` over the
///   zones plus one trip allowance, however many zones were worked.
///
/// The function is pure: the same inputs always give the same record.
///
/// # Example
///
/// ```no_run
/// use wijk_payroll::calculation::calculate_day_earn;
/// use wijk_payroll::config::ConfigLoader;
/// use wijk_payroll::models::WorkedZone;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/delvero").unwrap();
/// let hossein = loader.get_employee("hossein").unwrap();
/// let monday = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
/// let zones = vec![WorkedZone::named("Chaam1"), WorkedZone::named("Chaam4")];
///
/// let day = calculate_day_earn(hossein, monday, &zones, loader.config());
/// println!("{}", day.total);
/// ```
pub fn calculate_day_earn(
    employee: &Employee,
    date: NaiveDate,
    zones: &[WorkedZone],
    config: &PayrollConfig,
) -> DayRecord {
    let weekday = date.weekday();
    if weekday == Weekday::Sun {
        if !zones.is_empty() {
            debug!(
                employee_id = %employee.id,
                %date,
                ignored_zones = zones.len(),
                "Ignoring zones on a Sunday"
            );
        }
        return DayRecord::off(&employee.id, date, weekday);
    }

    let mut record = DayRecord::off(&employee.id, date, weekday);
    if !zones.is_empty() {
        record.status = DayStatus::On;
    }

    for zone in zones {
        match price_worked_zone(zone, config) {
            Ok(earning) => {
                record.wijk_earn += earning.daily_earn;
                record.zones.push(earning);
            }
            Err(warning) => skip(&mut record, warning),
        }
    }

    let charge_trip = record.status == DayStatus::On
        || config.settings().off_day_trip_policy == OffDayTripPolicy::ChargeTrip;
    if charge_trip {
        apply_trip_cost(&mut record, employee, config);
    }

    record.total = record.wijk_earn + record.trip_cost;

    debug!(
        employee_id = %employee.id,
        %date,
        status = ?record.status,
        zones = record.zones.len(),
        total = %record.total,
        skipped = record.skipped_records,
        "Calculated day earnings"
    );
    record
}

fn apply_trip_cost(record: &mut DayRecord, employee: &Employee, config: &PayrollConfig) {
    let Some(distance) = employee.trip_distance_km else {
        skip(
            record,
            CalculationWarning::new(
                MISSING_DISTANCE,
                format!("employee '{}' has no trip distance", employee.id),
            ),
        );
        return;
    };

    match trip_cost_for(distance, config.pricing()) {
        Ok(cost) => {
            record.trip_distance_km = distance;
            record.trip_cost = cost;
        }
        Err(err) => skip(
            record,
            CalculationWarning::new(NEGATIVE_DISTANCE, err.to_string()),
        ),
    }
}

fn skip(record: &mut DayRecord, warning: CalculationWarning) {
    warn!(
        employee_id = %record.employee_id,
        date = %record.date,
        code = %warning.code,
        message = %warning.message,
        "Skipping malformed record"
    );
    record.skipped_records += 1;
    record.warnings.push(warning);
}
