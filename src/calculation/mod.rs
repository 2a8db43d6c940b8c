//! Calculation logic for the wijk payroll engine.
//!
//! This module contains the pricing engine (segment lookup, linear
//! fallback, trip allowance), the schedule resolvers that decide which
//! zones were worked, the per-day earnings calculator, aggregation over
//! periods, and presentation rounding.

mod day_earn;
mod period;
mod pricing;
mod rounding;
mod schedule;

pub use day_earn::{
    MISSING_DISTANCE, NEGATIVE_DISTANCE, UNPRICED_ZONE, calculate_day_earn, price_worked_zone,
};
pub use period::{calculate_day, calculate_overview, calculate_period_summary};
pub use pricing::{daily_rate, price_for, price_for_segments, trip_cost_for};
pub use rounding::{format_euros, round_cents};
pub use schedule::{ScheduleResolver, StaticSchedule, StoredSchedule, resolve_zones};
