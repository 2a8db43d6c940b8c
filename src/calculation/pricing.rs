//! Zone pricing and trip allowance.
//!
//! Every zone has a periodic price, either configured flat or looked up
//! from its segment count. A worked day earns `price / divisor` per zone
//! plus one trip allowance of `distance × rate`.

use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::Zone;

/// Returns the periodic price for a segment count.
///
/// Listed segment counts use the table; any other count uses
/// `fallback_base + fallback_per_segment × segments`. This never fails.
///
/// # Example
///
/// ```
/// use wijk_payroll::calculation::price_for_segments;
/// use wijk_payroll::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig::default();
/// assert_eq!(price_for_segments(3, &pricing), Decimal::new(750, 0));
/// assert_eq!(price_for_segments(5, &pricing), Decimal::new(1000, 0));
/// ```
pub fn price_for_segments(segments: u32, pricing: &PricingConfig) -> Decimal {
    match pricing.segment_prices.get(&segments) {
        Some(price) => *price,
        None => pricing.fallback_base + pricing.fallback_per_segment * Decimal::from(segments),
    }
}

/// Returns the periodic price for a catalog zone.
///
/// A configured flat price wins over the segment lookup.
pub fn price_for(zone: &Zone, pricing: &PricingConfig) -> Decimal {
    zone.flat_price
        .unwrap_or_else(|| price_for_segments(zone.segments, pricing))
}

/// Spreads a periodic price over the paid working days.
pub fn daily_rate(price: Decimal, pricing: &PricingConfig) -> Decimal {
    price / pricing.working_days_divisor
}

/// Returns the trip allowance for one working day.
///
/// # Errors
///
/// Negative distances are rejected with [`PayrollError::InvalidDistance`].
///
/// # Example
///
/// ```
/// use wijk_payroll::calculation::trip_cost_for;
/// use wijk_payroll::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig::default();
/// let cost = trip_cost_for(Decimal::new(120, 0), &pricing).unwrap();
/// assert_eq!(cost, Decimal::new(1920, 2));
/// assert!(trip_cost_for(Decimal::new(-1, 0), &pricing).is_err());
/// ```
pub fn trip_cost_for(distance_km: Decimal, pricing: &PricingConfig) -> PayrollResult<Decimal> {
    if distance_km.is_sign_negative() && !distance_km.is_zero() {
        return Err(PayrollError::InvalidDistance { distance_km });
    }
    Ok(distance_km * pricing.trip_rate_per_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn zone(segments: u32, flat_price: Option<Decimal>) -> Zone {
        Zone {
            name: "Chaam1".to_string(),
            segments,
            flat_price,
            depot: None,
        }
    }

    #[test]
    fn test_listed_segments_use_table() {
        let pricing = PricingConfig::default();
        assert_eq!(price_for_segments(2, &pricing), dec("650"));
        assert_eq!(price_for_segments(3, &pricing), dec("750"));
        assert_eq!(price_for_segments(4, &pricing), dec("850"));
    }

    #[test]
    fn test_unlisted_segments_use_linear_fallback() {
        let pricing = PricingConfig::default();
        assert_eq!(price_for_segments(0, &pricing), dec("500"));
        assert_eq!(price_for_segments(1, &pricing), dec("600"));
        assert_eq!(price_for_segments(6, &pricing), dec("1100"));
    }

    #[test]
    fn test_flat_price_wins_over_segments() {
        let pricing = PricingConfig::default();
        assert_eq!(price_for(&zone(4, Some(dec("999"))), &pricing), dec("999"));
        assert_eq!(price_for(&zone(4, None), &pricing), dec("850"));
    }

    #[test]
    fn test_table_override_changes_price() {
        let mut pricing = PricingConfig::default();
        pricing.segment_prices.insert(5, dec("900"));
        assert_eq!(price_for_segments(5, &pricing), dec("900"));
    }

    #[test]
    fn test_daily_rate_divides_by_working_days() {
        let pricing = PricingConfig::default();
        assert_eq!(daily_rate(dec("2600"), &pricing), dec("100"));
        assert_eq!(
            daily_rate(dec("2250"), &pricing).round_dp(6),
            dec("86.538462")
        );
    }

    #[test]
    fn test_trip_cost_examples() {
        let pricing = PricingConfig::default();
        assert_eq!(trip_cost_for(dec("120"), &pricing).unwrap(), dec("19.20"));
        assert_eq!(trip_cost_for(dec("45"), &pricing).unwrap(), dec("7.20"));
        assert_eq!(trip_cost_for(dec("60"), &pricing).unwrap(), dec("9.60"));
        assert_eq!(trip_cost_for(Decimal::ZERO, &pricing).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_distance_rejected() {
        let pricing = PricingConfig::default();
        match trip_cost_for(dec("-0.5"), &pricing) {
            Err(PayrollError::InvalidDistance { distance_km }) => {
                assert_eq!(distance_km, dec("-0.5"));
            }
            other => panic!("Expected InvalidDistance, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_unlisted_segments_follow_linear_formula(s in 0u32..10_000) {
            prop_assume!(!(2..=4).contains(&s));
            let pricing = PricingConfig::default();
            prop_assert_eq!(
                price_for_segments(s, &pricing),
                Decimal::from(500 + 100 * u64::from(s))
            );
        }

        #[test]
        fn prop_trip_cost_is_distance_times_rate(cents in 0i64..100_000_000) {
            let pricing = PricingConfig::default();
            let km = Decimal::new(cents, 2);
            prop_assert_eq!(trip_cost_for(km, &pricing).unwrap(), km * dec("0.16"));
        }

        #[test]
        fn prop_negative_trip_distance_rejected(cents in 1i64..100_000_000) {
            let pricing = PricingConfig::default();
            prop_assert!(trip_cost_for(Decimal::new(-cents, 2), &pricing).is_err());
        }
    }
}
