//! Presentation rounding.
//!
//! Sums are always carried at full precision. Cent rounding happens only
//! here, when an amount is shown to a person.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole cents, half away from zero.
///
/// # Example
///
/// ```
/// use wijk_payroll::calculation::round_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_cents(Decimal::new(1057385, 4)), Decimal::new(10574, 2));
/// ```
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as euros with two decimals, e.g. `€105.74`.
pub fn format_euros(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-€{:.2}", rounded.abs())
    } else {
        format!("€{:.2}", rounded.abs())
    }
}
