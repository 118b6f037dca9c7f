//! Rate application.
//!
//! Converted amounts are rounded half-to-even to the target currency's
//! decimal places, so summing many converted lines does not drift upward.

use rust_decimal::{Decimal, RoundingStrategy};
use tally_shared::types::Currency;

/// Applies `rate` to `amount` and rounds for `target`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, target: &Currency) -> Decimal {
    (amount * rate).round_dp_with_strategy(target.decimal_places, RoundingStrategy::MidpointNearestEven)
}
