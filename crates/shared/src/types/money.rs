//! Currency descriptor with decimal rounding precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Zero checks go through the currency's rounding unit, never `== 0`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A currency as seen by the reports: ISO code plus rounding precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 currency code (e.g., "USD", "IDR").
    pub code: String,
    /// Smallest representable unit (e.g., `0.01` for USD, `1` for JPY).
    pub rounding: Decimal,
    /// Number of decimal places shown for this currency.
    pub decimal_places: u32,
}

impl Currency {
    /// Creates a currency with the given code and number of decimal places.
    #[must_use]
    pub fn new(code: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            code: code.into().to_uppercase(),
            rounding: Decimal::new(1, decimal_places),
            decimal_places,
        }
    }

    /// Creates a currency with an explicit rounding unit (e.g., `0.05` for CHF cash).
    #[must_use]
    pub fn with_rounding(code: impl Into<String>, rounding: Decimal) -> Self {
        let rounding = rounding.normalize();
        Self {
            code: code.into().to_uppercase(),
            decimal_places: rounding.scale(),
            rounding,
        }
    }

    /// Rounds an amount to the currency's rounding unit (half away from zero).
    #[must_use]
    pub fn round(&self, amount: Decimal) -> Decimal {
        if self.rounding.is_zero() {
            return amount;
        }
        let units = (amount / self.rounding)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (units * self.rounding).round_dp(self.decimal_places)
    }

    /// Returns true if the amount rounds to zero in this currency.
    #[must_use]
    pub fn is_zero(&self, amount: Decimal) -> bool {
        self.round(amount).is_zero()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_new() {
        let usd = Currency::new("usd", 2);
        assert_eq!(usd.code, "USD");
        assert_eq!(usd.rounding, dec!(0.01));
        assert_eq!(usd.decimal_places, 2);
    }

    #[test]
    fn test_currency_with_rounding() {
        let chf = Currency::with_rounding("CHF", dec!(0.050));
        assert_eq!(chf.rounding, dec!(0.05));
        assert_eq!(chf.decimal_places, 2);
        assert_eq!(chf.round(dec!(1.02)), dec!(1.00));
        assert_eq!(chf.round(dec!(1.03)), dec!(1.05));
    }

    #[rstest]
    #[case(dec!(0), true)]
    #[case(dec!(0.004), true)]
    #[case(dec!(-0.004), true)]
    #[case(dec!(0.005), false)]
    #[case(dec!(-0.005), false)]
    #[case(dec!(12.50), false)]
    fn test_is_zero_uses_rounding(#[case] amount: Decimal, #[case] expected: bool) {
        let usd = Currency::new("USD", 2);
        assert_eq!(usd.is_zero(amount), expected);
    }

    #[test]
    fn test_zero_decimal_currency() {
        let jpy = Currency::new("JPY", 0);
        assert!(jpy.is_zero(dec!(0.4)));
        assert!(!jpy.is_zero(dec!(0.5)));
        assert_eq!(jpy.round(dec!(1234.5)), dec!(1235));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::new("eur", 2).to_string(), "EUR");
    }
}
