//! Normalization of line amounts into the reporting currency.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::Currency;
use thiserror::Error;

use super::conversion::convert_amount;
use super::exchange::RateSource;
use crate::ledger::{DebitCredit, LedgerLine};

/// Errors raised while normalizing amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// No rate is known for the pair on the requested date.
    #[error("No exchange rate from {from} to {to} on {date}")]
    NoExchangeRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
        /// Requested date.
        date: NaiveDate,
    },
}

impl CurrencyError {
    /// Returns the error code for log output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoExchangeRate { .. } => "NO_EXCHANGE_RATE",
        }
    }
}

/// Converts amounts into a reporting currency as of a date.
pub struct CurrencyNormalizer<'a, R: RateSource + ?Sized> {
    rates: &'a R,
}

impl<'a, R: RateSource + ?Sized> CurrencyNormalizer<'a, R> {
    /// Creates a normalizer backed by the given rate source.
    pub const fn new(rates: &'a R) -> Self {
        Self { rates }
    }

    /// Converts `amount` from `from` into `to` using the rate effective on `as_of`.
    ///
    /// Amounts already in the target currency are returned unchanged; converted
    /// amounts are rounded to the target currency's decimal places.
    pub fn normalize(
        &self,
        amount: Decimal,
        from: &str,
        to: &Currency,
        as_of: NaiveDate,
    ) -> Result<Decimal, CurrencyError> {
        if from.eq_ignore_ascii_case(&to.code) || amount.is_zero() {
            return Ok(amount);
        }
        let rate = self
            .rates
            .rate(from, &to.code, as_of)
            .ok_or_else(|| CurrencyError::NoExchangeRate {
                from: from.to_uppercase(),
                to: to.code.clone(),
                date: as_of,
            })?;
        Ok(convert_amount(amount, rate, to))
    }

    /// Debit/credit columns of a line in the target currency.
    pub fn line_columns(
        &self,
        line: &LedgerLine,
        to: &Currency,
        as_of: NaiveDate,
    ) -> Result<DebitCredit, CurrencyError> {
        Ok(DebitCredit::new(
            self.normalize(line.debit, &line.company_currency, to, as_of)?,
            self.normalize(line.credit, &line.company_currency, to, as_of)?,
        ))
    }
}

/// Returns true if the amount is zero at the currency's rounding precision.
#[must_use]
pub fn is_zero(amount: Decimal, currency: &Currency) -> bool {
    currency.is_zero(amount)
}
