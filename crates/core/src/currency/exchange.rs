//! Exchange rate types and dated rate lookup.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: String,
    /// Target currency code.
    pub to_currency: String,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub fn new(
        from_currency: impl Into<String>,
        to_currency: impl Into<String>,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            rate,
            effective_date,
        }
    }

    /// Returns the inverse rate, or `None` for a zero rate.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        if self.rate.is_zero() {
            return None;
        }
        Some(Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate: Decimal::ONE / self.rate,
            effective_date: self.effective_date,
        })
    }
}

/// Source of dated conversion rates.
pub trait RateSource {
    /// Rate converting 1 unit of `from` into `to`, effective on `on`.
    ///
    /// Returns `None` when no rate is known for that pair and date.
    fn rate(&self, from: &str, to: &str, on: NaiveDate) -> Option<Decimal>;
}

/// In-memory table of dated exchange rates.
///
/// The effective rate for a date is the latest one dated on or before it.
/// A direct quote wins over an inverted one on the same date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Creates a table from a list of rates.
    #[must_use]
    pub fn new(rates: Vec<ExchangeRate>) -> Self {
        Self { rates }
    }

    /// Adds a rate.
    pub fn push(&mut self, rate: ExchangeRate) {
        self.rates.push(rate);
    }

    /// Number of quoted rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn latest(&self, from: &str, to: &str, on: NaiveDate) -> Option<&ExchangeRate> {
        self.rates
            .iter()
            .filter(|r| {
                r.effective_date <= on
                    && r.from_currency.eq_ignore_ascii_case(from)
                    && r.to_currency.eq_ignore_ascii_case(to)
            })
            .max_by_key(|r| r.effective_date)
    }
}

impl RateSource for RateTable {
    fn rate(&self, from: &str, to: &str, on: NaiveDate) -> Option<Decimal> {
        if from.eq_ignore_ascii_case(to) {
            return Some(Decimal::ONE);
        }
        let direct = self.latest(from, to, on);
        let inverse = self
            .latest(to, from, on)
            .and_then(ExchangeRate::inverse);
        match (direct, inverse) {
            (Some(direct), Some(inverse)) if inverse.effective_date > direct.effective_date => {
                Some(inverse.rate)
            }
            (Some(direct), _) => Some(direct.rate),
            (None, Some(inverse)) => Some(inverse.rate),
            (None, None) => None,
        }
    }
}
