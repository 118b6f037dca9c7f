//! Balance accumulation and debit/credit splitting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Splits a signed net balance into nonnegative debit/credit columns.
///
/// Positive net goes to the debit column, negative net to the credit column.
#[must_use]
pub fn split_balance(net: Decimal) -> (Decimal, Decimal) {
    if net.is_sign_negative() && !net.is_zero() {
        (Decimal::ZERO, -net)
    } else {
        (net, Decimal::ZERO)
    }
}

/// Debit/credit column pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
}

impl DebitCredit {
    /// Creates totals from explicit columns.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Creates totals from a signed net, split into one column.
    #[must_use]
    pub fn from_net(net: Decimal) -> Self {
        let (debit, credit) = split_balance(net);
        Self { debit, credit }
    }

    /// Net balance (`debit - credit`).
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Collapses both columns into the single column carrying the net.
    #[must_use]
    pub fn netted(&self) -> Self {
        Self::from_net(self.net())
    }
}

impl std::ops::Add for DebitCredit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            debit: self.debit + rhs.debit,
            credit: self.credit + rhs.credit,
        }
    }
}

impl std::ops::AddAssign for DebitCredit {
    fn add_assign(&mut self, rhs: Self) {
        self.debit += rhs.debit;
        self.credit += rhs.credit;
    }
}

/// Running balance information for a sequenced ledger row.
///
/// - position: 1-based, monotonically increasing
/// - previous_balance: balance before this row
/// - current_balance: balance after this row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Position in the sequence (monotonically increasing).
    pub position: usize,
    /// Balance before this row.
    pub previous_balance: Decimal,
    /// Balance after this row.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Creates the running balance for the first row of a sequence.
    #[must_use]
    pub fn first_entry(balance_change: Decimal) -> Self {
        Self {
            position: 1,
            previous_balance: Decimal::ZERO,
            current_balance: balance_change,
        }
    }

    /// Creates the running balance for the row following `previous`.
    ///
    /// - current_balance[N] = previous_balance[N] + balance_change
    /// - previous_balance[N] = current_balance[N-1]
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: Decimal) -> Self {
        Self {
            position: previous.position + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + balance_change,
        }
    }

    /// Advances from an optional previous row.
    #[must_use]
    pub fn advance(previous: Option<&Self>, balance_change: Decimal) -> Self {
        match previous {
            Some(previous) => Self::next_entry(previous, balance_change),
            None => Self::first_entry(balance_change),
        }
    }
}
