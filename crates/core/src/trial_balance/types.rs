//! Trial balance types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use crate::ledger::DebitCredit;

/// Opening, period and closing figures of one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledBalance {
    /// Balance before the period, netted into one column.
    pub opening: DebitCredit,
    /// Debit/credit sums inside the period.
    pub movement: DebitCredit,
    /// Opening plus movement, netted into one column.
    pub closing: DebitCredit,
}

impl RolledBalance {
    /// Period balance (`debit - credit` of the movement).
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.movement.net()
    }
}

/// One account row of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Opening, period and closing figures.
    #[serde(flatten)]
    pub rolled: RolledBalance,
}

/// Column totals over the displayed rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of opening columns.
    pub opening: DebitCredit,
    /// Sum of period columns.
    pub movement: DebitCredit,
    /// Sum of closing columns.
    pub closing: DebitCredit,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Period start, if any.
    pub date_from: Option<NaiveDate>,
    /// Period end, if any.
    pub date_to: Option<NaiveDate>,
    /// Account rows ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}
