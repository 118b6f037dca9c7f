//! Partner ledger types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{LineId, PartnerId};

use crate::ledger::{DebitCredit, RunningBalance};

/// A ledger line ready for sequencing; amounts in company currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Source line.
    pub line_id: LineId,
    /// Posting date.
    pub date: NaiveDate,
    /// Journal code.
    pub journal_code: String,
    /// Account name.
    pub account_name: String,
    /// Move reference.
    pub move_name: String,
    /// Line label.
    pub label: String,
    /// Debit.
    pub debit: Decimal,
    /// Credit.
    pub credit: Decimal,
}

/// Everything before the period, collapsed into one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningBalance {
    /// Period start; the row is dated here.
    pub date: NaiveDate,
    /// Debit/credit sums before the period.
    pub columns: DebitCredit,
}

/// A sequenced row with its running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Source line; `None` for the initial balance row.
    pub line_id: Option<LineId>,
    /// Row date.
    pub date: NaiveDate,
    /// Journal code (empty for the initial balance row).
    pub journal_code: String,
    /// Account name.
    pub account_name: String,
    /// Move reference.
    pub move_name: String,
    /// Line label.
    pub label: String,
    /// Debit.
    pub debit: Decimal,
    /// Credit.
    pub credit: Decimal,
    /// Running balance after this row.
    pub running: RunningBalance,
}

impl LedgerRow {
    /// Cumulative balance up to and including this row.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.running.current_balance
    }
}

/// One partner's block: summary then sequenced rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerLedgerSection {
    /// Partner; `None` for lines without one.
    pub partner_id: Option<PartnerId>,
    /// Display name.
    pub name: String,
    /// Debit up to the period end.
    pub debit: Decimal,
    /// Credit up to the period end.
    pub credit: Decimal,
    /// `debit - credit`.
    pub balance: Decimal,
    /// Sequenced detail rows.
    pub rows: Vec<LedgerRow>,
}

/// Partner ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerLedgerReport {
    /// Period start, if any.
    pub date_from: Option<NaiveDate>,
    /// Period end, if any.
    pub date_to: Option<NaiveDate>,
    /// Partner sections ordered by name.
    pub sections: Vec<PartnerLedgerSection>,
    /// Grand totals.
    pub totals: DebitCredit,
}
