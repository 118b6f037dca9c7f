//! Read-side ledger types consumed by the report engine.
//!
//! Every type here is a view over the external ledger store. The engine never
//! mutates them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{
    AccountId, JournalId, LineId, MoveId, PartnerId, PartnerTagId, ProductId, ReconciliationId,
};

/// State of the journal entry (move) a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveState {
    /// Not yet posted.
    Draft,
    /// Posted to the ledger.
    Posted,
    /// Cancelled; never reported.
    Cancelled,
}

/// Account classification used by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Customer receivables.
    Receivable,
    /// Vendor payables.
    Payable,
    /// Income (profit and loss).
    Income,
    /// Expense (profit and loss).
    Expense,
    /// Any other balance-sheet account.
    Other,
}

impl AccountType {
    /// Income and expense accounts; their history folds into retained earnings.
    pub const PROFIT_AND_LOSS: [Self; 2] = [Self::Income, Self::Expense];

    /// Receivable and payable accounts; the partner-facing account types.
    pub const PARTNER: [Self; 2] = [Self::Receivable, Self::Payable];

    /// Returns true for income and expense accounts.
    #[must_use]
    pub const fn is_profit_and_loss(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Receivable => "Receivable",
            Self::Payable => "Payable",
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Other => "Other",
        }
    }
}

/// Chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code (e.g., "1100").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Marks the account that absorbs prior profit and loss.
    #[serde(default)]
    pub retained_earnings: bool,
    /// Account currency, when it differs from the company currency.
    #[serde(default)]
    pub currency: Option<String>,
}

impl Account {
    /// Label used in report rows: `"{code} - {name}"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Customer or vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    /// Partner ID.
    pub id: PartnerId,
    /// Partner display name.
    pub name: String,
    /// Tags (categories) attached to the partner.
    #[serde(default)]
    pub tag_ids: Vec<PartnerTagId>,
}

/// Partner tag (category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTag {
    /// Tag ID.
    pub id: PartnerTagId,
    /// Tag name.
    pub name: String,
}

/// Journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal ID.
    pub id: JournalId,
    /// Short code (e.g., "INV", "BNK1").
    pub code: String,
    /// Journal name.
    pub name: String,
}

/// Links a debit line to the credit line that settles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialReconciliation {
    /// Reconciliation ID.
    pub id: ReconciliationId,
    /// The debit side.
    pub debit_line_id: LineId,
    /// The credit side.
    pub credit_line_id: LineId,
    /// Settled amount in company currency (always positive).
    pub amount: Decimal,
    /// Latest date of the two reconciled moves.
    pub max_date: NaiveDate,
    /// State of the debit line's move.
    pub debit_move_state: MoveState,
    /// State of the credit line's move.
    pub credit_move_state: MoveState,
}

impl PartialReconciliation {
    /// Returns true if this settlement is effective as of the given date.
    ///
    /// Only settlements between two posted moves dated on or before `as_of` count.
    #[must_use]
    pub fn settled_as_of(&self, as_of: NaiveDate) -> bool {
        self.max_date <= as_of
            && self.debit_move_state == MoveState::Posted
            && self.credit_move_state == MoveState::Posted
    }
}

/// Invoice line of a move, used for the duty/VAT split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Owning move.
    pub move_id: MoveId,
    /// Product sold or bought, if any.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    /// Line total including taxes.
    pub price_total: Decimal,
}

/// A posted or draft bookkeeping entry fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Line ID.
    pub id: LineId,
    /// Account the line is booked on.
    pub account_id: AccountId,
    /// Partner, when the line has one.
    #[serde(default)]
    pub partner_id: Option<PartnerId>,
    /// Journal the move was recorded in.
    pub journal_id: JournalId,
    /// Owning move.
    pub move_id: MoveId,
    /// Move reference (e.g., "INV/2024/0001").
    pub move_name: String,
    /// Line label.
    #[serde(default)]
    pub label: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Due date, if any.
    #[serde(default)]
    pub date_maturity: Option<NaiveDate>,
    /// Debit amount in company currency.
    pub debit: Decimal,
    /// Credit amount in company currency.
    pub credit: Decimal,
    /// `debit - credit` in company currency.
    pub balance: Decimal,
    /// Native (transaction) currency code.
    pub currency: String,
    /// Company currency code the debit/credit/balance are expressed in.
    pub company_currency: String,
    /// State of the owning move.
    pub move_state: MoveState,
    /// True once the line is fully reconciled.
    #[serde(default)]
    pub reconciled: bool,
    /// Partials where this line is the credit side (the debits it settles).
    #[serde(default)]
    pub matched_debits: Vec<PartialReconciliation>,
    /// Partials where this line is the debit side (the credits settling it).
    #[serde(default)]
    pub matched_credits: Vec<PartialReconciliation>,
}

impl LedgerLine {
    /// Balance of the line as of a date, in company currency.
    ///
    /// Settlements effective on or before `as_of` are netted out; settlements
    /// made later leave the line open against that date.
    #[must_use]
    pub fn balance_as_of(&self, as_of: NaiveDate) -> Decimal {
        let settled_debits: Decimal = self
            .matched_debits
            .iter()
            .filter(|p| p.settled_as_of(as_of))
            .map(|p| p.amount)
            .sum();
        let settled_credits: Decimal = self
            .matched_credits
            .iter()
            .filter(|p| p.settled_as_of(as_of))
            .map(|p| p.amount)
            .sum();
        self.balance + settled_debits - settled_credits
    }

    /// Date used to age the line: maturity date, falling back to posting date.
    #[must_use]
    pub fn aging_date(&self) -> NaiveDate {
        self.date_maturity.unwrap_or(self.date)
    }
}
