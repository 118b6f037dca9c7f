//! Ledger snapshot file format.
//!
//! A snapshot is the JSON export of everything the report engine reads.
//! Line and reconciliation records are stored flat; the in-memory store
//! derives balances, settlement links and reconciled flags from them.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::currency::ExchangeRate;
use tally_core::hierarchy::HierarchyNode;
use tally_core::ledger::{Account, InvoiceLine, Journal, MoveState, Partner, PartnerTag};
use tally_shared::types::{
    AccountId, JournalId, LineId, MoveId, PartnerId, ReconciliationId,
};
use tally_shared::{AppError, AppResult};
use tracing::debug;

/// A ledger line as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line ID.
    pub id: LineId,
    /// Account.
    pub account_id: AccountId,
    /// Partner, if any.
    #[serde(default)]
    pub partner_id: Option<PartnerId>,
    /// Journal.
    pub journal_id: JournalId,
    /// Owning move.
    pub move_id: MoveId,
    /// Move reference.
    pub move_name: String,
    /// Line label.
    #[serde(default)]
    pub label: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Due date.
    #[serde(default)]
    pub date_maturity: Option<NaiveDate>,
    /// Debit in company currency.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit in company currency.
    #[serde(default)]
    pub credit: Decimal,
    /// Transaction currency; the company currency when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Move state.
    #[serde(default = "posted")]
    pub move_state: MoveState,
}

const fn posted() -> MoveState {
    MoveState::Posted
}

/// A settlement between a debit line and a credit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    /// Reconciliation ID.
    pub id: ReconciliationId,
    /// The debit side.
    pub debit_line_id: LineId,
    /// The credit side.
    pub credit_line_id: LineId,
    /// Settled amount in company currency.
    pub amount: Decimal,
    /// Latest date of the two reconciled moves.
    pub max_date: NaiveDate,
}

/// Everything the report engine reads, as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    /// Currency the line amounts are booked in.
    pub company_currency: String,
    /// Dated exchange rates.
    pub exchange_rates: Vec<ExchangeRate>,
    /// Chart of accounts.
    pub accounts: Vec<Account>,
    /// Partner tags.
    pub partner_tags: Vec<PartnerTag>,
    /// Partners.
    pub partners: Vec<Partner>,
    /// Journals.
    pub journals: Vec<Journal>,
    /// Ledger lines.
    pub lines: Vec<LineRecord>,
    /// Settlements.
    pub reconciliations: Vec<ReconciliationRecord>,
    /// Invoice lines (duty/VAT split).
    pub invoice_lines: Vec<InvoiceLine>,
    /// Financial report hierarchy nodes.
    pub hierarchy: Vec<HierarchyNode>,
}

impl LedgerSnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("Invalid ledger snapshot: {e}")))?;
        if snapshot.company_currency.is_empty() {
            return Err(AppError::Validation(
                "Ledger snapshot does not set company_currency".to_string(),
            ));
        }
        Ok(snapshot)
    }

    /// Reads and parses a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("{}: {e}", path.display())))?;
        let snapshot = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            accounts = snapshot.accounts.len(),
            lines = snapshot.lines.len(),
            "Loaded ledger snapshot"
        );
        Ok(snapshot)
    }
}
