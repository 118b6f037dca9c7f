//! Ledger read model.
//!
//! This module holds the views the report engine reads from the ledger store:
//! - Ledger lines, moves states and reconciliation partials
//! - Accounts, partners, journals and invoice lines
//! - Balance accumulation helpers (debit/credit splitting, running balances)

pub mod balance;
pub mod types;

pub use balance::{DebitCredit, RunningBalance, split_balance};
pub use types::{
    Account, AccountType, InvoiceLine, Journal, LedgerLine, MoveState, PartialReconciliation,
    Partner, PartnerTag,
};
