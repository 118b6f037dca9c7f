//! Fixed sheet layouts, one module per report kind.
//!
//! Column order and labels are consumed by downstream spreadsheets and must
//! not change.

pub mod aging;
pub mod balance_sheet;
pub mod partner_ledger;
pub mod trial_balance;
