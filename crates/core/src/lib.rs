//! Report aggregation engine for Tally.
//!
//! This crate contains pure aggregation logic with ZERO storage or rendering
//! dependencies. It reads the ledger through the `LedgerStore` trait and
//! returns plain report values.
//!
//! # Modules
//!
//! - `ledger` - Ledger read model and debit/credit helpers
//! - `currency` - Exchange rates and conversion into the company currency
//! - `selection` - Report filters, structured line predicates, store trait
//! - `aging` - Partner aging windows and bucketing
//! - `hierarchy` - Account hierarchy tree and recursive aggregation
//! - `trial_balance` - Opening/period/closing balance roller
//! - `partner_ledger` - Running-balance sequencing per partner
//! - `reports` - Report context, definitions and orchestration

pub mod aging;
pub mod currency;
pub mod hierarchy;
pub mod ledger;
pub mod partner_ledger;
pub mod reports;
pub mod selection;
pub mod trial_balance;

#[cfg(test)]
#[allow(missing_docs, dead_code)]
pub(crate) mod test_support;
