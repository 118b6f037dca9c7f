//! Ledger storage for Tally.
//!
//! This crate provides:
//! - The JSON ledger snapshot format
//! - `InMemoryLedger`, a `LedgerStore` evaluating structured predicates
//!   over a loaded snapshot
//! - `FileReportDefinitions`, stored report definitions read from TOML

pub mod definitions;
pub mod memory;
pub mod snapshot;

pub use definitions::FileReportDefinitions;
pub use memory::InMemoryLedger;
pub use snapshot::{LedgerSnapshot, LineRecord, ReconciliationRecord};
