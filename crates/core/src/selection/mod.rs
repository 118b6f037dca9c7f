//! Line selection.
//!
//! This module turns a report filter into the exact set of ledger lines a
//! report needs:
//! - `ReportFilter` snapshot with "All" semantics for empty selections
//! - Structured `LinePredicate` expressions
//! - The `LedgerStore` interface the predicates are evaluated against
//! - `LineSelector`, which composes filter, period and extra predicates

pub mod filter;
pub mod predicate;
pub mod selector;
pub mod store;

pub use filter::{
    DateRange, DisplayMode, PartnerScope, ReconciliationMode, ReportFilter, TargetMove,
};
pub use predicate::{LineLookup, LinePredicate};
pub use selector::LineSelector;
pub use store::{LedgerStore, StoreError};
