//! Ledger store interface consumed by the report engine.

use chrono::NaiveDate;
use tally_shared::types::{AccountId, JournalId, MoveId, PartnerId, PartnerTagId};
use thiserror::Error;

use super::predicate::LinePredicate;
use crate::currency::RateSource;
use crate::hierarchy::HierarchyNode;
use crate::ledger::{
    Account, InvoiceLine, Journal, LedgerLine, PartialReconciliation, Partner, PartnerTag,
};

/// Errors raised by a ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g., "account").
        entity: &'static str,
        /// Requested key.
        id: String,
    },

    /// Backend failure.
    #[error("Ledger store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns the error code for log output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Backend(_) => "STORE_ERROR",
        }
    }
}

/// Read-only view of the ledger.
///
/// All reads made during one report run are assumed to observe the same
/// consistent snapshot.
pub trait LedgerStore: RateSource {
    /// Lines matching the predicate, ordered by (date, id).
    fn lines(&self, predicate: &LinePredicate) -> Result<Vec<LedgerLine>, StoreError>;

    /// All accounts, ordered by code.
    fn accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Account by id.
    fn account(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Partner by id.
    fn partner(&self, id: PartnerId) -> Result<Partner, StoreError>;

    /// Partner tag by id.
    fn partner_tag(&self, id: PartnerTagId) -> Result<PartnerTag, StoreError>;

    /// Journal by id.
    fn journal(&self, id: JournalId) -> Result<Journal, StoreError>;


    /// Partial reconciliations whose max date is strictly after `date`.
    fn partials_settled_after(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<PartialReconciliation>, StoreError>;

    /// Invoice lines of a move.
    fn invoice_lines(&self, move_id: MoveId) -> Result<Vec<InvoiceLine>, StoreError>;

    /// Flat table of financial report hierarchy nodes.
    fn hierarchy_nodes(&self) -> Result<Vec<HierarchyNode>, StoreError>;
}
