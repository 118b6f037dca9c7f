//! Report filter snapshot.
//!
//! Empty collections mean "All": an absent restriction never matches zero lines.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, JournalId, PartnerId, PartnerTagId, ProductId};

use crate::ledger::{AccountType, MoveState};

/// Which move states a report includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMove {
    /// Posted moves only.
    #[default]
    Posted,
    /// Draft and posted moves.
    All,
}

impl TargetMove {
    /// Move states admitted by this target.
    #[must_use]
    pub fn states(self) -> Vec<MoveState> {
        match self {
            Self::Posted => vec![MoveState::Posted],
            Self::All => vec![MoveState::Draft, MoveState::Posted],
        }
    }

    /// Display label (`Posted` / `All`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Posted => "Posted",
            Self::All => "All",
        }
    }
}

/// Which rows a report keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Every account in scope.
    All,
    /// Accounts with at least one line.
    #[default]
    Movement,
    /// Accounts whose balance is not zero.
    NotZero,
}

/// Reconciliation restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationMode {
    /// Reconciled and unreconciled lines.
    #[default]
    All,
    /// Only lines still open as of the report end date.
    Unreconciled,
}

/// Which partner-facing accounts the aging report looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerScope {
    /// Customer receivables.
    Receivable,
    /// Vendor payables.
    Payable,
    /// Both.
    #[default]
    ReceivableAndPayable,
}

impl PartnerScope {
    /// Account types covered by this scope.
    #[must_use]
    pub fn account_types(self) -> Vec<AccountType> {
        match self {
            Self::Receivable => vec![AccountType::Receivable],
            Self::Payable => vec![AccountType::Payable],
            Self::ReceivableAndPayable => AccountType::PARTNER.to_vec(),
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Receivable => "Receivable",
            Self::Payable => "Payable",
            Self::ReceivableAndPayable => "Receivable and Payable",
        }
    }
}

/// Optional comparison window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last day included.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Returns true if neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Immutable snapshot of the user's report selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    /// Period start (inclusive). For aging reports this is the as-of date.
    pub date_from: Option<NaiveDate>,
    /// Period end (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Second window for comparison columns.
    pub comparison: Option<DateRange>,
    /// Posted-only or draft and posted.
    pub target_move: TargetMove,
    /// Journals to include.
    pub journal_ids: Vec<JournalId>,
    /// Accounts to include.
    pub account_ids: Vec<AccountId>,
    /// Partners to include.
    pub partner_ids: Vec<PartnerId>,
    /// Partner tags to include.
    pub partner_tag_ids: Vec<PartnerTagId>,
    /// Account types to include.
    pub account_types: Vec<AccountType>,
    /// Reconciliation restriction.
    pub reconciliation: ReconciliationMode,
    /// Row display mode.
    pub display: DisplayMode,
    /// Aging account scope.
    pub partner_scope: PartnerScope,
    /// Width of the first four aging windows; the configured default when unset.
    pub period_length_days: Option<u32>,
    /// Products whose invoice amounts count as duty.
    pub duty_product_ids: BTreeSet<ProductId>,
    /// Products whose invoice amounts count as VAT.
    pub vat_product_ids: BTreeSet<ProductId>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            date_from: None,
            date_to: None,
            comparison: None,
            target_move: TargetMove::default(),
            journal_ids: Vec::new(),
            account_ids: Vec::new(),
            partner_ids: Vec::new(),
            partner_tag_ids: Vec::new(),
            account_types: Vec::new(),
            reconciliation: ReconciliationMode::default(),
            display: DisplayMode::default(),
            partner_scope: PartnerScope::default(),
            period_length_days: None,
            duty_product_ids: BTreeSet::new(),
            vat_product_ids: BTreeSet::new(),
        }
    }
}

impl ReportFilter {
    /// Creates a filter with "All" semantics everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the period bounds.
    #[must_use]
    pub const fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Sets the comparison window.
    #[must_use]
    pub const fn compared_with(mut self, range: DateRange) -> Self {
        self.comparison = Some(range);
        self
    }

    /// Sets the target move.
    #[must_use]
    pub const fn with_target_move(mut self, target_move: TargetMove) -> Self {
        self.target_move = target_move;
        self
    }

    /// Adds a journal.
    #[must_use]
    pub fn with_journal(mut self, journal_id: JournalId) -> Self {
        self.journal_ids.push(journal_id);
        self
    }

    /// Adds an account.
    #[must_use]
    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_ids.push(account_id);
        self
    }

    /// Adds a partner.
    #[must_use]
    pub fn with_partner(mut self, partner_id: PartnerId) -> Self {
        self.partner_ids.push(partner_id);
        self
    }

    /// Adds a partner tag.
    #[must_use]
    pub fn with_partner_tag(mut self, tag_id: PartnerTagId) -> Self {
        self.partner_tag_ids.push(tag_id);
        self
    }

    /// Adds an account type.
    #[must_use]
    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_types.push(account_type);
        self
    }

    /// Sets the display mode.
    #[must_use]
    pub const fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Sets the reconciliation mode.
    #[must_use]
    pub const fn with_reconciliation(mut self, reconciliation: ReconciliationMode) -> Self {
        self.reconciliation = reconciliation;
        self
    }

    /// Sets the aging scope.
    #[must_use]
    pub const fn with_partner_scope(mut self, scope: PartnerScope) -> Self {
        self.partner_scope = scope;
        self
    }

    /// Sets the aging period length.
    #[must_use]
    pub const fn with_period_length(mut self, days: u32) -> Self {
        self.period_length_days = Some(days);
        self
    }

    /// Adds a duty product.
    #[must_use]
    pub fn with_duty_product(mut self, product_id: ProductId) -> Self {
        self.duty_product_ids.insert(product_id);
        self
    }

    /// Adds a VAT product.
    #[must_use]
    pub fn with_vat_product(mut self, product_id: ProductId) -> Self {
        self.vat_product_ids.insert(product_id);
        self
    }

    /// Returns the comparison window when one is requested.
    #[must_use]
    pub fn comparison_range(&self) -> Option<DateRange> {
        self.comparison.filter(|range| !range.is_unbounded())
    }
}
