//! Report results handed to render sinks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::definition::ReportKind;
use crate::aging::AgingReport;
use crate::hierarchy::{AggregateRow, NodeTotals};
use crate::partner_ledger::PartnerLedgerReport;
use crate::selection::{DateRange, ReportFilter};
use crate::trial_balance::TrialBalanceReport;

/// Label used when a selection is empty.
pub const ALL: &str = "All";

/// Human-readable names of the filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    /// Journal codes.
    pub journals: Vec<String>,
    /// Account display names.
    pub accounts: Vec<String>,
    /// Partner names.
    pub partners: Vec<String>,
    /// Partner tag names.
    pub partner_tags: Vec<String>,
    /// Account type labels.
    pub account_types: Vec<String>,
    /// Target move label.
    pub target_move: String,
    /// Aging partner scope label.
    pub partner_scope: String,
}

impl FilterSummary {
    /// Joins labels with `", "`, or returns `default` when there are none.
    #[must_use]
    pub fn join_or(labels: &[String], default: &str) -> String {
        if labels.is_empty() {
            default.to_string()
        } else {
            labels.join(", ")
        }
    }

    /// Journals label.
    #[must_use]
    pub fn journals_label(&self) -> String {
        Self::join_or(&self.journals, ALL)
    }

    /// Accounts label.
    #[must_use]
    pub fn accounts_label(&self) -> String {
        Self::join_or(&self.accounts, ALL)
    }

    /// Partners label.
    #[must_use]
    pub fn partners_label(&self) -> String {
        Self::join_or(&self.partners, ALL)
    }

    /// Partner tags label.
    #[must_use]
    pub fn partner_tags_label(&self) -> String {
        Self::join_or(&self.partner_tags, ALL)
    }
}

/// Hierarchical balance sheet (or profit and loss) result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Root node name.
    pub name: String,
    /// Main window start.
    pub date_from: Option<NaiveDate>,
    /// Main window end.
    pub date_to: Option<NaiveDate>,
    /// Comparison window, when requested.
    pub comparison: Option<DateRange>,
    /// Flattened rows in display order.
    pub rows: Vec<AggregateRow>,
    /// Root node totals.
    pub totals: NodeTotals,
}

/// The computed body of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report", rename_all = "snake_case")]
pub enum ReportBody {
    /// Partner aging.
    Aging(AgingReport),
    /// Hierarchical balance sheet.
    BalanceSheet(BalanceSheetReport),
    /// Trial balance.
    TrialBalance(TrialBalanceReport),
    /// Partner ledger.
    PartnerLedger(PartnerLedgerReport),
}

impl ReportBody {
    /// Report kind of this body.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::Aging(_) => ReportKind::Aging,
            Self::BalanceSheet(_) => ReportKind::BalanceSheet,
            Self::TrialBalance(_) => ReportKind::TrialBalance,
            Self::PartnerLedger(_) => ReportKind::PartnerLedger,
        }
    }
}

/// A finished report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutput {
    /// Definition id.
    pub id: String,
    /// Sheet title.
    pub title: String,
    /// Company name.
    pub company_name: String,
    /// Reporting currency code.
    pub currency: String,
    /// Filter the report ran with.
    pub filter: ReportFilter,
    /// Names of the filter selections.
    pub summary: FilterSummary,
    /// Computed report.
    pub body: ReportBody,
}
