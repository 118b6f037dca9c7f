//! Stored report definitions.

use serde::{Deserialize, Serialize};

use crate::selection::ReportFilter;

/// The report a definition produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Partner aging.
    Aging,
    /// Hierarchical balance sheet / profit and loss.
    BalanceSheet,
    /// Trial balance.
    TrialBalance,
    /// Partner ledger.
    PartnerLedger,
}

impl ReportKind {
    /// Display title of the report.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Aging => "Partner Aging",
            Self::BalanceSheet => "Financial Report",
            Self::TrialBalance => "Trial Balance",
            Self::PartnerLedger => "Partner Ledger",
        }
    }
}

/// A named report configuration: what to run and with which filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Unique definition id.
    pub id: String,
    /// Report kind.
    pub kind: ReportKind,
    /// Root hierarchy node name (balance sheets only).
    #[serde(default)]
    pub financial_report: Option<String>,
    /// User selections.
    #[serde(default)]
    pub filter: ReportFilter,
}

impl ReportDefinition {
    /// Creates a definition with an "All" filter.
    pub fn new(id: impl Into<String>, kind: ReportKind) -> Self {
        Self {
            id: id.into(),
            kind,
            financial_report: None,
            filter: ReportFilter::default(),
        }
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the root hierarchy node name.
    #[must_use]
    pub fn with_financial_report(mut self, name: impl Into<String>) -> Self {
        self.financial_report = Some(name.into());
        self
    }

    /// Sheet title: the financial report name for balance sheets.
    #[must_use]
    pub fn title(&self) -> &str {
        match (self.kind, &self.financial_report) {
            (ReportKind::BalanceSheet, Some(name)) => name,
            (kind, _) => kind.title(),
        }
    }
}

/// Source of stored report definitions.
pub trait ReportConfigSource {
    /// Looks up a definition by id.
    fn definition(&self, id: &str) -> Option<ReportDefinition>;

    /// Ids of all known definitions, in declaration order.
    fn definition_ids(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{DisplayMode, PartnerScope};

    #[test]
    fn test_definition_deserializes_with_partial_filter() {
        let definition: ReportDefinition = serde_json::from_str(
            r#"{
                "id": "aging-customers",
                "kind": "aging",
                "filter": {"date_from": "2024-03-31", "partner_scope": "receivable", "display": "not_zero"}
            }"#,
        )
        .unwrap();
        assert_eq!(definition.kind, ReportKind::Aging);
        assert_eq!(definition.filter.partner_scope, PartnerScope::Receivable);
        assert_eq!(definition.filter.display, DisplayMode::NotZero);
        assert!(definition.filter.partner_ids.is_empty());
        assert_eq!(definition.title(), "Partner Aging");
    }

    #[test]
    fn test_balance_sheet_title_is_report_name() {
        let definition =
            ReportDefinition::new("bs", ReportKind::BalanceSheet).with_financial_report("Balance Sheet");
        assert_eq!(definition.title(), "Balance Sheet");
        assert_eq!(
            ReportDefinition::new("bs", ReportKind::BalanceSheet).title(),
            "Financial Report"
        );
    }
}
