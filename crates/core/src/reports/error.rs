//! Report error types.
//!
//! A report is all-or-nothing: any error aborts the whole computation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::currency::CurrencyError;
use crate::hierarchy::HierarchyError;
use crate::selection::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    // ========== Configuration Errors ==========
    /// More than one retained-earnings account in the report's scope.
    #[error("Retained earnings account cannot be more than 1")]
    MultipleRetainedEarnings,

    /// The report's scope contains no accounts.
    #[error("No Accounts Found! Please Add One")]
    NoAccounts,

    /// No hierarchy root carries the report's name.
    #[error("Unable to find the financial report.")]
    FinancialReportNotFound(String),

    /// A balance sheet definition without a financial report name.
    #[error("Report definition {0} does not name a financial report")]
    MissingFinancialReport(String),

    /// No report definition with this id.
    #[error("Unknown report definition: {0}")]
    UnknownDefinition(String),

    /// Start date after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Malformed report hierarchy.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    // ========== Data Errors ==========
    /// Amount could not be converted to the company currency.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Ledger store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MultipleRetainedEarnings => "MULTIPLE_RETAINED_EARNINGS",
            Self::NoAccounts => "NO_ACCOUNTS",
            Self::FinancialReportNotFound(_) => "FINANCIAL_REPORT_NOT_FOUND",
            Self::MissingFinancialReport(_) => "MISSING_FINANCIAL_REPORT",
            Self::UnknownDefinition(_) => "UNKNOWN_REPORT_DEFINITION",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Hierarchy(err) => err.error_code(),
            Self::Currency(err) => err.error_code(),
            Self::Store(err) => err.error_code(),
        }
    }

    /// Returns true for errors caused by report configuration rather than data.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Currency(_) | Self::Store(_))
    }
}
