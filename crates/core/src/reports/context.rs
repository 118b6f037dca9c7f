//! Per-run report context.

use chrono::NaiveDate;
use tally_shared::AppConfig;
use tally_shared::types::Currency;

/// Values every report component reads, built once per report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Company name printed in sheet titles.
    pub company_name: String,
    /// Reporting currency.
    pub currency: Currency,
    /// System date; the as-of date when a report sets none.
    pub today: NaiveDate,
    /// Locale of the user running the report.
    pub locale: String,
    /// Keep aging rows whose amounts are all zero.
    pub include_nullified_amount: bool,
    /// Aging period length when a filter sets none.
    pub default_period_length_days: u32,
}

impl ReportContext {
    /// Creates a context with the default locale.
    pub fn new(company_name: impl Into<String>, currency: Currency, today: NaiveDate) -> Self {
        Self {
            company_name: company_name.into(),
            currency,
            today,
            locale: "en_US".to_string(),
            include_nullified_amount: false,
            default_period_length_days: 30,
        }
    }

    /// Builds the context from application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig, today: NaiveDate) -> Self {
        Self {
            company_name: config.company.name.clone(),
            currency: config.company.currency(),
            today,
            locale: config.company.locale.clone(),
            include_nullified_amount: config.reports.include_nullified_amount,
            default_period_length_days: config.reports.default_period_length_days,
        }
    }

    /// Sets whether zero-amount aging rows are kept.
    #[must_use]
    pub const fn with_include_nullified_amount(mut self, include: bool) -> Self {
        self.include_nullified_amount = include;
        self
    }
}
