//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Reporting company configuration.
    pub company: CompanyConfig,
    /// Ledger snapshot configuration.
    pub ledger: LedgerConfig,
    /// Report definition configuration.
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Reporting company configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Company display name (printed in sheet titles).
    pub name: String,
    /// Company currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Company currency rounding unit.
    #[serde(default = "default_rounding")]
    pub rounding: Decimal,
    /// Locale of the user running the reports.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_rounding() -> Decimal {
    Decimal::new(1, 2)
}

fn default_locale() -> String {
    "en_US".to_string()
}

impl CompanyConfig {
    /// Returns the company currency descriptor.
    #[must_use]
    pub fn currency(&self) -> Currency {
        Currency::with_rounding(&self.currency, self.rounding)
    }
}

/// Ledger snapshot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path to the JSON ledger snapshot.
    pub snapshot_path: String,
}

/// Report definition configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Path to the TOML file holding stored report definitions.
    #[serde(default = "default_definitions_path")]
    pub definitions_path: String,
    /// Keep aging rows for partners whose amounts are all zero.
    #[serde(default)]
    pub include_nullified_amount: bool,
    /// Aging period length used when a definition does not set one.
    #[serde(default = "default_period_length")]
    pub default_period_length_days: u32,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            definitions_path: default_definitions_path(),
            include_nullified_amount: false,
            default_period_length_days: default_period_length(),
        }
    }
}

fn default_definitions_path() -> String {
    "config/reports.toml".to_string()
}

fn default_period_length() -> u32 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
