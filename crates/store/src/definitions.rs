//! Report definitions stored in a TOML file.
//!
//! ```toml
//! [[reports]]
//! id = "aging-customers"
//! kind = "aging"
//!
//! [reports.filter]
//! date_from = "2024-03-31"
//! partner_scope = "receivable"
//! ```

use std::collections::HashSet;

use config::{Config, File, FileFormat};
use serde::Deserialize;
use tally_core::reports::{ReportConfigSource, ReportDefinition};
use tally_shared::{AppError, AppResult};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    #[serde(default)]
    reports: Vec<ReportDefinition>,
}

/// Report definitions loaded from TOML.
#[derive(Debug, Clone, Default)]
pub struct FileReportDefinitions {
    definitions: Vec<ReportDefinition>,
}

impl FileReportDefinitions {
    /// Wraps a list of definitions; ids must be unique.
    pub fn new(definitions: Vec<ReportDefinition>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = definitions.iter().find(|d| !seen.insert(d.id.as_str())) {
            return Err(AppError::Validation(format!(
                "Duplicate report definition id: {}",
                duplicate.id
            )));
        }
        Ok(Self { definitions })
    }

    /// Loads definitions from a TOML file.
    pub fn load(path: &str) -> AppResult<Self> {
        let definitions = Self::parse(File::new(path, FileFormat::Toml))?;
        debug!(path, definitions = definitions.definitions.len(), "Loaded report definitions");
        Ok(definitions)
    }

    /// Parses definitions from TOML text.
    pub fn from_toml_str(toml: &str) -> AppResult<Self> {
        Self::parse(File::from_str(toml, FileFormat::Toml))
    }

    fn parse<T>(source: T) -> AppResult<Self>
    where
        T: config::Source + Send + Sync + 'static,
    {
        let file: DefinitionFile = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Self::new(file.reports)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no definitions are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ReportConfigSource for FileReportDefinitions {
    fn definition(&self, id: &str) -> Option<ReportDefinition> {
        self.definitions.iter().find(|d| d.id == id).cloned()
    }

    fn definition_ids(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.id.clone()).collect()
    }
}
