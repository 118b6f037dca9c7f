//! Report orchestration.
//!
//! This module wires the engine components into finished reports:
//! - `ReportContext` built once per run
//! - Stored `ReportDefinition`s and the source they are read from
//! - `ReportEngine`, which runs aging, balance sheet, trial balance and
//!   partner ledger reports
//! - `ReportOutput`, the result handed to render sinks

pub mod context;
pub mod definition;
pub mod error;
pub mod output;
pub mod service;


pub use context::ReportContext;
pub use definition::{ReportConfigSource, ReportDefinition, ReportKind};
pub use error::ReportError;
pub use output::{ALL, BalanceSheetReport, FilterSummary, ReportBody, ReportOutput};
pub use service::ReportEngine;
