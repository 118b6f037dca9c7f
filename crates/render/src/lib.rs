//! Sheet layouts and render sinks for Tally reports.
//!
//! [`render`] lays a finished [`ReportOutput`] out as a [`Workbook`];
//! a [`RenderSink`] writes the workbook somewhere.

pub mod error;
pub mod layout;
pub mod sink;
pub mod workbook;

pub use error::RenderError;
pub use sink::{JsonSink, RenderSink};
pub use workbook::{Cell, Row, Sheet, Workbook};

use tally_core::reports::{ReportBody, ReportOutput};
use tracing::debug;

/// Lays out a report as a workbook.
#[must_use]
pub fn render(output: &ReportOutput) -> Workbook {
    let sheets = match &output.body {
        ReportBody::Aging(report) => layout::aging::render(output, report),
        ReportBody::BalanceSheet(report) => vec![layout::balance_sheet::render(output, report)],
        ReportBody::TrialBalance(report) => vec![layout::trial_balance::render(output, report)],
        ReportBody::PartnerLedger(report) => vec![layout::partner_ledger::render(output, report)],
    };
    debug!(
        report_id = %output.id,
        sheets = sheets.len(),
        rows = sheets.iter().map(|s| s.rows.len()).sum::<usize>(),
        "Rendered report"
    );
    Workbook { sheets }
}
