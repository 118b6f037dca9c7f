//! Partner ledger sheet: one summary row per partner followed by its
//! sequenced lines with the running balance.

use tally_core::partner_ledger::PartnerLedgerReport;
use tally_core::reports::{FilterSummary, ReportOutput};

use crate::workbook::{Row, Sheet};

/// Sheet name.
pub const SHEET: &str = "Sheet1";

const DEFAULT_ACCOUNTS: &str = "All Payable and Receivable";
const DEFAULT_ACCOUNT_TYPES: &str = "Receivable and Payable";

/// Renders the partner ledger.
#[must_use]
pub fn render(output: &ReportOutput, report: &PartnerLedgerReport) -> Sheet {
    let summary = &output.summary;
    let mut sheet = Sheet::new(SHEET);
    sheet.push(Row::new().at(0, format!("{}:Partner Ledger", output.company_name)));
    sheet.skip(1);

    sheet.push(
        Row::new()
            .at(0, format!(" Journals: {}", summary.journals_label()))
            .at(
                2,
                format!(
                    " Accounts: {}",
                    FilterSummary::join_or(&summary.accounts, DEFAULT_ACCOUNTS)
                ),
            )
            .at(4, format!(" Partners: {}", summary.partners_label()))
            .at(6, format!(" Partner Tags: {}", summary.partner_tags_label())),
    );

    let mut moves = Row::new()
        .at(0, format!("Target Moves: {}", summary.target_move))
        .at(
            2,
            format!(
                "Account Type: {}",
                FilterSummary::join_or(&summary.account_types, DEFAULT_ACCOUNT_TYPES)
            ),
        );
    match (report.date_from, report.date_to) {
        (Some(from), Some(to)) => {
            moves = moves
                .at(4, format!("From: {from}"))
                .at(6, format!("To: {to}"));
        }
        (Some(from), None) => moves = moves.at(4, format!("From: {from}")),
        (None, Some(to)) => moves = moves.at(4, format!("To: {to}")),
        (None, None) => {}
    }
    sheet.push(moves);

    sheet.push(
        Row::new()
            .at(0, "Partner")
            .from_column(5, ["Debit", "Credit", "Balance"]),
    );

    for section in &report.sections {
        sheet.push(
            Row::new()
                .at(0, section.name.as_str())
                .from_column(5, [section.debit, section.credit, section.balance]),
        );
        sheet.push(Row::new().from_column(
            0,
            [
                "Date",
                "JRNL",
                "Account",
                "Move",
                "Entry Label",
                "Debit",
                "Credit",
                "Balance",
            ],
        ));
        for line in &section.rows {
            sheet.push(
                Row::new()
                    .at(0, line.date)
                    .at(1, line.journal_code.as_str())
                    .at(2, line.account_name.as_str())
                    .at(3, line.move_name.as_str())
                    .at(4, line.label.as_str())
                    .from_column(5, [line.debit, line.credit, line.balance()]),
            );
        }
    }
    sheet
}
