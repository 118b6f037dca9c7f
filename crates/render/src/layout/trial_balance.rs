//! Trial balance sheet: opening, period and closing debit/credit per account.

use tally_core::ledger::DebitCredit;
use tally_core::reports::ReportOutput;
use tally_core::trial_balance::TrialBalanceReport;

use crate::workbook::{Row, Sheet};

/// Sheet name.
pub const SHEET: &str = "Trial Balance";

/// Renders the trial balance.
#[must_use]
pub fn render(output: &ReportOutput, report: &TrialBalanceReport) -> Sheet {
    let mut sheet = Sheet::new(SHEET);
    sheet.push(Row::new().at(0, SHEET));
    sheet.skip(1);

    if let Some(from) = report.date_from {
        sheet.push(Row::new().at(0, "From").at(1, from));
    }
    if let Some(to) = report.date_to {
        sheet.push(Row::new().at(0, "To").at(1, to));
    }
    sheet.push(Row::new().at(0, "Journals").at(1, output.summary.journals_label()));
    sheet.push(Row::new().at(0, "Target Move").at(1, output.summary.target_move.as_str()));
    sheet.skip(1);

    sheet.push(
        Row::new()
            .at(2, "Opening Balance")
            .at(4, "Current Transaction")
            .at(6, "Closing Balance"),
    );
    sheet.push(Row::new().from_column(
        0,
        [
            "Account Code",
            "Account Name",
            "Opening Debit",
            "Opening Credit",
            "Debit",
            "Credit",
            "Closing Debit",
            "Closing Credit",
        ],
    ));

    for row in &report.rows {
        sheet.push(triad(
            Row::new().at(0, row.code.as_str()).at(1, row.name.as_str()),
            row.rolled.opening,
            row.rolled.movement,
            row.rolled.closing,
        ));
    }
    let totals = &report.totals;
    sheet.push(triad(
        Row::new().at(1, "Total"),
        totals.opening,
        totals.movement,
        totals.closing,
    ));
    sheet
}

fn triad(row: Row, opening: DebitCredit, movement: DebitCredit, closing: DebitCredit) -> Row {
    row.from_column(
        2,
        [
            opening.debit,
            opening.credit,
            movement.debit,
            movement.credit,
            closing.debit,
            closing.credit,
        ],
    )
}
