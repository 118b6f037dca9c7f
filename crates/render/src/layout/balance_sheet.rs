//! Hierarchical financial report sheet.

use tally_core::hierarchy::{AggregateRow, NodeTotals};
use tally_core::reports::{ALL, BalanceSheetReport, ReportOutput};

use crate::workbook::{Row, Sheet};

const INDENT: &str = "  ";

/// Renders the report hierarchy on a sheet named after the report.
#[must_use]
pub fn render(output: &ReportOutput, report: &BalanceSheetReport) -> Sheet {
    let mut sheet = Sheet::new(output.title.as_str());
    sheet.push(Row::new().at(0, output.company_name.as_str()));
    sheet.push(Row::new().at(0, output.title.as_str()));
    sheet.skip(1);

    let comparison = report.comparison;
    let dates = [
        ("From:", report.date_from),
        ("To:", report.date_to),
        ("Comparison Date From:", comparison.and_then(|c| c.from)),
        ("Comparison Date To:", comparison.and_then(|c| c.to)),
    ];
    for (label, date) in dates {
        if let Some(date) = date {
            sheet.push(Row::new().at(0, label).at(1, date));
        }
    }
    sheet.push(Row::new().at(0, filter_line(output)));
    sheet.skip(1);

    let has_comparison = comparison.is_some();
    let mut header = Row::new().from_column(0, ["Account", "Debit", "Credit", "Balance"]);
    if has_comparison {
        header = header.from_column(4, ["Comp. Debit", "Comp. Credit", "Comp. Balance"]);
    }
    sheet.push(header);

    for row in &report.rows {
        if !row.hide {
            let label = Row::new().at(0, indented(row));
            sheet.push(if row.heading {
                label
            } else {
                amounts(label, &row.totals, has_comparison)
            });
        }
        for child in &row.child_rows {
            sheet.push(amounts(
                Row::new().at(0, indented(child)),
                &child.totals,
                has_comparison,
            ));
        }
    }
    sheet
}

/// `  Accounts: …;  Journals: …;  …;  Target Moves: …`
fn filter_line(output: &ReportOutput) -> String {
    let summary = &output.summary;
    format!(
        "  Accounts: {};  Journals: {};  Account Tags: {ALL};  Analytic Tags: {ALL};  Analytic: {ALL};  Target Moves: {}",
        summary.accounts_label(),
        summary.journals_label(),
        summary.target_move,
    )
}

fn indented(row: &AggregateRow) -> String {
    format!("{}{}", INDENT.repeat(row.indent as usize), row.name)
}

fn amounts(row: Row, totals: &NodeTotals, has_comparison: bool) -> Row {
    let row = row.from_column(1, [totals.debit, totals.credit, totals.balance]);
    if has_comparison {
        row.from_column(4, [totals.debit_comp, totals.credit_comp, totals.balance_comp])
    } else {
        row
    }
}
