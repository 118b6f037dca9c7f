//! Partner aging sheets: a summary sheet and a per-line detail sheet.

use rust_decimal::Decimal;
use tally_core::aging::{AgingBucket, AgingLineDetail, AgingReport, BucketAmount, BucketTable};
use tally_core::reports::ReportOutput;

use crate::workbook::{Row, Sheet};

/// Summary sheet name.
pub const SUMMARY_SHEET: &str = "Partner Aging - Summary";
/// Detail sheet name.
pub const DETAIL_SHEET: &str = "Partner Aging - Detail";

const TRIPLET: [&str; 3] = ["Total", "Duty Amount", "Tax Amount"];
const SUMMARY_FIRST_BAND: usize = 2;
const DETAIL_FIRST_BAND: usize = 5;

/// Renders both aging sheets.
#[must_use]
pub fn render(output: &ReportOutput, report: &AgingReport) -> Vec<Sheet> {
    vec![summary_sheet(output, report), detail_sheet(output, report)]
}

fn summary_sheet(output: &ReportOutput, report: &AgingReport) -> Sheet {
    let mut sheet = Sheet::new(SUMMARY_SHEET);
    sheet.push(Row::new().at(0, SUMMARY_SHEET));
    filter_rows(&mut sheet, output, report);
    sheet.skip(1);

    let mut bands = Row::new().at(0, "Partner").at(1, "Unallocated");
    for (i, bucket) in AgingBucket::ALL.iter().enumerate() {
        bands = bands.at(SUMMARY_FIRST_BAND + 3 * i, bucket.label());
    }
    sheet.push(bands.at(SUMMARY_FIRST_BAND + 3 * AgingBucket::COUNT, "Total"));
    sheet.push(triplet_header(SUMMARY_FIRST_BAND, AgingBucket::COUNT + 1));

    for partner in &report.partners {
        sheet.push(summary_row(
            Row::new().at(0, partner.name.as_str()),
            partner.unallocated,
            &partner.buckets,
            partner.total,
        ));
    }
    let totals = &report.totals;
    sheet.push(summary_row(
        Row::new().at(0, "Total"),
        totals.unallocated,
        &totals.buckets,
        totals.total,
    ));

    sheet.skip(4);
    sheet.push(Row::new().at(0, "Summary"));
    sheet.push(Row::new().from_column(0, ["Period", "Amount", "%"]));
    for bucket in AgingBucket::ALL {
        let amount = totals.buckets[bucket].amount;
        sheet.push(
            Row::new()
                .at(0, bucket.summary_label())
                .at(1, amount)
                .at(2, percentage(amount, totals.total - totals.unallocated)),
        );
    }
    sheet.push(Row::new().at(0, "Total :").at(1, totals.total));
    sheet.push(Row::new().at(0, "Unallocated").at(1, totals.unallocated));
    sheet
}

fn detail_sheet(output: &ReportOutput, report: &AgingReport) -> Sheet {
    let mut sheet = Sheet::new(DETAIL_SHEET);
    sheet.push(Row::new().at(0, DETAIL_SHEET));
    filter_rows(&mut sheet, output, report);
    sheet.skip(1);

    let mut bands = Row::new().from_column(
        0,
        ["Entry Label", "Due Date", "Journal", "Account", "Unallocated"],
    );
    for (i, bucket) in AgingBucket::ALL.iter().enumerate() {
        bands = bands.at(DETAIL_FIRST_BAND + 3 * i, bucket.label());
    }
    sheet.push(bands);
    sheet.push(triplet_header(DETAIL_FIRST_BAND, AgingBucket::COUNT));

    for partner in &report.partners {
        sheet.push(Row::new().at(0, partner.name.as_str()));
        for line in &partner.lines {
            sheet.push(detail_row(line));
        }
        sheet.push(
            Row::new()
                .at(0, "Total")
                .at(4, partner.unallocated)
                .from_column(DETAIL_FIRST_BAND, bucket_cells(&partner.buckets)),
        );
    }
    sheet
}

/// `Date Ason` (the date the lines were aged against), then the selections.
fn filter_rows(sheet: &mut Sheet, output: &ReportOutput, report: &AgingReport) {
    sheet.push(Row::new().at(0, "Date Ason").at(1, report.as_of));
    let summary = &output.summary;
    sheet.push(Row::new().at(0, "Account Type").at(1, summary.partner_scope.as_str()));
    sheet.push(Row::new().at(0, "Target Moves").at(1, summary.target_move.as_str()));
    sheet.push(Row::new().at(0, "Partners").at(1, summary.partners_label()));
    sheet.push(Row::new().at(0, "Partner Type").at(1, summary.partner_tags_label()));
}

fn triplet_header(first: usize, bands: usize) -> Row {
    Row::new().from_column(first, TRIPLET.iter().copied().cycle().take(3 * bands))
}

fn summary_row(row: Row, unallocated: Decimal, buckets: &BucketTable, total: Decimal) -> Row {
    let overall = buckets.total();
    row.at(1, unallocated)
        .from_column(SUMMARY_FIRST_BAND, bucket_cells(buckets))
        .from_column(
            SUMMARY_FIRST_BAND + 3 * AgingBucket::COUNT,
            [total, overall.duty_amount, overall.vat_amount],
        )
}

fn detail_row(line: &AgingLineDetail) -> Row {
    let mut buckets = BucketTable::default();
    if let Some(bucket) = line.bucket {
        buckets[bucket] = line.amount;
    }
    Row::new()
        .at(0, line.move_name.as_str())
        .at(1, line.due_date)
        .at(2, line.journal_code.as_str())
        .at(3, line.account_code.as_str())
        .at(4, line.unallocated)
        .from_column(DETAIL_FIRST_BAND, bucket_cells(&buckets))
}

fn bucket_cells(buckets: &BucketTable) -> Vec<Decimal> {
    buckets
        .iter()
        .flat_map(|(_, amount)| triplet(*amount))
        .collect()
}

const fn triplet(amount: BucketAmount) -> [Decimal; 3] {
    [amount.amount, amount.duty_amount, amount.vat_amount]
}

/// Share of `amount` in the allocated total, in percent with two decimals.
fn percentage(amount: Decimal, allocated: Decimal) -> Decimal {
    amount
        .checked_div(allocated)
        .map_or(Decimal::ZERO, |share| (share * Decimal::ONE_HUNDRED).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Cell;
    use rust_decimal_macros::dec;
    use tally_shared::types::LineId;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percentage(dec!(250), dec!(1000)), dec!(25.00));
        assert_eq!(percentage(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_triplet_header() {
        let row = triplet_header(DETAIL_FIRST_BAND, 2);
        assert_eq!(row.cells.len(), DETAIL_FIRST_BAND + 6);
        assert_eq!(row.text(5), Some("Total"));
        assert_eq!(row.text(6), Some("Duty Amount"));
        assert_eq!(row.text(7), Some("Tax Amount"));
        assert_eq!(row.text(8), Some("Total"));
    }

    #[test]
    fn test_bucket_cells_are_newest_first() {
        let mut buckets = BucketTable::default();
        buckets[AgingBucket::Days31To60] = BucketAmount {
            amount: dec!(1150),
            duty_amount: dec!(100),
            vat_amount: dec!(150),
        };
        let cells = bucket_cells(&buckets);
        assert_eq!(cells.len(), 21);
        assert_eq!(&cells[3..6], &[dec!(1150), dec!(100), dec!(150)]);
        assert!(cells[..3].iter().all(Decimal::is_zero));
    }

    #[test]
    fn test_paid_detail_row_has_no_bucket_amounts() {
        let line = AgingLineDetail {
            line_id: LineId::from_u128(0xf009),
            move_name: "BNK1/2024/0002".into(),
            due_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            journal_code: "BNK1".into(),
            account_code: "2100".into(),
            unallocated: dec!(-250),
            bucket: None,
            amount: BucketAmount::default(),
        };
        let row = detail_row(&line);
        assert_eq!(row.cell(4), &Cell::Number(dec!(-250)));
        assert!(row.cells[5..].iter().all(|c| *c == Cell::Number(Decimal::ZERO)));
    }
}
