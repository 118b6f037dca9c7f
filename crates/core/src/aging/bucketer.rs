//! Aging bucketer: partitions open amounts per partner into the seven windows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_shared::types::{Currency, PartnerId};
use tracing::debug;

use super::periods::AgingPeriods;
use super::types::{
    AgedLine, AgingLineDetail, AgingPartnerRow, AgingReport, AgingTotals, BucketAmount,
    BucketTable,
};
use crate::currency::is_zero;
use crate::ledger::AccountType;

/// Label of the row collecting partner-less lines.
pub const UNKNOWN_PARTNER: &str = "Unknown Partner";

const NAME_LIMIT: usize = 45;
const NAME_KEEP: usize = 40;

/// Shortens long partner names to 40 characters plus an ellipsis.
#[must_use]
pub fn display_partner_name(name: &str) -> String {
    if name.chars().count() > NAME_LIMIT {
        let kept: String = name.chars().take(NAME_KEEP).collect();
        format!("{kept}...")
    } else {
        name.to_string()
    }
}

/// Splits an open amount into its duty and VAT portions.
///
/// Both portions take the sign of the open amount and together never exceed
/// its magnitude; duty is served first.
#[must_use]
pub fn split_duty_vat(amount: Decimal, duty: Decimal, vat: Decimal) -> BucketAmount {
    let limit = amount.abs();
    let duty_part = duty.abs().min(limit);
    let vat_part = vat.abs().min(limit - duty_part);
    let sign = if amount.is_sign_negative() {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ONE
    };
    BucketAmount {
        amount,
        duty_amount: duty_part * sign,
        vat_amount: vat_part * sign,
    }
}

/// Returns true if the as-of amount is a payment rather than an open item.
fn is_paid(account_type: AccountType, amount: Decimal) -> bool {
    match account_type {
        AccountType::Payable => amount > Decimal::ZERO,
        _ => amount < Decimal::ZERO,
    }
}

#[derive(Default)]
struct PartnerAccumulator {
    name: Option<String>,
    unallocated: Decimal,
    buckets: BucketTable,
    lines: Vec<AgingLineDetail>,
}

/// Partitions partners' open line amounts into aging buckets.
pub struct AgingBucketer<'a> {
    periods: AgingPeriods,
    currency: &'a Currency,
    include_nullified: bool,
}

impl<'a> AgingBucketer<'a> {
    /// Creates a bucketer for the given windows and company currency.
    #[must_use]
    pub const fn new(periods: AgingPeriods, currency: &'a Currency) -> Self {
        Self {
            periods,
            currency,
            include_nullified: false,
        }
    }

    /// Keeps partners whose amounts are all zero, as long as they had lines.
    #[must_use]
    pub const fn include_nullified(mut self, include: bool) -> Self {
        self.include_nullified = include;
        self
    }

    /// Buckets the lines, one row per partner.
    ///
    /// `lines` carry their balance as of the report date in company currency.
    /// Currency-zero lines are skipped; a partner row is produced when any of
    /// its amounts is nonzero.
    #[must_use]
    pub fn bucketize(&self, lines: Vec<AgedLine>) -> AgingReport {
        let mut partners: BTreeMap<Option<PartnerId>, PartnerAccumulator> = BTreeMap::new();
        let candidates = lines.len();

        for line in lines {
            let acc = partners.entry(line.partner_id).or_default();
            if acc.name.is_none() {
                acc.name.clone_from(&line.partner_name);
            }
            if is_zero(line.amount, self.currency) {
                continue;
            }

            let detail = if is_paid(line.account_type, line.amount) {
                acc.unallocated += line.amount;
                AgingLineDetail {
                    line_id: line.line_id,
                    move_name: line.move_name,
                    due_date: line.due_date,
                    journal_code: line.journal_code,
                    account_code: line.account_code,
                    unallocated: line.amount,
                    bucket: None,
                    amount: BucketAmount::default(),
                }
            } else {
                let bucket = self.periods.bucket_for(line.due_date);
                let amount = split_duty_vat(line.amount, line.duty_amount, line.vat_amount);
                acc.buckets[bucket] += amount;
                AgingLineDetail {
                    line_id: line.line_id,
                    move_name: line.move_name,
                    due_date: line.due_date,
                    journal_code: line.journal_code,
                    account_code: line.account_code,
                    unallocated: Decimal::ZERO,
                    bucket: Some(bucket),
                    amount,
                }
            };
            acc.lines.push(detail);
        }

        let mut rows: Vec<AgingPartnerRow> = partners
            .into_iter()
            .filter_map(|(partner_id, acc)| self.partner_row(partner_id, acc))
            .collect();
        rows.sort_by_cached_key(|row| (row.partner_id.is_none(), row.name.to_uppercase(), row.partner_id));

        let mut totals = AgingTotals::default();
        for row in &rows {
            totals.unallocated += row.unallocated;
            totals.buckets += row.buckets;
            totals.total += row.total;
        }

        debug!(
            as_of = %self.periods.as_of(),
            lines = candidates,
            partners = rows.len(),
            "Bucketed aging lines"
        );

        AgingReport {
            as_of: self.periods.as_of(),
            period_length_days: self.periods.period_length_days(),
            partners: rows,
            totals,
        }
    }

    fn partner_row(
        &self,
        partner_id: Option<PartnerId>,
        acc: PartnerAccumulator,
    ) -> Option<AgingPartnerRow> {
        let has_amount = !is_zero(acc.unallocated, self.currency)
            || acc
                .buckets
                .iter()
                .any(|(_, amount)| !is_zero(amount.amount, self.currency));
        if !has_amount && !self.include_nullified {
            return None;
        }

        let name = match (partner_id, acc.name) {
            (Some(_), Some(name)) => display_partner_name(&name),
            (Some(id), None) => id.to_string(),
            (None, _) => UNKNOWN_PARTNER.to_string(),
        };
        let mut lines = acc.lines;
        lines.sort_by_key(|l| (l.due_date, l.line_id));
        Some(AgingPartnerRow {
            partner_id,
            name,
            unallocated: acc.unallocated,
            total: acc.unallocated + acc.buckets.total().amount,
            buckets: acc.buckets,
            lines,
        })
    }
}
