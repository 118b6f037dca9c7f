//! Aging report types.

use std::ops::{AddAssign, Index, IndexMut};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{LineId, PartnerId};

use crate::ledger::AccountType;

/// One of the seven aging windows, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// 0-30 days (first custom window).
    Days0To30,
    /// 31-60 days.
    Days31To60,
    /// 61-90 days.
    Days61To90,
    /// 91-120 days (last custom window).
    Days91To120,
    /// 121-180 days (fixed 60-day band).
    Days121To180,
    /// 181-365 days (fixed 185-day band).
    Days181To365,
    /// Older than every bounded window.
    Over365,
}

impl AgingBucket {
    /// Number of buckets.
    pub const COUNT: usize = 7;

    /// All buckets, newest first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Days0To30,
        Self::Days31To60,
        Self::Days61To90,
        Self::Days91To120,
        Self::Days121To180,
        Self::Days181To365,
        Self::Over365,
    ];

    /// Slot of the bucket in a [`BucketTable`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column band label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Days0To30 => "0-30",
            Self::Days31To60 => "31-60",
            Self::Days61To90 => "61-90",
            Self::Days91To120 => "91-120",
            Self::Days121To180 => "121-180",
            Self::Days181To365 => "181-365",
            Self::Over365 => "365+",
        }
    }

    /// Label used in the summary block.
    #[must_use]
    pub const fn summary_label(self) -> &'static str {
        match self {
            Self::Over365 => "365 +",
            other => other.label(),
        }
    }
}

/// Amount with its duty and VAT portions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketAmount {
    /// Open amount.
    pub amount: Decimal,
    /// Portion attributed to duty products.
    pub duty_amount: Decimal,
    /// Portion attributed to VAT products.
    pub vat_amount: Decimal,
}

impl AddAssign for BucketAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.amount += rhs.amount;
        self.duty_amount += rhs.duty_amount;
        self.vat_amount += rhs.vat_amount;
    }
}

/// Fixed table of seven bucket slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTable([BucketAmount; AgingBucket::COUNT]);

impl BucketTable {
    /// Buckets with their amounts, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (AgingBucket, &BucketAmount)> {
        AgingBucket::ALL.into_iter().zip(self.0.iter())
    }

    /// Sum over all seven buckets.
    #[must_use]
    pub fn total(&self) -> BucketAmount {
        let mut total = BucketAmount::default();
        for amount in &self.0 {
            total += *amount;
        }
        total
    }
}

impl Index<AgingBucket> for BucketTable {
    type Output = BucketAmount;

    fn index(&self, bucket: AgingBucket) -> &BucketAmount {
        &self.0[bucket.index()]
    }
}

impl IndexMut<AgingBucket> for BucketTable {
    fn index_mut(&mut self, bucket: AgingBucket) -> &mut BucketAmount {
        &mut self.0[bucket.index()]
    }
}

impl AddAssign for BucketTable {
    fn add_assign(&mut self, rhs: Self) {
        for bucket in AgingBucket::ALL {
            self[bucket] += rhs[bucket];
        }
    }
}

/// A line prepared for aging: amounts already in company currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedLine {
    /// Source line.
    pub line_id: LineId,
    /// Partner, if any.
    pub partner_id: Option<PartnerId>,
    /// Partner display name (full length).
    pub partner_name: Option<String>,
    /// Move reference.
    pub move_name: String,
    /// Journal code.
    pub journal_code: String,
    /// Account code.
    pub account_code: String,
    /// Type of the line's account.
    pub account_type: AccountType,
    /// Maturity date, or posting date when there is none.
    pub due_date: NaiveDate,
    /// Balance as of the report date.
    pub amount: Decimal,
    /// Gross duty amount of the owning move.
    pub duty_amount: Decimal,
    /// Gross VAT amount of the owning move.
    pub vat_amount: Decimal,
}

/// Line-level detail under a partner row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingLineDetail {
    /// Source line.
    pub line_id: LineId,
    /// Move reference.
    pub move_name: String,
    /// Due date used for bucketing.
    pub due_date: NaiveDate,
    /// Journal code.
    pub journal_code: String,
    /// Account code.
    pub account_code: String,
    /// Paid (unallocated) amount; zero for open lines.
    pub unallocated: Decimal,
    /// Bucket of the open amount; `None` for paid lines.
    pub bucket: Option<AgingBucket>,
    /// Open amount with its duty/VAT split.
    pub amount: BucketAmount,
}

/// One partner's aging row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingPartnerRow {
    /// Partner; `None` for the synthetic "Unknown Partner" row.
    pub partner_id: Option<PartnerId>,
    /// Display name (truncated).
    pub name: String,
    /// Paid amounts not yet allocated to invoices.
    pub unallocated: Decimal,
    /// Open amounts per bucket.
    pub buckets: BucketTable,
    /// `unallocated` plus every bucket amount.
    pub total: Decimal,
    /// Detail lines, in date order.
    pub lines: Vec<AgingLineDetail>,
}

/// Grand totals over every reported partner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingTotals {
    /// Sum of unallocated amounts.
    pub unallocated: Decimal,
    /// Per-bucket sums.
    pub buckets: BucketTable,
    /// Sum of partner totals.
    pub total: Decimal,
}

/// Result of the aging bucketer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Report date.
    pub as_of: NaiveDate,
    /// Width of the custom windows.
    pub period_length_days: u32,
    /// Partner rows ordered by upper-cased name, "Unknown Partner" last.
    pub partners: Vec<AgingPartnerRow>,
    /// Grand totals.
    pub totals: AgingTotals,
}
