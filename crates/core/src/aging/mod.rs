//! Partner aging.
//!
//! Open receivable/payable amounts are aged against an as-of date into seven
//! windows per partner:
//! - four windows sized by the configured period length
//! - fixed 121-180 and 181-365 bands
//! - an open-ended 365+ bucket
//!
//! Payments not yet allocated to invoices are reported separately.

pub mod bucketer;
pub mod periods;
pub mod types;


pub use bucketer::{AgingBucketer, UNKNOWN_PARTNER, display_partner_name, split_duty_vat};
pub use periods::{AgingPeriods, AgingWindow};
pub use types::{
    AgedLine, AgingBucket, AgingLineDetail, AgingPartnerRow, AgingReport, AgingTotals,
    BucketAmount, BucketTable,
};
