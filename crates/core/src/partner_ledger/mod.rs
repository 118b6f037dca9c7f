//! Partner ledger: per-partner line listings with a running balance.

pub mod sequencer;
pub mod types;


pub use sequencer::{INITIAL_BALANCE, RunningBalanceSequencer};
pub use types::{
    LedgerEntry, LedgerRow, OpeningBalance, PartnerLedgerReport, PartnerLedgerSection,
};
