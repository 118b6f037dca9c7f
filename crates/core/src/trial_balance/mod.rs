//! Trial balance and the balance roller behind it.

pub mod roller;
pub mod types;


pub use roller::{BalanceRoller, accounts_in_scope, retained_earnings_account};
pub use types::{RolledBalance, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};
