//! Balance roller: opening, period movement and closing per account.

use std::collections::HashMap;

use chrono::NaiveDate;
use tally_shared::types::{AccountId, Currency};
use tracing::debug;

use super::types::{RolledBalance, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};
use crate::currency::{CurrencyNormalizer, is_zero};
use crate::ledger::{Account, DebitCredit};
use crate::reports::ReportError;
use crate::selection::{DisplayMode, LedgerStore, LinePredicate, LineSelector, ReportFilter};

/// Accounts a report covers: the filter's accounts and account types, or all.
#[must_use]
pub fn accounts_in_scope<'a>(accounts: &'a [Account], filter: &ReportFilter) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|a| filter.account_ids.is_empty() || filter.account_ids.contains(&a.id))
        .filter(|a| filter.account_types.is_empty() || filter.account_types.contains(&a.account_type))
        .collect()
}

/// The single retained-earnings account among `accounts`, if any.
pub fn retained_earnings_account<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<Option<&'a Account>, ReportError> {
    let mut flagged = accounts.into_iter().filter(|a| a.retained_earnings);
    let first = flagged.next();
    if flagged.next().is_some() {
        return Err(ReportError::MultipleRetainedEarnings);
    }
    Ok(first)
}

/// Rolls accounts forward from their opening balance.
///
/// Opening balances only carry balance-sheet accounts; income and expense
/// history before the period folds into the retained-earnings account.
#[derive(Debug, Clone, Default)]
pub struct BalanceRoller {
    retained_earnings: Option<AccountId>,
    opening: HashMap<AccountId, DebitCredit>,
    movement: HashMap<AccountId, DebitCredit>,
    prior_profit_and_loss: DebitCredit,
}

impl BalanceRoller {
    /// Creates an empty roller.
    #[must_use]
    pub fn new(retained_earnings: Option<AccountId>) -> Self {
        Self {
            retained_earnings,
            ..Self::default()
        }
    }

    /// Selects and accumulates the lines of a trial-balance filter.
    ///
    /// `accounts` is the whole chart of accounts; amounts are converted into
    /// `currency` as of `as_of`.
    pub fn prepare<S: LedgerStore + ?Sized>(
        store: &S,
        filter: &ReportFilter,
        accounts: &[Account],
        currency: &Currency,
        as_of: NaiveDate,
    ) -> Result<Self, ReportError> {
        let retained_earnings = retained_earnings_account(accounts_in_scope(accounts, filter))?;
        let by_id: HashMap<AccountId, &Account> = accounts.iter().map(|a| (a.id, a)).collect();
        let selector = LineSelector::new(store);
        let normalizer = CurrencyNormalizer::new(store);
        let mut roller = Self::new(retained_earnings.map(|a| a.id));

        if let Some(date_from) = filter.date_from {
            // Prior profit and loss is absorbed whatever the account selection.
            let mut history = filter.clone();
            history.account_ids.clear();
            history.account_types.clear();
            let lines = selector.select(
                &history,
                None,
                None,
                &[],
                LinePredicate::DateBefore(date_from),
            )?;
            for line in &lines {
                if let Some(account) = by_id.get(&line.account_id) {
                    roller.add_opening(account, normalizer.line_columns(line, currency, as_of)?);
                }
            }
        }

        let lines = selector.select(
            filter,
            filter.date_from,
            filter.date_to,
            &[],
            LinePredicate::Always,
        )?;
        for line in &lines {
            roller.add_movement(line.account_id, normalizer.line_columns(line, currency, as_of)?);
        }

        debug!(
            opening_accounts = roller.opening.len(),
            moved_accounts = roller.movement.len(),
            "Prepared balance roller"
        );
        Ok(roller)
    }

    /// Adds a line dated before the period.
    pub fn add_opening(&mut self, account: &Account, columns: DebitCredit) {
        if account.account_type.is_profit_and_loss() {
            self.prior_profit_and_loss += columns;
        } else {
            *self.opening.entry(account.id).or_default() += columns;
        }
    }

    /// Adds a line dated inside the period.
    pub fn add_movement(&mut self, account_id: AccountId, columns: DebitCredit) {
        *self.movement.entry(account_id).or_default() += columns;
    }

    /// Opening, movement and closing of one account.
    #[must_use]
    pub fn roll(&self, account: &Account) -> RolledBalance {
        let mut opening = self.opening.get(&account.id).copied().unwrap_or_default();
        if self.retained_earnings == Some(account.id) {
            opening += self.prior_profit_and_loss;
        }
        let opening = opening.netted();
        let movement = self.movement.get(&account.id).copied().unwrap_or_default();
        RolledBalance {
            opening,
            movement,
            closing: DebitCredit::from_net(opening.net() + movement.net()),
        }
    }

    /// Builds the trial balance over `accounts` (ordered by code).
    #[must_use]
    pub fn trial_balance(
        &self,
        accounts: &[&Account],
        display: DisplayMode,
        currency: &Currency,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> TrialBalanceReport {
        let mut totals = TrialBalanceTotals::default();
        let mut rows = Vec::new();
        for account in accounts {
            let rolled = self.roll(account);
            let shown = match display {
                DisplayMode::All => true,
                DisplayMode::Movement => [
                    rolled.opening.debit,
                    rolled.opening.credit,
                    rolled.movement.debit,
                    rolled.movement.credit,
                ]
                .into_iter()
                .any(|amount| !is_zero(amount, currency)),
                DisplayMode::NotZero => !is_zero(rolled.closing.net(), currency),
            };
            if !shown {
                continue;
            }
            totals.opening += rolled.opening;
            totals.movement += rolled.movement;
            totals.closing += rolled.closing;
            rows.push(TrialBalanceRow {
                account_id: account.id,
                code: account.code.clone(),
                name: account.name.clone(),
                rolled,
            });
        }
        TrialBalanceReport {
            date_from,
            date_to,
            rows,
            totals,
        }
    }
}
