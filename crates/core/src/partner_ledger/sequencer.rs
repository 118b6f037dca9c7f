//! Running-balance sequencer.

use super::types::{LedgerEntry, LedgerRow, OpeningBalance};
use crate::ledger::RunningBalance;

/// Label of the synthetic opening row.
pub const INITIAL_BALANCE: &str = "Initial Balance";

/// Orders ledger entries and computes their running balance.
pub struct RunningBalanceSequencer;

impl RunningBalanceSequencer {
    /// Sequences the entries of one partner or account.
    ///
    /// Rows are ordered by (date, journal code, move name, line id) whatever
    /// order the store returned them in. With an opening balance, an
    /// `Initial Balance` row comes first and seeds the running balance.
    #[must_use]
    pub fn sequence(mut entries: Vec<LedgerEntry>, opening: Option<OpeningBalance>) -> Vec<LedgerRow> {
        entries.sort_by(|a, b| {
            (a.date, &a.journal_code, &a.move_name, a.line_id).cmp(&(
                b.date,
                &b.journal_code,
                &b.move_name,
                b.line_id,
            ))
        });

        let mut rows = Vec::with_capacity(entries.len() + 1);
        let mut previous: Option<RunningBalance> = None;

        if let Some(opening) = opening {
            let running = RunningBalance::first_entry(opening.columns.net());
            previous = Some(running);
            rows.push(LedgerRow {
                line_id: None,
                date: opening.date,
                journal_code: String::new(),
                account_name: String::new(),
                move_name: String::new(),
                label: INITIAL_BALANCE.to_string(),
                debit: opening.columns.debit,
                credit: opening.columns.credit,
                running,
            });
        }

        for entry in entries {
            let running = RunningBalance::advance(previous.as_ref(), entry.debit - entry.credit);
            previous = Some(running);
            rows.push(LedgerRow {
                line_id: Some(entry.line_id),
                date: entry.date,
                journal_code: entry.journal_code,
                account_name: entry.account_name,
                move_name: entry.move_name,
                label: entry.label,
                debit: entry.debit,
                credit: entry.credit,
                running,
            });
        }
        rows
    }
}
