//! In-memory ledger store.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::currency::{RateSource, RateTable};
use tally_core::hierarchy::HierarchyNode;
use tally_core::ledger::{
    Account, AccountType, InvoiceLine, Journal, LedgerLine, PartialReconciliation, Partner,
    PartnerTag,
};
use tally_core::selection::{LedgerStore, LineLookup, LinePredicate, StoreError};
use tally_shared::types::{
    AccountId, JournalId, LineId, MoveId, PartnerId, PartnerTagId,
};
use tally_shared::{AppError, AppResult};
use tracing::debug;

use crate::snapshot::{LedgerSnapshot, LineRecord};

/// Ledger store evaluating predicates over a loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    accounts: Vec<Account>,
    account_index: HashMap<AccountId, usize>,
    partners: HashMap<PartnerId, Partner>,
    tags: HashMap<PartnerTagId, PartnerTag>,
    journals: HashMap<JournalId, Journal>,
    lines: Vec<LedgerLine>,
    partials: Vec<PartialReconciliation>,
    invoice_lines: HashMap<MoveId, Vec<InvoiceLine>>,
    rates: RateTable,
    hierarchy: Vec<HierarchyNode>,
}

impl InMemoryLedger {
    /// Builds the store from a snapshot.
    ///
    /// Every line must reference a known account, journal and partner, and
    /// every settlement two known lines.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> AppResult<Self> {
        let LedgerSnapshot {
            company_currency,
            exchange_rates,
            mut accounts,
            partner_tags,
            partners,
            journals,
            lines,
            reconciliations,
            invoice_lines,
            hierarchy,
        } = snapshot;

        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        let account_index = accounts
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect::<HashMap<_, _>>();
        let partners: HashMap<_, _> = partners.into_iter().map(|p| (p.id, p)).collect();
        let journals: HashMap<_, _> = journals.into_iter().map(|j| (j.id, j)).collect();

        let mut ledger_lines = Vec::with_capacity(lines.len());
        for record in lines {
            if !account_index.contains_key(&record.account_id) {
                return Err(unknown_reference(record.id, "account", record.account_id));
            }
            if !journals.contains_key(&record.journal_id) {
                return Err(unknown_reference(record.id, "journal", record.journal_id));
            }
            if let Some(partner_id) = record.partner_id
                && !partners.contains_key(&partner_id)
            {
                return Err(unknown_reference(record.id, "partner", partner_id));
            }
            ledger_lines.push(into_line(record, &company_currency));
        }
        ledger_lines.sort_by_key(|l| (l.date, l.id));
        let positions: HashMap<LineId, usize> = ledger_lines
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id, i))
            .collect();

        let mut partials = Vec::with_capacity(reconciliations.len());
        for record in reconciliations {
            let (Some(&debit), Some(&credit)) = (
                positions.get(&record.debit_line_id),
                positions.get(&record.credit_line_id),
            ) else {
                return Err(AppError::Validation(format!(
                    "Reconciliation {} references an unknown line",
                    record.id
                )));
            };
            let partial = PartialReconciliation {
                id: record.id,
                debit_line_id: record.debit_line_id,
                credit_line_id: record.credit_line_id,
                amount: record.amount,
                max_date: record.max_date,
                debit_move_state: ledger_lines[debit].move_state,
                credit_move_state: ledger_lines[credit].move_state,
            };
            ledger_lines[debit].matched_credits.push(partial.clone());
            ledger_lines[credit].matched_debits.push(partial.clone());
            partials.push(partial);
        }
        for line in &mut ledger_lines {
            let settled: Decimal = line
                .matched_debits
                .iter()
                .chain(&line.matched_credits)
                .map(|p| p.amount)
                .sum();
            line.reconciled = !line.balance.is_zero() && settled >= line.balance.abs();
        }

        let mut by_move: HashMap<MoveId, Vec<InvoiceLine>> = HashMap::new();
        for line in invoice_lines {
            by_move.entry(line.move_id).or_default().push(line);
        }

        debug!(
            accounts = accounts.len(),
            lines = ledger_lines.len(),
            reconciliations = partials.len(),
            "Built in-memory ledger"
        );
        Ok(Self {
            account_index,
            accounts,
            partners,
            tags: partner_tags.into_iter().map(|t| (t.id, t)).collect(),
            journals,
            lines: ledger_lines,
            partials,
            invoice_lines: by_move,
            rates: RateTable::new(exchange_rates),
            hierarchy,
        })
    }

    /// Loads a snapshot file and builds the store.
    pub fn load(path: impl AsRef<std::path::Path>) -> AppResult<Self> {
        Self::from_snapshot(LedgerSnapshot::load(path)?)
    }

    /// Number of ledger lines held.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

fn unknown_reference(line: LineId, entity: &str, id: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("Line {line} references unknown {entity} {id}"))
}

fn into_line(record: LineRecord, company_currency: &str) -> LedgerLine {
    let balance = record.debit - record.credit;
    LedgerLine {
        id: record.id,
        account_id: record.account_id,
        partner_id: record.partner_id,
        journal_id: record.journal_id,
        move_id: record.move_id,
        move_name: record.move_name,
        label: record.label,
        date: record.date,
        date_maturity: record.date_maturity,
        debit: record.debit,
        credit: record.credit,
        balance,
        currency: record
            .currency
            .unwrap_or_else(|| company_currency.to_string()),
        company_currency: company_currency.to_string(),
        move_state: record.move_state,
        reconciled: false,
        matched_debits: Vec::new(),
        matched_credits: Vec::new(),
    }
}

impl LineLookup for InMemoryLedger {
    fn account_type(&self, account_id: AccountId) -> Option<AccountType> {
        self.account_index
            .get(&account_id)
            .map(|&i| self.accounts[i].account_type)
    }

    fn partner_has_tag(&self, partner_id: PartnerId, tags: &BTreeSet<PartnerTagId>) -> bool {
        self.partners
            .get(&partner_id)
            .is_some_and(|p| p.tag_ids.iter().any(|t| tags.contains(t)))
    }
}

impl RateSource for InMemoryLedger {
    fn rate(&self, from: &str, to: &str, on: NaiveDate) -> Option<Decimal> {
        self.rates.rate(from, to, on)
    }
}

impl LedgerStore for InMemoryLedger {
    fn lines(&self, predicate: &LinePredicate) -> Result<Vec<LedgerLine>, StoreError> {
        Ok(self
            .lines
            .iter()
            .filter(|l| predicate.matches(l, self))
            .cloned()
            .collect())
    }

    fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.clone())
    }

    fn account(&self, id: AccountId) -> Result<Account, StoreError> {
        self.account_index
            .get(&id)
            .map(|&i| self.accounts[i].clone())
            .ok_or_else(|| StoreError::not_found("account", id))
    }

    fn partner(&self, id: PartnerId) -> Result<Partner, StoreError> {
        self.partners
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("partner", id))
    }

    fn partner_tag(&self, id: PartnerTagId) -> Result<PartnerTag, StoreError> {
        self.tags
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("partner tag", id))
    }

    fn journal(&self, id: JournalId) -> Result<Journal, StoreError> {
        self.journals
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("journal", id))
    }

    fn partials_settled_after(
        &self,
        on: NaiveDate,
    ) -> Result<Vec<PartialReconciliation>, StoreError> {
        Ok(self
            .partials
            .iter()
            .filter(|p| p.max_date > on)
            .cloned()
            .collect())
    }

    fn invoice_lines(&self, move_id: MoveId) -> Result<Vec<InvoiceLine>, StoreError> {
        Ok(self.invoice_lines.get(&move_id).cloned().unwrap_or_default())
    }

    fn hierarchy_nodes(&self) -> Result<Vec<HierarchyNode>, StoreError> {
        Ok(self.hierarchy.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ReconciliationRecord;
    use rust_decimal_macros::dec;
    use tally_core::ledger::MoveState;
    use tally_shared::types::ReconciliationId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: u128, debit: Decimal, credit: Decimal) -> LineRecord {
        LineRecord {
            id: LineId::from_u128(id),
            account_id: AccountId::from_u128(1),
            partner_id: None,
            journal_id: JournalId::from_u128(2),
            move_id: MoveId::from_u128(id),
            move_name: format!("MISC/{id:04}"),
            label: String::new(),
            date: date(2024, 1, 1),
            date_maturity: None,
            debit,
            credit,
            currency: None,
            move_state: MoveState::Posted,
        }
    }

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            company_currency: "USD".to_string(),
            accounts: vec![Account {
                id: AccountId::from_u128(1),
                code: "1100".to_string(),
                name: "Receivables".to_string(),
                account_type: AccountType::Receivable,
                retained_earnings: false,
                currency: None,
            }],
            journals: vec![Journal {
                id: JournalId::from_u128(2),
                code: "MISC".to_string(),
                name: "Miscellaneous".to_string(),
            }],
            lines: vec![
                record(10, dec!(100), Decimal::ZERO),
                record(11, Decimal::ZERO, dec!(60)),
            ],
            ..LedgerSnapshot::default()
        }
    }

    fn settle(amount: Decimal) -> ReconciliationRecord {
        ReconciliationRecord {
            id: ReconciliationId::from_u128(20),
            debit_line_id: LineId::from_u128(10),
            credit_line_id: LineId::from_u128(11),
            amount,
            max_date: date(2024, 2, 1),
        }
    }

    #[test]
    fn test_lines_derive_balance_and_currency() {
        let ledger = InMemoryLedger::from_snapshot(snapshot()).unwrap();
        let lines = ledger.lines(&LinePredicate::Always).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].balance, dec!(-60));
        assert_eq!(lines[1].currency, "USD");
        assert!(!lines[0].reconciled);
    }

    #[test]
    fn test_reconciliations_link_both_sides() {
        let mut snapshot = snapshot();
        snapshot.reconciliations.push(settle(dec!(60)));
        let ledger = InMemoryLedger::from_snapshot(snapshot).unwrap();
        let lines = ledger.lines(&LinePredicate::Always).unwrap();

        assert_eq!(lines[0].matched_credits.len(), 1);
        assert!(!lines[0].reconciled);
        assert_eq!(lines[1].matched_debits.len(), 1);
        assert!(lines[1].reconciled);
        assert_eq!(lines[0].balance_as_of(date(2024, 3, 1)), dec!(40));

        assert_eq!(ledger.partials_settled_after(date(2024, 1, 31)).unwrap().len(), 1);
        assert!(ledger.partials_settled_after(date(2024, 2, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_references_are_rejected() {
        let mut bad_account = snapshot();
        bad_account.lines[0].account_id = AccountId::from_u128(99);
        assert!(matches!(
            InMemoryLedger::from_snapshot(bad_account),
            Err(AppError::Validation(_))
        ));

        let mut bad_partial = snapshot();
        let mut partial = settle(dec!(10));
        partial.credit_line_id = LineId::from_u128(99);
        bad_partial.reconciliations.push(partial);
        assert!(matches!(
            InMemoryLedger::from_snapshot(bad_partial),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_lookups() {
        let ledger = InMemoryLedger::from_snapshot(snapshot()).unwrap();
        assert_eq!(ledger.line_count(), 2);
        assert_eq!(
            ledger.account_type(AccountId::from_u128(1)),
            Some(AccountType::Receivable)
        );
        assert_eq!(ledger.journal(JournalId::from_u128(2)).unwrap().code, "MISC");
        let err = ledger.partner(PartnerId::from_u128(5)).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(ledger.invoice_lines(MoveId::from_u128(10)).unwrap().is_empty());
    }
}
