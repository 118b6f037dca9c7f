//! In-crate fixture ledger for unit tests.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::{
    AccountId, JournalId, LineId, MoveId, PartnerId, PartnerTagId, ProductId,
    ReconciliationId, ReportNodeId,
};

use crate::currency::{ExchangeRate, RateSource, RateTable};
use crate::hierarchy::{HierarchyNode, NodeKind, Sign};
use crate::ledger::{
    Account, AccountType, InvoiceLine, Journal, LedgerLine, MoveState, PartialReconciliation,
    Partner, PartnerTag,
};
use crate::selection::{LedgerStore, LineLookup, LinePredicate, StoreError};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ledger held in memory, with builder helpers for tests.
#[derive(Default)]
pub struct FixtureLedger {
    next_id: u128,
    pub accounts: Vec<Account>,
    pub partners: Vec<Partner>,
    pub tags: Vec<PartnerTag>,
    pub journals: Vec<Journal>,
    pub lines: Vec<LedgerLine>,
    pub invoice_lines: Vec<InvoiceLine>,
    pub nodes: Vec<HierarchyNode>,
    pub rates: RateTable,
}

impl FixtureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u128 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_partner(&mut self, name: &str) -> PartnerId {
        let id = PartnerId::from_u128(self.next());
        self.partners.push(Partner {
            id,
            name: name.to_string(),
            tag_ids: Vec::new(),
        });
        id
    }

    pub fn tag(&mut self, name: &str, partners: &[PartnerId]) -> PartnerTagId {
        let id = PartnerTagId::from_u128(self.next());
        self.tags.push(PartnerTag {
            id,
            name: name.to_string(),
        });
        for partner in self.partners.iter_mut().filter(|p| partners.contains(&p.id)) {
            partner.tag_ids.push(id);
        }
        id
    }

    pub fn add_account(&mut self, code: &str, name: &str, account_type: AccountType) -> AccountId {
        let id = AccountId::from_u128(self.next());
        self.accounts.push(Account {
            id,
            code: code.to_string(),
            name: name.to_string(),
            account_type,
            retained_earnings: false,
            currency: None,
        });
        id
    }

    pub fn retained_earnings(&mut self, code: &str, name: &str) -> AccountId {
        let id = self.add_account(code, name, AccountType::Other);
        self.account_mut(id).retained_earnings = true;
        id
    }

    pub fn account_mut(&mut self, id: AccountId) -> &mut Account {
        self.accounts.iter_mut().find(|a| a.id == id).unwrap()
    }

    pub fn add_journal(&mut self, code: &str) -> JournalId {
        let id = JournalId::from_u128(self.next());
        self.journals.push(Journal {
            id,
            code: code.to_string(),
            name: format!("{code} journal"),
        });
        id
    }

    /// Posted line in company currency (USD); positive balance is a debit.
    pub fn line(
        &mut self,
        account: AccountId,
        partner: Option<PartnerId>,
        journal: JournalId,
        on: NaiveDate,
        balance: Decimal,
    ) -> LineId {
        let n = self.next();
        let id = LineId::from_u128(n);
        self.lines.push(LedgerLine {
            id,
            account_id: account,
            partner_id: partner,
            journal_id: journal,
            move_id: MoveId::from_u128(n),
            move_name: format!("MOVE/{n:04}"),
            label: format!("line {n}"),
            date: on,
            date_maturity: None,
            debit: balance.max(Decimal::ZERO),
            credit: (-balance).max(Decimal::ZERO),
            balance,
            currency: "USD".to_string(),
            company_currency: "USD".to_string(),
            move_state: MoveState::Posted,
            reconciled: false,
            matched_debits: Vec::new(),
            matched_credits: Vec::new(),
        });
        id
    }

    pub fn line_mut(&mut self, id: LineId) -> &mut LedgerLine {
        self.lines.iter_mut().find(|l| l.id == id).unwrap()
    }

    pub fn move_of(&self, id: LineId) -> MoveId {
        self.lines.iter().find(|l| l.id == id).unwrap().move_id
    }

    /// Settles `amount` of `debit_line` with `credit_line`.
    pub fn reconcile(
        &mut self,
        debit_line: LineId,
        credit_line: LineId,
        amount: Decimal,
        max_date: NaiveDate,
    ) {
        let partial = PartialReconciliation {
            id: ReconciliationId::from_u128(self.next()),
            debit_line_id: debit_line,
            credit_line_id: credit_line,
            amount,
            max_date,
            debit_move_state: MoveState::Posted,
            credit_move_state: MoveState::Posted,
        };
        let debit = self.line_mut(debit_line);
        debit.matched_credits.push(partial.clone());
        let settled: Decimal = debit.matched_credits.iter().map(|p| p.amount).sum();
        debit.reconciled = settled >= debit.balance.abs();
        let credit = self.line_mut(credit_line);
        credit.matched_debits.push(partial);
        let settled: Decimal = credit.matched_debits.iter().map(|p| p.amount).sum();
        credit.reconciled = settled >= credit.balance.abs();
    }

    pub fn invoice_line(&mut self, move_id: MoveId, product: Option<ProductId>, total: Decimal) {
        self.invoice_lines.push(InvoiceLine {
            move_id,
            product_id: product,
            price_total: total,
        });
    }

    pub fn add_rate(&mut self, from: &str, to: &str, rate: Decimal, on: NaiveDate) {
        self.rates.push(ExchangeRate::new(from, to, rate, on));
    }

    pub fn node(
        &mut self,
        parent: Option<ReportNodeId>,
        name: &str,
        sequence: i32,
        kind: NodeKind,
        sign: Sign,
    ) -> ReportNodeId {
        let id = ReportNodeId::from_u128(self.next());
        self.nodes.push(HierarchyNode {
            id,
            parent_id: parent,
            name: name.to_string(),
            sequence,
            kind,
            sign,
            hide_heading: false,
        });
        id
    }
}

impl LineLookup for FixtureLedger {
    fn account_type(&self, account_id: AccountId) -> Option<AccountType> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .map(|a| a.account_type)
    }

    fn partner_has_tag(&self, partner_id: PartnerId, tags: &BTreeSet<PartnerTagId>) -> bool {
        self.partners
            .iter()
            .find(|p| p.id == partner_id)
            .is_some_and(|p| p.tag_ids.iter().any(|t| tags.contains(t)))
    }
}

impl RateSource for FixtureLedger {
    fn rate(&self, from: &str, to: &str, on: NaiveDate) -> Option<Decimal> {
        self.rates.rate(from, to, on)
    }
}

impl LedgerStore for FixtureLedger {
    fn lines(&self, predicate: &LinePredicate) -> Result<Vec<LedgerLine>, StoreError> {
        let mut lines: Vec<LedgerLine> = self
            .lines
            .iter()
            .filter(|l| predicate.matches(l, self))
            .cloned()
            .collect();
        lines.sort_by_key(|l| (l.date, l.id));
        Ok(lines)
    }

    fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts = self.accounts.clone();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    fn account(&self, id: AccountId) -> Result<Account, StoreError> {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("account", id))
    }

    fn partner(&self, id: PartnerId) -> Result<Partner, StoreError> {
        self.partners
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("partner", id))
    }

    fn partner_tag(&self, id: PartnerTagId) -> Result<PartnerTag, StoreError> {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("partner tag", id))
    }

    fn journal(&self, id: JournalId) -> Result<Journal, StoreError> {
        self.journals
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("journal", id))
    }

    fn partials_settled_after(
        &self,
        on: NaiveDate,
    ) -> Result<Vec<PartialReconciliation>, StoreError> {
        let mut seen = HashMap::new();
        for partial in self
            .lines
            .iter()
            .flat_map(|l| l.matched_debits.iter().chain(&l.matched_credits))
            .filter(|p| p.max_date > on)
        {
            seen.entry(partial.id).or_insert_with(|| partial.clone());
        }
        Ok(seen.into_values().collect())
    }

    fn invoice_lines(&self, move_id: MoveId) -> Result<Vec<InvoiceLine>, StoreError> {
        Ok(self
            .invoice_lines
            .iter()
            .filter(|l| l.move_id == move_id)
            .cloned()
            .collect())
    }

    fn hierarchy_nodes(&self) -> Result<Vec<HierarchyNode>, StoreError> {
        Ok(self.nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builders_and_store_lookups_coexist() {
        let mut ledger = FixtureLedger::new();
        let partner = ledger.add_partner("Azure Interior");
        let account = ledger.add_account("1100", "Receivables", AccountType::Receivable);
        let journal = ledger.add_journal("INV");
        ledger.add_rate("USD", "EUR", dec!(0.9), date(2024, 1, 1));

        assert_eq!(ledger.partner(partner).unwrap().name, "Azure Interior");
        assert_eq!(ledger.account(account).unwrap().code, "1100");
        assert_eq!(ledger.journal(journal).unwrap().code, "INV");
        assert_eq!(ledger.rate("USD", "EUR", date(2024, 6, 1)), Some(dec!(0.9)));
    }
}
