//! Line selection: turns a report filter into a store predicate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use super::filter::ReportFilter;
use super::predicate::LinePredicate;
use super::store::{LedgerStore, StoreError};
use crate::ledger::{AccountType, LedgerLine};

/// Produces the ledger lines relevant to a report and period.
pub struct LineSelector<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    include_unassigned_partners: bool,
}

impl<'a, S: LedgerStore + ?Sized> LineSelector<'a, S> {
    /// Creates a selector over the given store.
    pub const fn new(store: &'a S) -> Self {
        Self {
            store,
            include_unassigned_partners: false,
        }
    }

    /// Keeps partner-less lines when a partner or tag restriction is active.
    #[must_use]
    pub const fn include_unassigned_partners(mut self, include: bool) -> Self {
        self.include_unassigned_partners = include;
        self
    }

    /// Builds the conjunctive predicate for a filter and period.
    ///
    /// Each clause is added only when its filter value is non-empty. When both
    /// `account_types` and the filter carry account types, their intersection
    /// applies.
    #[must_use]
    pub fn base_predicate(
        &self,
        filter: &ReportFilter,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        account_types: &[AccountType],
    ) -> LinePredicate {
        let include_unassigned = self.include_unassigned_partners;
        let types = effective_account_types(&filter.account_types, account_types);

        LinePredicate::MoveStateIn(filter.target_move.states().into_iter().collect())
            .and(date_from.map_or(LinePredicate::Always, LinePredicate::DateOnOrAfter))
            .and(date_to.map_or(LinePredicate::Always, LinePredicate::DateOnOrBefore))
            .and_if(!filter.journal_ids.is_empty(), || {
                LinePredicate::JournalIn(filter.journal_ids.iter().copied().collect())
            })
            .and_if(!filter.account_ids.is_empty(), || {
                LinePredicate::AccountIn(filter.account_ids.iter().copied().collect())
            })
            .and_if(!filter.partner_ids.is_empty(), || LinePredicate::PartnerIn {
                partners: filter.partner_ids.iter().copied().collect(),
                include_unassigned,
            })
            .and_if(!filter.partner_tag_ids.is_empty(), || {
                LinePredicate::PartnerTagIn {
                    tags: filter.partner_tag_ids.iter().copied().collect(),
                    include_unassigned,
                }
            })
            .and(types.map_or(LinePredicate::Always, LinePredicate::AccountTypeIn))
    }

    /// Selects lines for a filter and period, with extra predicates ANDed in.
    pub fn select(
        &self,
        filter: &ReportFilter,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        account_types: &[AccountType],
        extra: LinePredicate,
    ) -> Result<Vec<LedgerLine>, StoreError> {
        let predicate = self
            .base_predicate(filter, date_from, date_to, account_types)
            .and(extra);
        let lines = self.store.lines(&predicate)?;
        debug!(
            clauses = predicate.clause_count(),
            lines = lines.len(),
            "Selected ledger lines"
        );
        Ok(lines)
    }

    /// Predicate for lines still open as of a date.
    ///
    /// A line is open when it is not fully reconciled, or when one of its
    /// settlements is dated after `as_of`.
    pub fn open_as_of(&self, as_of: NaiveDate) -> Result<LinePredicate, StoreError> {
        let settled_later: BTreeSet<_> = self
            .store
            .partials_settled_after(as_of)?
            .into_iter()
            .flat_map(|p| [p.debit_line_id, p.credit_line_id])
            .collect();
        if settled_later.is_empty() {
            return Ok(LinePredicate::Unreconciled);
        }
        Ok(LinePredicate::Unreconciled.or(LinePredicate::LineIn(settled_later)))
    }
}

/// Account types a selection is restricted to, or `None` for all.
fn effective_account_types(
    from_filter: &[AccountType],
    from_report: &[AccountType],
) -> Option<BTreeSet<AccountType>> {
    match (from_filter.is_empty(), from_report.is_empty()) {
        (true, true) => None,
        (false, true) => Some(from_filter.iter().copied().collect()),
        (true, false) => Some(from_report.iter().copied().collect()),
        (false, false) => Some(
            from_filter
                .iter()
                .copied()
                .filter(|t| from_report.contains(t))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MoveState;
    use crate::test_support::{FixtureLedger, date};
    use rust_decimal_macros::dec;
    use tally_shared::types::{JournalId, PartnerId};

    #[test]
    fn test_effective_account_types() {
        assert_eq!(effective_account_types(&[], &[]), None);
        assert_eq!(
            effective_account_types(&[AccountType::Receivable], &[]),
            Some(BTreeSet::from([AccountType::Receivable]))
        );
        assert_eq!(
            effective_account_types(
                &[AccountType::Receivable, AccountType::Income],
                &AccountType::PARTNER
            ),
            Some(BTreeSet::from([AccountType::Receivable]))
        );
        assert_eq!(
            effective_account_types(&[AccountType::Income], &AccountType::PARTNER),
            Some(BTreeSet::new())
        );
    }

    #[test]
    fn test_move_state_clause_is_always_present() {
        let ledger = FixtureLedger::new();
        let predicate = LineSelector::new(&ledger).base_predicate(&ReportFilter::new(), None, None, &[]);
        assert_eq!(
            predicate,
            LinePredicate::MoveStateIn(BTreeSet::from([MoveState::Posted]))
        );
    }

    #[test]
    fn test_clauses_follow_filter_values() {
        let ledger = FixtureLedger::new();
        let filter = ReportFilter::new()
            .with_journal(JournalId::from_u128(1))
            .with_partner(PartnerId::from_u128(2));
        let predicate = LineSelector::new(&ledger)
            .include_unassigned_partners(true)
            .base_predicate(&filter, Some(date(2024, 1, 1)), None, &[]);
        let LinePredicate::And(parts) = predicate else {
            panic!("expected a conjunction");
        };
        assert_eq!(parts.len(), 4);
        assert!(parts.contains(&LinePredicate::DateOnOrAfter(date(2024, 1, 1))));
        assert!(parts.contains(&LinePredicate::PartnerIn {
            partners: BTreeSet::from([PartnerId::from_u128(2)]),
            include_unassigned: true,
        }));
    }

    #[test]
    fn test_empty_selections_match_explicit_full_lists() {
        let mut ledger = FixtureLedger::new();
        let customer = ledger.add_partner("Azure Interior");
        let vendor = ledger.add_partner("Wood Corner");
        let receivable = ledger.add_account("1100", "Receivables", AccountType::Receivable);
        let bank = ledger.add_journal("BNK1");
        let sales = ledger.add_journal("INV");
        ledger.line(receivable, Some(customer), sales, date(2024, 1, 5), dec!(100));
        ledger.line(receivable, Some(vendor), bank, date(2024, 1, 9), dec!(-40));

        let all = LineSelector::new(&ledger)
            .select(&ReportFilter::new(), None, None, &[], LinePredicate::Always)
            .unwrap();
        let explicit = ReportFilter::new()
            .with_partner(customer)
            .with_partner(vendor)
            .with_journal(bank)
            .with_journal(sales)
            .with_account(receivable);
        let listed = LineSelector::new(&ledger)
            .select(&explicit, None, None, &[], LinePredicate::Always)
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all, listed);
    }

    #[test]
    fn test_open_as_of_keeps_lines_settled_later() {
        let mut ledger = FixtureLedger::new();
        let customer = ledger.add_partner("Azure Interior");
        let receivable = ledger.add_account("1100", "Receivables", AccountType::Receivable);
        let sales = ledger.add_journal("INV");
        let bank = ledger.add_journal("BNK1");
        let invoice = ledger.line(receivable, Some(customer), sales, date(2024, 1, 5), dec!(100));
        let payment = ledger.line(receivable, Some(customer), bank, date(2024, 2, 5), dec!(-100));
        ledger.reconcile(invoice, payment, dec!(100), date(2024, 2, 5));

        let selector = LineSelector::new(&ledger);
        let before = selector.open_as_of(date(2024, 1, 31)).unwrap();
        let lines = selector
            .select(&ReportFilter::new(), None, Some(date(2024, 1, 31)), &[], before)
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, invoice);

        let after = selector.open_as_of(date(2024, 2, 28)).unwrap();
        assert_eq!(after, LinePredicate::Unreconciled);
        let lines = selector
            .select(&ReportFilter::new(), None, Some(date(2024, 2, 28)), &[], after)
            .unwrap();
        assert!(lines.is_empty());
    }
}
