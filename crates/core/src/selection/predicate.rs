//! Structured line predicates.
//!
//! Predicates are composable filter expressions handed to the ledger store.
//! A store may translate them into its own query language or evaluate them
//! directly with [`LinePredicate::matches`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, JournalId, LineId, PartnerId, PartnerTagId};

use crate::ledger::{AccountType, LedgerLine, MoveState};

/// Lookups a predicate needs beyond the line itself.
pub trait LineLookup {
    /// Type of the given account, if known.
    fn account_type(&self, account_id: AccountId) -> Option<AccountType>;

    /// Returns true if the partner carries at least one of the tags.
    fn partner_has_tag(&self, partner_id: PartnerId, tags: &BTreeSet<PartnerTagId>) -> bool;
}

/// A filter expression over ledger lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum LinePredicate {
    /// Matches every line.
    #[default]
    Always,
    /// All sub-predicates match.
    And(Vec<LinePredicate>),
    /// At least one sub-predicate matches.
    Or(Vec<LinePredicate>),
    /// Move state is one of the given states.
    MoveStateIn(BTreeSet<MoveState>),
    /// Posting date on or after the date.
    DateOnOrAfter(NaiveDate),
    /// Posting date strictly before the date.
    DateBefore(NaiveDate),
    /// Posting date on or before the date.
    DateOnOrBefore(NaiveDate),
    /// Journal is one of the given journals.
    JournalIn(BTreeSet<JournalId>),
    /// Account is one of the given accounts.
    AccountIn(BTreeSet<AccountId>),
    /// Account type is one of the given types.
    AccountTypeIn(BTreeSet<AccountType>),
    /// Partner is one of the given partners.
    PartnerIn {
        /// Accepted partners.
        partners: BTreeSet<PartnerId>,
        /// Also accept lines without a partner.
        include_unassigned: bool,
    },
    /// Partner carries one of the given tags.
    PartnerTagIn {
        /// Accepted tags.
        tags: BTreeSet<PartnerTagId>,
        /// Also accept lines without a partner.
        include_unassigned: bool,
    },
    /// Line is not fully reconciled.
    Unreconciled,
    /// Line id is one of the given ids.
    LineIn(BTreeSet<LineId>),
}

impl LinePredicate {
    /// Conjunction; `Always` is the identity and nested `And`s are flattened.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) | (other, Self::Always) => other,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (this, Self::And(mut right)) => {
                right.insert(0, this);
                Self::And(right)
            }
            (this, other) => Self::And(vec![this, other]),
        }
    }

    /// Disjunction; nested `Or`s are flattened.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, _) | (_, Self::Always) => Self::Always,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), other) => {
                left.push(other);
                Self::Or(left)
            }
            (this, other) => Self::Or(vec![this, other]),
        }
    }

    /// Adds `other` only when `condition` holds.
    #[must_use]
    pub fn and_if(self, condition: bool, other: impl FnOnce() -> Self) -> Self {
        if condition { self.and(other()) } else { self }
    }

    /// Number of leaf clauses, for logging.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        match self {
            Self::Always => 0,
            Self::And(parts) | Self::Or(parts) => parts.iter().map(Self::clause_count).sum(),
            _ => 1,
        }
    }

    /// Evaluates the predicate against one line.
    pub fn matches(&self, line: &LedgerLine, lookup: &dyn LineLookup) -> bool {
        match self {
            Self::Always => true,
            Self::And(parts) => parts.iter().all(|p| p.matches(line, lookup)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(line, lookup)),
            Self::MoveStateIn(states) => states.contains(&line.move_state),
            Self::DateOnOrAfter(date) => line.date >= *date,
            Self::DateBefore(date) => line.date < *date,
            Self::DateOnOrBefore(date) => line.date <= *date,
            Self::JournalIn(journals) => journals.contains(&line.journal_id),
            Self::AccountIn(accounts) => accounts.contains(&line.account_id),
            Self::AccountTypeIn(types) => lookup
                .account_type(line.account_id)
                .is_some_and(|t| types.contains(&t)),
            Self::PartnerIn {
                partners,
                include_unassigned,
            } => line
                .partner_id
                .map_or(*include_unassigned, |p| partners.contains(&p)),
            Self::PartnerTagIn {
                tags,
                include_unassigned,
            } => line
                .partner_id
                .map_or(*include_unassigned, |p| lookup.partner_has_tag(p, tags)),
            Self::Unreconciled => !line.reconciled,
            Self::LineIn(ids) => ids.contains(&line.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tally_shared::types::MoveId;

    struct Lookup;

    impl LineLookup for Lookup {
        fn account_type(&self, account_id: AccountId) -> Option<AccountType> {
            (account_id == AccountId::from_u128(1)).then_some(AccountType::Receivable)
        }

        fn partner_has_tag(&self, partner_id: PartnerId, tags: &BTreeSet<PartnerTagId>) -> bool {
            partner_id == PartnerId::from_u128(10) && tags.contains(&PartnerTagId::from_u128(5))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(partner: Option<u128>) -> LedgerLine {
        LedgerLine {
            id: LineId::from_u128(100),
            account_id: AccountId::from_u128(1),
            partner_id: partner.map(PartnerId::from_u128),
            journal_id: JournalId::from_u128(7),
            move_id: MoveId::from_u128(1),
            move_name: "INV/0001".to_string(),
            label: String::new(),
            date: date(2024, 3, 15),
            date_maturity: None,
            debit: Decimal::ONE,
            credit: Decimal::ZERO,
            balance: Decimal::ONE,
            currency: "USD".to_string(),
            company_currency: "USD".to_string(),
            move_state: MoveState::Posted,
            reconciled: false,
            matched_debits: Vec::new(),
            matched_credits: Vec::new(),
        }
    }

    #[test]
    fn test_always_is_and_identity() {
        let p = LinePredicate::Always.and(LinePredicate::Unreconciled);
        assert_eq!(p, LinePredicate::Unreconciled);
        let p = LinePredicate::Unreconciled.and(LinePredicate::Always);
        assert_eq!(p, LinePredicate::Unreconciled);
    }

    #[test]
    fn test_and_flattens() {
        let p = LinePredicate::DateOnOrAfter(date(2023, 1, 1))
            .and(LinePredicate::Unreconciled)
            .and(LinePredicate::DateBefore(date(2024, 1, 1)));
        assert_eq!(p.clause_count(), 3);
        assert!(matches!(p, LinePredicate::And(ref parts) if parts.len() == 3));
    }

    #[test]
    fn test_date_bounds() {
        let l = line(None);
        assert!(LinePredicate::DateOnOrAfter(date(2024, 3, 15)).matches(&l, &Lookup));
        assert!(!LinePredicate::DateBefore(date(2024, 3, 15)).matches(&l, &Lookup));
        assert!(LinePredicate::DateOnOrBefore(date(2024, 3, 15)).matches(&l, &Lookup));
    }

    #[test]
    fn test_partner_membership_with_unassigned() {
        let partners = BTreeSet::from([PartnerId::from_u128(10)]);
        let strict = LinePredicate::PartnerIn {
            partners: partners.clone(),
            include_unassigned: false,
        };
        let inclusive = LinePredicate::PartnerIn {
            partners,
            include_unassigned: true,
        };
        assert!(strict.matches(&line(Some(10)), &Lookup));
        assert!(!strict.matches(&line(Some(11)), &Lookup));
        assert!(!strict.matches(&line(None), &Lookup));
        assert!(inclusive.matches(&line(None), &Lookup));
    }

    #[test]
    fn test_partner_tags_and_account_types_use_lookup() {
        let tags = LinePredicate::PartnerTagIn {
            tags: BTreeSet::from([PartnerTagId::from_u128(5)]),
            include_unassigned: false,
        };
        assert!(tags.matches(&line(Some(10)), &Lookup));
        assert!(!tags.matches(&line(Some(11)), &Lookup));

        let receivable = LinePredicate::AccountTypeIn(BTreeSet::from([AccountType::Receivable]));
        let payable = LinePredicate::AccountTypeIn(BTreeSet::from([AccountType::Payable]));
        assert!(receivable.matches(&line(None), &Lookup));
        assert!(!payable.matches(&line(None), &Lookup));
    }

    #[test]
    fn test_or_with_line_ids() {
        let mut l = line(None);
        l.reconciled = true;
        let open = LinePredicate::Unreconciled
            .or(LinePredicate::LineIn(BTreeSet::from([LineId::from_u128(100)])));
        assert!(open.matches(&l, &Lookup));
        let closed = LinePredicate::Unreconciled
            .or(LinePredicate::LineIn(BTreeSet::from([LineId::from_u128(999)])));
        assert!(!closed.matches(&l, &Lookup));
    }
}
