//! Hierarchy node and aggregate row types.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, ReportNodeId};

use crate::ledger::AccountType;

/// What a hierarchy node aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Grouping node: sums its children.
    Sum,
    /// Leaf resolving to every account of the given types.
    AccountType {
        /// Account types covered.
        account_types: Vec<AccountType>,
    },
    /// Leaf resolving to an explicit account list.
    Accounts {
        /// Accounts covered.
        account_ids: Vec<AccountId>,
    },
}

/// Sign multiplier applied to a leaf's account totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// Keep amounts as booked.
    #[default]
    Positive,
    /// Flip every amount.
    Negative,
}

impl Sign {
    /// `1` or `-1`.
    #[must_use]
    pub const fn multiplier(self) -> Decimal {
        match self {
            Self::Positive => Decimal::ONE,
            Self::Negative => Decimal::NEGATIVE_ONE,
        }
    }
}

/// One node of a financial report hierarchy, as stored (flat, parent-linked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Node ID.
    pub id: ReportNodeId,
    /// Parent node; `None` for roots.
    #[serde(default)]
    pub parent_id: Option<ReportNodeId>,
    /// Display name.
    pub name: String,
    /// Ordering among siblings.
    #[serde(default)]
    pub sequence: i32,
    /// Aggregation kind.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Sign multiplier for leaf totals.
    #[serde(default)]
    pub sign: Sign,
    /// Suppress the node's heading row (totals still roll up).
    #[serde(default)]
    pub hide_heading: bool,
}

/// The six scalars every node returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTotals {
    /// Debit over the main window.
    pub debit: Decimal,
    /// Credit over the main window.
    pub credit: Decimal,
    /// Balance over the main window.
    pub balance: Decimal,
    /// Debit over the comparison window (zero without one).
    pub debit_comp: Decimal,
    /// Credit over the comparison window (zero without one).
    pub credit_comp: Decimal,
    /// Balance over the comparison window (zero without one).
    pub balance_comp: Decimal,
}

impl NodeTotals {
    /// Multiplies every scalar by the sign.
    #[must_use]
    pub fn signed(self, sign: Sign) -> Self {
        let m = sign.multiplier();
        Self {
            debit: self.debit * m,
            credit: self.credit * m,
            balance: self.balance * m,
            debit_comp: self.debit_comp * m,
            credit_comp: self.credit_comp * m,
            balance_comp: self.balance_comp * m,
        }
    }
}

impl Add for NodeTotals {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for NodeTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.debit += rhs.debit;
        self.credit += rhs.credit;
        self.balance += rhs.balance;
        self.debit_comp += rhs.debit_comp;
        self.credit_comp += rhs.credit_comp;
        self.balance_comp += rhs.balance_comp;
    }
}

impl Sum for NodeTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Output row of the hierarchical aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Label.
    pub name: String,
    /// Node the row belongs to.
    pub node_id: Option<ReportNodeId>,
    /// Account, for account detail rows.
    pub account_id: Option<AccountId>,
    /// Indentation depth.
    pub indent: u32,
    /// Amounts.
    #[serde(flatten)]
    pub totals: NodeTotals,
    /// Account detail rows (leaf headings only).
    pub child_rows: Vec<AggregateRow>,
    /// Heading rows carry the node name; their numbers are not printed.
    pub heading: bool,
    /// Suppressed from output.
    pub hide: bool,
}
