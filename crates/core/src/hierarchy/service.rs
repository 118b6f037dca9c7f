//! Hierarchical aggregation of account totals over a report hierarchy.

use std::collections::HashMap;

use tally_shared::types::{AccountId, Currency, ReportNodeId};

use super::tree::{AccountHierarchy, HierarchyError};
use super::types::{AggregateRow, HierarchyNode, NodeKind, NodeTotals};
use crate::ledger::Account;
use crate::selection::DisplayMode;

/// Indent added per hierarchy level.
pub const INDENT_STEP: u32 = 5;

/// Rolls per-account totals up a report hierarchy.
///
/// `totals` holds unsigned per-account amounts for every account that has
/// lines in either window; accounts absent from the map have no movement.
pub struct HierarchicalAggregator<'a> {
    tree: &'a AccountHierarchy,
    accounts: &'a [Account],
    totals: &'a HashMap<AccountId, NodeTotals>,
    display: DisplayMode,
    currency: &'a Currency,
}

impl<'a> HierarchicalAggregator<'a> {
    /// Creates an aggregator. `accounts` must be ordered by code.
    #[must_use]
    pub const fn new(
        tree: &'a AccountHierarchy,
        accounts: &'a [Account],
        totals: &'a HashMap<AccountId, NodeTotals>,
        display: DisplayMode,
        currency: &'a Currency,
    ) -> Self {
        Self {
            tree,
            accounts,
            totals,
            display,
            currency,
        }
    }

    /// Aggregates a node and everything below it.
    ///
    /// Returns the flattened rows (heading, children, `Total <name>`) and the
    /// node's six totals.
    pub fn aggregate(
        &self,
        id: ReportNodeId,
        indent: u32,
    ) -> Result<(Vec<AggregateRow>, NodeTotals), HierarchyError> {
        let node = self.tree.node(id)?;
        let mut rows = Vec::new();

        let totals = if node.kind == NodeKind::Sum {
            let mut nested = Vec::new();
            let mut totals = NodeTotals::default();
            for child in self.tree.children(node.id) {
                let (child_rows, child_totals) = self.aggregate(child.id, indent + INDENT_STEP)?;
                nested.extend(child_rows);
                totals += child_totals;
            }
            rows.push(node_row(node, node.name.clone(), indent, totals, true));
            rows.extend(nested);
            totals
        } else {
            let (account_rows, totals) = self.leaf(node, indent + INDENT_STEP);
            let mut heading = node_row(node, node.name.clone(), indent, totals, true);
            heading.child_rows = account_rows;
            rows.push(heading);
            totals
        };

        rows.push(node_row(
            node,
            format!("Total {}", node.name),
            indent,
            totals,
            false,
        ));
        Ok((rows, totals))
    }

    /// Accounts a leaf node resolves to, in code order.
    #[must_use]
    pub fn resolve(&self, kind: &NodeKind) -> Vec<&'a Account> {
        match kind {
            NodeKind::Sum => Vec::new(),
            NodeKind::AccountType { account_types } => self
                .accounts
                .iter()
                .filter(|a| account_types.contains(&a.account_type))
                .collect(),
            NodeKind::Accounts { account_ids } => self
                .accounts
                .iter()
                .filter(|a| account_ids.contains(&a.id))
                .collect(),
        }
    }

    fn leaf(&self, node: &HierarchyNode, indent: u32) -> (Vec<AggregateRow>, NodeTotals) {
        let mut rows = Vec::new();
        let mut totals = NodeTotals::default();
        for account in self.resolve(&node.kind) {
            let movement = self.totals.get(&account.id);
            let signed = movement.copied().unwrap_or_default().signed(node.sign);
            totals += signed;
            if self.displayed(movement.is_some(), &signed) {
                rows.push(AggregateRow {
                    name: account.display_name(),
                    node_id: Some(node.id),
                    account_id: Some(account.id),
                    indent,
                    totals: signed,
                    child_rows: Vec::new(),
                    heading: false,
                    hide: false,
                });
            }
        }
        (rows, totals)
    }

    fn displayed(&self, has_lines: bool, totals: &NodeTotals) -> bool {
        match self.display {
            DisplayMode::All => true,
            DisplayMode::Movement => has_lines,
            DisplayMode::NotZero => {
                !self.currency.is_zero(totals.balance) || !self.currency.is_zero(totals.balance_comp)
            }
        }
    }
}

fn node_row(
    node: &HierarchyNode,
    name: String,
    indent: u32,
    totals: NodeTotals,
    heading: bool,
) -> AggregateRow {
    AggregateRow {
        name,
        node_id: Some(node.id),
        account_id: None,
        indent,
        totals,
        child_rows: Vec::new(),
        heading,
        hide: node.hide_heading,
    }
}
