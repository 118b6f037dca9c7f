//! Report hierarchies.
//!
//! A financial report (e.g., a balance sheet) is a tree of nodes loaded from
//! a flat table. Grouping nodes sum their children; leaf nodes resolve to a
//! set of accounts and contribute those accounts' signed totals.

pub mod service;
pub mod tree;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{HierarchicalAggregator, INDENT_STEP};
pub use tree::{AccountHierarchy, HierarchyError};
pub use types::{AggregateRow, HierarchyNode, NodeKind, NodeTotals, Sign};
