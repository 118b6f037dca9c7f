//! In-memory report hierarchy built from a flat node table.

use std::collections::HashMap;

use tally_shared::types::ReportNodeId;
use thiserror::Error;

use super::types::HierarchyNode;

// ========== Hierarchy Errors ==========

/// Errors raised while building or walking a report hierarchy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    /// Two nodes share an id.
    #[error("Duplicate hierarchy node: {0}")]
    DuplicateNode(ReportNodeId),

    /// A node points at a parent that does not exist.
    #[error("Hierarchy node {node} references unknown parent {parent}")]
    UnknownParent {
        /// The child node.
        node: ReportNodeId,
        /// The missing parent.
        parent: ReportNodeId,
    },

    /// Following parent links from this node never reaches a root.
    #[error("Hierarchy node {0} is part of a cycle")]
    Cycle(ReportNodeId),

    /// Lookup of a node that is not in the tree.
    #[error("Unknown hierarchy node: {0}")]
    UnknownNode(ReportNodeId),
}

impl HierarchyError {
    /// Returns the error code for log output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateNode(_) => "DUPLICATE_NODE",
            Self::UnknownParent { .. } => "UNKNOWN_PARENT",
            Self::Cycle(_) => "HIERARCHY_CYCLE",
            Self::UnknownNode(_) => "UNKNOWN_NODE",
        }
    }
}

/// Validated, acyclic report hierarchy.
///
/// Children are resolved by index into a preloaded parent map and kept in
/// (sequence, id) order.
#[derive(Debug, Clone, Default)]
pub struct AccountHierarchy {
    nodes: Vec<HierarchyNode>,
    index: HashMap<ReportNodeId, usize>,
    children: HashMap<ReportNodeId, Vec<usize>>,
    roots: Vec<usize>,
}

impl AccountHierarchy {
    /// Builds the tree, rejecting duplicates, dangling parents and cycles.
    pub fn from_nodes(nodes: Vec<HierarchyNode>) -> Result<Self, HierarchyError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(HierarchyError::DuplicateNode(node.id));
            }
        }

        let mut children: HashMap<ReportNodeId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            match node.parent_id {
                Some(parent) if !index.contains_key(&parent) => {
                    return Err(HierarchyError::UnknownParent {
                        node: node.id,
                        parent,
                    });
                }
                Some(parent) => children.entry(parent).or_default().push(i),
                None => roots.push(i),
            }
        }

        // A chain longer than the node count must revisit a node.
        for node in &nodes {
            let mut current = node.parent_id;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if parent == node.id || steps > nodes.len() {
                    return Err(HierarchyError::Cycle(node.id));
                }
                current = index.get(&parent).and_then(|&i| nodes[i].parent_id);
            }
        }

        let order = |i: &usize| (nodes[*i].sequence, nodes[*i].id);
        for list in children.values_mut() {
            list.sort_by_key(order);
        }
        roots.sort_by_key(order);

        Ok(Self {
            nodes,
            index,
            children,
            roots,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    pub fn node(&self, id: ReportNodeId) -> Result<&HierarchyNode, HierarchyError> {
        self.index
            .get(&id)
            .map(|&i| &self.nodes[i])
            .ok_or(HierarchyError::UnknownNode(id))
    }

    /// Children of a node in display order.
    pub fn children(&self, id: ReportNodeId) -> impl Iterator<Item = &HierarchyNode> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&i| &self.nodes[i])
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Finds a report root by name, ignoring case.
    ///
    /// Roots win over inner nodes with the same name.
    #[must_use]
    pub fn find_root(&self, name: &str) -> Option<&HierarchyNode> {
        let wanted = name.trim().to_lowercase();
        let matches = |node: &&HierarchyNode| node.name.to_lowercase() == wanted;
        self.roots()
            .find(matches)
            .or_else(|| self.nodes.iter().find(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::types::{NodeKind, Sign};

    fn node(id: u128, parent: Option<u128>, name: &str, sequence: i32) -> HierarchyNode {
        HierarchyNode {
            id: ReportNodeId::from_u128(id),
            parent_id: parent.map(ReportNodeId::from_u128),
            name: name.to_string(),
            sequence,
            kind: NodeKind::Sum,
            sign: Sign::Positive,
            hide_heading: false,
        }
    }

    #[test]
    fn test_children_follow_sequence() {
        let tree = AccountHierarchy::from_nodes(vec![
            node(1, None, "Balance Sheet", 0),
            node(2, Some(1), "Liabilities", 20),
            node(3, Some(1), "Assets", 10),
        ])
        .unwrap();
        let names: Vec<_> = tree
            .children(ReportNodeId::from_u128(1))
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["Assets", "Liabilities"]);
        assert_eq!(tree.children(ReportNodeId::from_u128(3)).count(), 0);
    }

    #[test]
    fn test_find_root_ignores_case() {
        let tree = AccountHierarchy::from_nodes(vec![
            node(1, None, "Balance Sheet", 0),
            node(2, Some(1), "Assets", 10),
        ])
        .unwrap();
        assert_eq!(
            tree.find_root("balance sheet").map(|n| n.id),
            Some(ReportNodeId::from_u128(1))
        );
        assert_eq!(
            tree.find_root("ASSETS").map(|n| n.id),
            Some(ReportNodeId::from_u128(2))
        );
        assert!(tree.find_root("Profit and Loss").is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = AccountHierarchy::from_nodes(vec![node(1, None, "A", 0), node(1, None, "B", 0)])
            .unwrap_err();
        assert_eq!(err, HierarchyError::DuplicateNode(ReportNodeId::from_u128(1)));
        assert_eq!(err.error_code(), "DUPLICATE_NODE");
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = AccountHierarchy::from_nodes(vec![node(2, Some(9), "Orphan", 0)]).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_PARENT");
    }

    #[test]
    fn test_cycle_rejected() {
        let err = AccountHierarchy::from_nodes(vec![
            node(1, None, "Root", 0),
            node(2, Some(3), "A", 0),
            node(3, Some(2), "B", 0),
        ])
        .unwrap_err();
        assert!(matches!(err, HierarchyError::Cycle(_)));

        let err = AccountHierarchy::from_nodes(vec![node(4, Some(4), "Self", 0)]).unwrap_err();
        assert_eq!(err, HierarchyError::Cycle(ReportNodeId::from_u128(4)));
    }

    #[test]
    fn test_unknown_node_lookup() {
        let tree = AccountHierarchy::default();
        assert!(tree.is_empty());
        assert_eq!(
            tree.node(ReportNodeId::from_u128(7)).unwrap_err().error_code(),
            "UNKNOWN_NODE"
        );
    }
}
