//! OID resolution against a prepared tree
//!
//! A request is either a known name or OID, in which case it is a scalar or
//! a subtree to walk, or an unknown OID that may address one row of a table
//! column, found through a longest-prefix search.

use crate::classify::{metric_access, metric_type};
use crate::oids::is_descendant;
use crate::tree::{MibNode, MibTree, NodeId, PreparedTree};

/// How a requested name or OID should be polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    /// Single-valued object, fetched at instance `.0`
    Scalar(NodeId),
    /// One row of a table column
    Instance(NodeId),
    /// Anything else beneath a known node, walked in full
    Subtree(NodeId),
}

impl Resolution {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Resolution::NotFound => None,
            Resolution::Scalar(id) | Resolution::Instance(id) | Resolution::Subtree(id) => {
                Some(*id)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::NotFound => "not_found",
            Resolution::Scalar(_) => "scalar",
            Resolution::Instance(_) => "instance",
            Resolution::Subtree(_) => "subtree",
        }
    }
}

fn is_metric(node: &MibNode) -> bool {
    metric_type(&node.node_type).is_some() && metric_access(&node.access)
}

/// Deepest node whose OID is `oid` or an ancestor of it.
///
/// At each level the first matching child is followed; the search never
/// backtracks.
pub fn search_node_tree(oid: &str, tree: &MibTree, start: NodeId) -> Option<NodeId> {
    if !is_descendant(oid, &tree.node(start).oid) {
        return None;
    }

    let mut current = start;
    while let Some(child) = tree
        .node(current)
        .children
        .iter()
        .copied()
        .find(|child| is_descendant(oid, &tree.node(*child).oid))
    {
        current = child;
    }

    Some(current)
}

/// Classify a requested name or OID
pub fn resolve(request: &str, prepared: &PreparedTree) -> Resolution {
    if let Some(id) = prepared.lookup_id(request) {
        let node = prepared.node(id);
        return if is_metric(node) && node.indexes.is_empty() {
            Resolution::Scalar(id)
        } else {
            Resolution::Subtree(id)
        };
    }

    let tree = &prepared.tree;
    match search_node_tree(request, tree, tree.root()) {
        Some(id) if is_metric(tree.node(id)) && !tree.node(id).indexes.is_empty() => {
            Resolution::Instance(id)
        }
        _ => Resolution::NotFound,
    }
}
