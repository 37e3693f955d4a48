//! MIB node model
//!
//! The external MIB parser hands over a recursive [`Node`]. Before any pass
//! runs it is flattened into a [`MibTree`] arena laid out in pre-order, so a
//! parent always has a smaller [`NodeId`] than its children and iterating
//! the arena front to back visits parents first.

use serde::{Deserialize, Serialize};

/// One MIB object definition as produced by the MIB parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub oid: String,
    pub label: String,
    pub children: Vec<Node>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub access: String,
    pub indexes: Vec<String>,
    pub augments: String,
    pub textual_convention: String,
    pub hint: String,
    pub description: String,
    pub fixed_size: usize,
}

impl Node {
    pub fn new(oid: &str, label: &str) -> Self {
        Self {
            oid: oid.to_string(),
            label: label.to_string(),
            ..Self::default()
        }
    }
}

/// Position of a node in a [`MibTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node stored in the arena; children are referenced by id
#[derive(Debug, Clone, PartialEq)]
pub struct MibNode {
    pub oid: String,
    pub label: String,
    pub children: Vec<NodeId>,
    pub node_type: String,
    pub access: String,
    pub indexes: Vec<String>,
    pub augments: String,
    pub textual_convention: String,
    pub hint: String,
    pub description: String,
    pub fixed_size: usize,
}

impl MibNode {
    fn detached(node: Node) -> (Self, Vec<Node>) {
        let Node {
            oid,
            label,
            children,
            node_type,
            access,
            indexes,
            augments,
            textual_convention,
            hint,
            description,
            fixed_size,
        } = node;

        let mib_node = Self {
            oid,
            label,
            children: Vec::with_capacity(children.len()),
            node_type,
            access,
            indexes,
            augments,
            textual_convention,
            hint,
            description,
            fixed_size,
        };
        (mib_node, children)
    }
}

/// Arena holding a whole MIB tree
#[derive(Debug, Clone, PartialEq)]
pub struct MibTree {
    nodes: Vec<MibNode>,
}

impl MibTree {
    /// Flatten a recursive node tree, preserving child order
    pub fn from_root(root: Node) -> Self {
        let mut nodes: Vec<MibNode> = Vec::new();
        let mut stack: Vec<(Node, Option<NodeId>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            let id = NodeId(nodes.len());
            let (mib_node, children) = MibNode::detached(node);
            nodes.push(mib_node);

            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            // Reversed so the first child is popped first
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &MibNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut MibNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids, parents before children
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ids of `id` and all its descendants in pre-order
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            visited.push(current);
            stack.extend(self.node(current).children.iter().rev().copied());
        }

        visited
    }
}
