//! Name index over a MIB tree

use super::node::{MibTree, NodeId};
use std::collections::HashMap;

/// Maps both OIDs and labels to the node that declares them.
///
/// Collisions are not detected: the node visited last wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndex {
    entries: HashMap<String, NodeId>,
}

impl NameIndex {
    pub fn build(tree: &MibTree) -> Self {
        let mut entries = HashMap::with_capacity(tree.len() * 2);
        for id in tree.ids() {
            let node = tree.node(id);
            entries.insert(node.oid.clone(), id);
            entries.insert(node.label.clone(), id);
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    #[test]
    fn test_oid_and_label_resolve_to_same_node() {
        let mut root = Node::new("1", "iso");
        root.children.push(Node::new("1.3", "org"));
        let tree = MibTree::from_root(root);
        let index = NameIndex::build(&tree);

        assert_eq!(index.get("1.3"), index.get("org"));
        assert!(index.get("org").is_some());
        assert_eq!(index.len(), 4);
        assert!(!index.contains("1.3.6"));
    }

    #[test]
    fn test_last_write_wins_on_collision() {
        let mut root = Node::new("1", "iso");
        root.children.push(Node::new("1.1", "dup"));
        root.children.push(Node::new("1.2", "dup"));
        let tree = MibTree::from_root(root);
        let index = NameIndex::build(&tree);

        let id = index.get("dup").unwrap();
        assert_eq!(tree.node(id).oid, "1.2");
    }
}
