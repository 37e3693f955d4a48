//! Tree preparation passes
//!
//! Passes run in a fixed order and each visits every node once, parents
//! before children:
//!
//! 1. build the name index
//! 2. reduce descriptions to their first sentence
//! 3. replace anonymous `INTEGER` indexes with the owning node's label
//! 4. copy indexes from augmented entries
//! 5. propagate indexes from table entries to their columns
//! 6. infer display types from hints and textual conventions

use super::index::NameIndex;
use super::node::{MibNode, MibTree, Node, NodeId};
use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use regex::Regex;
use std::sync::LazyLock;

/// A normalized tree together with its name index
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTree {
    pub tree: MibTree,
    pub names: NameIndex,
}

impl PreparedTree {
    /// Reconstruct the name index against the current tree
    pub fn rebuild_index(&mut self) {
        self.names = NameIndex::build(&self.tree);
    }

    pub fn lookup_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&MibNode> {
        self.names.get(name).map(|id| self.tree.node(id))
    }

    pub fn node(&self, id: NodeId) -> &MibNode {
        self.tree.node(id)
    }
}

/// Flatten and normalize a parsed node tree
pub fn prepare_tree(root: Node) -> PreparedTree {
    prepare_mib_tree(MibTree::from_root(root))
}

pub fn prepare_mib_tree(mut tree: MibTree) -> PreparedTree {
    let names = NameIndex::build(&tree);

    normalize_descriptions(&mut tree);
    normalize_anonymous_indexes(&mut tree);
    resolve_augments(&mut tree, &names);
    propagate_indexes(&mut tree);
    infer_display_types(&mut tree);

    log_success!(
        codes::success::TREE_PREPARED,
        "Node tree prepared",
        "nodes" => tree.len(),
        "names" => names.len()
    );

    PreparedTree { tree, names }
}

fn normalize_descriptions(tree: &mut MibTree) {
    for id in tree.ids() {
        let node = tree.node_mut(id);
        let collapsed = node.description.split_whitespace().collect::<Vec<_>>().join(" ");
        node.description = match collapsed.split_once(". ") {
            Some((first, _)) => first.to_string(),
            None => collapsed,
        };
    }
}

fn normalize_anonymous_indexes(tree: &mut MibTree) {
    for id in tree.ids() {
        let node = tree.node_mut(id);
        for index in node.indexes.iter_mut() {
            if *index == "INTEGER" {
                *index = node.label.clone();
            }
        }
    }
}

fn resolve_augments(tree: &mut MibTree, names: &NameIndex) {
    for id in tree.ids() {
        let augments = &tree.node(id).augments;
        if augments.is_empty() {
            continue;
        }

        let Some(augmented) = names.get(augments) else {
            log_warning!(
                codes::tree::AUGMENT_TARGET_NOT_FOUND,
                &format!(
                    "Can't find augmenting oid {} for {}",
                    augments,
                    tree.node(id).label
                ),
                "augments" => augments,
                "label" => tree.node(id).label
            );
            continue;
        };

        let indexes = tree.node(augmented).indexes.clone();
        log_debug!("Copying augmented indexes",
            "label" => tree.node(id).label,
            "augments" => tree.node(augmented).label
        );

        for child in tree.node(id).children.clone() {
            tree.node_mut(child).indexes = indexes.clone();
        }
        tree.node_mut(id).indexes = indexes;
    }
}

fn propagate_indexes(tree: &mut MibTree) {
    for id in tree.ids() {
        let node = tree.node(id);
        if node.indexes.is_empty() {
            continue;
        }

        let indexes = node.indexes.clone();
        for child in node.children.clone() {
            tree.node_mut(child).indexes = indexes.clone();
        }
    }
}

fn infer_display_types(tree: &mut MibTree) {
    for id in tree.ids() {
        let node = tree.node_mut(id);

        if node.hint == "1x:" {
            node.node_type = "PhysAddress48".to_string();
        }
        // Accepts UTF-8 (`t`) as well as ASCII (`a`) payloads
        if is_display_string_hint(&node.hint) {
            node.node_type = "DisplayString".to_string();
        }
        // Older MIBs reference the convention without carrying a hint
        if node.textual_convention == "DisplayString" {
            node.node_type = "DisplayString".to_string();
        }
        if node.textual_convention == "Float" || node.textual_convention == "Double" {
            node.node_type = node.textual_convention.clone();
        }
    }
}

static DISPLAY_STRING_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[at]").expect("display hint pattern is a valid regex"));

/// True when the hint contains a decimal octet count followed by `a` or `t`
fn is_display_string_hint(hint: &str) -> bool {
    DISPLAY_STRING_HINT.is_match(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures;

    #[test]
    fn test_description_first_sentence() {
        let prepared = fixtures::prepared_if_mib();
        let node = prepared.lookup("ifInOctets").unwrap();
        assert_eq!(
            node.description,
            "The total number of octets received on the interface, including framing characters"
        );
    }

    #[test]
    fn test_integer_index_replaced_by_label() {
        let mut root = Node::new("1", "root");
        let mut entry = Node::new("1.1", "snSlotsEntry");
        entry.indexes = vec!["INTEGER".to_string()];
        entry.children.push(Node::new("1.1.1", "snSlotsType"));
        root.children.push(entry);

        let prepared = prepare_tree(root);
        let entry = prepared.lookup("snSlotsEntry").unwrap();
        assert_eq!(entry.indexes, vec!["snSlotsEntry"]);
        let column = prepared.lookup("snSlotsType").unwrap();
        assert_eq!(column.indexes, vec!["snSlotsEntry"]);
    }

    #[test]
    fn test_augments_copy_indexes() {
        let prepared = fixtures::prepared_if_mib();
        let if_entry = prepared.lookup("ifEntry").unwrap();
        let if_x_entry = prepared.lookup("ifXEntry").unwrap();
        assert_eq!(if_x_entry.indexes, if_entry.indexes);

        let if_name = prepared.lookup("ifName").unwrap();
        assert_eq!(if_name.indexes, vec!["ifIndex"]);
    }

    #[test]
    fn test_augments_see_normalized_integer_index() {
        let mut root = Node::new("1", "root");
        let mut slots = Node::new("1.1", "snSlotsEntry");
        slots.indexes = vec!["INTEGER".to_string()];
        let mut slots_ext = Node::new("1.2", "snSlotsExtEntry");
        slots_ext.augments = "snSlotsEntry".to_string();
        slots_ext.children.push(Node::new("1.2.1", "snSlotsExtTemp"));
        root.children.push(slots);
        root.children.push(slots_ext);

        let prepared = prepare_tree(root);
        let slots_ext = prepared.lookup("snSlotsExtEntry").unwrap();
        assert_eq!(slots_ext.indexes, vec!["snSlotsEntry"]);
        let column = prepared.lookup("snSlotsExtTemp").unwrap();
        assert_eq!(column.indexes, vec!["snSlotsEntry"]);
    }

    #[test]
    fn test_missing_augment_target_is_skipped() {
        let mut root = Node::new("1", "root");
        let mut entry = Node::new("1.1", "orphanEntry");
        entry.augments = "missingEntry".to_string();
        root.children.push(entry);

        let prepared = prepare_tree(root);
        assert!(prepared.lookup("orphanEntry").unwrap().indexes.is_empty());
    }

    #[test]
    fn test_indexes_propagate_to_columns() {
        let prepared = fixtures::prepared_if_mib();
        let column = prepared.lookup("ifDescr").unwrap();
        assert_eq!(column.indexes, vec!["ifIndex"]);
    }

    #[test]
    fn test_display_types_inferred() {
        let prepared = fixtures::prepared_if_mib();
        assert_eq!(prepared.lookup("ifPhysAddress").unwrap().node_type, "PhysAddress48");
        assert_eq!(prepared.lookup("ifDescr").unwrap().node_type, "DisplayString");
        assert_eq!(prepared.lookup("ifAlias").unwrap().node_type, "DisplayString");
        assert_eq!(prepared.lookup("ifTemperature").unwrap().node_type, "Float");
    }

    #[test]
    fn test_display_hint_pattern() {
        assert!(is_display_string_hint("255a"));
        assert!(is_display_string_hint("255t"));
        assert!(!is_display_string_hint("1x:"));
        assert!(!is_display_string_hint("d-2"));
        assert!(!is_display_string_hint(""));
    }

    #[test]
    fn test_rebuild_index_after_clone() {
        let prepared = fixtures::prepared_if_mib();
        let mut copy = prepared.clone();
        let id = copy.lookup_id("ifDescr").unwrap();
        copy.tree.node_mut(id).label = "ifDescription".to_string();
        copy.rebuild_index();

        assert!(copy.lookup("ifDescription").is_some());
        assert!(prepared.lookup("ifDescription").is_none());
    }
}
