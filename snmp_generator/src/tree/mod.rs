//! MIB node tree: model, loading and preparation

pub mod error;
pub mod index;
pub mod loader;
pub mod node;
pub mod prepare;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{TreeError, TreeResult};
pub use index::NameIndex;
pub use loader::{load_tree, parse_tree};
pub use node::{MibNode, MibTree, Node, NodeId};
pub use prepare::{prepare_mib_tree, prepare_tree, PreparedTree};
