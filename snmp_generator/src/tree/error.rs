//! Error types for loading the node tree

use crate::logging::codes;
use std::path::Path;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TreeError {
    #[error("Cannot read node tree '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Malformed node tree '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Node tree '{path}' is empty")]
    EmptyTree { path: String },
}

impl TreeError {
    pub fn io(path: &Path, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    pub fn parse(path: &str, error: &serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_string(),
            message: error.to_string(),
        }
    }

    pub fn empty_tree(path: &str) -> Self {
        Self::EmptyTree {
            path: path.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Io { .. } | Self::Parse { .. } => codes::tree::TREE_LOAD_FAILURE,
            Self::EmptyTree { .. } => codes::tree::EMPTY_TREE,
        }
    }
}
