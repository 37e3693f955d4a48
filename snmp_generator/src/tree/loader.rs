//! Loading the parsed MIB node tree from its JSON dump

use super::error::{TreeError, TreeResult};
use super::node::Node;
use crate::logging::codes;
use crate::{log_debug, log_error};
use std::fs;
use std::path::Path;

/// Read and parse a node tree file
pub fn load_tree(path: &Path) -> TreeResult<Node> {
    log_debug!("Loading node tree", "path" => path.display());

    let source = fs::read_to_string(path).map_err(|e| {
        let error = TreeError::io(path, &e);
        log_error!(error.error_code(), &error.to_string(), "path" => path.display());
        error
    })?;

    parse_tree(&source, &path.display().to_string())
}

/// Parse a node tree from JSON text; `origin` names the source in errors
pub fn parse_tree(source: &str, origin: &str) -> TreeResult<Node> {
    let root: Node = serde_json::from_str(source).map_err(|e| {
        let error = TreeError::parse(origin, &e);
        log_error!(error.error_code(), &error.to_string(), "path" => origin);
        error
    })?;

    if root.oid.is_empty() && root.label.is_empty() && root.children.is_empty() {
        let error = TreeError::empty_tree(origin);
        log_error!(error.error_code(), &error.to_string(), "path" => origin);
        return Err(error);
    }

    Ok(root)
}
