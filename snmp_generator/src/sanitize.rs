//! Label sanitization for exported identifiers

use regex::Regex;
use std::sync::LazyLock;

static INVALID_LABEL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("label pattern is a valid regex"));

/// Replace every character outside `[A-Za-z0-9_]` with `_`
pub fn sanitize_label_name(name: &str) -> String {
    INVALID_LABEL_CHARS.replace_all(name, "_").into_owned()
}
