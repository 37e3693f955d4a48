//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for every code the generator emits, together with
//! the behavioral metadata used when formatting and summarizing events.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl CodeMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Node tree loading and preparation codes
pub mod tree {
    use super::Code;

    pub const TREE_LOAD_FAILURE: Code = Code::new("E010");
    pub const EMPTY_TREE: Code = Code::new("E011");
    pub const AUGMENT_TARGET_NOT_FOUND: Code = Code::new("W010");
}

/// Module request (generator configuration) codes
pub mod request {
    use super::Code;

    pub const CONFIG_LOAD_FAILURE: Code = Code::new("E020");
    pub const INVALID_OVERRIDE_TYPE: Code = Code::new("E021");
    pub const INVALID_REGEX: Code = Code::new("E022");
    pub const EMPTY_WALK: Code = Code::new("E023");
    pub const OVERRIDE_TARGET_NOT_FOUND: Code = Code::new("W020");
}

/// OID resolution codes
pub mod resolver {
    use super::Code;

    pub const WALK_TARGET_NOT_FOUND: Code = Code::new("E030");
}

/// Metric and lookup synthesis codes
pub mod generator {
    use super::Code;

    pub const INDEX_NOT_FOUND: Code = Code::new("W040");
    pub const UNSUPPORTED_INDEX_TYPE: Code = Code::new("W041");
    pub const LOOKUP_INDEX_NOT_FOUND: Code = Code::new("E042");
    pub const UNSUPPORTED_LOOKUP_TYPE: Code = Code::new("E043");
}

/// Batch execution codes
pub mod batch {
    use super::Code;

    pub const WORKER_FAILURE: Code = Code::new("E050");
    pub const NO_MODULES: Code = Code::new("E051");
    pub const FAIL_FAST_STOP: Code = Code::new("W050");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TREE_PREPARED: Code = Code::new("I010");
    pub const CONFIG_LOADED: Code = Code::new("I020");
    pub const MODULE_GENERATED: Code = Code::new("I040");
    pub const BATCH_COMPLETED: Code = Code::new("I050");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static REGISTRY_ENTRIES: &[CodeMetadata] = &[
    CodeMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input tree and configuration",
    ),
    CodeMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check logging configuration and environment variables",
    ),
    CodeMetadata::new(
        "E010",
        "Tree",
        Severity::High,
        false,
        true,
        "Node tree could not be loaded",
        "Check the tree file path and that it holds a JSON node dump",
    ),
    CodeMetadata::new(
        "E011",
        "Tree",
        Severity::High,
        false,
        true,
        "Node tree has no root object",
        "Regenerate the tree from the MIB sources",
    ),
    CodeMetadata::new(
        "W010",
        "Tree",
        Severity::Low,
        true,
        false,
        "AUGMENTS clause refers to an unknown table entry",
        "Load the MIB that defines the augmented entry",
    ),
    CodeMetadata::new(
        "E020",
        "Request",
        Severity::High,
        false,
        true,
        "Generator configuration could not be loaded",
        "Check the configuration path and TOML syntax",
    ),
    CodeMetadata::new(
        "E021",
        "Request",
        Severity::Medium,
        false,
        true,
        "Override names a type that is not a supported metric type",
        "Use one of gauge, counter, OctetString, IpAddr, PhysAddress48, DisplayString, Float, Double",
    ),
    CodeMetadata::new(
        "E022",
        "Request",
        Severity::Medium,
        false,
        true,
        "Regular expression in an override does not compile",
        "Fix the regex syntax",
    ),
    CodeMetadata::new(
        "E023",
        "Request",
        Severity::Medium,
        false,
        true,
        "Module requests nothing to walk",
        "Add at least one object name or OID to the module walk list",
    ),
    CodeMetadata::new(
        "W020",
        "Request",
        Severity::Low,
        true,
        false,
        "Type override targets an object that is not in the tree",
        "Check the override name against the loaded MIBs",
    ),
    CodeMetadata::new(
        "E030",
        "Resolver",
        Severity::High,
        false,
        true,
        "Requested walk root does not resolve to any known object",
        "Check the walk entry spelling or load the defining MIB",
    ),
    CodeMetadata::new(
        "W040",
        "Generator",
        Severity::Low,
        true,
        false,
        "Metric index does not resolve to a known object",
        "Load the MIB defining the index; the metric is skipped",
    ),
    CodeMetadata::new(
        "W041",
        "Generator",
        Severity::Low,
        true,
        false,
        "Metric index has a type that cannot be used as a label",
        "Override the index type; the metric is skipped",
    ),
    CodeMetadata::new(
        "E042",
        "Generator",
        Severity::High,
        false,
        true,
        "Lookup refers to an unknown index object",
        "Check the lookup new_index name",
    ),
    CodeMetadata::new(
        "E043",
        "Generator",
        Severity::High,
        false,
        true,
        "Lookup index object has an unsupported type",
        "Pick a lookup column with a supported type",
    ),
    CodeMetadata::new(
        "E050",
        "Batch",
        Severity::Critical,
        false,
        true,
        "Generation worker terminated abnormally",
        "Re-run with a single worker to isolate the failing module",
    ),
    CodeMetadata::new(
        "E051",
        "Batch",
        Severity::High,
        false,
        true,
        "Configuration defines no modules",
        "Add at least one [modules.<name>] table",
    ),
    CodeMetadata::new(
        "W050",
        "Batch",
        Severity::Medium,
        true,
        false,
        "Batch stopped after the first failed module",
        "Fix the failed module or disable fail-fast",
    ),
    CodeMetadata::new(
        "I001",
        "System",
        Severity::Low,
        true,
        false,
        "System initialization completed",
        "Continue normal operation",
    ),
    CodeMetadata::new(
        "I010",
        "Tree",
        Severity::Low,
        true,
        false,
        "Node tree prepared",
        "Continue to module generation",
    ),
    CodeMetadata::new(
        "I020",
        "Request",
        Severity::Low,
        true,
        false,
        "Generator configuration loaded",
        "Continue to module generation",
    ),
    CodeMetadata::new(
        "I040",
        "Generator",
        Severity::Low,
        true,
        false,
        "Module generated",
        "Continue normal operation",
    ),
    CodeMetadata::new(
        "I050",
        "Batch",
        Severity::Low,
        true,
        false,
        "Batch generation completed",
        "Serialize the generated modules",
    ),
];

/// Registry keyed by code, built once
static CODE_REGISTRY: OnceLock<HashMap<&'static str, &'static CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, &'static CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_code_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code).copied()
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_code_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if the condition is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_code_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if the condition aborts the current module
pub fn requires_halt(code: &str) -> bool {
    get_code_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_code_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_code_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_code_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
