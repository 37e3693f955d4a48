//! Fatal module generation errors

use crate::logging::codes;

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    #[error("Module '{module}': cannot find oid '{oid}' to walk")]
    WalkTargetNotFound { module: String, oid: String },

    #[error("Module '{module}': unknown lookup index '{index}'")]
    UnknownLookupIndex { module: String, index: String },

    #[error("Module '{module}': unknown index type '{index_type}' for lookup index '{index}'")]
    UnsupportedLookupType {
        module: String,
        index: String,
        index_type: String,
    },
}

impl GeneratorError {
    pub fn walk_target_not_found(module: &str, oid: &str) -> Self {
        Self::WalkTargetNotFound {
            module: module.to_string(),
            oid: oid.to_string(),
        }
    }

    pub fn unknown_lookup_index(module: &str, index: &str) -> Self {
        Self::UnknownLookupIndex {
            module: module.to_string(),
            index: index.to_string(),
        }
    }

    pub fn unsupported_lookup_type(module: &str, index: &str, index_type: &str) -> Self {
        Self::UnsupportedLookupType {
            module: module.to_string(),
            index: index.to_string(),
            index_type: index_type.to_string(),
        }
    }

    /// Module whose generation failed
    pub fn module(&self) -> &str {
        match self {
            Self::WalkTargetNotFound { module, .. }
            | Self::UnknownLookupIndex { module, .. }
            | Self::UnsupportedLookupType { module, .. } => module,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::WalkTargetNotFound { .. } => codes::resolver::WALK_TARGET_NOT_FOUND,
            Self::UnknownLookupIndex { .. } => codes::generator::LOOKUP_INDEX_NOT_FOUND,
            Self::UnsupportedLookupType { .. } => codes::generator::UNSUPPORTED_LOOKUP_TYPE,
        }
    }
}
