//! Error types for generator configuration loading

use crate::logging::codes;
use std::path::Path;

/// Result type for configuration operations
pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestError {
    #[error("Cannot read generator config '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Malformed generator config '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Module '{module}': unsupported type '{override_type}' in override for '{name}'")]
    UnsupportedOverrideType {
        module: String,
        name: String,
        override_type: String,
    },

    #[error("Module '{module}': invalid regex '{pattern}' in override for '{name}': {message}")]
    InvalidRegex {
        module: String,
        name: String,
        pattern: String,
        message: String,
    },

    #[error("Module '{module}' has nothing to walk")]
    EmptyWalk { module: String },
}

impl RequestError {
    pub fn io(path: &Path, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    pub fn parse(path: &str, error: &toml::de::Error) -> Self {
        Self::Parse {
            path: path.to_string(),
            message: error.to_string(),
        }
    }

    pub fn unsupported_override_type(module: &str, name: &str, override_type: &str) -> Self {
        Self::UnsupportedOverrideType {
            module: module.to_string(),
            name: name.to_string(),
            override_type: override_type.to_string(),
        }
    }

    pub fn invalid_regex(module: &str, name: &str, pattern: &str, error: &regex::Error) -> Self {
        Self::InvalidRegex {
            module: module.to_string(),
            name: name.to_string(),
            pattern: pattern.to_string(),
            message: error.to_string(),
        }
    }

    pub fn empty_walk(module: &str) -> Self {
        Self::EmptyWalk {
            module: module.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Io { .. } | Self::Parse { .. } => codes::request::CONFIG_LOAD_FAILURE,
            Self::UnsupportedOverrideType { .. } => codes::request::INVALID_OVERRIDE_TYPE,
            Self::InvalidRegex { .. } => codes::request::INVALID_REGEX,
            Self::EmptyWalk { .. } => codes::request::EMPTY_WALK,
        }
    }
}
