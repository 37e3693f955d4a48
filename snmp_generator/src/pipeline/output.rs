use super::error::PipelineError;
use crate::generator::Module;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Every generated module, keyed by module name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub generated_at: DateTime<Utc>,
    pub modules: BTreeMap<String, Module>,
}

impl PipelineOutput {
    pub fn new(modules: BTreeMap<String, Module>) -> Self {
        Self {
            generated_at: Utc::now(),
            modules,
        }
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::output("<memory>", &e.to_string()))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), PipelineError> {
        let json = self.to_json()?;
        fs::write(path, json + "\n")
            .map_err(|e| PipelineError::output(&path.display().to_string(), &e.to_string()))
    }
}
