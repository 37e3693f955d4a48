//! Per-module generation requests

use super::error::{RequestError, RequestResult};
use crate::classify::metric_type;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole generator configuration, one request per output module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleRequest>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> RequestResult<()> {
        for (name, request) in &self.modules {
            request.validate(name)?;
        }
        Ok(())
    }
}

/// What to poll for one module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRequest {
    /// Names or OIDs to poll
    pub walk: Vec<String>,

    /// Keyed by object name, metric name or OID
    #[serde(default)]
    pub overrides: BTreeMap<String, MetricOverride>,

    #[serde(default)]
    pub lookups: Vec<LookupRule>,
}

impl ModuleRequest {
    pub fn validate(&self, module: &str) -> RequestResult<()> {
        if self.walk.is_empty() {
            return Err(RequestError::empty_walk(module));
        }

        for (name, params) in &self.overrides {
            if let Some(override_type) = params.metric_type.as_deref().filter(|t| !t.is_empty()) {
                if metric_type(override_type).is_none() {
                    return Err(RequestError::unsupported_override_type(
                        module,
                        name,
                        override_type,
                    ));
                }
            }

            for extract in params.regex_extracts.values().flatten() {
                regex::Regex::new(&extract.regex).map_err(|e| {
                    RequestError::invalid_regex(module, name, &extract.regex, &e)
                })?;
            }
        }

        Ok(())
    }

    /// Overrides that replace the node type, in name order
    pub fn type_overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().filter_map(|(name, params)| {
            params
                .metric_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| (name.as_str(), t))
        })
    }
}

/// Per-object adjustments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricOverride {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,

    /// Keyed by the suffix appended to the metric name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regex_extracts: BTreeMap<String, Vec<RegexpExtract>>,
}

/// Derive a value from the textual form of a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexpExtract {
    pub value: String,
    pub regex: String,
}

/// Replace an index label with the value of a related object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRule {
    pub old_index: String,
    pub new_index: String,
}

impl LookupRule {
    pub fn new(old_index: &str, new_index: &str) -> Self {
        Self {
            old_index: old_index.to_string(),
            new_index: new_index.to_string(),
        }
    }
}
