//! Generated module shape handed to serializers

use crate::classify::MetricKind;
use crate::request::RegexpExtract;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Polling plan and metric descriptors for one module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// OIDs fetched with bulk walks
    pub walk: Vec<String>,

    /// OIDs fetched with single gets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub get: Vec<String>,

    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub oid: String,
    #[serde(rename = "type")]
    pub metric_type: MetricKind,
    pub help: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lookups: Vec<Lookup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regex_extracts: BTreeMap<String, Vec<RegexpExtract>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub labelname: String,
    #[serde(rename = "type")]
    pub index_type: MetricKind,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fixed_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    pub labels: Vec<String>,
    pub labelname: String,
    #[serde(rename = "type")]
    pub lookup_type: MetricKind,
    pub oid: String,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}
