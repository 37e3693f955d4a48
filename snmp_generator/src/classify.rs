//! Metric type and access classification of MIB syntax tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of metric kinds a node can be exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "gauge")]
    Gauge,
    #[serde(rename = "counter")]
    Counter,
    OctetString,
    IpAddr,
    PhysAddress48,
    DisplayString,
    Float,
    Double,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
            MetricKind::OctetString => "OctetString",
            MetricKind::IpAddr => "IpAddr",
            MetricKind::PhysAddress48 => "PhysAddress48",
            MetricKind::DisplayString => "DisplayString",
            MetricKind::Float => "Float",
            MetricKind::Double => "Double",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared syntax token to a metric kind.
///
/// `None` means the type is unsupported; callers skip such nodes.
pub fn metric_type(token: &str) -> Option<MetricKind> {
    match token {
        "gauge" | "INTEGER" | "GAUGE" | "TIMETICKS" | "UINTEGER" | "UNSIGNED32" | "INTEGER32" => {
            Some(MetricKind::Gauge)
        }
        "counter" | "COUNTER" | "COUNTER64" => Some(MetricKind::Counter),
        "OctetString" | "OCTETSTR" | "BITSTRING" => Some(MetricKind::OctetString),
        "IpAddr" | "IPADDR" | "NETADDR" => Some(MetricKind::IpAddr),
        "PhysAddress48" => Some(MetricKind::PhysAddress48),
        "DisplayString" => Some(MetricKind::DisplayString),
        "Float" => Some(MetricKind::Float),
        "Double" => Some(MetricKind::Double),
        _ => None,
    }
}

/// Whether a declared access token describes an exportable object
pub fn metric_access(token: &str) -> bool {
    matches!(
        token,
        "ACCESS_READONLY" | "ACCESS_READWRITE" | "ACCESS_CREATE" | "ACCESS_NOACCESS"
    )
}
