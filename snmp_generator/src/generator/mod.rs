//! Module generation
//!
//! Turns one [`ModuleRequest`] into a [`Module`]: resolves every walk
//! request against the prepared tree, synthesizes metric descriptors for
//! everything reachable from the resolved roots, rewrites indexes through
//! lookups and finally reduces the accumulated OIDs to a minimal set of
//! walks and gets.

pub mod error;
pub mod output;

use crate::classify::{metric_access, metric_type};
use crate::config::runtime::GeneratorPreferences;
use crate::logging::{self, codes};
use crate::oids::minimize_oids;
use crate::request::ModuleRequest;
use crate::resolver::{resolve, Resolution};
use crate::sanitize::sanitize_label_name;
use crate::tree::{MibNode, NodeId, PreparedTree};
use crate::{log_error, log_info, log_success, log_warning};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

pub use error::{GeneratorError, GeneratorResult};
pub use output::{Index, Lookup, Metric, Module};

/// Trailing marker on a pending request meaning "get, not walk"
const GET_MARKER: char = '.';

/// Requests accumulated while generating one module
#[derive(Debug, Default)]
struct PollPlan {
    requests: BTreeSet<String>,
    /// Instance suffixes requested per column OID
    table_instances: HashMap<String, Vec<String>>,
}

impl PollPlan {
    fn walk(&mut self, oid: &str) {
        self.requests.insert(oid.to_string());
    }

    fn get(&mut self, oid: &str) {
        self.requests.insert(format!("{}{}", oid, GET_MARKER));
    }

    fn record_instance(&mut self, column_oid: &str, suffix: String) {
        self.table_instances
            .entry(column_oid.to_string())
            .or_default()
            .push(suffix);
    }

    fn instances_of(&self, column_oid: &str) -> &[String] {
        self.table_instances
            .get(column_oid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Minimize and split into (walk, get)
    fn finish(self) -> (Vec<String>, Vec<String>) {
        let mut walk = Vec::new();
        let mut get = Vec::new();

        for oid in minimize_oids(self.requests.into_iter().collect()) {
            match oid.strip_suffix(GET_MARKER) {
                Some(instance) => get.push(instance.to_string()),
                None => walk.push(oid),
            }
        }

        (walk, get)
    }
}

/// Generate the module `module_name` from `request`.
///
/// Every event logged while generating carries the module name.
pub fn generate_config_module(
    module_name: &str,
    request: &ModuleRequest,
    prepared: &PreparedTree,
    preferences: &GeneratorPreferences,
) -> GeneratorResult<Module> {
    logging::with_module_context(module_name, || {
        let result = generate(module_name, request, prepared, preferences);
        if let Err(error) = &result {
            log_error!(error.error_code(), &error.to_string());
        }
        result
    })
}

fn generate(
    module_name: &str,
    request: &ModuleRequest,
    prepared: &PreparedTree,
    preferences: &GeneratorPreferences,
) -> GeneratorResult<Module> {
    let overridden = apply_type_overrides(request, prepared);
    let tree: &PreparedTree = &overridden;
    let mut plan = PollPlan::default();

    let roots = resolve_walk_requests(module_name, request, tree, &mut plan, preferences)?;

    let mut metrics = Vec::new();
    for root in roots {
        for id in tree.tree.subtree(root) {
            if let Some(metric) = build_metric(tree.node(id), tree, preferences) {
                metrics.push(metric);
            }
        }
    }

    apply_lookups(module_name, request, tree, &mut metrics, &mut plan)?;
    apply_regex_extracts(request, &mut metrics);

    let (walk, get) = plan.finish();

    log_success!(
        codes::success::MODULE_GENERATED,
        &format!("Generated module {}", module_name),
        "walk" => walk.len(),
        "get" => get.len(),
        "metrics" => metrics.len()
    );

    Ok(Module { walk, get, metrics })
}

/// Apply type overrides to a private copy of the tree, leaving the shared
/// tree untouched
fn apply_type_overrides<'a>(
    request: &ModuleRequest,
    prepared: &'a PreparedTree,
) -> Cow<'a, PreparedTree> {
    let mut overrides = Vec::new();
    for (name, override_type) in request.type_overrides() {
        if !prepared.names.contains(name) {
            log_warning!(
                codes::request::OVERRIDE_TARGET_NOT_FOUND,
                &format!("Could not find metric '{}' to override type", name),
                "name" => name
            );
            continue;
        }
        overrides.push((name, override_type));
    }

    if overrides.is_empty() {
        return Cow::Borrowed(prepared);
    }

    let mut copy = prepared.clone();
    copy.rebuild_index();
    for (name, override_type) in overrides {
        if let Some(id) = copy.lookup_id(name) {
            copy.tree.node_mut(id).node_type = override_type.to_string();
        }
    }

    Cow::Owned(copy)
}

/// Resolve walk requests into the poll plan and return the metric roots,
/// sorted by OID
fn resolve_walk_requests(
    module_name: &str,
    request: &ModuleRequest,
    tree: &PreparedTree,
    plan: &mut PollPlan,
    preferences: &GeneratorPreferences,
) -> GeneratorResult<Vec<NodeId>> {
    let to_walk: Vec<String> = request
        .walk
        .iter()
        .map(|name| match tree.lookup(name) {
            Some(node) => node.oid.clone(),
            None => name.clone(),
        })
        .collect();

    let mut roots: Vec<NodeId> = Vec::new();
    for oid in minimize_oids(to_walk) {
        let resolution = resolve(&oid, tree);

        if preferences.log_resolution_details {
            log_info!("Resolved walk request",
                "request" => oid,
                "resolution" => resolution.kind()
            );
        }

        let id = match resolution {
            Resolution::NotFound => {
                return Err(GeneratorError::walk_target_not_found(module_name, &oid));
            }
            Resolution::Subtree(id) => {
                plan.walk(&oid);
                id
            }
            Resolution::Instance(id) => {
                plan.get(&oid);
                let column_oid = &tree.node(id).oid;
                plan.record_instance(column_oid, oid.replacen(column_oid.as_str(), "", 1));
                id
            }
            Resolution::Scalar(id) => {
                // Scalars are always instance 0
                plan.get(&format!("{}.0", oid));
                id
            }
        };

        if !roots.contains(&id) {
            roots.push(id);
        }
    }

    roots.sort_by(|a, b| tree.node(*a).oid.cmp(&tree.node(*b).oid));
    Ok(roots)
}

/// Metric descriptor for `node`, or `None` when it is not exportable or one
/// of its indexes cannot be described
fn build_metric(
    node: &MibNode,
    tree: &PreparedTree,
    preferences: &GeneratorPreferences,
) -> Option<Metric> {
    let kind = metric_type(&node.node_type)?;
    if !metric_access(&node.access) {
        return None;
    }

    let mut indexes = Vec::with_capacity(node.indexes.len());
    for index_name in &node.indexes {
        let Some(index_node) = tree.lookup(index_name) else {
            if preferences.log_dropped_metrics {
                log_warning!(
                    codes::generator::INDEX_NOT_FOUND,
                    &format!("Can't find index {} for node {}", index_name, node.label),
                    "index" => index_name,
                    "node" => node.label
                );
            }
            return None;
        };

        let Some(index_type) = metric_type(&index_node.node_type) else {
            if preferences.log_dropped_metrics {
                log_warning!(
                    codes::generator::UNSUPPORTED_INDEX_TYPE,
                    &format!(
                        "Can't handle index type {} for node {}",
                        index_node.node_type, node.label
                    ),
                    "index" => index_name,
                    "index_type" => index_node.node_type,
                    "node" => node.label
                );
            }
            return None;
        };

        indexes.push(Index {
            labelname: index_name.clone(),
            index_type,
            fixed_size: index_node.fixed_size,
        });
    }

    Some(Metric {
        name: sanitize_label_name(&node.label),
        oid: node.oid.clone(),
        metric_type: kind,
        help: format!("{} - {}", node.description, node.oid),
        indexes,
        lookups: Vec::new(),
        regex_extracts: Default::default(),
    })
}

fn apply_lookups(
    module_name: &str,
    request: &ModuleRequest,
    tree: &PreparedTree,
    metrics: &mut [Metric],
    plan: &mut PollPlan,
) -> GeneratorResult<()> {
    for rule in &request.lookups {
        for metric in metrics.iter_mut() {
            for index in metric.indexes.iter_mut() {
                if index.labelname != rule.old_index {
                    continue;
                }

                let index_node = tree.lookup(&rule.new_index).ok_or_else(|| {
                    GeneratorError::unknown_lookup_index(module_name, &rule.new_index)
                })?;
                let lookup_type = metric_type(&index_node.node_type).ok_or_else(|| {
                    GeneratorError::unsupported_lookup_type(
                        module_name,
                        &rule.new_index,
                        &index_node.node_type,
                    )
                })?;

                let label = sanitize_label_name(&index_node.label);
                index.labelname = label.clone();
                metric.lookups.push(Lookup {
                    labels: vec![label.clone()],
                    labelname: label,
                    lookup_type,
                    oid: index_node.oid.clone(),
                });

                // Fetch only the rows that were requested for this column
                let instances = plan.instances_of(&metric.oid).to_vec();
                if instances.is_empty() {
                    plan.walk(&index_node.oid);
                } else {
                    for suffix in instances {
                        plan.get(&format!("{}{}", index_node.oid, suffix));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Attach regex extracts to metrics matched by name or OID
fn apply_regex_extracts(request: &ModuleRequest, metrics: &mut [Metric]) {
    for (name, params) in &request.overrides {
        for metric in metrics.iter_mut() {
            if *name == metric.name || *name == metric.oid {
                metric.regex_extracts = params.regex_extracts.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MetricKind;
    use crate::request::{LookupRule, MetricOverride, RegexpExtract};
    use crate::tree::fixtures;
    use assert_matches::assert_matches;
    use std::collections::BTreeMap;

    fn request(walk: &[&str]) -> ModuleRequest {
        ModuleRequest {
            walk: walk.iter().map(|w| w.to_string()).collect(),
            ..ModuleRequest::default()
        }
    }

    fn generate_with(request: &ModuleRequest) -> GeneratorResult<Module> {
        let prepared = fixtures::prepared_if_mib();
        generate_config_module("test", request, &prepared, &GeneratorPreferences::default())
    }

    fn names(module: &Module) -> Vec<&str> {
        module.metrics.iter().map(|m| m.name.as_str()).collect()
    }

    fn type_override(override_type: &str) -> MetricOverride {
        MetricOverride {
            metric_type: Some(override_type.to_string()),
            ..MetricOverride::default()
        }
    }

    #[test]
    fn test_scalar_is_fetched_at_instance_zero() {
        let module = generate_with(&request(&["sysUpTime"])).unwrap();

        assert!(module.walk.is_empty());
        assert_eq!(module.get, vec!["1.3.6.1.2.1.1.3.0"]);
        assert_eq!(module.metrics.len(), 1);

        let metric = &module.metrics[0];
        assert_eq!(metric.name, "sysUpTime");
        assert_eq!(metric.metric_type, MetricKind::Gauge);
        assert_eq!(
            metric.help,
            "The time since the network management portion of the system was last re-initialized. - 1.3.6.1.2.1.1.3"
        );
        assert!(metric.indexes.is_empty());
    }

    #[test]
    fn test_table_is_walked() {
        let module = generate_with(&request(&["ifTable"])).unwrap();

        assert_eq!(module.walk, vec!["1.3.6.1.2.1.2.2"]);
        assert!(module.get.is_empty());
        assert_eq!(
            names(&module),
            vec!["ifIndex", "ifDescr", "ifPhysAddress", "ifInOctets", "ifTemperature"]
        );

        let descr = &module.metrics[1];
        assert_eq!(descr.metric_type, MetricKind::DisplayString);
        assert_eq!(
            descr.indexes,
            vec![Index {
                labelname: "ifIndex".to_string(),
                index_type: MetricKind::Gauge,
                fixed_size: 0,
            }]
        );
    }

    #[test]
    fn test_table_row_is_a_get() {
        let module = generate_with(&request(&["1.3.6.1.2.1.2.2.1.10.5"])).unwrap();

        assert!(module.walk.is_empty());
        assert_eq!(module.get, vec!["1.3.6.1.2.1.2.2.1.10.5"]);
        assert_eq!(names(&module), vec!["ifInOctets"]);
        assert_eq!(module.metrics[0].metric_type, MetricKind::Counter);
    }

    #[test]
    fn test_walk_names_resolved_and_minimized() {
        let module = generate_with(&request(&["sysUpTime", "system"])).unwrap();

        assert_eq!(module.walk, vec!["1.3.6.1.2.1.1"]);
        assert!(module.get.is_empty());
        assert_eq!(names(&module), vec!["sysDescr", "sysUpTime", "sysName"]);
        assert_eq!(
            module.metrics[0].help,
            "A textual description of the entity - 1.3.6.1.2.1.1.1"
        );
        assert_eq!(module.metrics[2].metric_type, MetricKind::DisplayString);
    }

    #[test]
    fn test_metric_roots_sorted_by_oid() {
        let module =
            generate_with(&request(&["ifTable", "1.3.6.1.2.1.2.2.1.10.5", "sysUpTime"])).unwrap();

        assert_eq!(module.walk, vec!["1.3.6.1.2.1.2.2"]);
        assert_eq!(module.get, vec!["1.3.6.1.2.1.1.3.0"]);
        assert_eq!(module.metrics[0].name, "sysUpTime");
        assert_eq!(module.metrics.len(), 6);
    }

    #[test]
    fn test_metric_names_sanitized() {
        let module = generate_with(&request(&["test-Status!"])).unwrap();
        assert_eq!(module.get, vec!["1.3.6.1.4.1.9999.3.0"]);
        assert_eq!(names(&module), vec!["test_Status_"]);
    }

    #[test]
    fn test_augmenting_table_uses_augmented_index() {
        let module = generate_with(&request(&["ifXTable"])).unwrap();

        assert_eq!(names(&module), vec!["ifName", "ifHCInOctets", "ifAlias"]);
        for metric in &module.metrics {
            assert_eq!(metric.indexes.len(), 1);
            assert_eq!(metric.indexes[0].labelname, "ifIndex");
        }
    }

    #[test]
    fn test_unresolvable_index_drops_metric() {
        let module = generate_with(&request(&["brokenTable", "oddTable"])).unwrap();

        assert!(module.metrics.is_empty());
        assert_eq!(module.walk, vec!["1.3.6.1.4.1.9999.1", "1.3.6.1.4.1.9999.2"]);
    }

    #[test]
    fn test_fixed_size_index() {
        let module = generate_with(&request(&["macTable"])).unwrap();

        assert_eq!(names(&module), vec!["macAddr", "macPackets"]);
        let index = &module.metrics[1].indexes[0];
        assert_eq!(index.labelname, "macAddr");
        assert_eq!(index.index_type, MetricKind::PhysAddress48);
        assert_eq!(index.fixed_size, 6);
    }

    #[test]
    fn test_unknown_walk_target_is_fatal() {
        assert_matches!(
            generate_with(&request(&["1.3.6.1.2.1.2.2.1.99"])),
            Err(GeneratorError::WalkTargetNotFound { oid, .. }) if oid == "1.3.6.1.2.1.2.2.1.99"
        );
        assert_matches!(
            generate_with(&request(&["noSuchObject"])),
            Err(GeneratorError::WalkTargetNotFound { .. })
        );
    }

    #[test]
    fn test_lookup_on_instance_adds_single_get() {
        let mut req = request(&["1.3.6.1.2.1.2.2.1.10.5"]);
        req.lookups.push(LookupRule::new("ifIndex", "ifDescr"));

        let module = generate_with(&req).unwrap();

        assert!(module.walk.is_empty());
        assert_eq!(
            module.get,
            vec!["1.3.6.1.2.1.2.2.1.10.5", "1.3.6.1.2.1.2.2.1.2.5"]
        );

        let metric = &module.metrics[0];
        assert_eq!(metric.indexes[0].labelname, "ifDescr");
        assert_eq!(
            metric.lookups,
            vec![Lookup {
                labels: vec!["ifDescr".to_string()],
                labelname: "ifDescr".to_string(),
                lookup_type: MetricKind::DisplayString,
                oid: "1.3.6.1.2.1.2.2.1.2".to_string(),
            }]
        );
    }

    #[test]
    fn test_lookup_on_table_walks_source_column() {
        let mut req = request(&["ifXTable"]);
        req.lookups.push(LookupRule::new("ifIndex", "ifDescr"));

        let module = generate_with(&req).unwrap();

        assert_eq!(
            module.walk,
            vec!["1.3.6.1.2.1.2.2.1.2", "1.3.6.1.2.1.31.1.1"]
        );
        assert!(module.metrics.iter().all(|m| m.lookups.len() == 1));
    }

    #[test]
    fn test_lookup_for_other_index_is_ignored() {
        let mut req = request(&["ifXTable"]);
        req.lookups.push(LookupRule::new("someOtherIndex", "noSuchObject"));

        let module = generate_with(&req).unwrap();
        assert!(module.metrics.iter().all(|m| m.lookups.is_empty()));
        assert_eq!(module.walk, vec!["1.3.6.1.2.1.31.1.1"]);
    }

    #[test]
    fn test_unknown_lookup_index_is_fatal() {
        let mut req = request(&["ifTable"]);
        req.lookups.push(LookupRule::new("ifIndex", "missingIndex"));

        assert_matches!(
            generate_with(&req),
            Err(GeneratorError::UnknownLookupIndex { index, .. }) if index == "missingIndex"
        );
    }

    #[test]
    fn test_unsupported_lookup_type_is_fatal() {
        let mut req = request(&["ifTable"]);
        req.lookups.push(LookupRule::new("ifIndex", "ifSpecific"));

        let error = generate_with(&req).unwrap_err();
        assert_matches!(error, GeneratorError::UnsupportedLookupType { .. });
        assert_eq!(error.module(), "test");
    }

    #[test]
    fn test_type_override_stays_module_local() {
        let prepared = fixtures::prepared_if_mib();
        let mut req = request(&["ifXTable"]);
        req.overrides
            .insert("ifAlias".to_string(), type_override("OctetString"));
        req.overrides
            .insert("noSuchObject".to_string(), type_override("gauge"));

        let module =
            generate_config_module("if_mib", &req, &prepared, &GeneratorPreferences::default())
                .unwrap();

        let alias = module.metrics.iter().find(|m| m.name == "ifAlias").unwrap();
        assert_eq!(alias.metric_type, MetricKind::OctetString);
        assert_eq!(prepared.lookup("ifAlias").unwrap().node_type, "DisplayString");

        let untouched = generate_config_module(
            "plain",
            &request(&["ifXTable"]),
            &prepared,
            &GeneratorPreferences::default(),
        )
        .unwrap();
        let alias = untouched.metrics.iter().find(|m| m.name == "ifAlias").unwrap();
        assert_eq!(alias.metric_type, MetricKind::DisplayString);
    }

    #[test]
    fn test_type_override_makes_node_exportable() {
        let mut req = request(&["ifTable"]);
        req.overrides
            .insert("ifSpecific".to_string(), type_override("gauge"));

        let module = generate_with(&req).unwrap();
        assert_eq!(names(&module).last(), Some(&"ifSpecific"));
    }

    #[test]
    fn test_regex_extracts_matched_by_name_and_oid() {
        let extracts: BTreeMap<String, Vec<RegexpExtract>> = [(
            "Length".to_string(),
            vec![RegexpExtract {
                value: "$1".to_string(),
                regex: "(.*)".to_string(),
            }],
        )]
        .into_iter()
        .collect();

        let mut req = request(&["ifTable"]);
        req.overrides.insert(
            "ifDescr".to_string(),
            MetricOverride {
                metric_type: None,
                regex_extracts: extracts.clone(),
            },
        );
        req.overrides.insert(
            "1.3.6.1.2.1.2.2.1.10".to_string(),
            MetricOverride {
                metric_type: None,
                regex_extracts: extracts.clone(),
            },
        );

        let module = generate_with(&req).unwrap();
        for metric in &module.metrics {
            let expected = metric.name == "ifDescr" || metric.name == "ifInOctets";
            assert_eq!(metric.regex_extracts == extracts, expected, "{}", metric.name);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut req = request(&["ifXTable", "sysUpTime", "ifTable", "1.3.6.1.4.1.9999.3"]);
        req.lookups.push(LookupRule::new("ifIndex", "ifName"));

        let first = generate_with(&req).unwrap();
        let second = generate_with(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_serialization_omits_empty_fields() {
        let module = generate_with(&request(&["sysUpTime"])).unwrap();
        let json = serde_json::to_value(&module).unwrap();

        assert_eq!(json["metrics"][0]["type"], "gauge");
        assert!(json["metrics"][0].get("indexes").is_none());
        assert!(json["metrics"][0].get("regex_extracts").is_none());
        assert_eq!(json["get"][0], "1.3.6.1.2.1.1.3.0");
    }
}
