// Internal modules
pub mod batch;
pub mod classify;
pub mod config;
pub mod generator;
#[macro_use]
pub mod logging;
pub mod oids;
pub mod pipeline;
pub mod request;
pub mod resolver;
pub mod sanitize;
pub mod tree;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use classify::{metric_access, metric_type, MetricKind};
pub use generator::{generate_config_module, GeneratorError, Module};
pub use oids::minimize_oids;
pub use pipeline::output::PipelineOutput;
pub use pipeline::{PipelineError, PipelineResult};
pub use request::{GeneratorConfig, ModuleRequest};
pub use resolver::{resolve, Resolution};
pub use sanitize::sanitize_label_name;
pub use tree::{prepare_tree, MibTree, Node, NodeId, PreparedTree};
