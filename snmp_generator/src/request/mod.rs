//! Generator configuration: module requests, loading and validation

pub mod error;
pub mod loader;
pub mod types;

pub use error::{RequestError, RequestResult};
pub use loader::{load_config, parse_config};
pub use types::{GeneratorConfig, LookupRule, MetricOverride, ModuleRequest, RegexpExtract};
