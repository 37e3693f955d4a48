pub mod error;
pub mod output;

pub use error::PipelineError;
pub use output::PipelineOutput;

use crate::batch::{self, BatchConfig};
use crate::config::runtime::GeneratorPreferences;
use crate::request::{self, GeneratorConfig};
use crate::tree::{self, Node};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Load the tree and configuration, then generate every module
/// (tree file -> prepare -> config file -> batch generation)
pub fn run(
    tree_path: &Path,
    config_path: &Path,
    batch_config: &BatchConfig,
) -> PipelineResult<PipelineOutput> {
    run_with_preferences(
        tree_path,
        config_path,
        batch_config,
        &GeneratorPreferences::default(),
    )
}

pub fn run_with_preferences(
    tree_path: &Path,
    config_path: &Path,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
) -> PipelineResult<PipelineOutput> {
    crate::log_info!("Starting generator pipeline",
        "tree" => tree_path.display(),
        "config" => config_path.display()
    );

    // Stage 1: node tree
    let root = tree::load_tree(tree_path)?;

    // Stage 2: generator configuration
    let config = request::load_config(config_path)?;

    generate(root, &config, batch_config, preferences)
}

/// Generate every module of `config` from an in-memory tree
pub fn generate(
    root: Node,
    config: &GeneratorConfig,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
) -> PipelineResult<PipelineOutput> {
    let start_time = Instant::now();

    let prepared = Arc::new(tree::prepare_tree(root));
    let results = batch::generate_modules(config, prepared, batch_config, preferences)?;

    if let Some(error) = results.first_failure() {
        return Err(error.clone().into());
    }

    crate::log_info!("Generator pipeline completed",
        "modules" => results.success_count(),
        "duration_ms" => format!("{:.2}", start_time.elapsed().as_secs_f64() * 1000.0)
    );

    Ok(PipelineOutput::new(results.successful_modules))
}
