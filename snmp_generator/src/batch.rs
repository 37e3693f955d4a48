//! Batch generation of every module in a configuration
//!
//! Modules share one read-only prepared tree. Sequential and parallel
//! execution produce the same results; successes and failures are keyed by
//! module name so merge order never affects output.

use crate::config::compile_time::batch::{DEFAULT_WORKER_THREADS, MAX_WORKER_THREADS};
use crate::config::runtime::GeneratorPreferences;
use crate::generator::{generate_config_module, GeneratorError, Module};
use crate::logging::codes;
use crate::request::{GeneratorConfig, ModuleRequest};
use crate::tree::PreparedTree;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub progress_reporting: bool,
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(DEFAULT_WORKER_THREADS),
            progress_reporting: false,
            fail_fast: false,
        }
    }
}

impl BatchConfig {
    pub fn sequential() -> Self {
        Self {
            max_threads: 1,
            ..Self::default()
        }
    }
}

/// Batch processing results
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_modules: BTreeMap<String, Module>,
    pub failed_modules: BTreeMap<String, GeneratorError>,
    pub processing_duration: Duration,
    pub modules_processed: usize,
    pub modules_requested: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_modules.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_modules.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.modules_processed == 0 {
            0.0
        } else {
            self.successful_modules.len() as f64 / self.modules_processed as f64
        }
    }

    pub fn add_success(&mut self, module_name: &str, module: Module) {
        self.successful_modules.insert(module_name.to_string(), module);
        self.modules_processed += 1;
    }

    pub fn add_failure(&mut self, module_name: &str, error: GeneratorError) {
        self.failed_modules.insert(module_name.to_string(), error);
        self.modules_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_modules.extend(other.successful_modules);
        self.failed_modules.extend(other.failed_modules);
        self.modules_processed += other.modules_processed;
    }

    /// First failure in module name order
    pub fn first_failure(&self) -> Option<&GeneratorError> {
        self.failed_modules.values().next()
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch generation completed: {} modules processed, {} successful ({:.1}%), {} failed, {:.2}s total",
            self.modules_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("No modules configured")]
    NoModules,

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::NoModules => codes::batch::NO_MODULES,
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILURE,
        }
    }
}

fn lock_results(results: &Mutex<BatchResults>) -> MutexGuard<'_, BatchResults> {
    results
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn record(results: &mut BatchResults, module_name: &str, outcome: Result<Module, GeneratorError>) {
    match outcome {
        Ok(module) => results.add_success(module_name, module),
        Err(error) => results.add_failure(module_name, error),
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Generate modules one after another
pub fn generate_sequential(
    config: &GeneratorConfig,
    tree: &PreparedTree,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch generation",
        "modules" => config.modules.len()
    );

    let mut results = BatchResults::new();
    results.modules_requested = config.modules.len();

    for (position, (module_name, request)) in config.modules.iter().enumerate() {
        if batch_config.progress_reporting {
            eprintln!(
                "Generating module {} of {}: {}",
                position + 1,
                config.modules.len(),
                module_name
            );
        }

        let outcome = generate_config_module(module_name, request, tree, preferences);
        let failed = outcome.is_err();
        record(&mut results, module_name, outcome);

        if failed && batch_config.fail_fast {
            crate::log_warning!(
                codes::batch::FAIL_FAST_STOP,
                "Fail-fast mode enabled, stopping batch generation"
            );
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion("Sequential batch generation completed", &results, 1);

    Ok(results)
}

/// Generate modules on a fixed number of worker threads
pub fn generate_parallel(
    config: &GeneratorConfig,
    tree: Arc<PreparedTree>,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = batch_config.max_threads.clamp(1, MAX_WORKER_THREADS);

    crate::log_info!("Starting parallel batch generation",
        "modules" => config.modules.len(),
        "max_threads" => threads
    );

    let mut results = BatchResults::new();
    results.modules_requested = config.modules.len();

    let requests: Vec<(String, ModuleRequest)> = config
        .modules
        .iter()
        .map(|(name, request)| (name.clone(), request.clone()))
        .collect();

    let chunk_size = calculate_chunk_size(requests.len(), threads);
    crate::log_debug!("Parallel generation configuration",
        "total_modules" => requests.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    let stop = Arc::new(AtomicBool::new(false));

    for chunk in requests.chunks(chunk_size) {
        let chunk_results =
            generate_chunk_parallel(chunk, &tree, threads, batch_config, preferences, &stop)?;
        results.merge(chunk_results);

        if batch_config.fail_fast && results.failure_count() > 0 {
            crate::log_warning!(
                codes::batch::FAIL_FAST_STOP,
                "Fail-fast mode enabled, stopping batch generation"
            );
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion("Parallel batch generation completed", &results, threads);

    Ok(results)
}

fn generate_chunk_parallel(
    requests: &[(String, ModuleRequest)],
    tree: &Arc<PreparedTree>,
    threads: usize,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
    stop: &Arc<AtomicBool>,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let per_thread = requests.len().div_ceil(threads);

    let mut handles = Vec::new();
    for thread_requests in requests.chunks(per_thread.max(1)) {
        let thread_requests = thread_requests.to_vec();
        let results = Arc::clone(&results);
        let tree = Arc::clone(tree);
        let preferences = preferences.clone();
        let stop = Arc::clone(stop);
        let progress_reporting = batch_config.progress_reporting;
        let fail_fast = batch_config.fail_fast;

        handles.push(thread::spawn(move || {
            for (module_name, request) in &thread_requests {
                if stop.load(Ordering::Acquire) {
                    break;
                }
                if progress_reporting {
                    eprintln!("Generating module {}", module_name);
                }
                let outcome = generate_config_module(module_name, request, &tree, &preferences);
                if fail_fast && outcome.is_err() {
                    stop.store(true, Ordering::Release);
                }
                record(&mut lock_results(&results), module_name, outcome);
            }
        }));
    }

    for handle in handles {
        handle.join().map_err(|_| BatchError::ThreadError {
            message: "Worker panicked during module generation".to_string(),
        })?;
    }

    let results = Arc::try_unwrap(results).map_err(|_| BatchError::ThreadError {
        message: "Failed to extract results from worker threads".to_string(),
    })?;

    Ok(results
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner()))
}

/// Modules per scheduling round
fn calculate_chunk_size(modules: usize, threads: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 1;
    const MAX_CHUNK_SIZE: usize = 50;

    modules
        .div_ceil(threads.max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

fn log_completion(message: &str, results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETED,
        message,
        "modules_processed" => results.modules_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Generate every configured module, picking the execution mode from
/// `batch_config`
pub fn generate_modules(
    config: &GeneratorConfig,
    tree: Arc<PreparedTree>,
    batch_config: &BatchConfig,
    preferences: &GeneratorPreferences,
) -> Result<BatchResults, BatchError> {
    if config.modules.is_empty() {
        return Err(BatchError::NoModules);
    }

    if batch_config.max_threads <= 1 || config.modules.len() == 1 {
        generate_sequential(config, &tree, batch_config, preferences)
    } else {
        generate_parallel(config, tree, batch_config, preferences)
    }
}
