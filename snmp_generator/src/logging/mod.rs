//! Global logging module for the SNMP generator
//!
//! Provides thread-safe global logging with per-module diagnostic collection
//! and a small macro interface. Logging never panics when uninitialized; events
//! emitted before [`init_global_logging`] are dropped.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, ModuleContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static MODULE_CONTEXT: RefCell<Option<ModuleContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(service::create_configured_service()))?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized"
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    GLOBAL_ERROR_COLLECTOR
        .set(Arc::new(ErrorCollector::new()))
        .map_err(|_| "Global error collector already initialized")?;

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some() && GLOBAL_ERROR_COLLECTOR.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

/// Whether debug events would reach the logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// MODULE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_module_context(module_name: &str) {
    MODULE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(ModuleContext::new(module_name));
    });
}

pub fn clear_module_context() {
    MODULE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with module context; the previous context is restored
/// afterwards so nested calls behave
pub fn with_module_context<F, R>(module_name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_module_context();
    set_module_context(module_name);
    let result = f();
    MODULE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn get_current_module_context() -> Option<ModuleContext> {
    MODULE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Attach context and the current module, then log and collect the event
pub fn log_event_with_context(mut event: LogEvent, context: Vec<(&str, String)>) {
    for (key, value) in context {
        event = event.with_context(key, &value);
    }

    let module = get_current_module_context();
    if let Some(module_ctx) = &module {
        if config::include_module_context() {
            event = event.with_context("module", &module_ctx.module_name);
        }
    }

    if let (Some(module_ctx), Some(collector)) = (&module, try_get_global_error_collector()) {
        if event.is_error() || event.is_warning() {
            collector.record_event(&module_ctx.module_name, event.clone());
        }
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_error_collector()
        .map(|collector| collector.get_summary())
        .unwrap_or_default()
}

pub fn get_module_events(module_name: &str) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_module_events(module_name))
        .unwrap_or_default()
}

/// Cargo-style diagnostic summary, `None` when logging is not initialized
pub fn cargo_style_summary() -> Option<String> {
    try_get_global_error_collector().map(collector::format_cargo_style_errors)
}

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_error(code, message);
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
