//! Diagnostic collector for module generation with cargo-style output
//!
//! Warnings and errors are grouped by the module they were emitted for so
//! that a batch run can report them together once every module is done.

use super::events::LogEvent;
use crate::config::compile_time::logging::MAX_EVENTS_PER_MODULE;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Context information for the module currently being generated
#[derive(Debug, Clone)]
pub struct ModuleContext {
    pub module_name: String,
    pub start_time: Instant,
}

impl ModuleContext {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Summary of collected diagnostics
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub modules_with_events: usize,
    pub failed_modules: usize,
    pub modules_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

/// Thread-safe collector for warnings and errors, keyed by module name
pub struct ErrorCollector {
    module_events: Mutex<BTreeMap<String, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            module_events: Mutex::new(BTreeMap::new()),
        }
    }

    fn lock_events(&self) -> MutexGuard<'_, BTreeMap<String, Vec<LogEvent>>> {
        self.module_events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an event for a specific module
    pub fn record_event(&self, module_name: &str, event: LogEvent) {
        let mut events = self.lock_events();
        let module_events = events.entry(module_name.to_string()).or_default();

        if module_events.len() < MAX_EVENTS_PER_MODULE {
            module_events.push(event);
        } else if module_events.len() == MAX_EVENTS_PER_MODULE {
            module_events.push(LogEvent::info(&format!(
                "Too many events for module (limit: {})",
                MAX_EVENTS_PER_MODULE
            )));
        }
    }

    pub fn get_module_events(&self, module_name: &str) -> Vec<LogEvent> {
        self.lock_events()
            .get(module_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_module_warnings(&self, module_name: &str) -> Vec<LogEvent> {
        self.lock_events()
            .get(module_name)
            .map(|events| events.iter().filter(|e| e.is_warning()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_all_module_events(&self) -> BTreeMap<String, Vec<LogEvent>> {
        self.lock_events().clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.lock_events();
        let mut summary = ProcessingSummary {
            modules_with_events: events.len(),
            ..ProcessingSummary::default()
        };

        for module_events in events.values() {
            let errors = module_events.iter().filter(|e| e.is_error()).count();
            let warnings = module_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_modules += 1;
            } else if warnings > 0 {
                summary.modules_with_warnings += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }

    pub fn total_event_count(&self) -> usize {
        self.lock_events().values().map(Vec::len).sum()
    }

    pub fn clear(&self) {
        self.lock_events().clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Render collected diagnostics grouped by module, cargo style
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (module_name, events) in collector.get_all_module_events() {
        let issues: Vec<&LogEvent> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("Generating module {}...\n", module_name));
        for event in issues {
            let label = if event.is_error() { "error" } else { "warning" };
            output.push_str(&format!(
                "{}[{}]: {}\n",
                label,
                event.code.as_str(),
                event.message
            ));

            for (key, value) in &event.context {
                if key != "module" {
                    output.push_str(&format!("  = {}: {}\n", key, value));
                }
            }

            if event.is_error() {
                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }
        }
        output.push('\n');
    }

    let summary = collector.get_summary();
    output.push_str(&format!(
        "{} error(s), {} warning(s) across {} module(s)\n",
        summary.total_errors, summary.total_warnings, summary.modules_with_events
    ));

    output
}
