//! Configuration module for the SNMP generator
//!
//! Compile-time limits live in [`constants`]; user preferences that may be
//! tuned through the environment live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{GeneratorPreferences, LogLevel, LoggingPreferences, RuntimeConfig};
