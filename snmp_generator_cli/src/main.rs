use clap::Parser;
use snmp_generator::batch::BatchConfig;
use snmp_generator::config::runtime::{
    parse_log_level, GeneratorPreferences, LogLevel, LoggingPreferences,
};
use snmp_generator::logging;
use snmp_generator::pipeline::{self, PipelineOutput};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate SNMP polling modules from a parsed MIB tree
#[derive(Parser, Debug)]
#[command(name = "snmp-generator", version, about)]
struct Cli {
    /// JSON dump of the parsed MIB node tree
    #[arg(short, long)]
    tree: PathBuf,

    /// Generator configuration (TOML)
    #[arg(short, long, default_value = "generator.toml")]
    config: PathBuf,

    /// Write the generated modules here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of worker threads
    #[arg(long, conflicts_with = "sequential")]
    threads: Option<usize>,

    /// Generate modules one at a time
    #[arg(long)]
    sequential: bool,

    /// Stop after the first module that fails
    #[arg(long)]
    fail_fast: bool,

    /// Report each module on stderr as it is generated
    #[arg(long)]
    progress: bool,

    /// Minimum level of log events to print (error, warning, info, debug)
    #[arg(long, value_parser = log_level_arg)]
    log_level: Option<LogLevel>,

    /// Emit log events as JSON lines
    #[arg(long)]
    structured_logs: bool,

    /// Log how every walk request was resolved
    #[arg(long)]
    log_resolution_details: bool,
}

fn log_level_arg(value: &str) -> Result<LogLevel, String> {
    parse_log_level(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

impl Cli {
    fn logging_preferences(&self) -> LoggingPreferences {
        let mut preferences = LoggingPreferences::default();
        if let Some(level) = self.log_level {
            preferences.min_log_level = level;
        }
        if self.structured_logs {
            preferences.use_structured_logging = true;
        }
        preferences
    }

    fn generator_preferences(&self) -> GeneratorPreferences {
        let mut preferences = GeneratorPreferences::default();
        if self.log_resolution_details {
            preferences.log_resolution_details = true;
        }
        preferences
    }

    fn batch_config(&self) -> BatchConfig {
        let mut config = if self.sequential {
            BatchConfig::sequential()
        } else {
            BatchConfig::default()
        };
        if let Some(threads) = self.threads {
            config.max_threads = threads.max(1);
        }
        config.fail_fast = self.fail_fast;
        config.progress_reporting = self.progress;
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::config::init_runtime_preferences(cli.logging_preferences()) {
        eprintln!("Error: {}", error);
        return ExitCode::FAILURE;
    }
    if let Err(error) = logging::init_global_logging() {
        eprintln!("Error: {}", error);
        return ExitCode::FAILURE;
    }
    if logging::debug_enabled() {
        eprintln!("{}", logging::config::get_config_summary());
    }

    let result = pipeline::run_with_preferences(
        &cli.tree,
        &cli.config,
        &cli.batch_config(),
        &cli.generator_preferences(),
    );

    print_diagnostics();

    match result.and_then(|output| write_output(&output, cli.output.as_deref())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            logging::safe_log_error(error.error_code(), &error.to_string());
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn write_output(
    output: &PipelineOutput,
    path: Option<&Path>,
) -> Result<(), pipeline::PipelineError> {
    match path {
        Some(path) => output.write_to(path),
        None => {
            let json = output.to_json()?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)
                .map_err(|e| pipeline::PipelineError::output("<stdout>", &e.to_string()))
        }
    }
}

/// Cargo-style summary of warnings and errors grouped by module
fn print_diagnostics() {
    let summary = logging::get_processing_summary();
    if !summary.has_errors() && !summary.has_warnings() {
        return;
    }

    if let Some(report) = logging::cargo_style_summary() {
        eprint!("{}", report);
    }
}
