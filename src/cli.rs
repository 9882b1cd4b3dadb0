use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use clap::{Parser, ValueEnum};
use log::info;

use numtree::report::{ReportConfig, render_html, render_text};
use numtree::search::{ExpressionSearch, SearchConfig};
use numtree::utils::{parse_source, parse_sources};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Output format of the report
#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Html,
}

/// numtree - Enumerate every expression over a set of constants
#[derive(Parser, Debug)]
#[command(name = "numtree")]
#[command(
    about = "Combine constants with + - * / in every way and group the expressions by value"
)]
#[command(version)]
pub struct CliArgs {
    /// Constants to combine, each used exactly once per expression
    #[arg(required = true, allow_negative_numbers = true)]
    pub sources: Vec<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Explore each root constant on its own thread
    #[arg(short, long)]
    pub parallel: bool,

    /// Tolerance of the fraction shown for each value
    #[arg(short, long, default_value = "0.0001")]
    pub epsilon: String,

    /// Maximum continued-fraction terms for each value
    #[arg(short, long, default_value_t = 20)]
    pub max_fraction_iterations: usize,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub sources: Vec<BigDecimal>,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub search: SearchConfig,
    pub report: ReportConfig,
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Validate parsed arguments into a configuration
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let sources = parse_sources(&args.sources).context("Invalid source constants")?;
        let epsilon = parse_source(&args.epsilon).context("Invalid epsilon")?;

        Ok(CliConfig {
            sources,
            output: args.output,
            format: args.format,
            search: SearchConfig {
                parallel: args.parallel,
            },
            report: ReportConfig {
                epsilon,
                max_fraction_iterations: args.max_fraction_iterations,
            },
            log_level: args.log_level,
        })
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    CliConfig::from_args(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    let search = ExpressionSearch::new(config.search.clone());
    let outcome = search
        .search(&config.sources)
        .context("Expression search failed")?;

    eprintln!("Completed in {} iterations", outcome.iterations);

    let report = match config.format {
        ReportFormat::Text => render_text(&config.sources, &outcome, &config.report),
        ReportFormat::Html => render_html(&config.sources, &outcome, &config.report),
    }
    .context("Failed to render report")?;

    match &config.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}
