//! kolstat - per-monster statistics from Kingdom of Loathing session logs.
//!
//! Usage: kolstat [--config PATH] [--write-config PATH] [--format text|json] [--details] [--output PATH] FILE...
//!
//! Files are read in argument order and analyzed as one transcript.
//! `--write-config` saves the effective settings; with no files it does only that.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use kolstat_cli::reader::read_lines;
use kolstat_cli::report::{Format, write_report};
use kolstat_core::config::{load_config, save_config};
use kolstat_core::{AnalysisConfig, analyze_lines};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Per-monster stat, meat, initiative and drop rate estimates")]
struct Cli {
    /// Settings file (defaults to the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Include sample lists and per-item trial breakdowns
    #[arg(short, long)]
    details: bool,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the effective settings as TOML
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Session logs, analyzed in order
    #[arg(required_unless_present = "write_config")]
    files: Vec<PathBuf>,
}

/// Initialize logging, writing to KOLSTAT_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("KOLSTAT_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<AnalysisConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => confy::load("kolstat", Some("config")).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load user config, using defaults");
            AnalysisConfig::default()
        }),
    };
    if cli.details {
        config.report.details = true;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_settings(cli)?;

    if let Some(path) = &cli.write_config {
        save_config(path, &config).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), "Settings written");
        if cli.files.is_empty() {
            return Ok(());
        }
    }

    let mut lines = Vec::new();
    for path in &cli.files {
        tracing::info!(path = %path.display(), "Parsing file");
        lines.extend(read_lines(path).map_err(|e| e.to_string())?);
    }

    let (encounters, analysis) = analyze_lines(&lines, &config);
    tracing::debug!(encounters = encounters.len(), "Rendering report");

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_report(&mut out, cli.format, &analysis, &config, &generated)
        .and_then(|_| out.flush())
        .map_err(|e| format!("Failed to write report: {}", e))?;

    if let Some(path) = &cli.output {
        tracing::info!(path = %path.display(), "Report written");
    }
    Ok(())
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "kolstat failed");
        std::process::exit(1);
    }
}
