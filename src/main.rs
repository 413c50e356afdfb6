use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use plagcheck::{Checker, PlagcheckConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Compare two documents and print a similarity verdict as JSON.
#[derive(Debug, Parser)]
#[command(name = "plagcheck", version, about)]
struct Cli {
    /// First document (.txt, .md, .pdf or .docx).
    doc_a: PathBuf,

    /// Second document (.txt, .md, .pdf or .docx).
    doc_b: PathBuf,

    /// Flag the pair when combined similarity is strictly above this.
    /// Overrides the config file and PLAGCHECK_THRESHOLD.
    #[arg(short, long)]
    threshold: Option<f64>,

    /// YAML configuration file.
    #[arg(short, long, env = "PLAGCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut cfg = match &cli.config {
        Some(path) => PlagcheckConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlagcheckConfig::default(),
    };
    cfg.apply_env_overrides()
        .context("applying environment overrides")?;
    if let Some(threshold) = cli.threshold {
        cfg.threshold = threshold;
    }

    let checker = Checker::from_config(&cfg).context("building checker")?;
    let verdict = checker
        .compare(&cli.doc_a, &cli.doc_b)
        .with_context(|| {
            format!(
                "comparing {} with {}",
                cli.doc_a.display(),
                cli.doc_b.display()
            )
        })?;

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
