use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use normalizer_core::config::{DEFAULT_SOURCE_TZ, DEFAULT_TARGET_TZ};
use normalizer_core::{read_table, write_table, Pipeline, PipelineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Normalize CSV records through the fixed stage pipeline",
    long_about = None
)]
struct Cli {
    /// CSV file to read
    input: PathBuf,
    /// Where to write the normalized CSV
    output: PathBuf,
    /// IANA zone the Timestamp column was recorded in
    #[arg(long, default_value = DEFAULT_SOURCE_TZ)]
    source_tz: String,
    /// IANA zone to express rewritten timestamps in
    #[arg(long, default_value = DEFAULT_TARGET_TZ)]
    target_tz: String,
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = PipelineConfig::from_names(&cli.source_tz, &cli.target_tz)
        .context("invalid timezone configuration")?;

    let table = read_table(&cli.input).context("failed to read input CSV")?;
    let report = Pipeline::new(config)
        .run(&table)
        .context("normalization failed")?;
    write_table(&cli.output, &report.table)
        .context("failed to write output CSV")?;

    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        rows = report.table.data_rows().len(),
        warnings = report.warnings.len(),
        "normalized"
    );
    Ok(())
}
