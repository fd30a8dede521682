//! Command-line entry point for the analytics pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hive_analytics::config::ConfigLoader;
use hive_analytics::export::ExportFormat;
use hive_analytics::pipeline::run_pipeline;
use hive_analytics::query::Query;

/// Run the employee/department analytics queries and export their results.
#[derive(Debug, Parser)]
#[command(name = "hive-analytics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pipeline configuration file.
    #[arg(short, long, default_value = "config/pipeline.yaml")]
    config: PathBuf,

    /// Query to run (repeatable). Overrides the configuration's `run` list.
    #[arg(short, long = "query")]
    queries: Vec<Query>,

    /// Run every query in the catalog.
    #[arg(long, conflicts_with = "queries")]
    all: bool,

    /// Directory receiving one sub-directory per query.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format (delimited or json_lines).
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Rows kept per department by `top_earners`.
    #[arg(long)]
    top_n: Option<usize>,

    /// List the available queries and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list {
        for query in Query::ALL {
            println!("{}", query);
        }
        return Ok(());
    }

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration {}", cli.config.display()))?;
    let (mut config, mut queries) = loader.into_parts();

    if cli.all {
        queries = Query::ALL.to_vec();
    } else if !cli.queries.is_empty() {
        queries = cli.queries;
    }
    if let Some(output) = cli.output {
        config.export.output_dir = Some(output);
    }
    if let Some(format) = cli.format {
        config.export.format = format;
    }
    if let Some(top_n) = cli.top_n {
        config.parameters.top_n = top_n;
    }

    let report = run_pipeline(&config, &queries).context("pipeline run failed")?;
    for outcome in &report.outcomes {
        eprintln!(
            "{:<30} {:>6} rows -> {}",
            outcome.query.name(),
            outcome.rows,
            outcome.destination
        );
    }

    Ok(())
}
