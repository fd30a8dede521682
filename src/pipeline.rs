//! End-to-end pipeline runs.
//!
//! A run loads the sources once, executes the selected queries in order and
//! exports each result. With an output directory configured, each query
//! writes to `<output_dir>/<query_name>/000000_0`; otherwise results are
//! printed to the console. The first failure aborts the run.

use std::time::Instant;

use tracing::{info, info_span};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::EngineResult;
use crate::export::{ExportTarget, Exporter};
use crate::query::Query;
use crate::session::QuerySession;

/// The outcome of one exported query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// The query that ran.
    pub query: Query,
    /// Number of rows exported.
    pub rows: usize,
    /// Where the rows were written.
    pub destination: String,
}

/// Summary of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// One outcome per query, in execution order.
    pub outcomes: Vec<QueryOutcome>,
}

/// Returns where `query`'s result is exported under `config`.
pub fn export_target(config: &PipelineConfig, query: Query) -> ExportTarget {
    match &config.export.output_dir {
        Some(dir) => ExportTarget::Directory(dir.join(query.name())),
        None => ExportTarget::Console,
    }
}

/// Loads the sources, runs `queries` and exports every result.
pub fn run_pipeline(config: &PipelineConfig, queries: &[Query]) -> EngineResult<PipelineReport> {
    let run_id = Uuid::new_v4();
    let span = info_span!("pipeline", run_id = %run_id);
    let _guard = span.enter();

    let start_time = Instant::now();
    info!(queries = queries.len(), "Starting pipeline run");

    let session = QuerySession::load(config)?;
    let exporter = Exporter::new(config.export.export_options());

    let mut outcomes = Vec::with_capacity(queries.len());
    for &query in queries {
        let result = session.run(query)?;
        let summary = exporter.export(&result, &export_target(config, query))?;
        outcomes.push(QueryOutcome {
            query,
            rows: summary.rows,
            destination: summary.destination,
        });
    }

    info!(
        queries = outcomes.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Pipeline run completed"
    );

    Ok(PipelineReport { run_id, outcomes })
}
