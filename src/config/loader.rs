//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the pipeline
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::export::ExportOptions;
use crate::ingest::ReaderOptions;
use crate::query::Query;

use super::types::{ExportConfig, PipelineConfig, QueryParameters, SourceConfig};

/// Loads and provides access to the pipeline configuration.
///
/// Relative paths inside the file (sources and output directory) are
/// resolved against the directory containing the file, so a configuration
/// can be run from anywhere.
///
/// # File Layout
///
/// ```yaml
/// sources:
///   employees: ../data/employees.csv
///   departments: ../data/departments.csv
///   delimiter: ","
///   skip_header: true
/// parameters:
///   joined_after_year: 2015
///   project: Alpha
///   top_n: 3
///   join_mode: inner
/// run: []            # empty runs every query
/// export:
///   format: delimited
///   delimiter: ","
///   null_format: "\\N"
///   output_dir: ../output
/// ```
///
/// # Example
///
/// ```no_run
/// use hive_analytics::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pipeline.yaml").unwrap();
/// println!("Running {} queries", loader.queries().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PipelineConfig,
    queries: Vec<Query>,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML, misses a required key, or names a
    ///   non-ASCII delimiter (`ConfigParseError`)
    /// - `run` names a query that does not exist (`InvalidQuery`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let loader = Self::parse(&content, &path_str, base_dir)?;
        debug!(path = %path_str, queries = loader.queries.len(), "Loaded pipeline configuration");
        Ok(loader)
    }

    /// Parses configuration from YAML text, resolving relative paths
    /// against `base_dir`.
    pub fn from_yaml_str(content: &str, base_dir: &Path) -> EngineResult<Self> {
        Self::parse(content, "<inline>", base_dir)
    }

    fn parse(content: &str, path_str: &str, base_dir: &Path) -> EngineResult<Self> {
        let mut config: PipelineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.to_string(),
                message: e.to_string(),
            })?;

        for (key, delimiter) in [
            ("sources.delimiter", config.sources.delimiter),
            ("export.delimiter", config.export.delimiter),
        ] {
            if !delimiter.is_ascii() {
                return Err(EngineError::ConfigParseError {
                    path: path_str.to_string(),
                    message: format!("{} must be a single ASCII character, got '{}'", key, delimiter),
                });
            }
        }

        config.sources.employees = base_dir.join(&config.sources.employees);
        config.sources.departments = base_dir.join(&config.sources.departments);
        if let Some(output_dir) = config.export.output_dir.take() {
            config.export.output_dir = Some(base_dir.join(output_dir));
        }

        let queries = resolve_queries(&config.run)?;
        Ok(Self { config, queries })
    }

    /// Returns the underlying pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration and the resolved
    /// query selection.
    pub fn into_parts(self) -> (PipelineConfig, Vec<Query>) {
        (self.config, self.queries)
    }

    /// Returns the source settings.
    pub fn sources(&self) -> &SourceConfig {
        &self.config.sources
    }

    /// Returns the query parameters.
    pub fn parameters(&self) -> &QueryParameters {
        &self.config.parameters
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportConfig {
        &self.config.export
    }

    /// Returns the queries selected by `run`, in catalog order when `run`
    /// is empty and in file order otherwise.
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }
}

/// Resolves query names, where an empty list selects the whole catalog.
pub fn resolve_queries(names: &[String]) -> EngineResult<Vec<Query>> {
    if names.is_empty() {
        return Ok(Query::ALL.to_vec());
    }
    names.iter().map(|name| name.parse()).collect()
}

impl SourceConfig {
    /// Returns the reader options described by this configuration.
    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            // Validated as ASCII at load time.
            delimiter: self.delimiter as u8,
            skip_header: self.skip_header,
        }
    }
}

impl ExportConfig {
    /// Returns the exporter options described by this configuration.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.format,
            delimiter: self.delimiter as u8,
            null_format: self.null_format.clone(),
        }
    }
}
