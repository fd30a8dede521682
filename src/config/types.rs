//! Configuration types for the analytics pipeline.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the pipeline YAML file.

use std::path::PathBuf;

use serde::Deserialize;

use crate::export::ExportFormat;
use crate::models::Project;
use crate::query::{DEFAULT_TOP_N, JoinMode};

/// Default year threshold for the `joined_after` query.
pub const DEFAULT_JOINED_AFTER_YEAR: i32 = 2015;

/// Default NULL marker in delimited output.
pub const DEFAULT_NULL_FORMAT: &str = "\\N";

fn default_delimiter() -> char {
    ','
}

fn default_skip_header() -> bool {
    true
}

/// Where the source datasets live and how they are delimited.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Path to the employees file.
    pub employees: PathBuf,
    /// Path to the departments file.
    pub departments: PathBuf,
    /// Field separator of both files.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Whether both files start with a header line.
    #[serde(default = "default_skip_header")]
    pub skip_header: bool,
}

/// Parameters of the parameterized queries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryParameters {
    /// `joined_after` keeps employees who joined in a later year than this.
    pub joined_after_year: i32,
    /// `project_members` keeps employees on this project.
    pub project: Project,
    /// `top_earners` keeps this many ranks per department.
    pub top_n: usize,
    /// How `department_locations` treats unmatched employees.
    pub join_mode: JoinMode,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            joined_after_year: DEFAULT_JOINED_AFTER_YEAR,
            project: Project::Alpha,
            top_n: DEFAULT_TOP_N,
            join_mode: JoinMode::Inner,
        }
    }
}

/// How and where query results are exported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// Field separator for delimited output.
    pub delimiter: char,
    /// Text written for NULL cells in delimited output.
    pub null_format: String,
    /// Directory receiving one sub-directory per query. Results go to the
    /// console when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Delimited,
            delimiter: default_delimiter(),
            null_format: DEFAULT_NULL_FORMAT.to_string(),
            output_dir: None,
        }
    }
}

/// The complete pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Source datasets.
    pub sources: SourceConfig,
    /// Query parameters.
    #[serde(default)]
    pub parameters: QueryParameters,
    /// Names of the queries to run. Empty means every query.
    #[serde(default)]
    pub run: Vec<String>,
    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}
