//! Configuration loading and management for the analytics pipeline.
//!
//! This module provides functionality to load the pipeline configuration
//! from a YAML file: source locations and delimiters, query parameters, the
//! query selection and export settings.
//!
//! # Example
//!
//! ```no_run
//! use hive_analytics::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pipeline.yaml").unwrap();
//! println!("Employees source: {}", config.sources().employees.display());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, resolve_queries};
pub use types::{
    DEFAULT_JOINED_AFTER_YEAR, DEFAULT_NULL_FORMAT, ExportConfig, PipelineConfig,
    QueryParameters, SourceConfig,
};
