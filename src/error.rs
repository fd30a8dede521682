//! Error types for the analytics pipeline.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the pipeline reports: ingest-time schema violations,
//! join reference failures in strict mode, export failures and configuration
//! problems.

use thiserror::Error;

/// The main error type for the analytics pipeline.
///
/// Every fallible operation in the crate returns this error type. Each
/// variant identifies the offending row or location so the caller can report
/// it without further context.
///
/// # Example
///
/// ```
/// use hive_analytics::error::EngineError;
///
/// let error = EngineError::MalformedRecord {
///     dataset: "employees".to_string(),
///     line: 4,
///     message: "salary 'abc' is not a decimal".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Malformed record in 'employees' at line 4: salary 'abc' is not a decimal"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A source row did not match its schema.
    #[error("Malformed record in '{dataset}' at line {line}: {message}")]
    MalformedRecord {
        /// The dataset being ingested (e.g. "employees").
        dataset: String,
        /// The 1-based line number within the source file.
        line: u64,
        /// A description of the schema violation.
        message: String,
    },

    /// A key that must be unique appeared more than once.
    #[error("Duplicate key in '{dataset}': {key}")]
    DuplicateKey {
        /// The dataset being ingested.
        dataset: String,
        /// The repeated key, rendered as text.
        key: String,
    },

    /// An employee referenced a department with no matching record.
    ///
    /// Only raised when strict join mode is enabled; the default inner join
    /// drops such employees silently.
    #[error("Employee {emp_id} references unknown department '{department}'")]
    MissingReference {
        /// The employee whose reference could not be resolved.
        emp_id: i64,
        /// The department name that had no match.
        department: String,
    },

    /// A query result could not be written to its destination.
    #[error("Failed to write '{path}': {message}")]
    WriteError {
        /// The destination that could not be written.
        path: String,
        /// A description of the underlying failure.
        message: String,
    },

    /// A source data file was not found or could not be opened.
    #[error("Source file not found: {path}")]
    SourceNotFound {
        /// The path that could not be opened.
        path: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A query name did not match any query in the catalog.
    #[error("Unknown query: {name}")]
    InvalidQuery {
        /// The name that was requested.
        name: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
