//! Export of query results.
//!
//! A [`QueryResult`] is serialized either as delimited text (no header row,
//! NULL cells written as the configured null marker) or as JSON Lines (one
//! object per row, keyed by column name). Results go to the console or to a
//! directory, where they replace the single data file [`OUTPUT_FILE_NAME`]
//! the way `INSERT OVERWRITE DIRECTORY` does. Failures are reported as
//! [`EngineError::WriteError`] and never retried.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::config::DEFAULT_NULL_FORMAT;
use crate::error::{EngineError, EngineResult};
use crate::models::{QueryResult, Value};

/// Name of the data file written inside an export directory.
pub const OUTPUT_FILE_NAME: &str = "000000_0";

/// Serialization format of exported results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Delimited text, one row per line, no header.
    #[default]
    Delimited,
    /// One JSON object per line.
    JsonLines,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Delimited => f.write_str("delimited"),
            ExportFormat::JsonLines => f.write_str("json_lines"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delimited" | "csv" => Ok(ExportFormat::Delimited),
            "json_lines" | "json-lines" | "jsonl" | "json" => Ok(ExportFormat::JsonLines),
            other => Err(format!(
                "unknown export format '{}' (expected delimited or json_lines)",
                other
            )),
        }
    }
}

/// How results are serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Output format.
    pub format: ExportFormat,
    /// Field separator for delimited output.
    pub delimiter: u8,
    /// Text written for NULL cells in delimited output.
    pub null_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Delimited,
            delimiter: b',',
            null_format: DEFAULT_NULL_FORMAT.to_string(),
        }
    }
}

/// Where exported results are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Standard output.
    Console,
    /// A directory; the result replaces `<dir>/000000_0`.
    Directory(PathBuf),
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// The file written, or `"stdout"`.
    pub destination: String,
    /// Number of rows written.
    pub rows: usize,
}

/// Serializes query results to a sink.
///
/// # Example
///
/// ```
/// use hive_analytics::export::{ExportOptions, Exporter};
/// use hive_analytics::models::{Column, DataType, QueryResult, Value};
///
/// let mut result = QueryResult::new(vec![
///     Column::new("department", DataType::Text),
///     Column::new("avg_salary", DataType::Decimal),
/// ]);
/// result.push_row(vec![Value::from("IT"), Value::Null]);
///
/// let mut out = Vec::new();
/// Exporter::new(ExportOptions::default())
///     .write_to(&result, &mut out, "buffer")
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "IT,\\N\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    /// Creates an exporter with the given options.
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Returns the exporter's options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Writes `result` to `target`.
    pub fn export(&self, result: &QueryResult, target: &ExportTarget) -> EngineResult<ExportSummary> {
        let destination = match target {
            ExportTarget::Console => {
                let stdout = io::stdout();
                self.write_to(result, stdout.lock(), "stdout")?;
                "stdout".to_string()
            }
            ExportTarget::Directory(dir) => {
                fs::create_dir_all(dir).map_err(|e| EngineError::WriteError {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;
                let path = dir.join(OUTPUT_FILE_NAME);
                let path_str = path.display().to_string();
                let file = File::create(&path).map_err(|e| EngineError::WriteError {
                    path: path_str.clone(),
                    message: e.to_string(),
                })?;
                self.write_to(result, BufWriter::new(file), &path_str)?;
                path_str
            }
        };

        info!(
            destination = %destination,
            rows = result.len(),
            format = %self.options.format,
            "Exported query result"
        );

        Ok(ExportSummary {
            destination,
            rows: result.len(),
        })
    }

    /// Serializes `result` into `writer`. `destination` names the sink in
    /// error reports.
    pub fn write_to<W: Write>(
        &self,
        result: &QueryResult,
        writer: W,
        destination: &str,
    ) -> EngineResult<()> {
        let write_error = |message: String| EngineError::WriteError {
            path: destination.to_string(),
            message,
        };

        match self.options.format {
            ExportFormat::Delimited => self
                .write_delimited(result, writer)
                .map_err(|e| write_error(e.to_string())),
            ExportFormat::JsonLines => self
                .write_json_lines(result, writer)
                .map_err(|e| write_error(e.to_string())),
        }
    }

    fn write_delimited<W: Write>(&self, result: &QueryResult, writer: W) -> csv::Result<()> {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(self.options.delimiter).has_headers(false);
        let mut csv_writer = builder.from_writer(writer);

        for row in result.rows() {
            let fields: Vec<String> = row.iter().map(|cell| self.render_cell(cell)).collect();
            if fields.len() == 1 && fields[0].is_empty() {
                // csv quotes a lone empty field; write a bare blank line instead.
                let mut inner = csv_writer.into_inner().map_err(|e| e.into_error())?;
                inner.write_all(b"\n")?;
                csv_writer = builder.from_writer(inner);
                continue;
            }
            csv_writer.write_record(&fields)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn write_json_lines<W: Write>(&self, result: &QueryResult, mut writer: W) -> io::Result<()> {
        let names = result.column_names();
        for row in result.rows() {
            let object: serde_json::Map<String, serde_json::Value> = names
                .iter()
                .zip(row)
                .map(|(name, cell)| {
                    serde_json::to_value(cell).map(|value| (name.to_string(), value))
                })
                .collect::<Result<_, _>>()?;
            serde_json::to_writer(&mut writer, &object)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    fn render_cell(&self, cell: &Value) -> String {
        match cell {
            Value::Null => self.options.null_format.clone(),
            other => other.to_string(),
        }
    }
}
