//! Ingest of the delimited employee and department sources.
//!
//! Each source has a fixed column order. Rows are read with the `csv`
//! crate, trimmed, and coerced into typed records. Empty fields load as
//! NULL; fields that are present but cannot be coerced fail the whole load
//! with [`EngineError::MalformedRecord`].

mod departments;
mod employees;
mod fields;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Department, Employee};

pub use departments::{DEPARTMENT_COLUMNS, DEPARTMENTS_DATASET, parse_departments};
pub use employees::{EMPLOYEE_COLUMNS, EMPLOYEES_DATASET, parse_employees};

use fields::RowContext;

/// How delimited sources are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// The field separator byte.
    pub delimiter: u8,
    /// Whether the first line is a header to be skipped.
    pub skip_header: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_header: true,
        }
    }
}

/// Loads the employees source file.
pub fn read_employees<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> EngineResult<Vec<Employee>> {
    let path = path.as_ref();
    let employees = parse_employees(open_source(path)?, options)?;
    info!(
        dataset = EMPLOYEES_DATASET,
        path = %path.display(),
        records = employees.len(),
        "Loaded source"
    );
    Ok(employees)
}

/// Loads the departments source file.
pub fn read_departments<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> EngineResult<Vec<Department>> {
    let path = path.as_ref();
    let departments = parse_departments(open_source(path)?, options)?;
    info!(
        dataset = DEPARTMENTS_DATASET,
        path = %path.display(),
        records = departments.len(),
        "Loaded source"
    );
    Ok(departments)
}

fn open_source(path: &Path) -> EngineResult<File> {
    File::open(path).map_err(|_| EngineError::SourceNotFound {
        path: path.display().to_string(),
    })
}

/// Drives `handle` over every record of a delimited source.
///
/// Reader-level failures (bad UTF-8, I/O errors) are reported as
/// `MalformedRecord` at the position the reader stopped.
fn for_each_record<R, F>(
    reader: R,
    options: &ReaderOptions,
    dataset: &str,
    mut handle: F,
) -> EngineResult<()>
where
    R: Read,
    F: FnMut(&RowContext<'_>) -> EngineResult<()>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.skip_header)
        .flexible(true)
        .from_reader(reader);

    let mut rows = 0usize;
    for result in csv_reader.records() {
        let record = result.map_err(|e| EngineError::MalformedRecord {
            dataset: dataset.to_string(),
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let ctx = RowContext {
            dataset,
            line,
            record: &record,
        };
        handle(&ctx)?;
        rows += 1;
    }

    debug!(dataset, rows, "Parsed delimited source");
    Ok(())
}
