//! Department dataset parsing.

use std::collections::HashSet;
use std::io::Read;

use crate::error::{EngineError, EngineResult};
use crate::models::Department;

use super::{ReaderOptions, for_each_record};

/// Dataset label used in error messages and logs.
pub const DEPARTMENTS_DATASET: &str = "departments";

/// Fixed column order of the departments source.
pub const DEPARTMENT_COLUMNS: [&str; 3] = ["dept_id", "department_name", "location"];

/// Parses department records from a delimited reader.
///
/// Every field is mandatory. Both `dept_id` and `department_name` must be
/// unique; a repeat fails with `DuplicateKey`.
pub fn parse_departments<R: Read>(
    reader: R,
    options: &ReaderOptions,
) -> EngineResult<Vec<Department>> {
    let mut departments = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for_each_record(reader, options, DEPARTMENTS_DATASET, |ctx| {
        ctx.expect_width(&DEPARTMENT_COLUMNS)?;
        let department = Department {
            dept_id: ctx.required(0, "dept_id")?,
            department_name: ctx.required_text(1, "department_name")?,
            location: ctx.required_text(2, "location")?,
        };

        if !seen_ids.insert(department.dept_id) {
            return Err(EngineError::DuplicateKey {
                dataset: DEPARTMENTS_DATASET.to_string(),
                key: format!("dept_id={}", department.dept_id),
            });
        }
        if !seen_names.insert(department.department_name.clone()) {
            return Err(EngineError::DuplicateKey {
                dataset: DEPARTMENTS_DATASET.to_string(),
                key: format!("department_name={}", department.department_name),
            });
        }

        departments.push(department);
        Ok(())
    })?;

    Ok(departments)
}
