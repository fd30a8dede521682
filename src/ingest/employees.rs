//! Employee dataset parsing.

use std::collections::HashSet;
use std::io::Read;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Project};

use super::fields::RowContext;
use super::{ReaderOptions, for_each_record};

/// Dataset label used in error messages and logs.
pub const EMPLOYEES_DATASET: &str = "employees";

/// Fixed column order of the employees source.
pub const EMPLOYEE_COLUMNS: [&str; 8] = [
    "emp_id",
    "name",
    "age",
    "job_role",
    "salary",
    "project",
    "join_date",
    "department",
];

/// Parses employee records from a delimited reader.
///
/// Fails with `MalformedRecord` on a field count mismatch or an
/// uncoercible field, and with `DuplicateKey` if an `emp_id` repeats.
///
/// # Examples
///
/// ```
/// use hive_analytics::ingest::{ReaderOptions, parse_employees};
///
/// let data = "emp_id,name,age,job_role,salary,project,join_date,department\n\
///             1,Asha,31,Developer,72500.00,Alpha,2018-03-14,IT\n";
/// let employees = parse_employees(data.as_bytes(), &ReaderOptions::default()).unwrap();
///
/// assert_eq!(employees.len(), 1);
/// assert_eq!(employees[0].department.as_deref(), Some("IT"));
/// ```
pub fn parse_employees<R: Read>(reader: R, options: &ReaderOptions) -> EngineResult<Vec<Employee>> {
    let mut employees = Vec::new();
    let mut seen_ids = HashSet::new();

    for_each_record(reader, options, EMPLOYEES_DATASET, |ctx| {
        let employee = parse_employee(ctx)?;
        if !seen_ids.insert(employee.emp_id) {
            return Err(EngineError::DuplicateKey {
                dataset: EMPLOYEES_DATASET.to_string(),
                key: format!("emp_id={}", employee.emp_id),
            });
        }
        employees.push(employee);
        Ok(())
    })?;

    Ok(employees)
}

fn parse_employee(ctx: &RowContext<'_>) -> EngineResult<Employee> {
    ctx.expect_width(&EMPLOYEE_COLUMNS)?;

    let project = match ctx.text(5) {
        Some(raw) => Some(
            raw.parse::<Project>()
                .map_err(|e| ctx.malformed(e.to_string()))?,
        ),
        None => None,
    };

    Ok(Employee {
        emp_id: ctx.required(0, "emp_id")?,
        name: ctx.text(1),
        age: ctx.parse(2, "age")?,
        job_role: ctx.text(3),
        salary: ctx.parse(4, "salary")?,
        project,
        join_date: ctx.parse(6, "join_date")?,
        department: ctx.text(7),
    })
}
