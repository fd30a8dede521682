//! Employee/department join.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{Column, DataType, Department, Employee, TabularRow, Value};

/// How employees without a matching department are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Unmatched employees are dropped (inner join).
    #[default]
    Inner,
    /// The first unmatched employee fails the join with `MissingReference`.
    Strict,
}

/// An employee paired with the location of their department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLocation {
    /// The joined employee.
    pub employee: Employee,
    /// The location of the employee's department.
    pub location: String,
}

/// Joins employees to departments on `department = department_name`.
///
/// In [`JoinMode::Inner`] employees whose department is NULL or has no
/// matching record are excluded. In [`JoinMode::Strict`] the first such
/// employee fails the join.
///
/// # Examples
///
/// ```
/// use hive_analytics::models::{Department, Employee};
/// use hive_analytics::query::{JoinMode, join_department_location};
///
/// let employees = vec![
///     Employee { department: Some("IT".into()), ..Employee::new(1) },
///     Employee { department: Some("Legal".into()), ..Employee::new(2) },
/// ];
/// let departments = vec![Department::new(10, "IT", "Bangalore")];
///
/// let joined = join_department_location(&employees, &departments, JoinMode::Inner).unwrap();
/// assert_eq!(joined.len(), 1);
/// assert_eq!(joined[0].location, "Bangalore");
///
/// assert!(join_department_location(&employees, &departments, JoinMode::Strict).is_err());
/// ```
pub fn join_department_location(
    employees: &[Employee],
    departments: &[Department],
    mode: JoinMode,
) -> EngineResult<Vec<EmployeeLocation>> {
    let locations: HashMap<&str, &str> = departments
        .iter()
        .map(|d| (d.department_name.as_str(), d.location.as_str()))
        .collect();

    let mut joined = Vec::with_capacity(employees.len());
    let mut unmatched = 0usize;
    for employee in employees {
        let location = employee
            .department
            .as_deref()
            .and_then(|name| locations.get(name));

        match (location, mode) {
            (Some(location), _) => joined.push(EmployeeLocation {
                employee: employee.clone(),
                location: location.to_string(),
            }),
            (None, JoinMode::Inner) => unmatched += 1,
            (None, JoinMode::Strict) => {
                return Err(EngineError::MissingReference {
                    emp_id: employee.emp_id,
                    department: employee
                        .department
                        .clone()
                        .unwrap_or_else(|| "NULL".to_string()),
                });
            }
        }
    }

    if unmatched > 0 {
        warn!(unmatched, "Employees without a matching department excluded from join");
    }

    Ok(joined)
}

impl TabularRow for EmployeeLocation {
    fn columns() -> Vec<Column> {
        let mut columns = Employee::columns();
        columns.push(Column::new("location", DataType::Text));
        columns
    }

    fn to_row(&self) -> Vec<Value> {
        let mut row = self.employee.to_row();
        row.push(Value::from(self.location.as_str()));
        row
    }
}
