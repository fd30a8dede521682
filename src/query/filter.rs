//! Row filters over the flat employee collection.

use crate::models::{Employee, Project};

/// Selects employees whose join date falls in a year after `year`.
///
/// Rows with a NULL join date are excluded. Input order is preserved.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hive_analytics::models::Employee;
/// use hive_analytics::query::joined_after;
///
/// let employees = vec![
///     Employee { join_date: NaiveDate::from_ymd_opt(2014, 5, 1), ..Employee::new(1) },
///     Employee { join_date: NaiveDate::from_ymd_opt(2016, 1, 9), ..Employee::new(2) },
/// ];
/// let recent = joined_after(&employees, 2015);
/// assert_eq!(recent.len(), 1);
/// assert_eq!(recent[0].emp_id, 2);
/// ```
pub fn joined_after(employees: &[Employee], year: i32) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| e.joined_after(year))
        .cloned()
        .collect()
}

/// Selects employees assigned to exactly `project`.
pub fn project_members(employees: &[Employee], project: Project) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| e.project == Some(project))
        .cloned()
        .collect()
}

/// Selects employees with no NULL field.
pub fn complete_records(employees: &[Employee]) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| e.is_complete())
        .cloned()
        .collect()
}
