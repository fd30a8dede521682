//! Employee model and related types.
//!
//! This module defines the Employee struct and the Project enum for
//! representing rows of the employees dataset.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The project an employee is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Project {
    /// Project Alpha.
    Alpha,
    /// Project Beta.
    Beta,
    /// Project Gamma.
    Gamma,
    /// Project Delta.
    Delta,
    /// Project Omega.
    Omega,
}

impl Project {
    /// Every project, in declaration order.
    pub const ALL: [Project; 5] = [
        Project::Alpha,
        Project::Beta,
        Project::Gamma,
        Project::Delta,
        Project::Omega,
    ];

    /// Returns the canonical name used in source files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Project::Alpha => "Alpha",
            Project::Beta => "Beta",
            Project::Gamma => "Gamma",
            Project::Delta => "Delta",
            Project::Omega => "Omega",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the canonical project names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProject(pub String);

impl fmt::Display for UnknownProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown project '{}' (expected one of Alpha, Beta, Gamma, Delta, Omega)",
            self.0
        )
    }
}

impl std::error::Error for UnknownProject {}

impl FromStr for Project {
    type Err = UnknownProject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProject(s.to_string()))
    }
}

/// A single row of the employees dataset.
///
/// Only `emp_id` is mandatory. Every other field mirrors a nullable column:
/// an empty source field is loaded as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub emp_id: i64,
    /// The employee's name.
    pub name: Option<String>,
    /// The employee's age in years.
    pub age: Option<u32>,
    /// The employee's job role (e.g. "Developer").
    pub job_role: Option<String>,
    /// The employee's salary.
    pub salary: Option<Decimal>,
    /// The project the employee is assigned to.
    pub project: Option<Project>,
    /// The date the employee joined.
    pub join_date: Option<NaiveDate>,
    /// The name of the employee's department.
    pub department: Option<String>,
}

impl Employee {
    /// Creates an employee with the given id and every other field NULL.
    ///
    /// # Examples
    ///
    /// ```
    /// use hive_analytics::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     department: Some("IT".to_string()),
    ///     salary: Some(Decimal::from(100)),
    ///     ..Employee::new(1)
    /// };
    /// assert_eq!(employee.emp_id, 1);
    /// assert!(employee.name.is_none());
    /// ```
    pub fn new(emp_id: i64) -> Self {
        Self {
            emp_id,
            name: None,
            age: None,
            job_role: None,
            salary: None,
            project: None,
            join_date: None,
            department: None,
        }
    }

    /// Returns true if no field of the record is NULL.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.age.is_some()
            && self.job_role.is_some()
            && self.salary.is_some()
            && self.project.is_some()
            && self.join_date.is_some()
            && self.department.is_some()
    }

    /// Returns true if the employee joined in a calendar year after `year`.
    ///
    /// Employees with no join date never match.
    pub fn joined_after(&self, year: i32) -> bool {
        self.join_date.is_some_and(|date| date.year() > year)
    }
}
