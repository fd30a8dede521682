//! Department model.

use serde::{Deserialize, Serialize};

/// A single row of the departments dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub dept_id: i64,
    /// The unique department name, referenced by `Employee::department`.
    pub department_name: String,
    /// Where the department is located.
    pub location: String,
}

impl Department {
    /// Creates a department record.
    pub fn new(
        dept_id: i64,
        department_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            dept_id,
            department_name: department_name.into(),
            location: location.into(),
        }
    }
}
