//! The closed catalog of named analytical queries.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// One of the analytical queries the pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Query {
    /// Employees who joined after the configured year.
    JoinedAfter,
    /// Mean salary per department.
    AverageSalaryByDepartment,
    /// Employees on the configured project.
    ProjectMembers,
    /// Employee count per job role.
    CountByJobRole,
    /// Employees earning more than their department's mean.
    AboveDepartmentAverage,
    /// The department with the highest headcount.
    LargestDepartment,
    /// Employees with no NULL field.
    CompleteRecords,
    /// Employees joined with their department's location.
    DepartmentLocations,
    /// Every employee's salary rank within their department.
    SalaryRanks,
    /// The top-N earners of each department.
    TopEarners,
}

impl Query {
    /// Every query, in the order a full run executes them.
    pub const ALL: [Query; 10] = [
        Query::JoinedAfter,
        Query::AverageSalaryByDepartment,
        Query::ProjectMembers,
        Query::CountByJobRole,
        Query::AboveDepartmentAverage,
        Query::LargestDepartment,
        Query::CompleteRecords,
        Query::DepartmentLocations,
        Query::SalaryRanks,
        Query::TopEarners,
    ];

    /// Returns the snake_case name used in configuration and on the command
    /// line, also used as the export sub-directory.
    pub fn name(&self) -> &'static str {
        match self {
            Query::JoinedAfter => "joined_after",
            Query::AverageSalaryByDepartment => "average_salary_by_department",
            Query::ProjectMembers => "project_members",
            Query::CountByJobRole => "count_by_job_role",
            Query::AboveDepartmentAverage => "above_department_average",
            Query::LargestDepartment => "largest_department",
            Query::CompleteRecords => "complete_records",
            Query::DepartmentLocations => "department_locations",
            Query::SalaryRanks => "salary_ranks",
            Query::TopEarners => "top_earners",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Query {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Query::ALL
            .into_iter()
            .find(|q| q.name() == wanted)
            .ok_or_else(|| EngineError::InvalidQuery {
                name: s.to_string(),
            })
    }
}
