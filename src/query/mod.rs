//! Analytical query operations.
//!
//! Every operation is pure: it borrows the employee collection (flat or
//! partitioned) and returns fresh rows without touching its input. An empty
//! input always yields an empty result. Typed rows implement
//! [`TabularRow`](crate::models::TabularRow) so they can be rendered into a
//! [`QueryResult`](crate::models::QueryResult) for export.

mod aggregate;
mod catalog;
mod filter;
mod join;
mod rank;

pub use aggregate::{
    AVERAGE_OUTPUT_SCALE, DepartmentAverage, DepartmentHeadcount, RoleCount,
    above_department_average, average_salary_by_department, count_by_job_role,
    department_with_max_headcount,
};
pub use catalog::Query;
pub use filter::{complete_records, joined_after, project_members};
pub use join::{EmployeeLocation, JoinMode, join_department_location};
pub use rank::{DEFAULT_TOP_N, RankedEmployee, rank_salary_within_department, top_n_per_department};
