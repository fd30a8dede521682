//! Query sessions.
//!
//! A [`QuerySession`] owns one load of the source datasets together with
//! their materialized department partitioning and answers catalog queries
//! against them. Nothing in a session changes after construction.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::{PipelineConfig, QueryParameters};
use crate::error::EngineResult;
use crate::ingest::{read_departments, read_employees};
use crate::models::{Department, Employee, QueryResult};
use crate::partition::PartitionedEmployeeSet;
use crate::query::{
    Query, above_department_average, average_salary_by_department, complete_records,
    count_by_job_role, department_with_max_headcount, join_department_location, joined_after,
    project_members, rank_salary_within_department, top_n_per_department,
};

/// Loaded datasets plus the parameters for parameterized queries.
///
/// # Example
///
/// ```
/// use hive_analytics::config::QueryParameters;
/// use hive_analytics::models::{Department, Employee};
/// use hive_analytics::query::Query;
/// use hive_analytics::session::QuerySession;
///
/// let employees = vec![Employee { department: Some("IT".into()), ..Employee::new(1) }];
/// let departments = vec![Department::new(1, "IT", "Bangalore")];
/// let session = QuerySession::new(employees, departments, QueryParameters::default());
///
/// let result = session.run(Query::LargestDepartment).unwrap();
/// assert_eq!(result.rows()[0][0].to_string(), "IT");
/// ```
#[derive(Debug, Clone)]
pub struct QuerySession {
    employees: Vec<Employee>,
    departments: Vec<Department>,
    partitions: PartitionedEmployeeSet,
    parameters: QueryParameters,
}

impl QuerySession {
    /// Creates a session over already-loaded records.
    pub fn new(
        employees: Vec<Employee>,
        departments: Vec<Department>,
        parameters: QueryParameters,
    ) -> Self {
        let partitions = PartitionedEmployeeSet::from_employees(&employees);
        Self {
            employees,
            departments,
            partitions,
            parameters,
        }
    }

    /// Loads both sources described by `config` and builds a session.
    pub fn load(config: &PipelineConfig) -> EngineResult<Self> {
        let options = config.sources.reader_options();
        let employees = read_employees(&config.sources.employees, &options)?;
        let departments = read_departments(&config.sources.departments, &options)?;
        let session = Self::new(employees, departments, config.parameters.clone());
        info!(
            employees = session.employees.len(),
            departments = session.departments.len(),
            partitions = session.partitions.len(),
            "Query session ready"
        );
        Ok(session)
    }

    /// Returns the employees in source order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the departments in source order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Returns the department partitioning.
    pub fn partitions(&self) -> &PartitionedEmployeeSet {
        &self.partitions
    }

    /// Returns the query parameters.
    pub fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }

    /// Runs one catalog query.
    ///
    /// Only `DepartmentLocations` in strict join mode can fail.
    pub fn run(&self, query: Query) -> EngineResult<QueryResult> {
        let start_time = Instant::now();
        let params = &self.parameters;

        let result = match query {
            Query::JoinedAfter => {
                QueryResult::from_rows(&joined_after(&self.employees, params.joined_after_year))
            }
            Query::AverageSalaryByDepartment => {
                QueryResult::from_rows(&average_salary_by_department(&self.partitions))
            }
            Query::ProjectMembers => {
                QueryResult::from_rows(&project_members(&self.employees, params.project))
            }
            Query::CountByJobRole => QueryResult::from_rows(&count_by_job_role(&self.employees)),
            Query::AboveDepartmentAverage => {
                QueryResult::from_rows(&above_department_average(&self.partitions))
            }
            Query::LargestDepartment => {
                let best: Vec<_> = department_with_max_headcount(&self.partitions)
                    .into_iter()
                    .collect();
                QueryResult::from_rows(&best)
            }
            Query::CompleteRecords => QueryResult::from_rows(&complete_records(&self.employees)),
            Query::DepartmentLocations => QueryResult::from_rows(&join_department_location(
                &self.employees,
                &self.departments,
                params.join_mode,
            )?),
            Query::SalaryRanks => {
                QueryResult::from_rows(&rank_salary_within_department(&self.partitions))
            }
            Query::TopEarners => {
                QueryResult::from_rows(&top_n_per_department(&self.partitions, params.top_n))
            }
        };

        debug!(
            query = %query,
            rows = result.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Query completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, Value};
    use crate::query::JoinMode;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn employee(emp_id: i64, department: &str, salary: i64, project: Project, year: i32) -> Employee {
        Employee {
            emp_id,
            name: Some(format!("emp{}", emp_id)),
            age: Some(30),
            job_role: Some("Developer".to_string()),
            salary: Some(Decimal::from(salary)),
            project: Some(project),
            join_date: NaiveDate::from_ymd_opt(year, 1, 1),
            department: Some(department.to_string()),
        }
    }

    fn session(parameters: QueryParameters) -> QuerySession {
        QuerySession::new(
            vec![
                employee(1, "IT", 100, Project::Alpha, 2014),
                employee(2, "IT", 200, Project::Beta, 2018),
                employee(3, "HR", 50, Project::Alpha, 2020),
                employee(4, "Legal", 70, Project::Gamma, 2016),
            ],
            vec![
                Department::new(1, "IT", "Bangalore"),
                Department::new(2, "HR", "Pune"),
            ],
            parameters,
        )
    }

    #[test]
    fn test_every_query_runs_on_empty_session() {
        let session = QuerySession::new(vec![], vec![], QueryParameters::default());
        for query in Query::ALL {
            let result = session.run(query).unwrap();
            assert!(result.is_empty(), "{} should be empty", query);
            assert!(!result.columns().is_empty());
        }
    }

    #[test]
    fn test_parameterized_queries_use_session_parameters() {
        let session = session(QueryParameters {
            joined_after_year: 2017,
            project: Project::Alpha,
            top_n: 1,
            join_mode: JoinMode::Inner,
        });

        let joined = session.run(Query::JoinedAfter).unwrap();
        let ids: Vec<&Value> = joined.rows().iter().map(|r| &r[0]).collect();
        assert_eq!(ids, vec![&Value::Integer(2), &Value::Integer(3)]);

        assert_eq!(session.run(Query::ProjectMembers).unwrap().len(), 2);
        // One top earner in each of HR, IT and Legal.
        assert_eq!(session.run(Query::TopEarners).unwrap().len(), 3);
    }

    #[test]
    fn test_department_locations_inner_and_strict() {
        let inner = session(QueryParameters::default());
        let joined = inner.run(Query::DepartmentLocations).unwrap();
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.column_names().last(), Some(&"location"));

        let strict = session(QueryParameters {
            join_mode: JoinMode::Strict,
            ..QueryParameters::default()
        });
        assert!(strict.run(Query::DepartmentLocations).is_err());
    }

    #[test]
    fn test_largest_department_single_row() {
        let result = session(QueryParameters::default())
            .run(Query::LargestDepartment)
            .unwrap();
        assert_eq!(result.rows(), &[vec![Value::from("IT"), Value::Integer(2)]]);
    }

    #[test]
    fn test_session_exposes_partitions() {
        let session = session(QueryParameters::default());
        assert_eq!(session.partitions().len(), 3);
        assert_eq!(session.employees().len(), 4);
        assert_eq!(session.departments().len(), 2);
    }
}
