//! Salary ranking within departments.
//!
//! Ranking follows `RANK() OVER (PARTITION BY department ORDER BY salary DESC)`:
//! equal salaries share a rank and the next distinct salary skips ahead by
//! the size of the tie. NULL salaries sort after every non-NULL salary and
//! tie with each other.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::models::{Column, DataType, Employee, TabularRow, Value};
use crate::partition::PartitionedEmployeeSet;

/// Default number of rows kept per department by [`top_n_per_department`].
pub const DEFAULT_TOP_N: usize = 3;

/// An employee with their salary rank inside their department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEmployee {
    /// The ranked employee.
    pub employee: Employee,
    /// The 1-based competition rank.
    pub rank: usize,
}

fn salary_descending(a: &Option<Decimal>, b: &Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn rank_partition(employees: &[Employee]) -> Vec<RankedEmployee> {
    let mut sorted: Vec<&Employee> = employees.iter().collect();
    // Stable, so tied rows keep input order.
    sorted.sort_by(|a, b| salary_descending(&a.salary, &b.salary));

    let mut ranked: Vec<RankedEmployee> = Vec::with_capacity(sorted.len());
    for (position, employee) in sorted.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(previous) if previous.employee.salary == employee.salary => previous.rank,
            _ => position + 1,
        };
        ranked.push(RankedEmployee {
            employee: employee.clone(),
            rank,
        });
    }
    ranked
}

/// Ranks every employee by salary, descending, within their department.
///
/// Output is grouped by partition in key order and sorted by rank within
/// each partition. Employees with a NULL department are ranked together in
/// the default partition.
///
/// # Examples
///
/// ```
/// use hive_analytics::models::Employee;
/// use hive_analytics::partition::PartitionedEmployeeSet;
/// use hive_analytics::query::rank_salary_within_department;
/// use rust_decimal::Decimal;
///
/// let employees: Vec<Employee> = [(1, 200), (2, 200), (3, 100)]
///     .into_iter()
///     .map(|(id, salary)| Employee {
///         department: Some("IT".into()),
///         salary: Some(Decimal::from(salary)),
///         ..Employee::new(id)
///     })
///     .collect();
///
/// let ranked = rank_salary_within_department(&PartitionedEmployeeSet::from_employees(&employees));
/// let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
/// assert_eq!(ranks, vec![1, 1, 3]);
/// ```
pub fn rank_salary_within_department(partitions: &PartitionedEmployeeSet) -> Vec<RankedEmployee> {
    partitions
        .iter()
        .flat_map(|(_, employees)| rank_partition(employees))
        .collect()
}

/// Keeps the rows ranked `n` or better in each department.
///
/// Rows tied at rank `n` are all kept, as with `WHERE rank <= n`.
pub fn top_n_per_department(partitions: &PartitionedEmployeeSet, n: usize) -> Vec<RankedEmployee> {
    rank_salary_within_department(partitions)
        .into_iter()
        .filter(|r| r.rank <= n)
        .collect()
}

impl TabularRow for RankedEmployee {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("emp_id", DataType::Integer),
            Column::new("name", DataType::Text),
            Column::new("department", DataType::Text),
            Column::new("salary", DataType::Decimal),
            Column::new("salary_rank", DataType::Integer),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.employee.emp_id),
            Value::from(self.employee.name.clone()),
            Value::from(self.employee.department.clone()),
            Value::from(self.employee.salary),
            Value::from(self.rank as i64),
        ]
    }
}
