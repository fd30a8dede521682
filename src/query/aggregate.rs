//! Grouped aggregates over employees.
//!
//! Department-scoped aggregates run over a [`PartitionedEmployeeSet`] and
//! ignore the default partition, matching SQL aggregation where a NULL
//! department never forms a named group. NULL salaries do not contribute to
//! averages.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Column, DataType, Employee, TabularRow, Value};
use crate::partition::PartitionedEmployeeSet;

/// Average salary of one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentAverage {
    /// The department name.
    pub department: String,
    /// The exact mean of the department's non-NULL salaries.
    pub average_salary: Decimal,
    /// How many salaries contributed to the mean.
    pub salary_count: usize,
}

/// Number of employees holding one job role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCount {
    /// The job role, or `None` for the NULL group.
    pub job_role: Option<String>,
    /// Number of employees with this role.
    pub count: usize,
}

/// Headcount of one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentHeadcount {
    /// The department name.
    pub department: String,
    /// Number of employees in the department.
    pub headcount: usize,
}

/// Scale used when rendering averages into a result set.
pub const AVERAGE_OUTPUT_SCALE: u32 = 2;

fn mean_salary(employees: &[Employee]) -> Option<(Decimal, usize)> {
    let salaries: Vec<Decimal> = employees.iter().filter_map(|e| e.salary).collect();
    if salaries.is_empty() {
        return None;
    }
    Some((mean(&salaries), salaries.len()))
}

/// Exact mean of a non-empty slice.
///
/// When the running total leaves the `Decimal` range, the mean is rebuilt
/// from `value / count` terms. Positive and negative terms are summed
/// apart so neither partial sum can overflow, and the result is clamped to
/// the input range to absorb rounding in the terms.
fn mean(values: &[Decimal]) -> Decimal {
    let count = Decimal::from(values.len());
    let total = values
        .iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value));
    if let Some(total) = total {
        return total / count;
    }

    let (mut positive, mut negative) = (Decimal::ZERO, Decimal::ZERO);
    let (mut low, mut high) = (Decimal::MAX, Decimal::MIN);
    for value in values {
        let term = *value / count;
        if term.is_sign_negative() {
            negative = negative.saturating_add(term);
        } else {
            positive = positive.saturating_add(term);
        }
        low = low.min(*value);
        high = high.max(*value);
    }
    (positive + negative).clamp(low, high)
}

/// Computes the mean salary of every department.
///
/// Departments with no non-NULL salary are absent from the output rather
/// than reported with an undefined mean. Output is ordered by department.
///
/// # Examples
///
/// ```
/// use hive_analytics::models::Employee;
/// use hive_analytics::partition::PartitionedEmployeeSet;
/// use hive_analytics::query::average_salary_by_department;
/// use rust_decimal::Decimal;
///
/// let employees = vec![
///     Employee { department: Some("IT".into()), salary: Some(Decimal::from(100)), ..Employee::new(1) },
///     Employee { department: Some("IT".into()), salary: Some(Decimal::from(200)), ..Employee::new(2) },
///     Employee { department: Some("HR".into()), salary: Some(Decimal::from(50)), ..Employee::new(3) },
/// ];
/// let averages = average_salary_by_department(&PartitionedEmployeeSet::from_employees(&employees));
///
/// assert_eq!(averages[0].department, "HR");
/// assert_eq!(averages[0].average_salary, Decimal::from(50));
/// assert_eq!(averages[1].department, "IT");
/// assert_eq!(averages[1].average_salary, Decimal::from(150));
/// ```
pub fn average_salary_by_department(partitions: &PartitionedEmployeeSet) -> Vec<DepartmentAverage> {
    partitions
        .departments()
        .filter_map(|(department, employees)| {
            mean_salary(employees).map(|(average_salary, salary_count)| DepartmentAverage {
                department: department.to_string(),
                average_salary,
                salary_count,
            })
        })
        .collect()
}

/// Counts employees per job role.
///
/// Rows with a NULL role are counted together in a trailing NULL group.
pub fn count_by_job_role(employees: &[Employee]) -> Vec<RoleCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut null_count = 0;
    for employee in employees {
        match employee.job_role.as_deref() {
            Some(role) => *counts.entry(role).or_default() += 1,
            None => null_count += 1,
        }
    }

    let mut roles: Vec<RoleCount> = counts
        .into_iter()
        .map(|(role, count)| RoleCount {
            job_role: Some(role.to_string()),
            count,
        })
        .collect();
    if null_count > 0 {
        roles.push(RoleCount {
            job_role: None,
            count: null_count,
        });
    }
    roles
}

/// Selects employees earning strictly more than their department's mean.
///
/// The first pass computes each department's mean salary, the second keeps
/// employees whose salary exceeds it. A single-employee department never
/// contributes a row. Output follows partition order, then input order.
pub fn above_department_average(partitions: &PartitionedEmployeeSet) -> Vec<Employee> {
    let mut selected = Vec::new();
    for (_, employees) in partitions.departments() {
        let Some((average, _)) = mean_salary(employees) else {
            continue;
        };
        selected.extend(
            employees
                .iter()
                .filter(|e| e.salary.is_some_and(|salary| salary > average))
                .cloned(),
        );
    }
    selected
}

/// Finds the department with the most employees.
///
/// Ties are broken in favour of the lexically smallest department name.
/// Returns `None` when no employee has a department.
pub fn department_with_max_headcount(
    partitions: &PartitionedEmployeeSet,
) -> Option<DepartmentHeadcount> {
    let mut best: Option<DepartmentHeadcount> = None;
    // Partitions iterate in lexical order, so only a strictly larger count
    // replaces the current best.
    for (department, employees) in partitions.departments() {
        if best.as_ref().is_none_or(|b| employees.len() > b.headcount) {
            best = Some(DepartmentHeadcount {
                department: department.to_string(),
                headcount: employees.len(),
            });
        }
    }
    best
}

impl TabularRow for DepartmentAverage {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("department", DataType::Text),
            Column::new("avg_salary", DataType::Decimal),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.department.as_str()),
            Value::from(self.average_salary.round_dp(AVERAGE_OUTPUT_SCALE)),
        ]
    }
}

impl TabularRow for RoleCount {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("job_role", DataType::Text),
            Column::new("employee_count", DataType::Integer),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.job_role.clone()),
            Value::from(self.count as i64),
        ]
    }
}

impl TabularRow for DepartmentHeadcount {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("department", DataType::Text),
            Column::new("employee_count", DataType::Integer),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.department.as_str()),
            Value::from(self.headcount as i64),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(emp_id: i64, name: &str, department: &str, salary: i64) -> Employee {
        Employee {
            name: Some(name.to_string()),
            department: Some(department.to_string()),
            salary: Some(Decimal::from(salary)),
            ..Employee::new(emp_id)
        }
    }

    fn scenario() -> Vec<Employee> {
        vec![
            employee(1, "A", "IT", 100),
            employee(2, "B", "IT", 200),
            employee(3, "C", "HR", 50),
        ]
    }

    #[test]
    fn test_average_salary_scenario() {
        let partitions = PartitionedEmployeeSet::from_employees(&scenario());
        let averages = average_salary_by_department(&partitions);
        assert_eq!(
            averages,
            vec![
                DepartmentAverage {
                    department: "HR".to_string(),
                    average_salary: dec("50"),
                    salary_count: 1,
                },
                DepartmentAverage {
                    department: "IT".to_string(),
                    average_salary: dec("150"),
                    salary_count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_average_ignores_null_salaries_and_departments() {
        let mut no_salary = employee(4, "D", "IT", 0);
        no_salary.salary = None;
        let mut no_department = employee(5, "E", "IT", 900);
        no_department.department = None;
        let mut only_null = employee(6, "F", "Legal", 0);
        only_null.salary = None;

        let mut employees = scenario();
        employees.extend([no_salary, no_department, only_null]);
        let averages = average_salary_by_department(&PartitionedEmployeeSet::from_employees(&employees));

        let departments: Vec<&str> = averages.iter().map(|a| a.department.as_str()).collect();
        assert_eq!(departments, vec!["HR", "IT"]);
        assert_eq!(averages[1].average_salary, dec("150"));
    }

    #[test]
    fn test_department_named_like_default_partition_is_averaged() {
        let mut no_department = employee(3, "C", "IT", 900);
        no_department.department = None;
        let employees = vec![
            employee(1, "A", crate::partition::DEFAULT_PARTITION, 100),
            employee(2, "B", crate::partition::DEFAULT_PARTITION, 300),
            no_department,
        ];
        let partitions = PartitionedEmployeeSet::from_employees(&employees);

        let averages = average_salary_by_department(&partitions);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average_salary, dec("200"));
        assert_eq!(
            department_with_max_headcount(&partitions).map(|d| d.headcount),
            Some(2)
        );
    }

    #[test]
    fn test_average_row_is_rounded_for_output() {
        let employees = vec![
            employee(1, "A", "IT", 100),
            employee(2, "B", "IT", 100),
            employee(3, "C", "IT", 101),
        ];
        let averages = average_salary_by_department(&PartitionedEmployeeSet::from_employees(&employees));
        assert_eq!(averages[0].to_row()[1], Value::Decimal(dec("100.33")));
    }

    #[test]
    fn test_average_of_extreme_salaries_does_not_overflow() {
        let employees: Vec<Employee> = (1..=2)
            .map(|id| Employee {
                department: Some("IT".to_string()),
                salary: Some(Decimal::MAX),
                ..Employee::new(id)
            })
            .collect();
        let partitions = PartitionedEmployeeSet::from_employees(&employees);

        let averages = average_salary_by_department(&partitions);
        assert_eq!(averages[0].average_salary, Decimal::MAX);
        assert_eq!(averages[0].salary_count, 2);
        assert!(above_department_average(&partitions).is_empty());
    }

    #[test]
    fn test_mean_falls_back_to_per_term_division() {
        let third = Decimal::MAX / Decimal::from(3);
        assert_eq!(mean(&[Decimal::MAX, Decimal::MAX, Decimal::MIN]), third);
        assert_eq!(mean(&[Decimal::MIN, Decimal::MIN]), Decimal::MIN);
        assert_eq!(mean(&[dec("1"), dec("2")]), dec("1.5"));
    }

    #[test]
    fn test_above_average_scenario() {
        let partitions = PartitionedEmployeeSet::from_employees(&scenario());
        let above = above_department_average(&partitions);
        assert_eq!(above, vec![employee(2, "B", "IT", 200)]);
    }

    #[test]
    fn test_above_average_excludes_equal_salaries() {
        let employees = vec![
            employee(1, "A", "Ops", 300),
            employee(2, "B", "Ops", 300),
        ];
        assert!(above_department_average(&PartitionedEmployeeSet::from_employees(&employees)).is_empty());
    }

    #[test]
    fn test_count_by_job_role_with_null_group_last() {
        let mut employees = vec![Employee::new(1), Employee::new(2), Employee::new(3), Employee::new(4)];
        employees[0].job_role = Some("Tester".to_string());
        employees[1].job_role = Some("Developer".to_string());
        employees[2].job_role = Some("Tester".to_string());

        assert_eq!(
            count_by_job_role(&employees),
            vec![
                RoleCount { job_role: Some("Developer".to_string()), count: 1 },
                RoleCount { job_role: Some("Tester".to_string()), count: 2 },
                RoleCount { job_role: None, count: 1 },
            ]
        );
    }

    #[test]
    fn test_max_headcount_picks_largest() {
        let partitions = PartitionedEmployeeSet::from_employees(&scenario());
        assert_eq!(
            department_with_max_headcount(&partitions),
            Some(DepartmentHeadcount { department: "IT".to_string(), headcount: 2 })
        );
    }

    #[test]
    fn test_max_headcount_tie_breaks_lexically() {
        let employees = vec![
            employee(1, "A", "Sales", 1),
            employee(2, "B", "Finance", 1),
            employee(3, "C", "Sales", 1),
            employee(4, "D", "Finance", 1),
        ];
        let best = department_with_max_headcount(&PartitionedEmployeeSet::from_employees(&employees));
        assert_eq!(best.unwrap().department, "Finance");
    }

    #[test]
    fn test_max_headcount_ignores_default_partition() {
        let mut employees = vec![employee(1, "A", "IT", 1)];
        for id in 2..5 {
            employees.push(Employee::new(id));
        }
        let best = department_with_max_headcount(&PartitionedEmployeeSet::from_employees(&employees));
        assert_eq!(best.unwrap().department, "IT");
    }

    #[test]
    fn test_aggregates_on_empty_input() {
        let partitions = PartitionedEmployeeSet::from_employees(&[]);
        assert!(average_salary_by_department(&partitions).is_empty());
        assert!(above_department_average(&partitions).is_empty());
        assert!(department_with_max_headcount(&partitions).is_none());
        assert!(count_by_job_role(&[]).is_empty());
    }

    fn arb_employees() -> impl Strategy<Value = Vec<Employee>> {
        proptest::collection::vec(
            (proptest::sample::select(vec!["IT", "HR", "Sales"]), 1i64..1_000_000),
            0..30,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (department, salary))| employee(i as i64, "x", department, salary))
                .collect::<Vec<Employee>>()
        })
    }

    proptest! {
        #[test]
        fn prop_average_is_independent_of_row_order(
            (employees, shuffled) in arb_employees().prop_flat_map(|v| {
                let original = v.clone();
                Just(v).prop_shuffle().prop_map(move |s| (original.clone(), s))
            })
        ) {
            let original = average_salary_by_department(&PartitionedEmployeeSet::from_employees(&employees));
            let reordered = average_salary_by_department(&PartitionedEmployeeSet::from_employees(&shuffled));
            prop_assert_eq!(original, reordered);
        }

        #[test]
        fn prop_above_average_rows_exceed_their_department_mean(employees in arb_employees()) {
            let partitions = PartitionedEmployeeSet::from_employees(&employees);
            let averages = average_salary_by_department(&partitions);
            for row in above_department_average(&partitions) {
                let department = row.department.clone().unwrap();
                let average = averages
                    .iter()
                    .find(|a| a.department == department)
                    .unwrap()
                    .average_salary;
                prop_assert!(row.salary.unwrap() > average);
            }
            for (department, members) in partitions.departments() {
                if members.len() == 1 {
                    prop_assert!(above_department_average(&partitions)
                        .iter()
                        .all(|e| e.department.as_deref() != Some(department)));
                }
            }
        }
    }
}
