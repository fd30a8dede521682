//! Department partitioning of the employee collection.
//!
//! A [`PartitionedEmployeeSet`] is materialized once from the full employee
//! collection and never changes afterwards. Partition keys are whatever
//! department values were observed, so new departments need no schema
//! change. Employees with no department land in the default partition,
//! labelled [`DEFAULT_PARTITION`] and ordered after every named department.
//! The default partition is keyed apart from named departments, so a
//! department literally called `__HIVE_DEFAULT_PARTITION__` stays distinct.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::Employee;

/// Partition key for employees whose department is NULL.
pub const DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PartitionKey {
    Department(String),
    // Declared last so it sorts after every named department.
    Default,
}

impl PartitionKey {
    fn label(&self) -> &str {
        match self {
            PartitionKey::Department(name) => name,
            PartitionKey::Default => DEFAULT_PARTITION,
        }
    }
}

/// Employees grouped by department, in lexical key order with the default
/// partition last.
///
/// Within a partition, employees keep the order they had in the input.
///
/// # Examples
///
/// ```
/// use hive_analytics::models::Employee;
/// use hive_analytics::partition::PartitionedEmployeeSet;
///
/// let employees = vec![
///     Employee { department: Some("IT".to_string()), ..Employee::new(1) },
///     Employee { department: Some("HR".to_string()), ..Employee::new(2) },
///     Employee { department: Some("IT".to_string()), ..Employee::new(3) },
/// ];
/// let partitions = PartitionedEmployeeSet::from_employees(&employees);
///
/// assert_eq!(partitions.keys().collect::<Vec<_>>(), vec!["HR", "IT"]);
/// assert_eq!(partitions.get("IT").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedEmployeeSet {
    partitions: BTreeMap<PartitionKey, Vec<Employee>>,
}

impl PartitionedEmployeeSet {
    /// Builds the partitioning from the full employee collection.
    pub fn from_employees(employees: &[Employee]) -> Self {
        let mut partitions: BTreeMap<PartitionKey, Vec<Employee>> = BTreeMap::new();
        for employee in employees {
            let key = employee
                .department
                .clone()
                .map_or(PartitionKey::Default, PartitionKey::Department);
            partitions.entry(key).or_default().push(employee.clone());
        }

        debug!(
            partitions = partitions.len(),
            records = employees.len(),
            "Partitioned employees by department"
        );

        Self { partitions }
    }

    /// Returns the employees of a named department.
    pub fn get(&self, department: &str) -> Option<&[Employee]> {
        self.partitions
            .get(&PartitionKey::Department(department.to_string()))
            .map(Vec::as_slice)
    }

    /// Returns the employees whose department is NULL.
    pub fn default_partition(&self) -> Option<&[Employee]> {
        self.partitions.get(&PartitionKey::Default).map(Vec::as_slice)
    }

    /// Iterates partitions in key order, including the default partition
    /// under the [`DEFAULT_PARTITION`] label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Employee])> {
        self.partitions
            .iter()
            .map(|(key, employees)| (key.label(), employees.as_slice()))
    }

    /// Iterates partitions with a real department key, skipping the default
    /// partition.
    pub fn departments(&self) -> impl Iterator<Item = (&str, &[Employee])> {
        self.partitions.iter().filter_map(|(key, employees)| match key {
            PartitionKey::Department(name) => Some((name.as_str(), employees.as_slice())),
            PartitionKey::Default => None,
        })
    }

    /// Iterates partition labels in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(PartitionKey::label)
    }

    /// Returns the number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns true if there are no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Returns the total number of records across all partitions.
    pub fn record_count(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Returns every record, partition by partition.
    pub fn flatten(&self) -> Vec<Employee> {
        self.partitions.values().flatten().cloned().collect()
    }
}
