//! Query result models.
//!
//! This module contains the [`QueryResult`] type produced by every query
//! operation and consumed by the exporter, along with the typed cell
//! [`Value`] and the [`TabularRow`] trait that lets typed query rows be
//! turned into a result set.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Employee;

/// The declared type of a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Whole numbers.
    Integer,
    /// Exact decimal numbers.
    Decimal,
    /// Free text.
    Text,
    /// Calendar dates.
    Date,
}

/// A named, typed column of a [`QueryResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// The column name.
    pub name: String,
    /// The declared type of values in the column.
    pub data_type: DataType,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A single cell of a result row.
///
/// `Null` serializes as JSON `null`; the remaining variants serialize as
/// their inner value (decimals as strings, dates as `YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// An integer value.
    Integer(i64),
    /// A decimal value.
    Decimal(Decimal),
    /// A text value.
    Text(String),
    /// A date value.
    Date(NaiveDate),
}

impl Value {
    /// Returns true if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v.normalize()),
            Value::Text(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A typed row that can be rendered into a [`QueryResult`].
pub trait TabularRow {
    /// The column schema shared by every row of this type.
    fn columns() -> Vec<Column>;

    /// The cells of this row, in column order.
    fn to_row(&self) -> Vec<Value>;
}

/// An ordered result set with a declared column schema.
///
/// # Example
///
/// ```
/// use hive_analytics::models::{Column, DataType, QueryResult, Value};
///
/// let mut result = QueryResult::new(vec![
///     Column::new("department", DataType::Text),
///     Column::new("headcount", DataType::Integer),
/// ]);
/// result.push_row(vec![Value::from("IT"), Value::from(4_i64)]);
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.rows()[0][1], Value::Integer(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Creates an empty result with the given schema.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a result from typed rows.
    pub fn from_rows<R: TabularRow>(rows: &[R]) -> Self {
        Self {
            columns: R::columns(),
            rows: rows.iter().map(TabularRow::to_row).collect(),
        }
    }

    /// Appends a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match schema");
        self.rows.push(row);
    }

    /// Returns the column schema.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TabularRow for Employee {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("emp_id", DataType::Integer),
            Column::new("name", DataType::Text),
            Column::new("age", DataType::Integer),
            Column::new("job_role", DataType::Text),
            Column::new("salary", DataType::Decimal),
            Column::new("project", DataType::Text),
            Column::new("join_date", DataType::Date),
            Column::new("department", DataType::Text),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.emp_id),
            Value::from(self.name.clone()),
            Value::from(self.age.map(i64::from)),
            Value::from(self.job_role.clone()),
            Value::from(self.salary),
            Value::from(self.project.map(|p| p.as_str())),
            Value::from(self.join_date),
            Value::from(self.department.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Decimal(Decimal::new(15000, 2)).to_string(), "150");
        assert_eq!(Value::Decimal(Decimal::new(12345, 2)).to_string(), "123.45");
        assert_eq!(Value::from("IT").to_string(), "IT");
        assert_eq!(
            Value::from(NaiveDate::from_ymd_opt(2021, 2, 3).unwrap()).to_string(),
            "2021-02-03"
        );
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(3_i64)), Value::Integer(3));
        assert!(Value::from(None::<Decimal>).is_null());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let row = vec![
            Value::Integer(1),
            Value::Null,
            Value::Decimal(Decimal::new(505, 1)),
            Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[1,null,"50.5","2020-01-01"]"#);
    }

    #[test]
    fn test_employee_row_matches_schema() {
        let employee = Employee {
            name: Some("Ravi".to_string()),
            project: Some(Project::Gamma),
            ..Employee::new(5)
        };
        let row = employee.to_row();
        assert_eq!(row.len(), Employee::columns().len());
        assert_eq!(row[0], Value::Integer(5));
        assert_eq!(row[1], Value::from("Ravi"));
        assert_eq!(row[2], Value::Null);
        assert_eq!(row[5], Value::from("Gamma"));
    }

    #[test]
    fn test_from_rows_uses_row_schema() {
        let result = QueryResult::from_rows(&[Employee::new(1), Employee::new(2)]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.column_names()[0], "emp_id");
        assert_eq!(result.column_names().len(), 8);
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::from_rows::<Employee>(&[]);
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), 8);
    }
}
