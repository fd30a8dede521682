//! Core data models for the analytics pipeline.
//!
//! This module contains the source record types and the result set type
//! shared by the query engine and the exporter.

mod department;
mod employee;
mod query_result;

pub use department::Department;
pub use employee::{Employee, Project, UnknownProject};
pub use query_result::{Column, DataType, QueryResult, TabularRow, Value};
