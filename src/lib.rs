//! Employee/department analytics pipeline.
//!
//! This crate loads delimited employee and department datasets, partitions
//! employees by department, runs a fixed catalog of analytical queries
//! (filters, grouped aggregates, a department join and window-style salary
//! rankings) and exports each result as delimited text or JSON Lines.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod partition;
pub mod pipeline;
pub mod query;
pub mod session;
