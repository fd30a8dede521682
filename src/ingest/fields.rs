//! Field coercion for delimited source rows.

use std::fmt::Display;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::EngineError;

/// Identifies a row being coerced, for error reporting.
pub(crate) struct RowContext<'a> {
    pub dataset: &'a str,
    pub line: u64,
    pub record: &'a StringRecord,
}

impl RowContext<'_> {
    pub fn malformed(&self, message: impl Into<String>) -> EngineError {
        EngineError::MalformedRecord {
            dataset: self.dataset.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    /// Fails unless the row has exactly `columns.len()` fields.
    pub fn expect_width(&self, columns: &[&str]) -> Result<(), EngineError> {
        if self.record.len() != columns.len() {
            return Err(self.malformed(format!(
                "expected {} fields ({}), found {}",
                columns.len(),
                columns.join(","),
                self.record.len()
            )));
        }
        Ok(())
    }

    fn raw(&self, index: usize) -> &str {
        self.record.get(index).map(str::trim).unwrap_or("")
    }

    /// Returns the field as text, or `None` if it is empty.
    pub fn text(&self, index: usize) -> Option<String> {
        let raw = self.raw(index);
        (!raw.is_empty()).then(|| raw.to_string())
    }

    /// Returns the field as text, failing if it is empty.
    pub fn required_text(&self, index: usize, column: &str) -> Result<String, EngineError> {
        self.text(index)
            .ok_or_else(|| self.malformed(format!("{} is required", column)))
    }

    /// Parses the field, or returns `None` if it is empty.
    pub fn parse<T>(&self, index: usize, column: &str) -> Result<Option<T>, EngineError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.raw(index);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<T>()
            .map(Some)
            .map_err(|e| self.malformed(format!("{} '{}' is invalid: {}", column, raw, e)))
    }

    /// Parses the field, failing if it is empty.
    pub fn required<T>(&self, index: usize, column: &str) -> Result<T, EngineError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse(index, column)?
            .ok_or_else(|| self.malformed(format!("{} is required", column)))
    }
}
