//! Error types for table block parsing, resolution and serialization.
//!
//! Every error raised while reading a stream carries the [`TableOrigin`] of the
//! offending line, so callers can report "table X, column Y, row N" without
//! re-deriving the location.
//!
//! ## Error Categories
//!
//! - **Structure**: [`Error::MalformedBlock`], [`Error::TruncatedBlock`],
//!   [`Error::DuplicateColumnName`]
//! - **Cell values**: [`Error::InvalidNumericValue`], [`Error::InvalidIntegerValue`],
//!   [`Error::InvalidBooleanValue`], [`Error::InvalidDateValue`]
//! - **Unit conversion**: [`Error::UnitPolicy`], [`Error::InvalidUnit`]
//! - **Construction**: [`Error::RowCountMismatch`], [`Error::InvalidTableName`],
//!   [`Error::DuplicateTableName`]
//! - **Serialization**: [`Error::EmptyTable`], [`Error::Unrepresentable`], [`Error::Io`]
//!
//! ## Examples
//!
//! ```rust
//! use pdtable::{from_str, Error};
//!
//! let result = from_str("**broken\nall\na;b\ntext\n");
//! match result {
//!     Err(Error::MalformedBlock { table, origin, .. }) => {
//!         assert_eq!(table, "broken");
//!         assert_eq!(origin.line, Some(4));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use crate::metadata::TableOrigin;
use crate::unit::PolicyError;
use thiserror::Error;

/// Represents all possible errors raised while reading or writing table blocks.
#[derive(Debug, Error)]
pub enum Error {
    /// Structural grammar violation (field count, missing name, empty column name)
    #[error("Malformed block '{table}' at {origin}: {msg}")]
    MalformedBlock {
        origin: TableOrigin,
        table: String,
        msg: String,
    },

    /// Input ended while a block header was still incomplete
    #[error("Truncated block '{table}' at {origin}: input ended before the {expected} line")]
    TruncatedBlock {
        origin: TableOrigin,
        table: String,
        expected: String,
    },

    /// A column name occurs twice within one table
    #[error("Duplicate column name '{column}' in table '{table}' at {origin}")]
    DuplicateColumnName {
        origin: TableOrigin,
        table: String,
        column: String,
    },

    #[error("Invalid numeric value '{value}' in table '{table}', column '{column}', row {row} at {origin}")]
    InvalidNumericValue {
        origin: TableOrigin,
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid integer value '{value}' in table '{table}', column '{column}', row {row} at {origin}")]
    InvalidIntegerValue {
        origin: TableOrigin,
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid boolean value '{value}' in table '{table}', column '{column}', row {row} at {origin} (expected 0 or 1)")]
    InvalidBooleanValue {
        origin: TableOrigin,
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid date value '{value}' in table '{table}', column '{column}', row {row} at {origin} (expected format {format})")]
    InvalidDateValue {
        origin: TableOrigin,
        table: String,
        column: String,
        row: usize,
        value: String,
        format: &'static str,
    },

    /// Failure reported by a [`UnitPolicy`](crate::UnitPolicy), or a policy
    /// result that breaks the column's type or row count
    #[error("Unit conversion failed for table '{table}', column '{column}' at {origin}: {source}")]
    UnitPolicy {
        origin: TableOrigin,
        table: String,
        column: String,
        #[source]
        source: PolicyError,
    },

    /// A unit that cannot be stored on a column of the given type
    #[error("Invalid unit '{unit}' for {column_type} column '{column}' in table '{table}'")]
    InvalidUnit {
        table: String,
        column: String,
        column_type: &'static str,
        unit: String,
    },

    #[error("Column '{column}' of table '{table}' has {actual} values, expected {expected}")]
    RowCountMismatch {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Duplicate table name '{0}' in bundle")]
    DuplicateTableName(String),

    #[error("Table '{0}' has no columns")]
    EmptyTable(String),

    /// A name, unit or cell that cannot be written without breaking the grammar
    #[error("Cannot write table '{table}': {msg}")]
    Unrepresentable { table: String, msg: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a malformed block error for the line described by `origin`.
    pub fn malformed(origin: TableOrigin, table: &str, msg: impl Into<String>) -> Self {
        Error::MalformedBlock {
            origin,
            table: table.to_string(),
            msg: msg.into(),
        }
    }

    /// Creates a malformed block error for a field-count mismatch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdtable::{Error, TableOrigin};
    ///
    /// let err = Error::field_count(TableOrigin::new("farm.csv").at_line(7), "farm", 3, 2);
    /// assert!(err.to_string().contains("expected 3 fields, found 2"));
    /// assert!(err.to_string().contains("farm.csv:7"));
    /// ```
    pub fn field_count(origin: TableOrigin, table: &str, expected: usize, actual: usize) -> Self {
        Error::malformed(
            origin,
            table,
            format!("expected {} fields, found {}", expected, actual),
        )
    }

    pub fn truncated(origin: TableOrigin, table: &str, expected: &str) -> Self {
        Error::TruncatedBlock {
            origin,
            table: table.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn duplicate_column(origin: TableOrigin, table: &str, column: &str) -> Self {
        Error::DuplicateColumnName {
            origin,
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn unit_policy(
        origin: TableOrigin,
        table: &str,
        column: &str,
        source: impl Into<PolicyError>,
    ) -> Self {
        Error::UnitPolicy {
            origin,
            table: table.to_string(),
            column: column.to_string(),
            source: source.into(),
        }
    }

    pub fn unrepresentable(table: &str, msg: impl Into<String>) -> Self {
        Error::Unrepresentable {
            table: table.to_string(),
            msg: msg.into(),
        }
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the origin of the offending line, for errors raised while parsing.
    #[must_use]
    pub fn origin(&self) -> Option<&TableOrigin> {
        match self {
            Error::MalformedBlock { origin, .. }
            | Error::TruncatedBlock { origin, .. }
            | Error::DuplicateColumnName { origin, .. }
            | Error::InvalidNumericValue { origin, .. }
            | Error::InvalidIntegerValue { origin, .. }
            | Error::InvalidBooleanValue { origin, .. }
            | Error::InvalidDateValue { origin, .. }
            | Error::UnitPolicy { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// Returns `true` when the error comes from the block structure rather than
    /// from a cell value or unit conversion.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MalformedBlock { .. }
                | Error::TruncatedBlock { .. }
                | Error::DuplicateColumnName { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_error_message_locates_fault() {
        let err = Error::InvalidBooleanValue {
            origin: TableOrigin::new("farm.csv").at_line(12),
            table: "farm".to_string(),
            column: "log".to_string(),
            row: 3,
            value: "yes".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("table 'farm'"));
        assert!(msg.contains("column 'log'"));
        assert!(msg.contains("row 3"));
        assert!(msg.contains("farm.csv:12"));
    }

    #[test]
    fn test_unit_policy_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::unit_policy(TableOrigin::default(), "t", "c", "unknown unit 'furlong'");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("unknown unit 'furlong'".to_string())
        );
    }

    #[test]
    fn test_structural_classification() {
        assert!(Error::truncated(TableOrigin::default(), "t", "column names").is_structural());
        assert!(!Error::EmptyTable("t".to_string()).is_structural());
    }
}
