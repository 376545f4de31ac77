//! Table and column metadata.
//!
//! - [`TableOrigin`]: where a block came from (diagnostics only)
//! - [`ColumnType`]: the closed set of column interpretations
//! - [`ColumnMetadata`]: name, type and unit of one column
//! - [`TableMetadata`]: name, destinations, origin and ordered columns of a table
//!
//! ## Type/unit tokens
//!
//! The fourth line of a block holds one token per column:
//!
//! | Token | Type | Unit |
//! |-------|------|------|
//! | `text` | [`ColumnType::Text`] | `-` |
//! | `onoff` | [`ColumnType::Boolean`] | `-` |
//! | `date` | [`ColumnType::Date`] | `-` |
//! | `datetime` | [`ColumnType::DateTime`] | `-` |
//! | `int` | [`ColumnType::Integer`] | `-` |
//! | `int:<unit>` | [`ColumnType::Integer`] | `<unit>` |
//! | `-` | [`ColumnType::Float`] | `-` |
//! | anything else | [`ColumnType::Float`] | the token |
//!
//! ```rust
//! use pdtable::ColumnType;
//!
//! assert_eq!(ColumnType::from_token("kg"), (ColumnType::Float, "kg".to_string()));
//! assert_eq!(ColumnType::from_token("int:pcs"), (ColumnType::Integer, "pcs".to_string()));
//! assert_eq!(ColumnType::Float.token("kg"), "kg");
//! assert_eq!(ColumnType::Boolean.token("-"), "onoff");
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;

/// Unit string meaning "dimensionless" or "no unit".
pub const NO_UNIT: &str = "-";

/// Format of `date` cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of `datetime` cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const TEXT_TOKEN: &str = "text";
const BOOLEAN_TOKEN: &str = "onoff";
const DATE_TOKEN: &str = "date";
const DATETIME_TOKEN: &str = "datetime";
const INTEGER_TOKEN: &str = "int";
const INTEGER_UNIT_PREFIX: &str = "int:";

/// Identifies where a block came from.
///
/// Only used for diagnostics; two tables with different origins still compare
/// equal when their contents match.
///
/// # Examples
///
/// ```rust
/// use pdtable::TableOrigin;
///
/// let origin = TableOrigin::new("farms.xlsx").with_sheet("animals").at_line(4);
/// assert_eq!(origin.to_string(), "farms.xlsx[animals]:4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TableOrigin {
    pub source: String,
    pub sheet: Option<String>,
    pub line: Option<usize>,
}

impl TableOrigin {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        TableOrigin {
            source: source.into(),
            sheet: None,
            line: None,
        }
    }

    /// Origin of tables built through the construction API.
    #[must_use]
    pub fn constructed() -> Self {
        TableOrigin::new("<constructed>")
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Returns a copy pointing at the given 1-based line.
    #[must_use]
    pub fn at_line(&self, line: usize) -> Self {
        TableOrigin {
            line: Some(line),
            ..self.clone()
        }
    }
}

impl Default for TableOrigin {
    fn default() -> Self {
        TableOrigin::new("<input>")
    }
}

impl fmt::Display for TableOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        if let Some(sheet) = &self.sheet {
            write!(f, "[{}]", sheet)?;
        }
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        Ok(())
    }
}

/// The interpretation of a column's cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
}

impl ColumnType {
    /// Interprets a type/unit token, returning the column type and its unit.
    ///
    /// Every token maps to some type: unrecognized tokens are units of a float column.
    #[must_use]
    pub fn from_token(token: &str) -> (ColumnType, String) {
        match token {
            TEXT_TOKEN => (ColumnType::Text, NO_UNIT.to_string()),
            BOOLEAN_TOKEN => (ColumnType::Boolean, NO_UNIT.to_string()),
            DATE_TOKEN => (ColumnType::Date, NO_UNIT.to_string()),
            DATETIME_TOKEN => (ColumnType::DateTime, NO_UNIT.to_string()),
            INTEGER_TOKEN => (ColumnType::Integer, NO_UNIT.to_string()),
            _ => match token.strip_prefix(INTEGER_UNIT_PREFIX) {
                Some("") => (ColumnType::Integer, NO_UNIT.to_string()),
                Some(unit) => (ColumnType::Integer, unit.to_string()),
                None => (ColumnType::Float, token.to_string()),
            },
        }
    }

    /// Renders the type/unit token for a column of this type carrying `unit`.
    #[must_use]
    pub fn token(&self, unit: &str) -> String {
        match self {
            ColumnType::Text => TEXT_TOKEN.to_string(),
            ColumnType::Boolean => BOOLEAN_TOKEN.to_string(),
            ColumnType::Date => DATE_TOKEN.to_string(),
            ColumnType::DateTime => DATETIME_TOKEN.to_string(),
            ColumnType::Integer if unit == NO_UNIT => INTEGER_TOKEN.to_string(),
            ColumnType::Integer => format!("{}{}", INTEGER_UNIT_PREFIX, unit),
            ColumnType::Float => unit.to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
        }
    }

    /// Checks that `unit` can be stored on a column of this type and survive
    /// a write/read cycle through [`ColumnType::token`].
    pub(crate) fn accepts_unit(&self, unit: &str) -> bool {
        if unit.is_empty() {
            return false;
        }
        match self {
            ColumnType::Integer => true,
            ColumnType::Float => ColumnType::from_token(unit).0 == ColumnType::Float,
            _ => unit == NO_UNIT,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name, type and unit of a single column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub unit: String,
}

impl ColumnMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType, unit: impl Into<String>) -> Self {
        ColumnMetadata {
            name: name.into(),
            column_type,
            unit: unit.into(),
        }
    }

    /// The type/unit token written for this column.
    #[must_use]
    pub fn token(&self) -> String {
        self.column_type.token(&self.unit)
    }

    /// Returns `true` unless the unit is [`NO_UNIT`].
    #[must_use]
    pub fn has_unit(&self) -> bool {
        self.unit != NO_UNIT
    }
}

/// Per-table metadata: name, destinations, origin and ordered column metadata.
///
/// Equality ignores [`TableMetadata::origin`].
#[derive(Clone, Debug)]
pub struct TableMetadata {
    pub name: String,
    pub destinations: IndexSet<String>,
    pub origin: TableOrigin,
    pub(crate) columns: IndexMap<String, ColumnMetadata>,
}

impl TableMetadata {
    pub(crate) fn new(name: String, destinations: IndexSet<String>, origin: TableOrigin) -> Self {
        TableMetadata {
            name,
            destinations,
            origin,
            columns: IndexMap::new(),
        }
    }

    /// Column metadata in column order.
    pub fn columns(&self) -> indexmap::map::Values<'_, String, ColumnMetadata> {
        self.columns.values()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.get(name)
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn column_names(&self) -> indexmap::map::Keys<'_, String, ColumnMetadata> {
        self.columns.keys()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl PartialEq for TableMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.destinations == other.destinations
            && self.columns.len() == other.columns.len()
            && self.columns.values().eq(other.columns.values())
    }
}
