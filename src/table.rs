//! The in-memory table.
//!
//! A [`Table`] owns its [`TableMetadata`] and one [`ColumnValues`] per column, all
//! of the same length. Tables come out of the reader, or are built column by
//! column:
//!
//! ```rust
//! use pdtable::{ColumnType, Table};
//!
//! let mut table = Table::new("foo").unwrap();
//! table.add_column("place", vec!["home", "work", "beach"], None).unwrap();
//! table.add_column("distance", vec![0.0, 1.0, 2.0], Some("km")).unwrap();
//!
//! assert_eq!(table.row_count(), 3);
//! let distance = table.column("distance").unwrap();
//! assert_eq!(distance.column_type(), ColumnType::Float);
//! assert_eq!(distance.unit(), "km");
//! ```

use crate::error::{Error, Result};
use crate::metadata::{ColumnMetadata, ColumnType, TableMetadata, TableOrigin, NO_UNIT};
use crate::value::{ColumnValues, Value};
use indexmap::IndexSet;

/// Destination assigned to tables built without explicit destinations.
pub const DEFAULT_DESTINATION: &str = "all";

/// A named, typed, unit-annotated columnar table.
///
/// Equality compares metadata (ignoring origin) and every value.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    metadata: TableMetadata,
    values: Vec<ColumnValues>,
    row_count: usize,
}

/// A borrowed column: metadata plus values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column<'a> {
    pub metadata: &'a ColumnMetadata,
    pub values: &'a ColumnValues,
}

impl<'a> Column<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.metadata.name
    }

    #[must_use]
    pub fn unit(&self) -> &'a str {
        &self.metadata.unit
    }

    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.metadata.column_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value<'a>> {
        self.values.get(row)
    }
}

impl Table {
    /// Creates an empty table with the default destination `all`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableName`] for an empty or blank name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidTableName(
                "table name must not be empty".to_string(),
            ));
        }
        let destinations = std::iter::once(DEFAULT_DESTINATION.to_string()).collect();
        Ok(Table {
            metadata: TableMetadata::new(name, destinations, TableOrigin::constructed()),
            values: Vec::new(),
            row_count: 0,
        })
    }

    /// Replaces the destination tags.
    #[must_use]
    pub fn with_destinations<I, S>(mut self, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_destinations(destinations);
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: TableOrigin) -> Self {
        self.metadata.origin = origin;
        self
    }

    pub fn set_destinations<I, S>(&mut self, destinations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.destinations = destinations.into_iter().map(Into::into).collect();
    }

    /// Appends a column, inferring its type from the [`ColumnValues`] variant.
    ///
    /// `unit` defaults to `-` (dimensionless). Only numeric columns carry units.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedBlock`] for an empty column name
    /// - [`Error::DuplicateColumnName`] if the name is taken
    /// - [`Error::RowCountMismatch`] if the length differs from the existing columns
    /// - [`Error::InvalidUnit`] if the unit does not fit the column type
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdtable::{Error, Table};
    ///
    /// let mut table = Table::new("t").unwrap();
    /// table.add_column("a", vec![1i64, 2], None).unwrap();
    /// assert!(matches!(
    ///     table.add_column("b", vec![1i64], None),
    ///     Err(Error::RowCountMismatch { expected: 2, actual: 1, .. })
    /// ));
    /// assert!(matches!(
    ///     table.add_column("a", vec![3i64, 4], None),
    ///     Err(Error::DuplicateColumnName { .. })
    /// ));
    /// ```
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: impl Into<ColumnValues>,
        unit: Option<&str>,
    ) -> Result<()> {
        let name = name.into();
        let values = values.into();
        let unit = unit.unwrap_or(NO_UNIT);
        let metadata = ColumnMetadata::new(name, values.column_type(), unit);
        self.push_column(metadata, values)
    }

    /// Appends a column with prepared metadata; the metadata's type must match the values.
    pub(crate) fn push_column(
        &mut self,
        metadata: ColumnMetadata,
        mut values: ColumnValues,
    ) -> Result<()> {
        let table = &self.metadata.name;
        if metadata.name.is_empty() {
            return Err(Error::malformed(
                self.metadata.origin.clone(),
                table,
                "column name must not be empty",
            ));
        }
        if self.metadata.columns.contains_key(&metadata.name) {
            return Err(Error::duplicate_column(
                self.metadata.origin.clone(),
                table,
                &metadata.name,
            ));
        }
        if !metadata.column_type.accepts_unit(&metadata.unit) {
            return Err(Error::InvalidUnit {
                table: table.clone(),
                column: metadata.name,
                column_type: metadata.column_type.name(),
                unit: metadata.unit,
            });
        }
        debug_assert_eq!(metadata.column_type, values.column_type());
        if !self.values.is_empty() && values.len() != self.row_count {
            return Err(Error::RowCountMismatch {
                table: table.clone(),
                column: metadata.name,
                expected: self.row_count,
                actual: values.len(),
            });
        }

        values.normalize_missing();
        self.row_count = values.len();
        self.metadata
            .columns
            .insert(metadata.name.clone(), metadata);
        self.values.push(values);
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    #[must_use]
    pub fn destinations(&self) -> &IndexSet<String> {
        &self.metadata.destinations
    }

    #[must_use]
    pub fn origin(&self) -> &TableOrigin {
        &self.metadata.origin
    }

    #[must_use]
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up a column by its case-sensitive name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        let (index, _, metadata) = self.metadata.columns.get_full(name)?;
        Some(Column {
            metadata,
            values: &self.values[index],
        })
    }

    #[must_use]
    pub fn values(&self, name: &str) -> Option<&ColumnValues> {
        self.column(name).map(|c| c.values)
    }

    /// Columns in order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> + '_ {
        self.metadata
            .columns
            .values()
            .zip(self.values.iter())
            .map(|(metadata, values)| Column { metadata, values })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.metadata.columns.keys().map(String::as_str)
    }

    /// Cells of one row in column order, or `None` when out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<Vec<Value<'_>>> {
        if row >= self.row_count {
            return None;
        }
        self.values.iter().map(|v| v.get(row)).collect()
    }
}
