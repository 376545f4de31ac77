//! Name-keyed collections of tables.
//!
//! ```rust
//! use pdtable::{read_bundle, IdentityPolicy, ParseOptions};
//!
//! let input = "**a\nall\nx\n-\n1\n\n**b\nall\ny\ntext\nz\n";
//! let bundle = read_bundle(input, &ParseOptions::new(), &mut IdentityPolicy).unwrap();
//!
//! assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["a", "b"]);
//! assert_eq!(bundle["b"].row_count(), 1);
//! ```

use crate::error::{Error, Result};
use crate::options::ParseOptions;
use crate::reader::read_tables;
use crate::table::Table;
use crate::unit::UnitPolicy;
use indexmap::IndexMap;
use std::ops::Index;

/// Tables keyed by name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableBundle(IndexMap<String, Table>);

impl TableBundle {
    #[must_use]
    pub fn new() -> Self {
        TableBundle(IndexMap::new())
    }

    /// Collects tables, failing on the first duplicate name.
    pub fn from_tables<I>(tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = Table>,
    {
        let mut bundle = TableBundle::new();
        for table in tables {
            bundle.insert(table)?;
        }
        Ok(bundle)
    }

    /// Adds a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTableName`] if a table of that name is present.
    pub fn insert(&mut self, table: Table) -> Result<()> {
        if self.0.contains_key(table.name()) {
            return Err(Error::DuplicateTableName(table.name().to_string()));
        }
        self.0.insert(table.name().to_string(), table);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, Table> {
        self.0.values()
    }

    /// Tables carrying the given destination tag.
    pub fn for_destination<'a>(&'a self, destination: &'a str) -> impl Iterator<Item = &'a Table> + 'a {
        self.0
            .values()
            .filter(move |t| t.destinations().contains(destination))
    }
}

impl Index<&str> for TableBundle {
    type Output = Table;

    fn index(&self, name: &str) -> &Table {
        match self.0.get(name) {
            Some(table) => table,
            None => panic!("no table named '{}' in bundle", name),
        }
    }
}

impl IntoIterator for TableBundle {
    type Item = Table;
    type IntoIter = indexmap::map::IntoValues<String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a TableBundle {
    type Item = &'a Table;
    type IntoIter = indexmap::map::Values<'a, String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

/// Reads every table of `input` into a bundle.
///
/// # Errors
///
/// Fails on the first read error or duplicate table name.
pub fn read_bundle<P>(input: &str, options: &ParseOptions, policy: &mut P) -> Result<TableBundle>
where
    P: UnitPolicy + ?Sized,
{
    let mut bundle = TableBundle::new();
    for table in read_tables(input.lines(), options, policy) {
        bundle.insert(table?)?;
    }
    log::debug!("read bundle of {} tables from {}", bundle.len(), options.origin);
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::IdentityPolicy;

    #[test]
    fn test_duplicate_table_names() {
        let input = "**a\nall\nx\n-\n1\n\n**a\nall\nx\n-\n2\n";
        let err = read_bundle(input, &ParseOptions::new(), &mut IdentityPolicy).unwrap_err();
        assert!(matches!(err, Error::DuplicateTableName(name) if name == "a"));
    }

    #[test]
    fn test_destination_filter() {
        let input = "**a\nmine\nx\n-\n1\n\n**b\nyours;mine\nx\n-\n2\n\n**c\nyours\nx\n-\n3\n";
        let bundle = read_bundle(input, &ParseOptions::new(), &mut IdentityPolicy).unwrap();
        let names: Vec<_> = bundle.for_destination("mine").map(|t| t.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_iteration_order() {
        let a = Table::new("a").unwrap();
        let b = Table::new("b").unwrap();
        let bundle = TableBundle::from_tables(vec![b, a]).unwrap();
        let names: Vec<_> = (&bundle).into_iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(bundle.into_iter().count(), 2);
    }
}
