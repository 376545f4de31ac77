//! # pdtable
//!
//! Reading and writing of typed, unit-annotated tables embedded as blocks in
//! delimited text.
//!
//! ## What is a table block?
//!
//! A block starts with a `**name` marker line and carries its own schema:
//!
//! ```text
//! **farm_animals
//! your_farm;my_farm
//! species;legs;mass;alive
//! text;int;kg;onoff
//! chicken;2;3;1
//! cow;4;;0
//!
//! ```
//!
//! The lines after the marker hold the destination tags, the column names and
//! one type/unit token per column. Data rows follow until a blank line, the
//! next marker or the end of input. Everything outside of blocks is ignored, so
//! blocks can live inside larger spreadsheet exports. See [`format`] for the
//! full grammar.
//!
//! ## Key Features
//!
//! - **Typed columns**: text, integer, float, boolean, date and datetime, see
//!   [`ColumnType`]
//! - **Units**: every numeric column carries a unit, `-` when dimensionless
//! - **Unit normalization**: a [`UnitPolicy`] converts columns while reading
//! - **Lossless round trip**: tables written by this crate read back equal
//! - **Lazy reading**: [`read_tables`] yields one table at a time
//!
//! ## Quick Start
//!
//! ```rust
//! use pdtable::{from_str, to_string};
//!
//! let input = "**farm\nall\nspecies;mass\ntext;kg\nchicken;3\ncow;\n";
//! let tables = from_str(input).unwrap();
//!
//! let farm = &tables[0];
//! assert_eq!(farm.name(), "farm");
//! assert_eq!(farm.column("mass").unwrap().unit(), "kg");
//! assert!(farm.column("mass").unwrap().get(1).unwrap().is_missing());
//!
//! assert_eq!(to_string(farm).unwrap(), "**farm\nall\nspecies;mass\ntext;kg\nchicken;3\ncow;\n\n");
//! ```
//!
//! ### Building tables
//!
//! ```rust
//! use pdtable::{table, Table};
//!
//! let mut places = Table::new("foo").unwrap();
//! places.add_column("place", vec!["home", "work", "beach"], None).unwrap();
//! places.add_column("distance", vec![0.0, 1.0, 2.0], Some("km")).unwrap();
//!
//! let same = table!("foo" {
//!     "place": ["home", "work", "beach"],
//!     "distance" ("km"): [0.0, 1.0, 2.0],
//! })
//! .unwrap();
//! assert_eq!(places, same);
//! ```
//!
//! ### Converting units while reading
//!
//! ```rust
//! use pdtable::{from_str_with_options, ParseOptions, ScalingPolicy};
//!
//! let input = "**farm\nall\nmass\nkg\n3\n";
//! let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
//! let tables = from_str_with_options(input, &ParseOptions::new(), &mut policy).unwrap();
//!
//! let mass = tables[0].column("mass").unwrap();
//! assert_eq!(mass.unit(), "g");
//! assert_eq!(mass.get(0).unwrap().as_f64(), Some(3000.0));
//! ```
//!
//! ## Logging
//!
//! The crate reports through the [`log`](https://docs.rs/log) facade: one
//! `debug` record per block read or written, `trace` records per column.
//! Install any logger (for instance `env_logger`) to see them.

pub mod bundle;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod metadata;
pub mod options;
pub mod parser;
pub mod reader;
pub mod resolver;
pub mod table;
pub mod unit;
pub mod value;
pub mod writer;

pub use bundle::{read_bundle, TableBundle};
pub use error::{Error, Result};
pub use metadata::{ColumnMetadata, ColumnType, TableMetadata, TableOrigin, NO_UNIT};
pub use options::{ParseOptions, WriteOptions, DEFAULT_SEPARATOR};
pub use reader::{read_tables, TableReader};
pub use table::{Column, Table};
pub use unit::{IdentityPolicy, PolicyError, ScalingPolicy, UnitPolicy};
pub use value::{ColumnValues, Value};
pub use writer::{to_lines, BlockWriter};

use std::io;

/// Reads every table in `s` with the default options and no unit conversion.
///
/// # Examples
///
/// ```rust
/// use pdtable::from_str;
///
/// let tables = from_str("**a\nall\nx\nint\n1\n2\n\n**b\nall\ny\nonoff\n0\n").unwrap();
/// assert_eq!(tables.len(), 2);
/// assert_eq!(tables[0].row_count(), 2);
/// ```
///
/// # Errors
///
/// Returns the first error met in any block.
pub fn from_str(s: &str) -> Result<Vec<Table>> {
    from_str_with_options(s, &ParseOptions::default(), &mut IdentityPolicy)
}

/// Reads every table in `s`, converting units with `policy`.
///
/// # Errors
///
/// Returns the first error met in any block.
pub fn from_str_with_options<P>(s: &str, options: &ParseOptions, policy: &mut P) -> Result<Vec<Table>>
where
    P: UnitPolicy + ?Sized,
{
    read_tables(s.lines(), options, policy).collect()
}

/// Reads every table from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use pdtable::from_reader;
/// use std::io::Cursor;
///
/// let tables = from_reader(Cursor::new(b"**t\nall\nx\n-\n1.5\n")).unwrap();
/// assert_eq!(tables[0].column("x").unwrap().get(0).unwrap().as_f64(), Some(1.5));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not UTF-8, and
/// otherwise the first error met in any block.
pub fn from_reader<R>(mut reader: R) -> Result<Vec<Table>>
where
    R: io::Read,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Writes a table as one block with the default separator.
///
/// # Errors
///
/// See [`to_lines`].
pub fn to_string(table: &Table) -> Result<String> {
    to_string_with_options(table, &WriteOptions::default())
}

/// Writes a table as one block.
///
/// # Examples
///
/// ```rust
/// use pdtable::{to_string_with_options, Table, WriteOptions};
///
/// let mut table = Table::new("t").unwrap().with_destinations(["a", "b"]);
/// table.add_column("x", vec![1i64, 2], None).unwrap();
/// table.add_column("y", vec![true, false], None).unwrap();
///
/// let text = to_string_with_options(&table, &WriteOptions::new().with_separator(',')).unwrap();
/// assert_eq!(text, "**t\na,b\nx,y\nint,onoff\n1,1\n2,0\n\n");
/// ```
///
/// # Errors
///
/// See [`to_lines`].
pub fn to_string_with_options(table: &Table, options: &WriteOptions) -> Result<String> {
    let mut writer = BlockWriter::new(options.clone());
    writer.write_table(table)?;
    Ok(writer.into_inner())
}

/// Writes a table as one block to an I/O stream.
///
/// # Errors
///
/// Returns an error if the table cannot be written (see [`to_lines`]) or
/// writing to the stream fails. Nothing is written in the first case.
pub fn to_writer<W>(mut writer: W, table: &Table, options: &WriteOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(table, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
