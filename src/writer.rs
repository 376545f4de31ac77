//! Table serialization.
//!
//! [`BlockWriter`] renders tables as blocks:
//!
//! ```text
//! **<name>
//! <destinations>
//! <column names>
//! <type/unit tokens>
//! <rows>...
//! <blank line>
//! ```
//!
//! Units are written as stored. A unit rewritten by a [`UnitPolicy`](crate::UnitPolicy)
//! while reading is written in its converted form.
//!
//! The format has no quoting, so a value that would change the block structure
//! when read back (a separator or line break inside a cell, a row starting with
//! `**`, a row rendering as a blank line) is refused with
//! [`Error::Unrepresentable`].
//!
//! ## Examples
//!
//! ```rust
//! use pdtable::{BlockWriter, Table, WriteOptions};
//!
//! let mut table = Table::new("t").unwrap();
//! table.add_column("x", vec![1.5], Some("m")).unwrap();
//!
//! let mut writer = BlockWriter::new(WriteOptions::new());
//! writer.write_table(&table).unwrap();
//! writer.write_table(&table).unwrap();
//! assert_eq!(writer.into_inner(), "**t\nall\nx\nm\n1.5\n\n**t\nall\nx\nm\n1.5\n\n");
//! ```

use crate::error::{Error, Result};
use crate::options::WriteOptions;
use crate::table::Table;
use crate::value::Value;

const MISSING_ROW_MARKER: &str = "NaN";

/// Accumulates the text of one or more blocks.
pub struct BlockWriter {
    output: String,
    options: WriteOptions,
}

impl BlockWriter {
    pub fn new(options: WriteOptions) -> Self {
        BlockWriter {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends one table. On error nothing is appended.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for line in to_lines(table, &self.options)? {
            self.output.push_str(&line);
            self.output.push('\n');
        }
        Ok(())
    }
}

fn check_field(table: &Table, separator: char, what: &str, field: &str) -> Result<()> {
    if field.contains(separator) || field.contains('\n') || field.contains('\r') {
        return Err(Error::unrepresentable(
            table.name(),
            format!(
                "{} {:?} contains the separator or a line break",
                what, field
            ),
        ));
    }
    Ok(())
}

/// Renders a table as the lines of one block, the final blank line included.
///
/// # Errors
///
/// - [`Error::EmptyTable`] for a table without columns
/// - [`Error::Unrepresentable`] when a name, tag, unit or cell cannot be written
///   without altering the block structure
pub fn to_lines(table: &Table, options: &WriteOptions) -> Result<Vec<String>> {
    if table.is_empty() {
        return Err(Error::EmptyTable(table.name().to_string()));
    }
    let sep = options.separator;
    let sep_str = sep.to_string();
    let mut lines = Vec::with_capacity(table.row_count() + 5);

    check_field(table, sep, "table name", table.name())?;
    if table.name().trim() != table.name() {
        return Err(Error::unrepresentable(
            table.name(),
            "table name has surrounding whitespace",
        ));
    }
    if table.name().starts_with('*') {
        return Err(Error::unrepresentable(
            table.name(),
            "table name starts with '*' and would read as a directive",
        ));
    }
    lines.push(format!("**{}", table.name()));

    for tag in table.destinations() {
        check_field(table, sep, "destination", tag)?;
        if tag.is_empty() || tag.contains(char::is_whitespace) {
            return Err(Error::unrepresentable(
                table.name(),
                format!("destination {:?} is empty or contains whitespace", tag),
            ));
        }
    }
    lines.push(
        table
            .destinations()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&sep_str),
    );

    let mut names = Vec::with_capacity(table.column_count());
    let mut tokens = Vec::with_capacity(table.column_count());
    for column in table.columns() {
        check_field(table, sep, "column name", column.name())?;
        let token = column.metadata.token();
        check_field(table, sep, "unit", &token)?;
        names.push(column.name());
        tokens.push(token);
    }
    lines.push(names.join(&sep_str));
    lines.push(tokens.join(&sep_str));

    for row in 0..table.row_count() {
        let cells = table.row(row).ok_or_else(|| {
            Error::unrepresentable(table.name(), format!("row {} is missing from a column", row))
        })?;
        let mut fields = Vec::with_capacity(cells.len());
        for cell in &cells {
            if let Value::Text(text) = cell {
                check_field(table, sep, "text value", text)?;
            }
            fields.push(cell.to_string());
        }

        let mut line = fields.join(&sep_str);
        if line.trim().is_empty() {
            match cells.as_slice() {
                [cell] if cell.is_missing() => line = MISSING_ROW_MARKER.to_string(),
                _ => {
                    return Err(Error::unrepresentable(
                        table.name(),
                        format!("row {} would be written as a blank line", row),
                    ))
                }
            }
        }
        if line.starts_with("**") {
            return Err(Error::unrepresentable(
                table.name(),
                format!("row {} starts with the table marker '**'", row),
            ));
        }
        lines.push(line);
    }

    lines.push(String::new());
    log::debug!(
        "wrote table '{}' ({} columns, {} rows)",
        table.name(),
        table.column_count(),
        table.row_count()
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn write(table: &Table) -> Result<String> {
        let mut writer = BlockWriter::new(WriteOptions::new());
        writer.write_table(table)?;
        Ok(writer.into_inner())
    }

    #[test]
    fn test_missing_float_is_empty_field() {
        let mut table = Table::new("t").unwrap();
        table.add_column("a", vec![Some(1.0), None], Some("kg")).unwrap();
        table.add_column("b", vec![true, false], None).unwrap();
        assert_eq!(write(&table).unwrap(), "**t\nall\na;b\nkg;onoff\n1;1\n;0\n\n");
    }

    #[test]
    fn test_single_missing_cell_row_is_written_as_nan() {
        let mut table = Table::new("t").unwrap();
        table.add_column("a", vec![None, Some(2.0)], None).unwrap();
        assert_eq!(write(&table).unwrap(), "**t\nall\na\n-\nNaN\n2\n\n");
    }

    #[test]
    fn test_types_and_units_tokens() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        let mut table = Table::new("t").unwrap().with_destinations(["a", "b"]);
        table.add_column("n", vec![3i64], Some("pcs")).unwrap();
        table.add_column("i", vec![4i64], None).unwrap();
        table.add_column("d", vec![date], None).unwrap();
        table
            .add_column("dt", vec![date.and_hms_opt(1, 2, 3).unwrap()], None)
            .unwrap();
        assert_eq!(
            write(&table).unwrap(),
            "**t\na;b\nn;i;d;dt\nint:pcs;int;date;datetime\n3;4;2021-03-04;2021-03-04 01:02:03\n\n"
        );
    }

    #[test]
    fn test_no_destinations_is_empty_line() {
        let mut table = Table::new("t").unwrap().with_destinations(Vec::<String>::new());
        table.add_column("x", vec![1i64], None).unwrap();
        assert_eq!(write(&table).unwrap(), "**t\n\nx\nint\n1\n\n");
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let table = Table::new("t").unwrap();
        assert!(matches!(write(&table), Err(Error::EmptyTable(_))));
    }

    #[test]
    fn test_unrepresentable_values() {
        let mut table = Table::new("t").unwrap();
        table.add_column("x", vec!["a;b"], None).unwrap();
        assert!(matches!(write(&table), Err(Error::Unrepresentable { .. })));

        let mut table = Table::new("t").unwrap();
        table.add_column("x", vec!["**sneaky"], None).unwrap();
        assert!(matches!(write(&table), Err(Error::Unrepresentable { .. })));

        let mut table = Table::new("t").unwrap();
        table.add_column("x", vec![""], None).unwrap();
        assert!(matches!(write(&table), Err(Error::Unrepresentable { .. })));
    }

    #[test]
    fn test_star_prefixed_name_is_rejected() {
        let mut table = Table::new("*x").unwrap();
        table.add_column("a", vec![1i64], None).unwrap();
        assert!(matches!(write(&table), Err(Error::Unrepresentable { .. })));

        let mut table = Table::new("x*").unwrap();
        table.add_column("a", vec![1i64], None).unwrap();
        assert_eq!(write(&table).unwrap(), "**x*\nall\na\nint\n1\n\n");
    }

    #[test]
    fn test_subsecond_datetime_is_kept() {
        let at = NaiveDate::from_ymd_opt(2020, 5, 17)
            .unwrap()
            .and_hms_milli_opt(8, 30, 0, 250)
            .unwrap();
        let mut table = Table::new("t").unwrap();
        table.add_column("at", vec![at], None).unwrap();
        assert_eq!(write(&table).unwrap(), "**t\nall\nat\ndatetime\n2020-05-17 08:30:00.250\n\n");
    }

    #[test]
    fn test_failed_write_appends_nothing() {
        let mut good = Table::new("good").unwrap();
        good.add_column("x", vec![1i64], None).unwrap();
        let mut bad = Table::new("bad").unwrap();
        bad.add_column("x", vec!["a\nb"], None).unwrap();

        let mut writer = BlockWriter::new(WriteOptions::new());
        writer.write_table(&good).unwrap();
        assert!(writer.write_table(&bad).is_err());
        assert_eq!(writer.into_inner(), "**good\nall\nx\nint\n1\n\n");
    }

    #[test]
    fn test_separator_is_configurable() {
        let mut table = Table::new("t").unwrap();
        table.add_column("a", vec!["x;y"], None).unwrap();
        table.add_column("b", vec![1.0], None).unwrap();
        let lines = to_lines(&table, &WriteOptions::new().with_separator('\t')).unwrap();
        assert_eq!(lines[2], "a\tb");
        assert_eq!(lines[4], "x;y\t1");
    }
}
