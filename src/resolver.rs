//! Typed resolution of raw blocks.
//!
//! [`resolve`] turns a [`RawBlock`] into a [`Table`]: each column's token picks a
//! [`ColumnType`] and unit, the cells are parsed for that type, and the
//! [`UnitPolicy`] rewrites values and unit once per column.
//!
//! ## Cell rules
//!
//! | Type | Accepted | Missing |
//! |------|----------|---------|
//! | text | anything, verbatim | - |
//! | float | `f64` syntax | empty, `NaN` (any case), `-` |
//! | int | `i64` syntax | not supported |
//! | onoff | `0`, `1` | not supported |
//! | date | `%Y-%m-%d` | not supported |
//! | datetime | `%Y-%m-%d %H:%M:%S%.f` | not supported |

use crate::error::{Error, Result};
use crate::metadata::{
    ColumnMetadata, ColumnType, TableOrigin, DATETIME_FORMAT, DATE_FORMAT, NO_UNIT,
};
use crate::parser::{RawBlock, RawRow};
use crate::table::Table;
use crate::unit::UnitPolicy;
use crate::value::ColumnValues;
use chrono::{NaiveDate, NaiveDateTime};

/// Where a cell sits, for error reporting.
struct CellContext<'a> {
    origin: &'a TableOrigin,
    table: &'a str,
    column: &'a str,
}

#[derive(Clone, Copy)]
enum CellKind {
    Numeric,
    Integer,
    Boolean,
    Date,
    DateTime,
}

impl CellContext<'_> {
    fn invalid(&self, kind: CellKind, row_index: usize, row: &RawRow, field: &str) -> Error {
        let origin = self.origin.at_line(row.line);
        let table = self.table.to_string();
        let column = self.column.to_string();
        let value = field.to_string();
        let row = row_index;
        match kind {
            CellKind::Numeric => Error::InvalidNumericValue {
                origin,
                table,
                column,
                row,
                value,
            },
            CellKind::Integer => Error::InvalidIntegerValue {
                origin,
                table,
                column,
                row,
                value,
            },
            CellKind::Boolean => Error::InvalidBooleanValue {
                origin,
                table,
                column,
                row,
                value,
            },
            CellKind::Date => Error::InvalidDateValue {
                origin,
                table,
                column,
                row,
                value,
                format: DATE_FORMAT,
            },
            CellKind::DateTime => Error::InvalidDateValue {
                origin,
                table,
                column,
                row,
                value,
                format: DATETIME_FORMAT,
            },
        }
    }
}

fn is_missing_float(field: &str) -> bool {
    field.is_empty() || field == NO_UNIT || field.eq_ignore_ascii_case("nan")
}

fn parse_column(
    column_type: ColumnType,
    index: usize,
    rows: &[RawRow],
    cx: &CellContext<'_>,
) -> Result<ColumnValues> {
    let mut values = ColumnValues::with_capacity(column_type, rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        let field = row.fields[index].as_str();
        let invalid = |kind| cx.invalid(kind, row_index, row, field);

        match &mut values {
            ColumnValues::Text(v) => v.push(field.to_string()),
            ColumnValues::Float(v) => {
                if is_missing_float(field) {
                    v.push(None);
                } else {
                    let x = field
                        .parse::<f64>()
                        .map_err(|_| invalid(CellKind::Numeric))?;
                    v.push(Some(x).filter(|x| !x.is_nan()));
                }
            }
            ColumnValues::Integer(v) => {
                let x = field
                    .parse::<i64>()
                    .map_err(|_| invalid(CellKind::Integer))?;
                v.push(x);
            }
            ColumnValues::Boolean(v) => match field {
                "0" => v.push(false),
                "1" => v.push(true),
                _ => return Err(invalid(CellKind::Boolean)),
            },
            ColumnValues::Date(v) => {
                let d = NaiveDate::parse_from_str(field, DATE_FORMAT)
                    .map_err(|_| invalid(CellKind::Date))?;
                v.push(d);
            }
            ColumnValues::DateTime(v) => {
                let dt = NaiveDateTime::parse_from_str(field, DATETIME_FORMAT)
                    .map_err(|_| invalid(CellKind::DateTime))?;
                v.push(dt);
            }
        }
    }

    Ok(values)
}

/// Resolves a raw block into a typed table, running `policy` on every column.
///
/// # Errors
///
/// - [`Error::MalformedBlock`] when the token list or a row does not have one
///   field per column
/// - `Invalid*Value` when a cell does not parse as its column type
/// - [`Error::UnitPolicy`] when the policy fails, changes the column type or
///   changes the number of rows
/// - [`Error::InvalidUnit`] when the policy returns a unit the column cannot carry
///
/// # Examples
///
/// ```rust
/// use pdtable::parser::BlockParser;
/// use pdtable::resolver::resolve;
/// use pdtable::{IdentityPolicy, ParseOptions};
///
/// let options = ParseOptions::new();
/// let block = BlockParser::new("**t\nall\nn;on\nint;onoff\n4;1\n".lines(), &options)
///     .next()
///     .unwrap()
///     .unwrap();
/// let table = resolve(block, &mut IdentityPolicy).unwrap();
/// assert_eq!(table.values("n").unwrap().as_integers(), Some(&[4][..]));
/// assert_eq!(table.values("on").unwrap().as_booleans(), Some(&[true][..]));
/// ```
pub fn resolve<P>(block: RawBlock, policy: &mut P) -> Result<Table>
where
    P: UnitPolicy + ?Sized,
{
    let RawBlock {
        name,
        destinations,
        column_names,
        type_tokens,
        rows,
        origin,
    } = block;

    if type_tokens.len() != column_names.len() {
        return Err(Error::field_count(
            origin.clone(),
            &name,
            column_names.len(),
            type_tokens.len(),
        ));
    }
    if let Some(row) = rows.iter().find(|r| r.fields.len() != column_names.len()) {
        return Err(Error::field_count(
            origin.at_line(row.line),
            &name,
            column_names.len(),
            row.fields.len(),
        ));
    }

    let mut table = Table::new(name)?
        .with_destinations(destinations)
        .with_origin(origin.clone());

    for (index, (column, token)) in column_names.iter().zip(&type_tokens).enumerate() {
        let (column_type, declared_unit) = ColumnType::from_token(token);
        let cx = CellContext {
            origin: &origin,
            table: table.name(),
            column,
        };
        let raw_values = parse_column(column_type, index, &rows, &cx)?;

        let (values, unit) = policy
            .convert(raw_values, &declared_unit)
            .map_err(|e| Error::unit_policy(origin.clone(), table.name(), column, e))?;

        if values.column_type() != column_type {
            return Err(Error::unit_policy(
                origin.clone(),
                table.name(),
                column,
                format!(
                    "policy changed column type from {} to {}",
                    column_type,
                    values.column_type()
                ),
            ));
        }
        if values.len() != rows.len() {
            return Err(Error::unit_policy(
                origin.clone(),
                table.name(),
                column,
                format!(
                    "policy changed row count from {} to {}",
                    rows.len(),
                    values.len()
                ),
            ));
        }
        if unit != declared_unit {
            log::trace!(
                "column '{}' of '{}': unit '{}' -> '{}'",
                column,
                table.name(),
                declared_unit,
                unit
            );
        }

        table.push_column(ColumnMetadata::new(column.as_str(), column_type, unit), values)?;
    }

    Ok(table)
}
