//! Typed column values.
//!
//! This module provides [`ColumnValues`], the owned value sequence of one column,
//! and [`Value`], a borrowed view of a single cell.
//!
//! ## Missing values
//!
//! Float columns store `Option<f64>`: `None` is the "missing" sentinel read from an
//! empty field, `NaN` or `-`, and written back as an empty field. Converting a
//! `Vec<f64>` maps `NaN` to `None`, so the sentinel never leaks into arithmetic.
//!
//! ```rust
//! use pdtable::{ColumnType, ColumnValues};
//!
//! let values = ColumnValues::from(vec![1.5, f64::NAN, 3.0]);
//! assert_eq!(values.column_type(), ColumnType::Float);
//! assert_eq!(values.as_floats(), Some(&[Some(1.5), None, Some(3.0)][..]));
//! assert_eq!(values.missing_count(), 1);
//! ```

use crate::metadata::{ColumnType, DATETIME_FORMAT, DATE_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;

/// The owned, typed value sequence of one column.
///
/// The variant fixes the column's [`ColumnType`].
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<bool>),
    Date(Vec<NaiveDate>),
    DateTime(Vec<NaiveDateTime>),
}

impl ColumnValues {
    /// Creates an empty sequence for the given type with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(column_type: ColumnType, capacity: usize) -> Self {
        match column_type {
            ColumnType::Text => ColumnValues::Text(Vec::with_capacity(capacity)),
            ColumnType::Integer => ColumnValues::Integer(Vec::with_capacity(capacity)),
            ColumnType::Float => ColumnValues::Float(Vec::with_capacity(capacity)),
            ColumnType::Boolean => ColumnValues::Boolean(Vec::with_capacity(capacity)),
            ColumnType::Date => ColumnValues::Date(Vec::with_capacity(capacity)),
            ColumnType::DateTime => ColumnValues::DateTime(Vec::with_capacity(capacity)),
        }
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Text(_) => ColumnType::Text,
            ColumnValues::Integer(_) => ColumnType::Integer,
            ColumnValues::Float(_) => ColumnType::Float,
            ColumnValues::Boolean(_) => ColumnType::Boolean,
            ColumnValues::Date(_) => ColumnType::Date,
            ColumnValues::DateTime(_) => ColumnType::DateTime,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Date(v) => v.len(),
            ColumnValues::DateTime(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at `row`, or `None` when out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdtable::{ColumnValues, Value};
    ///
    /// let values = ColumnValues::from(vec![true, false]);
    /// assert_eq!(values.get(1), Some(Value::Boolean(false)));
    /// assert_eq!(values.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, row: usize) -> Option<Value<'_>> {
        match self {
            ColumnValues::Text(v) => v.get(row).map(|s| Value::Text(s.as_str())),
            ColumnValues::Integer(v) => v.get(row).copied().map(Value::Integer),
            ColumnValues::Float(v) => v.get(row).copied().map(Value::Float),
            ColumnValues::Boolean(v) => v.get(row).copied().map(Value::Boolean),
            ColumnValues::Date(v) => v.get(row).copied().map(Value::Date),
            ColumnValues::DateTime(v) => v.get(row).copied().map(Value::DateTime),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value<'_>> + '_ {
        (0..self.len()).filter_map(move |row| self.get(row))
    }

    /// Number of missing float cells. Always zero for other types.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnValues::Float(v) => v.iter().filter(|x| x.is_none()).count(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            ColumnValues::Integer(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_floats(&self) -> Option<&[Option<f64>]> {
        match self {
            ColumnValues::Float(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_booleans(&self) -> Option<&[bool]> {
        match self {
            ColumnValues::Boolean(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dates(&self) -> Option<&[NaiveDate]> {
        match self {
            ColumnValues::Date(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetimes(&self) -> Option<&[NaiveDateTime]> {
        match self {
            ColumnValues::DateTime(v) => Some(v),
            _ => None,
        }
    }

    /// Applies `f` to every present value of a float column, leaving missing cells
    /// untouched. A `NaN` result becomes missing. Other column types are returned
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdtable::ColumnValues;
    ///
    /// let grams = ColumnValues::from(vec![Some(3.0), None]).map_floats(|kg| kg * 1000.0);
    /// assert_eq!(grams.as_floats(), Some(&[Some(3000.0), None][..]));
    /// ```
    #[must_use]
    pub fn map_floats(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            ColumnValues::Float(v) => ColumnValues::Float(
                v.into_iter()
                    .map(|x| x.map(&f).filter(|x| !x.is_nan()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Replaces `Some(NaN)` in a float column with `None`.
    pub(crate) fn normalize_missing(&mut self) {
        if let ColumnValues::Float(v) = self {
            for x in v.iter_mut().filter(|x| x.map_or(false, f64::is_nan)) {
                *x = None;
            }
        }
    }
}

/// A borrowed view of one cell.
///
/// `Display` renders the cell exactly as it is written in a block, with a missing
/// float rendered as the empty string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
    Float(Option<f64>),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> Value<'a> {
    /// Returns `true` for a missing float cell.
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Float(x) => x.map_or(true, f64::is_nan),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float of a present float cell, or the integer as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => x.filter(|x| !x.is_nan()),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(Some(x)) if !x.is_nan() => write!(f, "{}", x),
            Value::Float(_) => Ok(()),
            Value::Boolean(b) => f.write_str(if *b { "1" } else { "0" }),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(Some(x)) if !x.is_nan() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Date(_) | Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl Serialize for ColumnValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl From<Vec<String>> for ColumnValues {
    fn from(values: Vec<String>) -> Self {
        ColumnValues::Text(values)
    }
}

impl From<Vec<&str>> for ColumnValues {
    fn from(values: Vec<&str>) -> Self {
        ColumnValues::Text(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for ColumnValues {
    fn from(values: Vec<i64>) -> Self {
        ColumnValues::Integer(values)
    }
}

impl From<Vec<i32>> for ColumnValues {
    fn from(values: Vec<i32>) -> Self {
        ColumnValues::Integer(values.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for ColumnValues {
    fn from(values: Vec<f64>) -> Self {
        ColumnValues::Float(
            values
                .into_iter()
                .map(|x| if x.is_nan() { None } else { Some(x) })
                .collect(),
        )
    }
}

impl From<Vec<Option<f64>>> for ColumnValues {
    fn from(values: Vec<Option<f64>>) -> Self {
        ColumnValues::Float(
            values
                .into_iter()
                .map(|x| x.filter(|x| !x.is_nan()))
                .collect(),
        )
    }
}

impl From<Vec<bool>> for ColumnValues {
    fn from(values: Vec<bool>) -> Self {
        ColumnValues::Boolean(values)
    }
}

impl From<Vec<NaiveDate>> for ColumnValues {
    fn from(values: Vec<NaiveDate>) -> Self {
        ColumnValues::Date(values)
    }
}

impl From<Vec<NaiveDateTime>> for ColumnValues {
    fn from(values: Vec<NaiveDateTime>) -> Self {
        ColumnValues::DateTime(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(Value::Float(Some(3000.0)).to_string(), "3000");
        assert_eq!(Value::Float(Some(0.25)).to_string(), "0.25");
        assert_eq!(Value::Float(None).to_string(), "");
        assert_eq!(Value::Boolean(true).to_string(), "1");
        assert_eq!(Value::Integer(-7).to_string(), "-7");

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-01-15");
        let dt = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2024-01-15 10:30:00");
    }

    #[test]
    fn test_nan_becomes_missing() {
        let values = ColumnValues::from(vec![Some(f64::NAN), Some(1.0)]);
        assert_eq!(values.as_floats(), Some(&[None, Some(1.0)][..]));
        assert!(values.get(0).unwrap().is_missing());
    }

    #[test]
    fn test_column_type_follows_variant() {
        assert_eq!(ColumnValues::from(vec!["a"]).column_type(), ColumnType::Text);
        assert_eq!(ColumnValues::from(vec![1i32]).column_type(), ColumnType::Integer);
        assert_eq!(
            ColumnValues::with_capacity(ColumnType::DateTime, 4).column_type(),
            ColumnType::DateTime
        );
    }

    #[test]
    fn test_map_floats_skips_other_types() {
        let text = ColumnValues::from(vec!["kg"]);
        assert_eq!(text.clone().map_floats(|x| x * 2.0), text);
    }

    #[test]
    fn test_map_floats_turns_nan_into_missing() {
        let values = ColumnValues::from(vec![Some(2.0), None]).map_floats(|x| x * f64::NAN);
        assert_eq!(values.as_floats(), Some(&[None, None][..]));

        let values = ColumnValues::from(vec![f64::INFINITY]).map_floats(|x| x * 0.0);
        assert_eq!(values.as_floats(), Some(&[None][..]));
    }

    #[test]
    fn test_normalize_missing() {
        let mut values = ColumnValues::Float(vec![Some(f64::NAN), Some(1.0), None]);
        values.normalize_missing();
        assert_eq!(values, ColumnValues::Float(vec![None, Some(1.0), None]));
    }

    #[test]
    fn test_iter_yields_every_row() {
        let values = ColumnValues::from(vec![1i64, 2, 3]);
        let collected: Vec<i64> = values.iter().filter_map(|v| v.as_i64()).collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}
