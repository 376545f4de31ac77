//! JSON-friendly rendering of tables through `serde`.
//!
//! A table serializes as
//!
//! ```text
//! {
//!   "name": "farm",
//!   "destinations": ["your_farm"],
//!   "origin": {"source": "farm.csv", "sheet": null, "line": 1},
//!   "columns": {
//!     "flt": {"type": "float", "unit": "kg", "values": [3.0, null]}
//!   }
//! }
//! ```
//!
//! Missing floats become `null`; dates and datetimes become strings in the
//! block format.

use crate::table::{Column, Table};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

struct Columns<'a>(&'a Table);

impl Serialize for Column<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Column", 3)?;
        state.serialize_field("type", &self.column_type())?;
        state.serialize_field("unit", self.unit())?;
        state.serialize_field("values", self.values)?;
        state.end()
    }
}

impl Serialize for Columns<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.column_count()))?;
        for column in self.0.columns() {
            map.serialize_entry(column.name(), &column)?;
        }
        map.end()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Table", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("destinations", self.destinations())?;
        state.serialize_field("origin", self.origin())?;
        state.serialize_field("columns", &Columns(self))?;
        state.end()
    }
}
