//! Table block format reference.
//!
//! This module documents the block format as read and written by this crate.
//!
//! # Overview
//!
//! A table block is a small self-describing table embedded in delimited text,
//! typically a CSV export of a spreadsheet. A stream may hold any number of
//! blocks interleaved with unrelated lines; only the blocks are read.
//!
//! # Block Layout
//!
//! ```text
//! **<table name>
//! <destination>;<destination>...
//! <column name>;<column name>...
//! <type/unit token>;<type/unit token>...
//! <row>
//! <row>
//! <blank line>
//! ```
//!
//! **Rules**:
//! - The marker line starts with `**`. The table name is its first field.
//!   The name is trimmed in every mode, while strict mode keeps other fields
//!   verbatim. Names with surrounding whitespace are refused on write.
//!   Further fields on the marker line must be empty (`**farm;;;`).
//! - A table name cannot start with `*`: the marker line would read as a
//!   directive (see Directives).
//! - The destinations line lists tags naming the consumers of the table. Tags
//!   are split on the separator and on whitespace. An empty line means no tags.
//!   Tables built in code default to the single tag `all`.
//! - Column names are non-empty and unique within the block.
//! - The token line has exactly one token per column.
//! - Data rows have exactly one field per column.
//! - A blank line, the next `**` marker or the end of input ends the block.
//! - A trailing `\r` on any line is ignored.
//!
//! # Type/Unit Tokens
//!
//! | Token | Column type | Unit | Cell syntax |
//! |-------|-------------|------|-------------|
//! | `text` | text | `-` | any text, verbatim |
//! | `onoff` | boolean | `-` | `0` or `1` |
//! | `date` | date | `-` | `2020-05-17` |
//! | `datetime` | datetime | `-` | `2020-05-17 08:30:00`, `2020-05-17 08:30:00.250` |
//! | `int` | integer | `-` | decimal `i64` |
//! | `int:<unit>` | integer | `<unit>` | decimal `i64` |
//! | `-` | float | `-` (dimensionless) | decimal `f64` |
//! | any other token | float | the token | decimal `f64` |
//!
//! Datetime fractions are written only when non-zero, with 3, 6 or 9 digits.
//!
//! # Missing Values
//!
//! Only float columns can hold a missing value. An empty cell, `-` and `NaN`
//! (in any case) all read as missing. A missing value is written as an empty
//! field, except in a table with a single float column, where an empty field
//! would make a blank line and end the block early; there `NaN` is written.
//!
//! Integer and boolean cells that are empty or `-` are errors.
//!
//! # Number Formatting
//!
//! Floats are written with the shortest text that reads back to the same
//! value: `3000`, `0.1`, `-35000000000`. The original number text of a read
//! table is not preserved.
//!
//! # Separators
//!
//! The default separator is `;`. Any other character can be configured through
//! [`ParseOptions`](crate::ParseOptions) and [`WriteOptions`](crate::WriteOptions).
//! There is no quoting or escaping, so values containing the separator or a
//! line break cannot be written.
//!
//! # Directives
//!
//! A line starting with `***` opens a directive section. It ends any open block,
//! and it and its lines up to the next blank line or `**` marker are skipped.
//!
//! ```text
//! ***include
//! other_file.csv
//!
//! ```
//!
//! # Lenient Reading
//!
//! Spreadsheet exports pad every line to the widest row of the sheet and may
//! align cells with spaces. With [`ParseOptions::lenient`](crate::ParseOptions::lenient):
//!
//! - fields are trimmed
//! - empty fields beyond the column count are dropped
//! - a line made only of separators and whitespace counts as blank
//!
//! ```text
//! **farm_animals;;;
//! your_farm my_farm farms_galore;;;
//! species;  num;  flt;   log
//! text;     -;    kg;    onoff
//! chicken;  2;    3;     1
//! ;;;
//! ```
//!
//! # Limitations
//!
//! - **Quoting**: none; see Separators
//! - **Text cells**: a text cell starting with `**` in the first column, or a
//!   row whose cells are all empty, cannot be written
//! - **Schemas**: blocks are not validated against an external schema
//! - **Block size**: a block is held in memory whole; only the sequence of
//!   blocks is read lazily

// This module contains only documentation; no implementation code
