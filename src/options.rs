//! Configuration for reading and writing table blocks.
//!
//! - [`ParseOptions`]: separator, source name for diagnostics, lenient mode
//! - [`WriteOptions`]: separator
//!
//! The separator is always passed explicitly; there is no process-wide default
//! to mutate, so concurrent reads may use different separators.
//!
//! ## Examples
//!
//! ```rust
//! use pdtable::{ParseOptions, WriteOptions};
//!
//! // Comma-separated input exported from a spreadsheet
//! let options = ParseOptions::lenient()
//!     .with_separator(',')
//!     .with_source("farms.csv");
//! assert_eq!(options.separator, ',');
//! assert!(options.trim_fields);
//!
//! let options = WriteOptions::new().with_separator('\t');
//! assert_eq!(options.separator, '\t');
//! ```

use crate::metadata::TableOrigin;

/// Field separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = ';';

/// Options controlling how text is split into blocks and fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOptions {
    pub separator: char,
    /// Origin attached to every table read; the block's line is filled in per table.
    pub origin: TableOrigin,
    /// Strip whitespace around every field.
    pub trim_fields: bool,
    /// Tolerate trailing empty fields beyond the header's column count, and
    /// treat lines holding only separators as blank.
    pub allow_padding: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            separator: DEFAULT_SEPARATOR,
            origin: TableOrigin::default(),
            trim_fields: false,
            allow_padding: false,
        }
    }
}

impl ParseOptions {
    /// Creates strict options: `;` separator, fields kept verbatim, exact field counts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pdtable::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.separator, ';');
    /// assert!(!options.allow_padding);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options suited to spreadsheet exports, which pad rows with
    /// trailing separators and align columns with spaces.
    #[must_use]
    pub fn lenient() -> Self {
        ParseOptions {
            trim_fields: true,
            allow_padding: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Names the input in diagnostics, e.g. a file name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.origin.source = source.into();
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: TableOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, allow_padding: bool) -> Self {
        self.allow_padding = allow_padding;
        self
    }
}

/// Options controlling how tables are written.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteOptions {
    pub separator: char,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl WriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl From<&ParseOptions> for WriteOptions {
    fn from(options: &ParseOptions) -> Self {
        WriteOptions {
            separator: options.separator,
        }
    }
}
