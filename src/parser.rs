//! Block recognition.
//!
//! [`BlockParser`] walks a sequence of lines and yields one [`RawBlock`] per
//! table block: name, destinations, column names, type/unit tokens and the raw
//! data fields. No cell is interpreted here; that is the resolver's job.
//!
//! ## States
//!
//! ```text
//! Seeking --**name--> HeaderDest --> HeaderColumns --> HeaderTypes --> DataRows
//!    ^                                                                    |
//!    +------------------------------ blank line --------------------------+
//! ```
//!
//! A `**name` line inside `DataRows` closes the current block and opens the
//! next one directly. A `***name` line opens a directive, whose lines are
//! skipped up to the next blank or marker line.
//!
//! ## Examples
//!
//! ```rust
//! use pdtable::parser::BlockParser;
//! use pdtable::ParseOptions;
//!
//! let input = "**a\nall\nx;y\n-;kg\n1;2\n**b\n\nz\ntext\nhello\n";
//! let options = ParseOptions::new();
//! let blocks: Vec<_> = BlockParser::new(input.lines(), &options)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].rows[0].fields, vec!["1", "2"]);
//! assert!(blocks[1].destinations.is_empty());
//! assert_eq!(blocks[1].origin.line, Some(6));
//! ```

use crate::error::{Error, Result};
use crate::metadata::TableOrigin;
use crate::options::ParseOptions;
use indexmap::IndexSet;
use std::collections::HashSet;

const TABLE_MARKER: &str = "**";
const DIRECTIVE_MARKER: &str = "***";

/// One data line of a block, split into fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input.
    pub line: usize,
    pub fields: Vec<String>,
}

/// A recognized block before any cell is interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlock {
    pub name: String,
    pub destinations: IndexSet<String>,
    pub column_names: Vec<String>,
    pub type_tokens: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Origin of the `**name` line.
    pub origin: TableOrigin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Seeking,
    Directive,
    HeaderDest,
    HeaderColumns,
    HeaderTypes,
    DataRows,
    Done,
}

impl State {
    /// Name of the line a header state is waiting for.
    fn expected_line(self) -> Option<&'static str> {
        match self {
            State::HeaderDest => Some("destinations"),
            State::HeaderColumns => Some("column names"),
            State::HeaderTypes => Some("type/unit"),
            _ => None,
        }
    }
}

/// Lazy block recognizer over a line source.
///
/// Structural errors end the iteration: after an `Err`, `next` returns `None`.
pub struct BlockParser<'o, I> {
    lines: I,
    options: &'o ParseOptions,
    state: State,
    line_no: usize,
    pending: Option<RawBlock>,
}

impl<'o, I, L> BlockParser<'o, I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
    pub fn new<T>(lines: T, options: &'o ParseOptions) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        BlockParser {
            lines: lines.into_iter(),
            options,
            state: State::Seeking,
            line_no: 0,
            pending: None,
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    fn origin(&self) -> TableOrigin {
        self.options.origin.at_line(self.line_no)
    }

    fn table_name(&self) -> &str {
        self.pending.as_ref().map_or("", |b| b.name.as_str())
    }

    fn fail(&mut self, err: Error) -> Option<Result<RawBlock>> {
        self.state = State::Done;
        self.pending = None;
        Some(Err(err))
    }

    fn is_blank(&self, line: &str) -> bool {
        if self.options.allow_padding {
            line.chars()
                .all(|c| c == self.options.separator || c.is_whitespace())
        } else {
            line.trim().is_empty()
        }
    }

    fn split(&self, line: &str) -> Vec<String> {
        line.split(self.options.separator)
            .map(|f| {
                if self.options.trim_fields {
                    f.trim().to_string()
                } else {
                    f.to_string()
                }
            })
            .collect()
    }

    /// Splits a line that must hold exactly `expected` fields.
    fn split_exact(&self, line: &str, expected: usize) -> Result<Vec<String>> {
        let mut fields = self.split(line);
        if self.options.allow_padding {
            while fields.len() > expected && fields.last().map_or(false, |f| f.trim().is_empty()) {
                fields.pop();
            }
        }
        if fields.len() != expected {
            return Err(Error::field_count(
                self.origin(),
                self.table_name(),
                expected,
                fields.len(),
            ));
        }
        Ok(fields)
    }

    /// Opens a block from the text following `**`.
    fn open_block(&mut self, marker_rest: &str) -> Result<()> {
        let mut fields = marker_rest.split(self.options.separator);
        let name = fields.next().unwrap_or("").trim().to_string();
        if name.is_empty() {
            return Err(Error::malformed(self.origin(), "", "missing table name"));
        }
        if fields.any(|f| !f.trim().is_empty()) {
            return Err(Error::malformed(
                self.origin(),
                &name,
                "unexpected fields after table name",
            ));
        }
        log::trace!("block '{}' opens at line {}", name, self.line_no);
        self.pending = Some(RawBlock {
            name,
            destinations: IndexSet::new(),
            column_names: Vec::new(),
            type_tokens: Vec::new(),
            rows: Vec::new(),
            origin: self.origin(),
        });
        self.state = State::HeaderDest;
        Ok(())
    }

    fn read_destinations(&mut self, line: &str) {
        let destinations: IndexSet<String> = line
            .split(self.options.separator)
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect();
        if let Some(block) = self.pending.as_mut() {
            block.destinations = destinations;
        }
        self.state = State::HeaderColumns;
    }

    fn read_column_names(&mut self, line: &str) -> Result<()> {
        let mut names = self.split(line);
        if self.options.allow_padding {
            while names.len() > 1 && names.last().map_or(false, |f| f.trim().is_empty()) {
                names.pop();
            }
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() {
                return Err(Error::malformed(
                    self.origin(),
                    self.table_name(),
                    "empty column name",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::duplicate_column(
                    self.origin(),
                    self.table_name(),
                    name,
                ));
            }
        }
        if let Some(block) = self.pending.as_mut() {
            block.column_names = names;
        }
        self.state = State::HeaderTypes;
        Ok(())
    }

    fn read_type_tokens(&mut self, line: &str) -> Result<()> {
        let expected = self.pending.as_ref().map_or(0, |b| b.column_names.len());
        let tokens = self.split_exact(line, expected)?;
        if let Some(block) = self.pending.as_mut() {
            block.type_tokens = tokens;
        }
        self.state = State::DataRows;
        Ok(())
    }

    fn read_row(&mut self, line: &str) -> Result<()> {
        let expected = self.pending.as_ref().map_or(0, |b| b.column_names.len());
        let fields = self.split_exact(line, expected)?;
        let row = RawRow {
            line: self.line_no,
            fields,
        };
        if let Some(block) = self.pending.as_mut() {
            block.rows.push(row);
        }
        Ok(())
    }

    /// Takes the finished block, if any.
    fn emit(&mut self) -> Option<RawBlock> {
        let block = self.pending.take()?;
        log::debug!(
            "parsed block '{}' ({} columns, {} rows) at {}",
            block.name,
            block.column_names.len(),
            block.rows.len(),
            block.origin
        );
        Some(block)
    }

    fn finish(&mut self) -> Option<Result<RawBlock>> {
        if let Some(expected) = self.state.expected_line() {
            let err = Error::truncated(self.origin(), self.table_name(), expected);
            return self.fail(err);
        }
        self.state = State::Done;
        self.emit().map(Ok)
    }
}

impl<'o, I, L> Iterator for BlockParser<'o, I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
    type Item = Result<RawBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }

        loop {
            let Some(raw) = self.lines.next() else {
                return self.finish();
            };
            self.line_no += 1;
            let line = raw.as_ref();
            let line = line.strip_suffix('\r').unwrap_or(line);

            let step = match self.state {
                State::Done => return None,
                State::HeaderDest => {
                    self.read_destinations(line);
                    Ok(None)
                }
                State::HeaderColumns => self.read_column_names(line).map(|_| None),
                State::HeaderTypes => self.read_type_tokens(line).map(|_| None),
                State::Seeking | State::Directive | State::DataRows => {
                    if line.starts_with(DIRECTIVE_MARKER) {
                        log::debug!("skipping directive at {}", self.origin());
                        let done = self.emit();
                        self.state = State::Directive;
                        Ok(done)
                    } else if let Some(rest) = line.strip_prefix(TABLE_MARKER) {
                        let done = self.emit();
                        self.open_block(rest).map(|_| done)
                    } else if self.is_blank(line) {
                        self.state = State::Seeking;
                        Ok(self.emit())
                    } else if self.state == State::DataRows {
                        self.read_row(line).map(|_| None)
                    } else {
                        Ok(None)
                    }
                }
            };

            match step {
                Ok(Some(block)) => return Some(Ok(block)),
                Ok(None) => continue,
                Err(err) => return self.fail(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Result<RawBlock>> {
        let options = ParseOptions::new();
        BlockParser::new(input.lines(), &options).collect()
    }

    fn parse_ok(input: &str) -> Vec<RawBlock> {
        parse(input).into_iter().map(|b| b.unwrap()).collect()
    }

    #[test]
    fn test_single_block() {
        let blocks = parse_ok("**farm\nyour_farm;my_farm\nspecies;num\ntext;-\nchicken;2\ncow;NaN\n");
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.name, "farm");
        assert_eq!(
            block.destinations.iter().collect::<Vec<_>>(),
            vec!["your_farm", "my_farm"]
        );
        assert_eq!(block.column_names, vec!["species", "num"]);
        assert_eq!(block.type_tokens, vec!["text", "-"]);
        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[1].line, 6);
        assert_eq!(block.rows[1].fields, vec!["cow", "NaN"]);
    }

    #[test]
    fn test_text_outside_blocks_is_skipped() {
        let blocks = parse_ok("comment line\n\n\n**t\nall\na\n-\n1\n\n\nmore comments\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows.len(), 1);
    }

    #[test]
    fn test_consecutive_blocks_without_blank_line() {
        let blocks = parse_ok("**a\nall\nx\n-\n1\n**b\nall\ny\n-\n2\n3\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].name, "b");
        assert_eq!(blocks[1].rows.len(), 2);
    }

    #[test]
    fn test_block_without_rows() {
        let blocks = parse_ok("**empty\nall\nx;y\n-;-\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].rows.is_empty());
    }

    #[test]
    fn test_blank_destinations_line() {
        let blocks = parse_ok("**t\n\nx\n-\n1\n");
        assert!(blocks[0].destinations.is_empty());
        assert_eq!(blocks[0].column_names, vec!["x"]);
    }

    #[test]
    fn test_whitespace_separated_destinations() {
        let blocks = parse_ok("**t\nyour_farm my_farm farms_galore\nx\n-\n");
        assert_eq!(blocks[0].destinations.len(), 3);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let results = parse("**t\nall\nx;y\n-;-\n1;2\n3\n");
        match &results[0] {
            Err(Error::MalformedBlock { origin, table, msg }) => {
                assert_eq!(origin.line, Some(6));
                assert_eq!(table, "t");
                assert!(msg.contains("expected 2 fields, found 1"));
            }
            other => panic!("expected MalformedBlock, got {:?}", other),
        }
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_long_row_is_malformed() {
        let results = parse("**t\nall\nx;y\n-;-\n1;2;3\n");
        assert!(matches!(results[0], Err(Error::MalformedBlock { .. })));
    }

    #[test]
    fn test_type_line_count_mismatch() {
        let results = parse("**t\nall\nx;y\n-\n");
        assert!(matches!(results[0], Err(Error::MalformedBlock { .. })));
    }

    #[test]
    fn test_duplicate_column_names() {
        let results = parse("**t\nall\nx;x\n-;-\n");
        match &results[0] {
            Err(Error::DuplicateColumnName { column, .. }) => assert_eq!(column, "x"),
            other => panic!("expected DuplicateColumnName, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_header() {
        for input in ["**t\n", "**t\nall\n", "**t\nall\nx;y\n"] {
            let results = parse(input);
            assert!(
                matches!(results.last(), Some(Err(Error::TruncatedBlock { .. }))),
                "input {:?} gave {:?}",
                input,
                results
            );
        }
    }

    #[test]
    fn test_marker_name_is_trimmed_in_strict_mode() {
        let blocks = parse_ok("**  t  \nall\n x \n-\n1\n");
        assert_eq!(blocks[0].name, "t");
        assert_eq!(blocks[0].column_names, vec![" x "]);
    }

    #[test]
    fn test_empty_table_name() {
        let results = parse("**\nall\nx\n-\n");
        assert!(matches!(results[0], Err(Error::MalformedBlock { .. })));
    }

    #[test]
    fn test_errors_fuse_the_parser() {
        let options = ParseOptions::new();
        let mut parser = BlockParser::new("**t\nall\nx;y\n-\n**u\nall\nz\n-\n".lines(), &options);
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_directives_are_skipped() {
        let blocks = parse_ok("***include\nother.csv\n**t\nall\nx\n-\n1\n***note\nhello\n\n**u\nall\ny\n-\n");
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["t", "u"]);
        assert_eq!(blocks[0].rows.len(), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let blocks = parse_ok("**t\r\nall\r\nx\r\n-\r\n1\r\n");
        assert_eq!(blocks[0].name, "t");
        assert_eq!(blocks[0].rows[0].fields, vec!["1"]);
    }

    #[test]
    fn test_padded_spreadsheet_export() {
        let options = ParseOptions::lenient();
        let input = "**farm;;;\nyour_farm my_farm;;;\nspecies;  num;  flt;\ntext;   -;  kg;\nchicken;  2;  3;\n;;;\n";
        let blocks: Vec<_> = BlockParser::new(input.lines(), &options)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].column_names, vec!["species", "num", "flt"]);
        assert_eq!(blocks[0].rows[0].fields, vec!["chicken", "2", "3"]);
    }

    #[test]
    fn test_strict_mode_counts_trailing_separators() {
        let results = parse("**t\nall\nx;y\n-;-\n1;2;\n");
        assert!(matches!(results[0], Err(Error::MalformedBlock { .. })));
    }

    #[test]
    fn test_custom_separator() {
        let options = ParseOptions::new().with_separator(',');
        let blocks: Vec<_> = BlockParser::new(["**t", "all", "a,b", "text,kg", "x,1"], &options)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(blocks[0].type_tokens, vec!["text", "kg"]);
    }
}
