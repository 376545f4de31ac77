//! Lazy reading of tables from a line source.
//!
//! [`TableReader`] chains the [`BlockParser`] and the resolver: every call to
//! `next` recognizes one more block and resolves it with the borrowed
//! [`UnitPolicy`].
//!
//! A structural error (bad field count, truncated header, duplicate column) ends
//! the iteration. A cell or unit error only fails the block it occurs in; the
//! following blocks can still be read by calling `next` again.

use crate::error::Result;
use crate::options::ParseOptions;
use crate::parser::BlockParser;
use crate::resolver::resolve;
use crate::table::Table;
use crate::unit::UnitPolicy;

/// Iterator over the tables of a line source.
///
/// # Examples
///
/// ```rust
/// use pdtable::{read_tables, ParseOptions, ScalingPolicy};
///
/// let input = "**masses\nall\nanimal;mass\ntext;kg\ngoose;9\n";
/// let options = ParseOptions::new();
/// let mut policy = ScalingPolicy::new().with_rule("kg", "g", 1000.0);
///
/// let tables: Vec<_> = read_tables(input.lines(), &options, &mut policy)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// let mass = tables[0].column("mass").unwrap();
/// assert_eq!(mass.unit(), "g");
/// assert_eq!(mass.get(0).and_then(|v| v.as_f64()), Some(9000.0));
/// ```
pub struct TableReader<'o, 'p, I, P: ?Sized> {
    blocks: BlockParser<'o, I>,
    policy: &'p mut P,
}

impl<'o, 'p, I, L, P> TableReader<'o, 'p, I, P>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
    P: UnitPolicy + ?Sized,
{
    pub fn new<T>(lines: T, options: &'o ParseOptions, policy: &'p mut P) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        TableReader {
            blocks: BlockParser::new(lines, options),
            policy,
        }
    }

    /// Number of input lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.blocks.line_number()
    }
}

impl<'o, 'p, I, L, P> Iterator for TableReader<'o, 'p, I, P>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
    P: UnitPolicy + ?Sized,
{
    type Item = Result<Table>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = match self.blocks.next()? {
            Ok(block) => block,
            Err(err) => return Some(Err(err)),
        };
        Some(resolve(block, &mut *self.policy))
    }
}

/// Reads tables lazily from `lines`, converting units with `policy`.
pub fn read_tables<'o, 'p, T, L, P>(
    lines: T,
    options: &'o ParseOptions,
    policy: &'p mut P,
) -> TableReader<'o, 'p, T::IntoIter, P>
where
    T: IntoIterator<Item = L>,
    L: AsRef<str>,
    P: UnitPolicy + ?Sized,
{
    TableReader::new(lines, options, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::unit::IdentityPolicy;

    #[test]
    fn test_cell_error_does_not_stop_reading() {
        let input = "**bad\nall\nflag\nonoff\nyes\n\n**good\nall\nflag\nonoff\n1\n";
        let options = ParseOptions::new();
        let results: Vec<_> = read_tables(input.lines(), &options, &mut IdentityPolicy).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(Error::InvalidBooleanValue { .. })));
        assert_eq!(results[1].as_ref().unwrap().name(), "good");
    }

    #[test]
    fn test_structural_error_stops_reading() {
        let input = "**bad\nall\na;b\n-;-\n1\n\n**good\nall\nx\n-\n1\n";
        let options = ParseOptions::new();
        let results: Vec<_> = read_tables(input.lines(), &options, &mut IdentityPolicy).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap_err().is_structural());
    }

    #[test]
    fn test_origin_carries_source_and_line() {
        let input = "\n\n**t\nall\nx\n-\n1\n";
        let options = ParseOptions::new().with_source("farm.csv");
        let table = read_tables(input.lines(), &options, &mut IdentityPolicy)
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(table.origin().to_string(), "farm.csv:3");
    }

    #[test]
    fn test_dyn_policy() {
        let options = ParseOptions::new();
        let policy: &mut dyn UnitPolicy = &mut IdentityPolicy;
        let count = read_tables("**t\nall\nx\n-\n1\n".lines(), &options, policy).count();
        assert_eq!(count, 1);
    }
}
