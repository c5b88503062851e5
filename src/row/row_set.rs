//! Deduplicated row sets built from raw input lines.

use std::io::BufRead;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::row::Row;
use crate::row::parser::RowParser;
use crate::row::validator::LineValidator;

/// Counters collected while building a [`RowSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSetStats {
    /// Lines offered to the builder.
    pub lines_read: u64,

    /// Lines that matched the record pattern.
    pub accepted_lines: u64,

    /// Lines that did not match (including lines that are not UTF-8).
    pub rejected_lines: u64,

    /// Accepted lines whose row was already present.
    pub duplicate_rows: u64,
}

impl RowSetStats {
    /// Number of distinct rows kept.
    pub fn unique_rows(&self) -> u64 {
        self.accepted_lines - self.duplicate_rows
    }
}

/// What happened to a single line offered to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line was valid and its row is new.
    Inserted,
    /// The line was valid but an equal row already exists.
    Duplicate,
    /// The line did not match the record pattern.
    Rejected,
}

/// A set of distinct rows.
///
/// Rows are compared by content, including their length. Iteration order is
/// unspecified.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: AHashSet<Row>,
    stats: RowSetStats,
}

impl RowSet {
    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the set holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether an equal row is present.
    pub fn contains(&self, row: &Row) -> bool {
        self.rows.contains(row)
    }

    /// Iterate over the rows in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Counters gathered while the set was built.
    pub fn stats(&self) -> &RowSetStats {
        &self.stats
    }

    /// Consume the set, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows.into_iter().collect()
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut rows = AHashSet::new();
        let mut stats = RowSetStats::default();
        for row in iter {
            stats.lines_read += 1;
            stats.accepted_lines += 1;
            if !rows.insert(row) {
                stats.duplicate_rows += 1;
            }
        }
        RowSet { rows, stats }
    }
}

/// Validates, parses and deduplicates raw lines into a [`RowSet`].
#[derive(Debug, Clone)]
pub struct RowSetBuilder {
    validator: LineValidator,
    parser: RowParser,
    rows: AHashSet<Row>,
    stats: RowSetStats,
}

impl RowSetBuilder {
    /// Create a builder with the default record pattern.
    pub fn new() -> Result<Self> {
        Ok(Self::with_validator(LineValidator::new()?))
    }

    /// Create a builder with a specific validator.
    pub fn with_validator(validator: LineValidator) -> Self {
        RowSetBuilder {
            validator,
            parser: RowParser::new(),
            rows: AHashSet::new(),
            stats: RowSetStats::default(),
        }
    }

    /// Offer one line (without its terminator) to the builder.
    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        self.stats.lines_read += 1;

        if !self.validator.is_valid(line) {
            self.stats.rejected_lines += 1;
            return LineOutcome::Rejected;
        }
        self.stats.accepted_lines += 1;

        if self.rows.insert(self.parser.parse(line)) {
            LineOutcome::Inserted
        } else {
            self.stats.duplicate_rows += 1;
            LineOutcome::Duplicate
        }
    }

    /// Offer every line of a reader to the builder.
    ///
    /// A line ends at `\n`, `\r\n` or a lone `\r`. A line that is not
    /// valid UTF-8 cannot match the record pattern and is counted as
    /// rejected rather than failing the read.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            for line in split_lines(&buf) {
                self.push_bytes(line);
            }
        }
        Ok(())
    }

    fn push_bytes(&mut self, line: &[u8]) {
        match std::str::from_utf8(line) {
            Ok(line) => {
                self.push_line(line);
            }
            Err(_) => {
                self.stats.lines_read += 1;
                self.stats.rejected_lines += 1;
            }
        }
    }

    /// Counters gathered so far.
    pub fn stats(&self) -> &RowSetStats {
        &self.stats
    }

    /// Finish building.
    pub fn build(self) -> RowSet {
        RowSet {
            rows: self.rows,
            stats: self.stats,
        }
    }
}

/// Split a chunk ending at most at one `\n` into lines, treating `\r\n` and
/// any remaining `\r` as terminators.
fn split_lines(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
    chunk.split(|&b| b == b'\r')
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_duplicate_line_kept_once() {
        let mut builder = RowSetBuilder::new().unwrap();
        assert_eq!(builder.push_line(r#""1";"2""#), LineOutcome::Inserted);
        assert_eq!(builder.push_line(r#""1";"2""#), LineOutcome::Duplicate);

        let row_set = builder.build();
        assert_eq!(row_set.len(), 1);
        assert!(row_set.contains(&Row::from(["1", "2"])));
        assert_eq!(row_set.stats().duplicate_rows, 1);
        assert_eq!(row_set.stats().unique_rows(), 1);
    }

    #[test]
    fn test_rows_of_different_length_are_distinct() {
        let mut builder = RowSetBuilder::new().unwrap();
        builder.push_line(r#""1";"2""#);
        builder.push_line(r#""1";"2";"""#);
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn test_rejected_lines_are_counted() {
        let mut builder = RowSetBuilder::new().unwrap();
        assert_eq!(builder.push_line("1;22;333"), LineOutcome::Rejected);
        assert_eq!(builder.push_line(r#""1";;"3""#), LineOutcome::Rejected);
        assert_eq!(builder.push_line(r#""1";"3""#), LineOutcome::Inserted);

        let stats = *builder.stats();
        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.accepted_lines, 1);
        assert_eq!(stats.rejected_lines, 2);
    }

    #[test]
    fn test_read_from_handles_terminators_and_bad_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(b"\"1\";\"2\"\r\n");
        input.extend_from_slice(b"\"1\";\"3\"\n");
        input.extend_from_slice(b"\"\xff\"\n");
        input.extend_from_slice(b"\"4\"");

        let mut builder = RowSetBuilder::new().unwrap();
        builder.read_from(Cursor::new(input)).unwrap();
        let row_set = builder.build();

        assert_eq!(row_set.len(), 3);
        assert!(row_set.contains(&Row::from(["1", "2"])));
        assert!(row_set.contains(&Row::from(["4"])));
        assert_eq!(row_set.stats().lines_read, 4);
        assert_eq!(row_set.stats().rejected_lines, 1);
    }

    #[test]
    fn test_read_from_splits_on_bare_carriage_return() {
        let input = "\"1\";\"2\"\r\"1\";\"3\"\r\r\"5\"\n\"6\"\r";

        let mut builder = RowSetBuilder::new().unwrap();
        builder.read_from(Cursor::new(input)).unwrap();
        let row_set = builder.build();

        assert_eq!(row_set.len(), 4);
        assert!(row_set.contains(&Row::from(["1", "3"])));
        assert!(row_set.contains(&Row::from(["5"])));
        assert!(row_set.contains(&Row::from(["6"])));
        // The empty line between two `\r` is read and rejected.
        assert_eq!(row_set.stats().lines_read, 5);
        assert_eq!(row_set.stats().rejected_lines, 1);
    }

    #[test]
    fn test_from_iterator_deduplicates() {
        let row_set: RowSet = vec![Row::from(["1"]), Row::from(["1"]), Row::from(["2"])]
            .into_iter()
            .collect();
        assert_eq!(row_set.len(), 2);
        assert_eq!(row_set.stats().duplicate_rows, 1);
    }
}
