//! Conversion of accepted lines into rows.

use crate::config::{FIELD_DELIMITER, QUOTE};
use crate::row::Row;

/// Parses accepted lines into [`Row`] values.
///
/// Every quote character is removed and the remainder is split on the
/// field delimiter. Empty segments are kept, so the field count is always
/// one more than the number of delimiters.
#[derive(Debug, Clone, Copy)]
pub struct RowParser {
    delimiter: char,
    quote: char,
}

impl Default for RowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RowParser {
    /// Create a parser for `;`-separated, `"`-quoted records.
    pub fn new() -> Self {
        RowParser {
            delimiter: FIELD_DELIMITER,
            quote: QUOTE,
        }
    }

    /// Parse a line into a row.
    pub fn parse(&self, line: &str) -> Row {
        let fields = line
            .split(self.delimiter)
            .map(|segment| segment.chars().filter(|&c| c != self.quote).collect())
            .collect();
        Row::new(fields)
    }
}
