//! Row values parsed from accepted input lines.
//!
//! A [`Row`] is a fixed-length, position-significant sequence of field
//! strings. Field `i` of one row is only ever compared with field `i` of
//! another row. Rows compare and hash by content, so they can be stored in
//! hash sets and used as map keys directly.
//!
//! # Components
//!
//! - [`validator::LineValidator`] - accepts or rejects raw lines
//! - [`parser::RowParser`] - turns an accepted line into a [`Row`]
//! - [`row_set::RowSetBuilder`] - validates, parses and deduplicates lines
//!
//! # Examples
//!
//! ```
//! use rowgroup::row::row_set::RowSetBuilder;
//!
//! let mut builder = RowSetBuilder::new().unwrap();
//! builder.push_line(r#""1";"2""#);
//! builder.push_line(r#""1";"2""#);
//! builder.push_line("not a record");
//!
//! let row_set = builder.build();
//! assert_eq!(row_set.len(), 1);
//! assert_eq!(row_set.stats().rejected_lines, 1);
//! assert_eq!(row_set.stats().duplicate_rows, 1);
//! ```

pub mod parser;
pub mod row_set;
pub mod validator;

use std::fmt;

use crate::config::FIELD_DELIMITER;

/// An ordered sequence of field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Create a row from its fields.
    pub fn new(fields: Vec<String>) -> Self {
        Row { fields }
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the field at a column position.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.fields.get(position).map(String::as_str)
    }

    /// All fields in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Iterate over `(position, value)` for every non-empty field.
    ///
    /// Empty fields never link two rows, so this is the only view the
    /// column index and the group finder need.
    pub fn non_empty_fields(&self) -> impl Iterator<Item = (usize, &str)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_empty())
            .map(|(position, value)| (position, value.as_str()))
    }

    /// Check whether at least one field is non-empty.
    pub fn has_values(&self) -> bool {
        self.fields.iter().any(|value| !value.is_empty())
    }

    /// Check whether two rows share a non-empty value at a common position.
    pub fn is_linked_to(&self, other: &Row) -> bool {
        self.fields
            .iter()
            .zip(other.fields.iter())
            .any(|(a, b)| !a.is_empty() && a == b)
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Row::new(fields)
    }
}

impl From<&[&str]> for Row {
    fn from(fields: &[&str]) -> Self {
        Row::new(fields.iter().map(|field| field.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Row {
    fn from(fields: [&str; N]) -> Self {
        Row::from(&fields[..])
    }
}

impl fmt::Display for Row {
    /// Fields joined by the delimiter, without quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{FIELD_DELIMITER}")?;
            }
            f.write_str(field)?;
        }
        Ok(())
    }
}
