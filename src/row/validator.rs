//! Line validation against the record pattern.

use regex::Regex;

use crate::config::DEFAULT_LINE_PATTERN;
use crate::error::{Result, RowGroupError};

/// Accepts or rejects raw text lines.
///
/// A line is accepted only if the whole line matches the pattern. The
/// default pattern is a quoted run of digits followed by any number of
/// `;`-separated quoted runs of digits, with nothing before or after.
#[derive(Debug, Clone)]
pub struct LineValidator {
    pattern: Regex,
}

impl LineValidator {
    /// Create a validator using the default record pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_LINE_PATTERN)
    }

    /// Create a validator using a custom pattern.
    ///
    /// The pattern is wrapped in anchors, so it always has to match the
    /// full line.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let anchored = anchor(pattern);
        let pattern = Regex::new(&anchored).map_err(|e| {
            RowGroupError::pattern(format!("Invalid line pattern '{pattern}': {e}"))
        })?;
        Ok(LineValidator { pattern })
    }

    /// Check whether a line is a valid record.
    pub fn is_valid(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// The compiled (anchored) pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

fn anchor(pattern: &str) -> String {
    format!("^(?:{pattern})$")
}
