//! Configuration for a grouping run.
//!
//! There is no configuration file; the constants below are the defaults and
//! [`GroupingConfig`] carries any overrides into the engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pattern a raw line must match in full to be accepted as a record.
pub const DEFAULT_LINE_PATTERN: &str = r#"^"[0-9]*"(;"[0-9]*")*$"#;

/// Output artifact written when no other path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Separator between fields, both in the input and in the written output.
pub const FIELD_DELIMITER: char = ';';

/// Quote character stripped from every accepted line.
pub const QUOTE: char = '"';

/// Components smaller than this are dropped instead of emitted as groups.
pub const MIN_GROUP_SIZE: usize = 2;

/// Decides which rows may be compared with each other.
///
/// # Policies
///
/// - **SameLength** (default): rows are bucketed by field count and only
///   rows of equal length can ever be linked.
/// - **AnyLength**: every row lives in one bucket. Two rows are linked when
///   they hold the same non-empty value at a position both of them have,
///   regardless of their lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonPolicy {
    /// Only rows with the same number of fields are compared.
    #[default]
    SameLength,
    /// Rows of different lengths are compared over their common positions.
    AnyLength,
}

impl ComparisonPolicy {
    /// Get a human-readable name for the policy.
    pub fn name(&self) -> &str {
        match self {
            ComparisonPolicy::SameLength => "same-length",
            ComparisonPolicy::AnyLength => "any-length",
        }
    }
}

/// Settings for one grouping run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Which rows are allowed to be linked.
    pub policy: ComparisonPolicy,

    /// Regular expression a line must match to be accepted.
    pub line_pattern: String,

    /// Where the ordered groups are written.
    pub output_path: PathBuf,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        GroupingConfig {
            policy: ComparisonPolicy::default(),
            line_pattern: DEFAULT_LINE_PATTERN.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl GroupingConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison policy.
    pub fn with_policy(mut self, policy: ComparisonPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the line validation pattern.
    pub fn with_line_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.line_pattern = pattern.into();
        self
    }

    /// Set the output artifact path.
    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = path.into();
        self
    }
}
