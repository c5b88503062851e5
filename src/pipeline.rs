//! End-to-end grouping runs.
//!
//! [`GroupingEngine`] wires the stages together: raw lines are validated,
//! parsed and deduplicated into a row set, indexed by column value, split
//! into connected groups, ordered, and finally written out.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ComparisonPolicy, GroupingConfig};
use crate::error::{Result, RowGroupError};
use crate::grouping::column_index::{ColumnIndex, ColumnIndexStats};
use crate::grouping::group::Group;
use crate::grouping::group_rows;
use crate::output::GroupWriter;
use crate::row::row_set::{RowSet, RowSetBuilder, RowSetStats};
use crate::row::validator::LineValidator;

/// Groups produced from one input, in output order.
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    /// Groups, largest first.
    pub groups: Vec<Group>,

    /// Counters from building the row set.
    pub row_stats: RowSetStats,

    /// Counters from building the column index.
    pub index_stats: ColumnIndexStats,
}

impl GroupingOutcome {
    /// Number of rows that ended up in some group.
    pub fn grouped_rows(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Summary of a completed file run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Input file that was read.
    pub input: PathBuf,

    /// Output file that was written.
    pub output: PathBuf,

    /// Comparison policy in effect.
    pub policy: ComparisonPolicy,

    /// When processing started.
    pub started_at: DateTime<Utc>,

    /// Wall-clock time from reading to the committed output.
    pub elapsed_ms: u64,

    /// Counters from building the row set.
    pub rows: RowSetStats,

    /// Distinct rows kept after deduplication.
    pub unique_rows: u64,

    /// Number of groups written.
    pub group_count: usize,

    /// Rows that ended up in some group.
    pub grouped_rows: usize,
}

/// Runs the full grouping pipeline with a fixed configuration.
#[derive(Debug, Clone)]
pub struct GroupingEngine {
    config: GroupingConfig,
    validator: LineValidator,
}

impl GroupingEngine {
    /// Create an engine, compiling the configured line pattern.
    pub fn new(config: GroupingConfig) -> Result<Self> {
        let validator = LineValidator::with_pattern(&config.line_pattern)?;
        Ok(GroupingEngine { config, validator })
    }

    /// The configuration in use.
    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    /// Read every line of `reader` into a deduplicated row set.
    pub fn read_rows<R: BufRead>(&self, reader: R) -> Result<RowSet> {
        let mut builder = RowSetBuilder::with_validator(self.validator.clone());
        builder.read_from(reader)?;
        let row_set = builder.build();
        log_row_stats(row_set.stats());
        Ok(row_set)
    }

    /// Index, group and order an already built row set.
    pub fn group_row_set(&self, row_set: RowSet) -> GroupingOutcome {
        let row_stats = *row_set.stats();
        let index = ColumnIndex::build(row_set, self.config.policy);
        let index_stats = index.stats();
        let groups = group_rows(&index);

        GroupingOutcome {
            groups,
            row_stats,
            index_stats,
        }
    }

    /// Group raw lines held in memory.
    pub fn group_lines<I, S>(&self, lines: I) -> GroupingOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = RowSetBuilder::with_validator(self.validator.clone());
        for line in lines {
            builder.push_line(line.as_ref());
        }
        let row_set = builder.build();
        log_row_stats(row_set.stats());
        self.group_row_set(row_set)
    }

    /// Group the lines of `input` and write the result to the configured
    /// output path.
    ///
    /// Fails before reading anything if `input` is not an existing file.
    /// The output file is only replaced once all groups have been written.
    pub fn run(&self, input: &Path) -> Result<RunSummary> {
        if !input.is_file() {
            return Err(RowGroupError::not_found(input));
        }

        let started_at = Utc::now();
        let start_time = Instant::now();

        let reader = BufReader::new(File::open(input)?);
        let row_set = self.read_rows(reader)?;
        let outcome = self.group_row_set(row_set);
        GroupWriter::new().write_to_path(&outcome.groups, &self.config.output_path)?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "Grouped {} into {} groups in {} ms",
            input.display(),
            outcome.groups.len(),
            elapsed_ms
        );

        Ok(RunSummary {
            input: input.to_path_buf(),
            output: self.config.output_path.clone(),
            policy: self.config.policy,
            started_at,
            elapsed_ms,
            rows: outcome.row_stats,
            unique_rows: outcome.row_stats.unique_rows(),
            group_count: outcome.groups.len(),
            grouped_rows: outcome.grouped_rows(),
        })
    }
}

fn log_row_stats(stats: &RowSetStats) {
    if stats.lines_read > 0 && stats.accepted_lines == 0 {
        log::warn!("None of the {} input lines is a valid record", stats.lines_read);
    } else if stats.rejected_lines > 0 {
        log::info!(
            "Skipped {} of {} lines that are not valid records",
            stats.rejected_lines,
            stats.lines_read
        );
    }
    log::debug!(
        "Kept {} distinct rows ({} duplicates)",
        stats.unique_rows(),
        stats.duplicate_rows
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_group_lines() {
        let engine = GroupingEngine::new(GroupingConfig::default()).unwrap();
        let outcome = engine.group_lines([
            r#""1";"2""#,
            r#""1";"3""#,
            r#""1";"3""#,
            r#""9";"4""#,
            "garbage",
        ]);

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.grouped_rows(), 2);
        assert_eq!(outcome.row_stats.rejected_lines, 1);
        assert_eq!(outcome.row_stats.duplicate_rows, 1);
        assert_eq!(outcome.index_stats.rows, 3);
        assert!(outcome.groups[0].contains(&Row::from(["1", "3"])));
    }

    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let config = GroupingConfig::default().with_output_path(dir.path().join("out.txt"));
        let engine = GroupingEngine::new(config).unwrap();

        let result = engine.run(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(RowGroupError::InputNotFound(_))));
        assert!(!dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_run_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "\"1\";\"2\"\n\"1\";\"3\"\n\"5\";\"6\"\n").unwrap();

        let engine =
            GroupingEngine::new(GroupingConfig::default().with_output_path(&output)).unwrap();
        let summary = engine.run(&input).unwrap();

        assert_eq!(summary.group_count, 1);
        assert_eq!(summary.grouped_rows, 2);
        assert_eq!(summary.unique_rows, 3);
        assert_eq!(fs::read_to_string(&output).unwrap(), "Group 1\n1;2\n1;3\n\n");
    }

    #[test]
    fn test_invalid_pattern_rejected_at_construction() {
        let config = GroupingConfig::default().with_line_pattern("[");
        assert!(GroupingEngine::new(config).is_err());
    }
}
