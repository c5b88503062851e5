//! # rowgroup
//!
//! Groups semicolon-delimited, quoted numeric records that share a value
//! in the same column.
//!
//! ## Pipeline
//!
//! - Lines are validated against the record pattern and parsed into rows
//! - Duplicate rows are collapsed
//! - Rows are indexed by `(position, value)` within length buckets
//! - Connected components of the "shares a non-empty value in the same
//!   column" relation become groups; singletons are dropped
//! - Groups are ordered by total field count, largest first, and written
//!   out as numbered blocks

pub mod cli;
pub mod config;
pub mod error;
pub mod grouping;
pub mod output;
pub mod pipeline;
pub mod row;

pub mod prelude {
    pub use crate::config::{ComparisonPolicy, GroupingConfig};
    pub use crate::error::{Result, RowGroupError};
    pub use crate::grouping::column_index::ColumnIndex;
    pub use crate::grouping::group::Group;
    pub use crate::pipeline::{GroupingEngine, GroupingOutcome, RunSummary};
    pub use crate::row::Row;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
