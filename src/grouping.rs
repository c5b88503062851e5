//! Grouping engine.
//!
//! Turns a flat set of rows into disjoint groups of rows that are connected
//! through shared column values, then puts the groups in output order.
//!
//! # Components
//!
//! - [`column_index::ColumnIndex`] - `(position, value)` postings per bucket
//! - [`finder::GroupFinder`] - connected components over the postings
//! - [`group::Group`] - a set of linked rows
//! - [`sorter::GroupSorter`] - largest groups first, ties by content
//!
//! # Examples
//!
//! ```
//! use rowgroup::config::ComparisonPolicy;
//! use rowgroup::grouping::{group_rows, column_index::ColumnIndex};
//! use rowgroup::row::Row;
//!
//! let rows = vec![
//!     Row::from(["1", "2"]),
//!     Row::from(["1", "3"]),
//!     Row::from(["9", "3"]),
//!     Row::from(["5", "5"]),
//! ];
//! let index = ColumnIndex::from_rows(rows, ComparisonPolicy::SameLength);
//! let groups = group_rows(&index);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 3);
//! ```

pub mod column_index;
pub mod finder;
pub mod group;
pub mod sorter;

use crate::grouping::column_index::ColumnIndex;
use crate::grouping::finder::GroupFinder;
use crate::grouping::group::Group;
use crate::grouping::sorter::GroupSorter;

/// Find the groups of an index and return them in output order.
pub fn group_rows(index: &ColumnIndex) -> Vec<Group> {
    let mut groups = GroupFinder::new().find_groups(index);
    GroupSorter::new().sort(&mut groups);
    groups
}
