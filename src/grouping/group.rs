//! Groups of linked rows.

use serde::{Serialize, Serializer};

use crate::row::Row;

/// A set of rows connected through shared column values.
///
/// Members are kept in ascending row order, which makes two groups with the
/// same members equal and gives them a stable written form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group {
    members: Vec<Row>,
}

impl Group {
    /// Create a group from its members.
    pub fn new(mut members: Vec<Row>) -> Self {
        members.sort_unstable();
        members.dedup();
        Group { members }
    }

    /// Number of member rows.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending row order.
    pub fn members(&self) -> &[Row] {
        &self.members
    }

    /// Check whether a row is a member.
    pub fn contains(&self, row: &Row) -> bool {
        self.members.binary_search(row).is_ok()
    }

    /// Sort score: total number of fields over all members.
    pub fn score(&self) -> usize {
        self.members.iter().map(Row::len).sum()
    }
}

impl FromIterator<Row> for Group {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Group::new(iter.into_iter().collect())
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.members.iter().map(Row::fields))
    }
}
