//! Output ordering for groups.

use std::cmp::Ordering;

use crate::grouping::group::Group;

/// Orders groups for output.
///
/// Groups with the larger total field count come first. Groups with equal
/// scores are ordered by their sorted member lists, compared
/// lexicographically, so the output order depends only on group contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupSorter;

impl GroupSorter {
    /// Create a new sorter.
    pub fn new() -> Self {
        GroupSorter
    }

    /// Compare two groups in output order.
    pub fn compare(&self, a: &Group, b: &Group) -> Ordering {
        b.score()
            .cmp(&a.score())
            .then_with(|| a.members().cmp(b.members()))
    }

    /// Sort groups in place into output order.
    pub fn sort(&self, groups: &mut [Group]) {
        groups.sort_unstable_by(|a, b| self.compare(a, b));
    }
}
