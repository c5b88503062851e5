//! Connected components over the column index.
//!
//! Two rows in a bucket are directly linked when they share a non-empty
//! value at the same position. A group is a maximal set of rows closed
//! under the transitive closure of that relation.
//!
//! The traversal is an iterative breadth-first search driven by an explicit
//! queue, so stack usage does not grow with component size. Each posting
//! list is expanded at most once per bucket: once expanded, all of its rows
//! are already visited, so revisiting it could not add anything.

use std::collections::VecDeque;

use bit_vec::BitVec;

use crate::config::MIN_GROUP_SIZE;
use crate::grouping::column_index::{ColumnBucket, ColumnIndex, RowId};
use crate::grouping::group::Group;

/// Finds groups of linked rows.
#[derive(Debug, Clone, Copy)]
pub struct GroupFinder {
    min_group_size: usize,
}

impl Default for GroupFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupFinder {
    /// Create a finder that drops singleton components.
    pub fn new() -> Self {
        GroupFinder {
            min_group_size: MIN_GROUP_SIZE,
        }
    }

    /// Create a finder with a different minimum group size.
    pub fn with_min_group_size(min_group_size: usize) -> Self {
        GroupFinder {
            min_group_size: min_group_size.max(1),
        }
    }

    /// Find every group with at least the minimum number of members.
    ///
    /// Groups come out in discovery order: buckets in key order, and within
    /// a bucket by the smallest member row.
    pub fn find_groups(&self, index: &ColumnIndex) -> Vec<Group> {
        let mut groups = Vec::new();

        for bucket in index.buckets() {
            let components = self.components(bucket);
            let found_before = groups.len();

            groups.extend(
                components
                    .into_iter()
                    .filter(|component| component.len() >= self.min_group_size)
                    .map(|component| {
                        component
                            .into_iter()
                            .map(|row_id| bucket.row(row_id).clone())
                            .collect::<Group>()
                    }),
            );

            log::debug!(
                "Bucket {:?}: {} rows, {} groups",
                bucket.key(),
                bucket.len(),
                groups.len() - found_before
            );
        }

        groups
    }

    /// Partition a bucket into connected components, singletons included.
    ///
    /// Every row id of the bucket appears in exactly one component.
    pub fn components(&self, bucket: &ColumnBucket) -> Vec<Vec<RowId>> {
        let mut visited = BitVec::from_elem(bucket.len(), false);
        let mut expanded = BitVec::from_elem(bucket.posting_count(), false);
        let mut queue = VecDeque::new();
        let mut components = Vec::new();

        for start in 0..bucket.len() {
            if visited[start] {
                continue;
            }
            visited.set(start, true);
            queue.push_back(start);

            let mut component = Vec::new();
            while let Some(current) = queue.pop_front() {
                component.push(current);

                for posting_id in bucket.row_postings(current) {
                    if expanded[posting_id] {
                        continue;
                    }
                    expanded.set(posting_id, true);

                    for &neighbor in bucket.posting(posting_id) {
                        if !visited[neighbor] {
                            visited.set(neighbor, true);
                            queue.push_back(neighbor);
                        }
                    }
                }
            }

            components.push(component);
        }

        components
    }
}
