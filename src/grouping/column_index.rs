//! Column-value index over a row set.
//!
//! Rows are partitioned into buckets according to the
//! [`ComparisonPolicy`]. Within a bucket every non-empty field is registered
//! under its `(position, value)` key, and each key owns a posting list of
//! the rows that carry that value at that position. Empty fields are never
//! indexed, so a row without values belongs to no posting list at all.
//!
//! The index is built in one pass and is immutable afterwards.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::config::ComparisonPolicy;
use crate::row::Row;
use crate::row::row_set::RowSet;

/// Position of a row inside its bucket.
pub type RowId = usize;

/// Position of a posting list inside its bucket.
pub type PostingId = usize;

/// Identifies a bucket of mutually comparable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BucketKey {
    /// All rows with exactly this many fields.
    Length(usize),
    /// Rows of any length, compared over their common positions.
    Mixed,
}

impl BucketKey {
    /// The bucket a row belongs to under a policy.
    pub fn for_row(row: &Row, policy: ComparisonPolicy) -> Self {
        match policy {
            ComparisonPolicy::SameLength => BucketKey::Length(row.len()),
            ComparisonPolicy::AnyLength => BucketKey::Mixed,
        }
    }
}

/// Counters describing a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnIndexStats {
    /// Number of buckets.
    pub buckets: usize,

    /// Number of rows across all buckets.
    pub rows: usize,

    /// Rows with no non-empty field.
    pub unindexed_rows: usize,

    /// Distinct `(position, value)` keys across all buckets.
    pub distinct_keys: usize,
}

/// The rows of one bucket together with their column postings.
#[derive(Debug, Clone)]
pub struct ColumnBucket {
    key: BucketKey,
    rows: Vec<Row>,
    /// One map per column position, from value to posting id.
    columns: Vec<AHashMap<String, PostingId>>,
    /// Row ids per posting, ascending.
    postings: Vec<Vec<RowId>>,
}

impl ColumnBucket {
    /// Build a bucket from its rows.
    ///
    /// Rows are stored in ascending order so row ids, and with them the
    /// traversal order, do not depend on hash-set iteration order. Equal
    /// rows are collapsed into one.
    fn new(key: BucketKey, mut rows: Vec<Row>) -> Self {
        rows.sort_unstable();
        rows.dedup();

        let width = rows.iter().map(Row::len).max().unwrap_or(0);
        let mut columns: Vec<AHashMap<String, PostingId>> = vec![AHashMap::new(); width];
        let mut postings: Vec<Vec<RowId>> = Vec::new();

        for (row_id, row) in rows.iter().enumerate() {
            for (position, value) in row.non_empty_fields() {
                let posting_id = match columns[position].get(value).copied() {
                    Some(posting_id) => posting_id,
                    None => {
                        let posting_id = postings.len();
                        postings.push(Vec::new());
                        columns[position].insert(value.to_string(), posting_id);
                        posting_id
                    }
                };
                postings[posting_id].push(row_id);
            }
        }

        ColumnBucket {
            key,
            rows,
            columns,
            postings,
        }
    }

    /// The key shared by every row in this bucket.
    pub fn key(&self) -> BucketKey {
        self.key
    }

    /// Number of rows in the bucket.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the bucket has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, indexed by [`RowId`].
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by id.
    pub fn row(&self, row_id: RowId) -> &Row {
        &self.rows[row_id]
    }

    /// Number of distinct `(position, value)` keys.
    pub fn posting_count(&self) -> usize {
        self.postings.len()
    }

    /// Look up the posting list id for a key.
    pub fn posting_id(&self, position: usize, value: &str) -> Option<PostingId> {
        self.columns.get(position)?.get(value).copied()
    }

    /// Row ids in a posting list.
    pub fn posting(&self, posting_id: PostingId) -> &[RowId] {
        &self.postings[posting_id]
    }

    /// Posting ids for every non-empty field of a row.
    pub fn row_postings(&self, row_id: RowId) -> impl Iterator<Item = PostingId> + '_ {
        self.rows[row_id]
            .non_empty_fields()
            .filter_map(|(position, value)| self.posting_id(position, value))
    }

    /// Rows holding `value` at `position`. Empty values match nothing.
    pub fn rows_with(&self, position: usize, value: &str) -> Vec<&Row> {
        match self.posting_id(position, value) {
            Some(posting_id) => self.postings[posting_id]
                .iter()
                .map(|&row_id| &self.rows[row_id])
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Buckets of rows with their column postings.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    policy: ComparisonPolicy,
    buckets: BTreeMap<BucketKey, ColumnBucket>,
}

impl ColumnIndex {
    /// Build the index from a row set.
    pub fn build(row_set: RowSet, policy: ComparisonPolicy) -> Self {
        Self::from_rows(row_set.into_rows(), policy)
    }

    /// Build the index from rows. Repeated rows are kept once.
    pub fn from_rows<I: IntoIterator<Item = Row>>(rows: I, policy: ComparisonPolicy) -> Self {
        let mut partitions: BTreeMap<BucketKey, Vec<Row>> = BTreeMap::new();
        for row in rows {
            partitions
                .entry(BucketKey::for_row(&row, policy))
                .or_default()
                .push(row);
        }

        let buckets = partitions
            .into_iter()
            .map(|(key, rows)| (key, ColumnBucket::new(key, rows)))
            .collect();

        let index = ColumnIndex { policy, buckets };
        let stats = index.stats();
        log::debug!(
            "Built column index ({}): {} buckets, {} rows, {} keys, {} rows without values",
            policy.name(),
            stats.buckets,
            stats.rows,
            stats.distinct_keys,
            stats.unindexed_rows
        );
        index
    }

    /// The policy the index was built with.
    pub fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    /// Iterate over the buckets in key order.
    pub fn buckets(&self) -> impl Iterator<Item = &ColumnBucket> {
        self.buckets.values()
    }

    /// Get a bucket by key.
    pub fn bucket(&self, key: BucketKey) -> Option<&ColumnBucket> {
        self.buckets.get(&key)
    }

    /// Rows comparable with `row` that hold `value` at `position`.
    pub fn rows_with(&self, row: &Row, position: usize, value: &str) -> Vec<&Row> {
        self.bucket(BucketKey::for_row(row, self.policy))
            .map(|bucket| bucket.rows_with(position, value))
            .unwrap_or_default()
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.buckets.values().map(ColumnBucket::len).sum()
    }

    /// Check whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Collect index statistics.
    pub fn stats(&self) -> ColumnIndexStats {
        let mut stats = ColumnIndexStats {
            buckets: self.buckets.len(),
            ..Default::default()
        };
        for bucket in self.buckets.values() {
            stats.rows += bucket.len();
            stats.distinct_keys += bucket.posting_count();
            stats.unindexed_rows += bucket.rows.iter().filter(|row| !row.has_values()).count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter().map(|fields| Row::from(*fields)).collect()
    }

    #[test]
    fn test_same_length_buckets() {
        let index = ColumnIndex::from_rows(
            rows(&[&["1", "2"], &["1", "3"], &["1", "2", "3"]]),
            ComparisonPolicy::SameLength,
        );

        assert_eq!(index.stats().buckets, 2);
        assert_eq!(index.bucket(BucketKey::Length(2)).unwrap().len(), 2);
        assert_eq!(index.bucket(BucketKey::Length(3)).unwrap().len(), 1);

        let short = Row::from(["1", "9"]);
        assert_eq!(index.rows_with(&short, 0, "1").len(), 2);

        let long = Row::from(["1", "9", "9"]);
        assert_eq!(index.rows_with(&long, 0, "1"), vec![&Row::from(["1", "2", "3"])]);
    }

    #[test]
    fn test_any_length_single_bucket() {
        let index = ColumnIndex::from_rows(
            rows(&[&["1", "2"], &["1", "2", "3"]]),
            ComparisonPolicy::AnyLength,
        );

        assert_eq!(index.stats().buckets, 1);
        let bucket = index.bucket(BucketKey::Mixed).unwrap();
        assert_eq!(bucket.rows_with(0, "1").len(), 2);
        assert_eq!(bucket.rows_with(2, "3").len(), 1);
    }

    #[test]
    fn test_empty_values_not_indexed() {
        let index = ColumnIndex::from_rows(
            rows(&[&["", "5"], &["", "6"], &["", ""]]),
            ComparisonPolicy::SameLength,
        );
        let bucket = index.bucket(BucketKey::Length(2)).unwrap();

        assert!(bucket.rows_with(0, "").is_empty());
        assert_eq!(bucket.posting_count(), 2);

        let stats = index.stats();
        assert_eq!(stats.unindexed_rows, 1);
        assert_eq!(stats.distinct_keys, 2);
    }

    #[test]
    fn test_same_value_different_positions_are_separate_keys() {
        let index = ColumnIndex::from_rows(
            rows(&[&["7", "1"], &["1", "7"]]),
            ComparisonPolicy::SameLength,
        );
        let bucket = index.bucket(BucketKey::Length(2)).unwrap();

        assert_eq!(bucket.rows_with(0, "7"), vec![&Row::from(["7", "1"])]);
        assert_eq!(bucket.rows_with(1, "7"), vec![&Row::from(["1", "7"])]);
        assert_eq!(bucket.posting_count(), 4);
    }

    #[test]
    fn test_rows_are_sorted_within_bucket() {
        let index = ColumnIndex::from_rows(
            rows(&[&["3"], &["1"], &["2"]]),
            ComparisonPolicy::SameLength,
        );
        let bucket = index.bucket(BucketKey::Length(1)).unwrap();
        assert_eq!(bucket.rows(), rows(&[&["1"], &["2"], &["3"]]).as_slice());
    }

    #[test]
    fn test_repeated_rows_are_indexed_once() {
        let index = ColumnIndex::from_rows(
            rows(&[&["1", "2"], &["1", "2"], &["1", "3"], &["1", "2"]]),
            ComparisonPolicy::SameLength,
        );
        let bucket = index.bucket(BucketKey::Length(2)).unwrap();

        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.rows_with(1, "2"), vec![&Row::from(["1", "2"])]);
        assert_eq!(index.stats().rows, 2);
    }
}
