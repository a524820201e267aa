//! Incremental hash index and the match-and-append step.
//!
//! # Overview
//!
//! [`DuplicateIndex`] maps every hash seen so far to a [`HashBucket`] of
//! `(length, path)` entries in the order they were processed. Each new
//! record is first compared against its bucket's current contents and only
//! then appended, so a record never matches itself.
//!
//! Matching is first-found: the bucket is scanned in insertion order and the
//! first entry with an equal length wins. Later same-length entries are not
//! reported for that record. Zero-length records are ignored entirely since
//! every empty file trivially shares the same hash.
//!
//! # Example
//!
//! ```
//! use hashmatch::duplicates::DuplicateIndex;
//! use hashmatch::manifest::Record;
//!
//! let mut index = DuplicateIndex::new();
//! assert!(index.process(Record::new("h1", "100", "A/x.bin")).is_none());
//!
//! let report = index.process(Record::new("h1", "100", "B/y.bin")).unwrap();
//! assert_eq!(report.base1(), "x.bin");
//! assert_eq!(report.base2(), "y.bin");
//! ```

use std::collections::HashMap;

use crate::manifest::{Record, ZERO_LENGTH};

use super::report::{BucketEntry, MatchReport};

/// How length tokens are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthComparison {
    /// Raw token equality (`"7"` and `"007"` differ).
    #[default]
    Exact,
    /// Numeric equality when both tokens parse as integers, token equality
    /// otherwise.
    Numeric,
}

impl LengthComparison {
    /// Whether two length tokens are considered equal.
    #[must_use]
    pub fn lengths_equal(self, a: &str, b: &str) -> bool {
        match self {
            Self::Exact => a == b,
            Self::Numeric => match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
                (Ok(x), Ok(y)) => x == y,
                _ => a == b,
            },
        }
    }

    /// Whether a length token denotes an empty file.
    #[must_use]
    pub fn is_zero(self, length: &str) -> bool {
        match self {
            Self::Exact => length == ZERO_LENGTH,
            Self::Numeric => length == ZERO_LENGTH || length.trim().parse::<u64>() == Ok(0),
        }
    }
}

/// Ordered entries sharing one hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashBucket {
    entries: Vec<BucketEntry>,
}

impl HashBucket {
    /// Create a bucket holding a single entry.
    #[must_use]
    pub fn with_entry(entry: BucketEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[BucketEntry] {
        &self.entries
    }

    /// Number of entries in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose length equals `length`, in insertion order.
    #[must_use]
    pub fn first_match(&self, length: &str, comparison: LengthComparison) -> Option<&BucketEntry> {
        self.entries
            .iter()
            .find(|entry| comparison.lengths_equal(&entry.length, length))
    }

    fn push(&mut self, entry: BucketEntry) {
        self.entries.push(entry);
    }
}

/// Mapping from hash to the bucket of entries seen with that hash.
///
/// Owned by a single run; grows monotonically and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct DuplicateIndex {
    buckets: HashMap<String, HashBucket>,
    comparison: LengthComparison,
    entry_count: usize,
}

impl DuplicateIndex {
    /// Create an empty index using exact length comparison.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with the given length comparison.
    #[must_use]
    pub fn with_comparison(comparison: LengthComparison) -> Self {
        Self {
            comparison,
            ..Self::default()
        }
    }

    /// Length comparison in use.
    #[must_use]
    pub fn comparison(&self) -> LengthComparison {
        self.comparison
    }

    /// Check `record` against its bucket, then add it to the bucket.
    ///
    /// Returns a report pairing the first earlier entry with an equal
    /// length and the new record. Zero-length records are ignored and leave
    /// the index untouched.
    pub fn process(&mut self, record: Record) -> Option<MatchReport> {
        if self.comparison.is_zero(&record.length) {
            return None;
        }

        let Record { hash, length, path } = record;
        let entry = BucketEntry::new(length, path);
        self.entry_count += 1;

        match self.buckets.get_mut(&hash) {
            Some(bucket) => {
                let report = bucket
                    .first_match(&entry.length, self.comparison)
                    .cloned()
                    .map(|earlier| MatchReport::new(hash, earlier, entry.clone()));
                bucket.push(entry);
                report
            }
            None => {
                self.buckets.insert(hash, HashBucket::with_entry(entry));
                None
            }
        }
    }

    /// Bucket for `hash`, if any record with that hash was indexed.
    #[must_use]
    pub fn bucket(&self, hash: &str) -> Option<&HashBucket> {
        self.buckets.get(hash)
    }

    /// Number of distinct hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if no record has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of indexed entries across all buckets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}
