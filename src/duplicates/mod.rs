//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The hash-keyed index with first-match reporting ([`index`])
//! - Match reports and their derived fields ([`report`])
//! - The ordered multi-directory run ([`finder`])

pub mod finder;
pub mod index;
pub mod report;

pub use finder::{
    CollectingSink, DirectoryEvent, DirectoryStatus, FinderConfig, FinderError, MatchFinder,
    MatchSink, RunSummary,
};
pub use index::{DuplicateIndex, HashBucket, LengthComparison};
pub use report::{BucketEntry, MatchReport};
