//! Match reports produced by the duplicate index.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// One `(length, path)` entry stored in a hash bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    /// Length token as read from the manifest
    pub length: String,
    /// Resolved file path
    pub path: PathBuf,
}

impl BucketEntry {
    /// Create a new bucket entry.
    #[must_use]
    pub fn new(length: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            length: length.into(),
            path: path.into(),
        }
    }

    /// Directory portion of the path, empty if there is none.
    #[must_use]
    pub fn dir(&self) -> Cow<'_, str> {
        self.path
            .parent()
            .map_or(Cow::Borrowed(""), |p| p.to_string_lossy())
    }

    /// File name portion of the path, empty if there is none.
    #[must_use]
    pub fn base(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map_or(Cow::Borrowed(""), |n| n.to_string_lossy())
    }
}

/// A detected pair of likely-duplicate files.
///
/// `first` is the entry that was already indexed, `second` the record whose
/// processing produced the match. Both share `hash` and have equal lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// Shared hash token
    pub hash: String,
    /// Earlier entry (already in the bucket)
    pub first: BucketEntry,
    /// Newly processed entry
    pub second: BucketEntry,
}

impl MatchReport {
    /// Create a new match report.
    #[must_use]
    pub fn new(hash: impl Into<String>, first: BucketEntry, second: BucketEntry) -> Self {
        Self {
            hash: hash.into(),
            first,
            second,
        }
    }

    /// Length token of the earlier file.
    #[must_use]
    pub fn len1(&self) -> &str {
        &self.first.length
    }

    /// Length token of the new file.
    #[must_use]
    pub fn len2(&self) -> &str {
        &self.second.length
    }

    /// Directory portion of the earlier path.
    #[must_use]
    pub fn dir1(&self) -> Cow<'_, str> {
        self.first.dir()
    }

    /// Directory portion of the new path.
    #[must_use]
    pub fn dir2(&self) -> Cow<'_, str> {
        self.second.dir()
    }

    /// File name of the earlier path.
    #[must_use]
    pub fn base1(&self) -> Cow<'_, str> {
        self.first.base()
    }

    /// File name of the new path.
    #[must_use]
    pub fn base2(&self) -> Cow<'_, str> {
        self.second.base()
    }

    /// Full resolved path of the earlier file.
    #[must_use]
    pub fn path1(&self) -> &Path {
        &self.first.path
    }

    /// Full resolved path of the new file.
    #[must_use]
    pub fn path2(&self) -> &Path {
        &self.second.path
    }

    /// All nine report fields in output order.
    ///
    /// `hash, len1, len2, dir1, dir2, base1, base2, path1, path2`
    #[must_use]
    pub fn fields(&self) -> [Cow<'_, str>; 9] {
        [
            Cow::Borrowed(self.hash.as_str()),
            Cow::Borrowed(self.len1()),
            Cow::Borrowed(self.len2()),
            self.dir1(),
            self.dir2(),
            self.base1(),
            self.base2(),
            self.first.path.to_string_lossy(),
            self.second.path.to_string_lossy(),
        ]
    }
}
