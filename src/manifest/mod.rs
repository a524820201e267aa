//! Manifest reading for per-directory `.hashcheck` files.
//!
//! Each directory carries a manifest written by an external hashing tool.
//! Every line lists one file as `<hash> <length> <path>`. This module turns
//! a directory's manifest into a lazy stream of [`Record`]s.
//!
//! # Architecture
//!
//! - [`parser`]: bounded line splitting and path resolution
//! - [`reader`]: scoped file handle and the record iterator
//!
//! # Example
//!
//! ```no_run
//! use hashmatch::manifest::{ManifestError, ManifestReader};
//! use std::path::Path;
//!
//! match ManifestReader::open(Path::new("photos")) {
//!     Ok(reader) => {
//!         for record in reader {
//!             match record {
//!                 Ok(record) => println!("{} {} {}", record.hash, record.length, record.path.display()),
//!                 Err(e) => eprintln!("Warning: {}", e),
//!             }
//!         }
//!     }
//!     Err(ManifestError::Missing { dir, .. }) => eprintln!("{}: no manifest", dir.display()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod parser;
pub mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use parser::{normalize_dir, parse_line, resolve_path, LineError, ParsedLine};
pub use reader::ManifestReader;

/// File name of the manifest looked up in every directory.
pub const MANIFEST_FILE_NAME: &str = ".hashcheck";

/// Length token marking an empty file.
pub const ZERO_LENGTH: &str = "0";

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Opaque content hash token
    pub hash: String,
    /// Byte length, kept as the literal manifest token
    pub length: String,
    /// Manifest path resolved against the manifest's directory
    pub path: PathBuf,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(hash: impl Into<String>, length: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            hash: hash.into(),
            length: length.into(),
            path: path.into(),
        }
    }

    /// Whether this record describes an empty file (length token `"0"`).
    #[must_use]
    pub fn is_zero_length(&self) -> bool {
        self.length == ZERO_LENGTH
    }
}

/// Errors raised while opening or reading a manifest.
///
/// None of these are fatal to a multi-directory run by default; the
/// caller decides whether to skip or abort.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The directory has no manifest.
    #[error("{}: no manifest at {}", .dir.display(), .manifest.display())]
    Missing {
        /// Directory as given (trailing separators removed)
        dir: PathBuf,
        /// Manifest path that was looked up
        manifest: PathBuf,
    },

    /// The manifest exists but could not be opened.
    #[error("{}: cannot open {}: {source}", .dir.display(), .manifest.display())]
    Open {
        /// Directory as given (trailing separators removed)
        dir: PathBuf,
        /// Manifest path that was looked up
        manifest: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading failed after the manifest was opened.
    #[error("{}:{line}: read failed: {source}", .manifest.display())]
    Read {
        /// Manifest being read
        manifest: PathBuf,
        /// Line number at which reading failed (1-based)
        line: usize,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line could not be split into hash, length and path.
    #[error("{}:{line}: malformed line: {reason}", .manifest.display())]
    Malformed {
        /// Manifest containing the line
        manifest: PathBuf,
        /// Line number (1-based)
        line: usize,
        /// Why the line was rejected
        reason: LineError,
    },
}

impl ManifestError {
    /// Whether this error means the manifest simply does not exist.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Whether this error was raised before any line was read.
    #[must_use]
    pub fn is_open_error(&self) -> bool {
        matches!(self, Self::Missing { .. } | Self::Open { .. })
    }
}
