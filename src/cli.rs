//! Command-line interface definitions for hashmatch.
//!
//! # Example
//!
//! ```bash
//! # Compare the manifests of three directories, in this order
//! hashmatch photos/ backup/photos/ /mnt/old-disk
//!
//! # Same, as JSON
//! hashmatch --output json --pretty photos backup/photos
//!
//! # Treat "007" and "7" as the same length
//! hashmatch --numeric-lengths a b
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::duplicates::{FinderConfig, LengthComparison};
use crate::manifest::MANIFEST_FILE_NAME;

/// Find duplicate files across directories from their .hashcheck manifests.
///
/// Each DIR must contain a manifest with one `<hash> <length> <path>` line per
/// file. Every file whose hash and length equal those of a file listed
/// earlier is reported once, paired with the first such file.
#[derive(Debug, Parser)]
#[command(name = "hashmatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories whose manifests are compared, in processing order
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Output format (tsv streams matches as they are found)
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub output: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Abort on malformed manifest lines and read errors instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Compare lengths as numbers rather than as text (e.g. "007" equals "7")
    #[arg(long)]
    pub numeric_lengths: bool,

    /// Manifest file name looked up in every directory
    #[arg(long, value_name = "NAME", env = "HASHMATCH_MANIFEST", default_value = MANIFEST_FILE_NAME)]
    pub manifest_name: String,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

impl Cli {
    /// Build the finder configuration selected by these arguments.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        let comparison = if self.numeric_lengths {
            LengthComparison::Numeric
        } else {
            LengthComparison::Exact
        };
        FinderConfig::default()
            .with_manifest_name(self.manifest_name.clone())
            .with_strict(self.strict)
            .with_length_comparison(comparison)
    }
}

/// Output format for match results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines with per-directory diagnostics
    Tsv,
    /// JSON document for scripting
    Json,
    /// CSV with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
