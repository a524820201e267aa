//! JSON output formatter for match results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "matches": [
//!     {
//!       "hash": "h1",
//!       "len1": "100",
//!       "len2": "100",
//!       "dir1": "A",
//!       "dir2": "B",
//!       "base1": "x.bin",
//!       "base2": "y.bin",
//!       "path1": "A/x.bin",
//!       "path2": "B/y.bin"
//!     }
//!   ],
//!   "directories": [
//!     { "dir": "A", "manifest": "A/.hashcheck", "status": "processed" },
//!     { "dir": "C", "manifest": "C/.hashcheck", "status": "missing" }
//!   ],
//!   "summary": {
//!     "directories_requested": 3,
//!     "matches": 1,
//!     "duration_ms": 3,
//!     "exit_code": 0,
//!     "generated_at": "2024-01-01T00:00:00+00:00"
//!   }
//! }
//! ```
//!
//! Lengths stay strings because they are compared as manifest text.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::duplicates::{CollectingSink, DirectoryEvent, DirectoryStatus, MatchReport, RunSummary};
use crate::error::ExitCode;

/// A single match in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonMatch {
    pub hash: String,
    pub len1: String,
    pub len2: String,
    pub dir1: String,
    pub dir2: String,
    pub base1: String,
    pub base2: String,
    pub path1: String,
    pub path2: String,
}

impl JsonMatch {
    /// Create a JSON match from a report.
    #[must_use]
    pub fn from_report(report: &MatchReport) -> Self {
        let [hash, len1, len2, dir1, dir2, base1, base2, path1, path2] =
            report.fields().map(|f| f.into_owned());
        Self {
            hash,
            len1,
            len2,
            dir1,
            dir2,
            base1,
            base2,
            path1,
            path2,
        }
    }
}

/// A directory diagnostic in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDirectory {
    /// Directory as processed
    pub dir: String,
    /// Manifest path looked up
    pub manifest: String,
    /// `processed`, `missing` or `unreadable`
    pub status: &'static str,
    /// Open failure reason for unreadable manifests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl JsonDirectory {
    /// Create a JSON directory entry from a diagnostic event.
    #[must_use]
    pub fn from_event(event: &DirectoryEvent) -> Self {
        let (status, reason) = match &event.status {
            DirectoryStatus::Processing => ("processed", None),
            DirectoryStatus::Missing => ("missing", None),
            DirectoryStatus::Unreadable(reason) => ("unreadable", Some(reason.clone())),
        };
        Self {
            dir: event.dir.to_string_lossy().into_owned(),
            manifest: event.manifest.to_string_lossy().into_owned(),
            status,
            reason,
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub directories_requested: usize,
    pub directories_processed: usize,
    pub directories_missing: usize,
    pub directories_failed: usize,
    pub records_read: usize,
    pub zero_length_skipped: usize,
    pub malformed_lines: usize,
    pub matches: usize,
    pub distinct_hashes: usize,
    /// Duration of the run in milliseconds
    pub duration_ms: u64,
    /// Non-fatal manifest errors, as messages
    pub errors: Vec<String>,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "HM000")
    pub exit_code_name: String,
    /// When this report was generated (RFC 3339)
    pub generated_at: String,
}

impl JsonSummary {
    /// Create a JSON summary from a run summary and an exit code.
    #[must_use]
    pub fn from_run_summary(summary: &RunSummary, exit_code: ExitCode) -> Self {
        Self {
            directories_requested: summary.directories_requested,
            directories_processed: summary.directories_processed,
            directories_missing: summary.directories_missing,
            directories_failed: summary.directories_failed,
            records_read: summary.records_read,
            zero_length_skipped: summary.zero_length_skipped,
            malformed_lines: summary.malformed_lines,
            matches: summary.matches,
            distinct_hashes: summary.distinct_hashes,
            duration_ms: summary.duration.as_millis() as u64,
            errors: summary.errors.iter().map(ToString::to_string).collect(),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Matches in detection order
    pub matches: Vec<JsonMatch>,
    /// Directory diagnostics in processing order
    pub directories: Vec<JsonDirectory>,
    /// Run summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a collected run.
    #[must_use]
    pub fn new(collected: &CollectingSink, summary: &RunSummary, exit_code: ExitCode) -> Self {
        Self {
            matches: collected.matches.iter().map(JsonMatch::from_report).collect(),
            directories: collected
                .directories
                .iter()
                .map(JsonDirectory::from_event)
                .collect(),
            summary: JsonSummary::from_run_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
