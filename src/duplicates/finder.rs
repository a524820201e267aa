//! Multi-directory processing loop.
//!
//! # Overview
//!
//! [`MatchFinder`] walks the directories it is given strictly in order:
//! 1. **Open** - look for the directory's manifest; a missing or unreadable
//!    manifest is announced and the directory contributes nothing
//! 2. **Read** - stream the manifest's records one line at a time
//! 3. **Match** - feed every record to the run's [`DuplicateIndex`] and pass
//!    each resulting [`MatchReport`] to the sink immediately
//!
//! Only one manifest handle is open at any time. The index lives for the
//! duration of a single [`MatchFinder::run`] call.
//!
//! # Example
//!
//! ```no_run
//! use hashmatch::duplicates::{FinderConfig, MatchFinder};
//! use std::path::PathBuf;
//!
//! let finder = MatchFinder::new(FinderConfig::default().with_strict(false));
//! let dirs = vec![PathBuf::from("A"), PathBuf::from("B")];
//! let (matches, summary) = finder.find_matches(&dirs).unwrap();
//!
//! for m in &matches {
//!     println!("{} <-> {}", m.path1().display(), m.path2().display());
//! }
//! println!("{} match(es) in {} manifest(s)", summary.matches, summary.directories_processed);
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::manifest::{ManifestError, ManifestReader, MANIFEST_FILE_NAME};

use super::index::{DuplicateIndex, LengthComparison};
use super::report::MatchReport;

/// Configuration for a matching run.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// File name of the manifest inside each directory.
    pub manifest_name: String,
    /// Abort the run on malformed lines and read failures instead of
    /// skipping them.
    pub strict: bool,
    /// How length tokens are compared.
    pub length_comparison: LengthComparison,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            manifest_name: MANIFEST_FILE_NAME.to_string(),
            strict: false,
            length_comparison: LengthComparison::Exact,
            shutdown_flag: None,
        }
    }
}

impl FinderConfig {
    /// Set the manifest file name.
    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    /// Enable or disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the length comparison.
    #[must_use]
    pub fn with_length_comparison(mut self, comparison: LengthComparison) -> Self {
        self.length_comparison = comparison;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Outcome of looking up a directory's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryStatus {
    /// The manifest was found and is being read.
    Processing,
    /// The directory has no manifest.
    Missing,
    /// The manifest exists but could not be opened.
    Unreadable(String),
}

/// Diagnostic emitted once per directory, before any of its matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEvent {
    /// Directory with trailing separators removed
    pub dir: PathBuf,
    /// Manifest path looked up in the directory
    pub manifest: PathBuf,
    /// What happened when opening the manifest
    pub status: DirectoryStatus,
}

impl DirectoryEvent {
    fn new(dir: &Path, manifest: &Path, status: DirectoryStatus) -> Self {
        Self {
            dir: dir.to_path_buf(),
            manifest: manifest.to_path_buf(),
            status,
        }
    }

    /// File name of the manifest (e.g. `.hashcheck`).
    #[must_use]
    pub fn manifest_name(&self) -> std::borrow::Cow<'_, str> {
        self.manifest
            .file_name()
            .map_or_else(|| self.manifest.to_string_lossy(), |n| n.to_string_lossy())
    }

    fn from_open_error(err: &ManifestError) -> Option<Self> {
        match err {
            ManifestError::Missing { dir, manifest } => {
                Some(Self::new(dir, manifest, DirectoryStatus::Missing))
            }
            ManifestError::Open {
                dir,
                manifest,
                source,
            } => Some(Self::new(
                dir,
                manifest,
                DirectoryStatus::Unreadable(source.to_string()),
            )),
            _ => None,
        }
    }
}

/// Consumer of a run's directory diagnostics and match reports.
///
/// Both callbacks are invoked in processing order, so diagnostics and
/// matches interleave exactly as the directories are read.
pub trait MatchSink {
    /// Called once per directory after its manifest was looked up.
    ///
    /// # Errors
    ///
    /// A returned error aborts the run with [`FinderError::Output`].
    fn on_directory(&mut self, event: &DirectoryEvent) -> io::Result<()>;

    /// Called for every detected match.
    ///
    /// # Errors
    ///
    /// A returned error aborts the run with [`FinderError::Output`].
    fn on_match(&mut self, report: &MatchReport) -> io::Result<()>;
}

impl<S: MatchSink + ?Sized> MatchSink for &mut S {
    fn on_directory(&mut self, event: &DirectoryEvent) -> io::Result<()> {
        (**self).on_directory(event)
    }

    fn on_match(&mut self, report: &MatchReport) -> io::Result<()> {
        (**self).on_match(report)
    }
}

/// Sink that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    /// Directory diagnostics in processing order
    pub directories: Vec<DirectoryEvent>,
    /// Match reports in processing order
    pub matches: Vec<MatchReport>,
}

impl MatchSink for CollectingSink {
    fn on_directory(&mut self, event: &DirectoryEvent) -> io::Result<()> {
        self.directories.push(event.clone());
        Ok(())
    }

    fn on_match(&mut self, report: &MatchReport) -> io::Result<()> {
        self.matches.push(report.clone());
        Ok(())
    }
}

/// Summary statistics from a matching run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of directories supplied
    pub directories_requested: usize,
    /// Directories whose manifest was opened
    pub directories_processed: usize,
    /// Directories without a manifest
    pub directories_missing: usize,
    /// Directories whose manifest could not be opened or was cut short by a
    /// read error
    pub directories_failed: usize,
    /// Well-formed records read, including zero-length ones
    pub records_read: usize,
    /// Records ignored because their length is zero
    pub zero_length_skipped: usize,
    /// Lines skipped because they could not be parsed
    pub malformed_lines: usize,
    /// Match reports produced
    pub matches: usize,
    /// Distinct hashes in the index at the end of the run
    pub distinct_hashes: usize,
    /// Entries in the index at the end of the run
    pub indexed_entries: usize,
    /// Duration of the run
    pub duration: Duration,
    /// Non-fatal manifest errors (missing manifests are not included)
    pub errors: Vec<ManifestError>,
}

impl RunSummary {
    /// Whether any non-fatal error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors that abort a matching run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The run was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Run interrupted by user")]
    Interrupted,

    /// A manifest problem in strict mode.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The sink failed to write its output.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Runs manifests from a list of directories through one duplicate index.
#[derive(Debug, Clone, Default)]
pub struct MatchFinder {
    config: FinderConfig,
}

impl MatchFinder {
    /// Create a new finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Process `dirs` in order, streaming diagnostics and matches to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - the shutdown flag is raised
    /// - the sink fails to write
    /// - strict mode is on and a manifest line is malformed or unreadable
    ///
    /// Missing or unopenable manifests are never fatal.
    pub fn run<S>(&self, dirs: &[PathBuf], sink: &mut S) -> Result<RunSummary, FinderError>
    where
        S: MatchSink + ?Sized,
    {
        let start_time = Instant::now();
        let mut summary = RunSummary {
            directories_requested: dirs.len(),
            ..RunSummary::default()
        };
        let mut index = DuplicateIndex::with_comparison(self.config.length_comparison);

        if dirs.is_empty() {
            log::warn!("No directories provided");
        }

        for dir in dirs {
            if self.config.is_shutdown_requested() {
                return Err(FinderError::Interrupted);
            }
            self.process_directory(dir, &mut index, sink, &mut summary)?;
        }

        summary.distinct_hashes = index.len();
        summary.indexed_entries = index.entry_count();
        summary.duration = start_time.elapsed();

        log::info!(
            "Found {} match(es) among {} record(s) from {} of {} director{}",
            summary.matches,
            summary.records_read,
            summary.directories_processed,
            summary.directories_requested,
            if summary.directories_requested == 1 { "y" } else { "ies" }
        );

        Ok(summary)
    }

    /// Process `dirs` and collect every match in memory.
    ///
    /// # Errors
    ///
    /// Same as [`MatchFinder::run`].
    pub fn find_matches(
        &self,
        dirs: &[PathBuf],
    ) -> Result<(Vec<MatchReport>, RunSummary), FinderError> {
        let mut sink = CollectingSink::default();
        let summary = self.run(dirs, &mut sink)?;
        Ok((sink.matches, summary))
    }

    fn process_directory<S>(
        &self,
        dir: &Path,
        index: &mut DuplicateIndex,
        sink: &mut S,
        summary: &mut RunSummary,
    ) -> Result<(), FinderError>
    where
        S: MatchSink + ?Sized,
    {
        let mut reader = match ManifestReader::open_with_name(dir, &self.config.manifest_name) {
            Ok(reader) => reader,
            Err(err) => {
                if let Some(event) = DirectoryEvent::from_open_error(&err) {
                    sink.on_directory(&event).map_err(FinderError::Output)?;
                }
                if err.is_missing() {
                    log::debug!("{}", err);
                    summary.directories_missing += 1;
                } else {
                    log::warn!("{}", err);
                    summary.directories_failed += 1;
                    summary.errors.push(err);
                }
                return Ok(());
            }
        };

        log::debug!("Processing {}", reader.manifest_path().display());
        let event = DirectoryEvent::new(
            reader.dir(),
            reader.manifest_path(),
            DirectoryStatus::Processing,
        );
        sink.on_directory(&event).map_err(FinderError::Output)?;
        summary.directories_processed += 1;

        let comparison = index.comparison();
        for item in reader.by_ref() {
            if self.config.is_shutdown_requested() {
                return Err(FinderError::Interrupted);
            }

            let record = match item {
                Ok(record) => record,
                Err(err) if self.config.strict => return Err(err.into()),
                Err(err) => {
                    match err {
                        ManifestError::Malformed { .. } => summary.malformed_lines += 1,
                        _ => summary.directories_failed += 1,
                    }
                    log::warn!("{}", err);
                    summary.errors.push(err);
                    continue;
                }
            };

            summary.records_read += 1;
            if comparison.is_zero(&record.length) {
                log::trace!("Skipping zero-length {}", record.path.display());
                summary.zero_length_skipped += 1;
                continue;
            }

            if let Some(report) = index.process(record) {
                summary.matches += 1;
                sink.on_match(&report).map_err(FinderError::Output)?;
            }
        }

        log::debug!(
            "Finished {} after {} line(s)",
            reader.manifest_path().display(),
            reader.lines_read()
        );
        Ok(())
    }
}
