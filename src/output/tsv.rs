//! Tab-separated output, the default standard-output format.
//!
//! One line per detected match, no header row:
//!
//! ```text
//! hash\tlen1\tlen2\tdir1\tdir2\tbase1\tbase2\tpath1\tpath2
//! ```
//!
//! Each directory also gets one diagnostic line, written in processing order
//! so it precedes that directory's matches:
//!
//! ```text
//! A: processing .hashcheck
//! C: no .hashcheck found
//! ```

use std::io::{self, Write};

use crate::duplicates::{DirectoryEvent, DirectoryStatus, MatchReport, MatchSink};

/// Format one match as a tab-separated line (without terminator).
///
/// # Example
///
/// ```
/// use hashmatch::duplicates::{BucketEntry, MatchReport};
/// use hashmatch::output::tsv::format_report;
///
/// let report = MatchReport::new(
///     "h1",
///     BucketEntry::new("100", "A/x.bin"),
///     BucketEntry::new("100", "B/y.bin"),
/// );
/// assert_eq!(
///     format_report(&report),
///     "h1\t100\t100\tA\tB\tx.bin\ty.bin\tA/x.bin\tB/y.bin"
/// );
/// ```
#[must_use]
pub fn format_report(report: &MatchReport) -> String {
    report.fields().join("\t")
}

/// Format the diagnostic line for a directory (without terminator).
#[must_use]
pub fn format_directory(event: &DirectoryEvent) -> String {
    let dir = event.dir.display();
    let name = event.manifest_name();
    match &event.status {
        DirectoryStatus::Processing => format!("{dir}: processing {name}"),
        DirectoryStatus::Missing => format!("{dir}: no {name} found"),
        DirectoryStatus::Unreadable(reason) => format!("{dir}: cannot read {name}: {reason}"),
    }
}

/// Streaming tab-separated writer.
///
/// Buffering is left to the caller; wrap stdout in a `BufWriter` and call
/// [`TsvOutput::flush`] when the run ends.
#[derive(Debug)]
pub struct TsvOutput<W: Write> {
    writer: W,
}

impl<W: Write> TsvOutput<W> {
    /// Create a new TSV writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the output and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MatchSink for TsvOutput<W> {
    fn on_directory(&mut self, event: &DirectoryEvent) -> io::Result<()> {
        writeln!(self.writer, "{}", format_directory(event))
    }

    fn on_match(&mut self, report: &MatchReport) -> io::Result<()> {
        writeln!(self.writer, "{}", format_report(report))
    }
}
