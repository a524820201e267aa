//! Streaming reader for one directory's manifest.
//!
//! [`ManifestReader`] owns the manifest file handle for exactly as long as
//! the directory is being read. The handle is dropped as soon as the last
//! line has been consumed or a read error ends the stream, and in any case
//! when the reader itself is dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use super::parser::{normalize_dir, parse_line, resolve_path, strip_line_terminator, LineError};
use super::{ManifestError, Record, MANIFEST_FILE_NAME};

/// Lazy, non-restartable sequence of [`Record`]s from one manifest.
///
/// Yields `Err(ManifestError::Malformed)` for lines that cannot be split and
/// keeps going. A read failure is yielded once as `Err(ManifestError::Read)`
/// and ends the sequence, as if the manifest were truncated there.
///
/// Blank lines (including a lone `\r`) are skipped without a diagnostic and
/// are not reported as malformed, so they never reach
/// `RunSummary::malformed_lines`. They still count in
/// [`lines_read`](Self::lines_read) and in the line numbers of later errors.
#[derive(Debug)]
pub struct ManifestReader {
    dir: PathBuf,
    manifest: PathBuf,
    reader: Option<BufReader<File>>,
    buf: Vec<u8>,
    line_number: usize,
}

impl ManifestReader {
    /// Open `<dir>/.hashcheck`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Missing`] if the manifest does not exist and
    /// [`ManifestError::Open`] for any other open failure.
    pub fn open(dir: &Path) -> Result<Self, ManifestError> {
        Self::open_with_name(dir, MANIFEST_FILE_NAME)
    }

    /// Open a manifest with a custom file name inside `dir`.
    ///
    /// Trailing separators on `dir` are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`ManifestReader::open`].
    pub fn open_with_name(dir: &Path, name: &str) -> Result<Self, ManifestError> {
        let dir = normalize_dir(dir);
        let manifest = dir.join(name);

        let file = match File::open(&manifest) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::Missing { dir, manifest });
            }
            Err(source) => {
                return Err(ManifestError::Open {
                    dir,
                    manifest,
                    source,
                });
            }
        };

        log::trace!("Opened manifest {}", manifest.display());

        Ok(Self {
            dir,
            manifest,
            reader: Some(BufReader::new(file)),
            buf: Vec::new(),
            line_number: 0,
        })
    }

    /// Directory the records are resolved against.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    /// Number of lines consumed so far, including blank and malformed ones.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Whether the file handle is still held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn malformed(&self, reason: LineError) -> ManifestError {
        ManifestError::Malformed {
            manifest: self.manifest.clone(),
            line: self.line_number,
            reason,
        }
    }
}

impl Iterator for ManifestReader {
    type Item = Result<Record, ManifestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.reader.as_mut()?;

            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    // EOF: release the handle now rather than on drop
                    self.reader = None;
                    return None;
                }
                Ok(_) => {
                    self.line_number += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    self.reader = None;
                    return Some(Err(ManifestError::Read {
                        manifest: self.manifest.clone(),
                        line: self.line_number + 1,
                        source,
                    }));
                }
            }

            let Ok(line) = std::str::from_utf8(&self.buf) else {
                return Some(Err(self.malformed(LineError::InvalidUtf8)));
            };

            if strip_line_terminator(line).is_empty() {
                log::trace!(
                    "{}:{}: skipping blank line",
                    self.manifest.display(),
                    self.line_number
                );
                continue;
            }

            return Some(match parse_line(line) {
                Ok(parsed) => Ok(Record::new(
                    parsed.hash,
                    parsed.length,
                    resolve_path(&self.dir, parsed.path),
                )),
                Err(reason) => Err(self.malformed(reason)),
            });
        }
    }
}

impl FusedIterator for ManifestReader {}
