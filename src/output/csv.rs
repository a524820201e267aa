//! CSV output formatter for match results.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! One row is generated for each match, with a header row naming the same
//! nine columns as the tab-separated format:
//!
//! `hash,len1,len2,dir1,dir2,base1,base2,path1,path2`
//!
//! Fields containing commas, quotes or newlines are quoted.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::MatchReport;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    hash: &'a str,
    len1: &'a str,
    len2: &'a str,
    dir1: &'a str,
    dir2: &'a str,
    base1: &'a str,
    base2: &'a str,
    path1: &'a str,
    path2: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    reports: &'a [MatchReport],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(reports: &'a [MatchReport]) -> Self {
        Self { reports }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.reports.is_empty() {
            // serialize() emits the header with the first row only
            csv_writer.write_record([
                "hash", "len1", "len2", "dir1", "dir2", "base1", "base2", "path1", "path2",
            ])?;
        }

        for report in self.reports {
            let fields = report.fields();
            let row = CsvRow {
                hash: &fields[0],
                len1: &fields[1],
                len2: &fields[2],
                dir1: &fields[3],
                dir2: &fields[4],
                base1: &fields[5],
                base2: &fields[6],
                path1: &fields[7],
                path2: &fields[8],
            };
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
