//! Output formatters for match results.
//!
//! This module provides different output formats:
//! - TSV, the default: streamed line by line with per-directory diagnostics
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use hashmatch::duplicates::MatchFinder;
//! use hashmatch::output::TsvOutput;
//! use std::io::BufWriter;
//! use std::path::PathBuf;
//!
//! let stdout = std::io::stdout();
//! let mut output = TsvOutput::new(BufWriter::new(stdout.lock()));
//! let finder = MatchFinder::with_defaults();
//! finder.run(&[PathBuf::from("A"), PathBuf::from("B")], &mut output).unwrap();
//! output.flush().unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod tsv;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::tsv::TsvOutput;
