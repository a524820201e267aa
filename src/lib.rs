//! hashmatch - duplicate detection from precomputed hash manifests
//!
//! Every directory handed to hashmatch carries a `.hashcheck` manifest
//! listing `<hash> <length> <path>` for each of its files. The manifests are
//! read in order into one hash-keyed index, and every file whose hash and
//! length equal those of an earlier file is reported, paired with the first
//! such file. No file content is read or hashed.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod signal;

use std::io::{self, BufWriter};

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{CollectingSink, MatchFinder};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TsvOutput};

/// Run the application for parsed command-line arguments.
///
/// Results are written to stdout, diagnostics to stderr through the logger.
///
/// # Errors
///
/// Returns an error if the run is interrupted, if strict mode rejects a
/// manifest, or if the output cannot be written. Missing manifests are not
/// errors.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.no_color);

    let handler = signal::install_handler()?;
    let config = cli.finder_config().with_shutdown_flag(handler.get_flag());
    let finder = MatchFinder::new(config);

    log::debug!(
        "Processing {} director{} with {} output",
        cli.dirs.len(),
        if cli.dirs.len() == 1 { "y" } else { "ies" },
        cli.output
    );

    let stdout = io::stdout();
    match cli.output {
        OutputFormat::Tsv => {
            let mut output = TsvOutput::new(BufWriter::new(stdout.lock()));
            let result = finder.run(&cli.dirs, &mut output);
            // Keep whatever was produced before an interruption
            let flushed = output.flush();
            result?;
            flushed.context("Failed to write output")?;
        }
        OutputFormat::Json => {
            let mut collected = CollectingSink::default();
            let summary = finder.run(&cli.dirs, &mut collected)?;
            JsonOutput::new(&collected, &summary, ExitCode::Success)
                .write_to(&mut stdout.lock(), cli.pretty)?;
        }
        OutputFormat::Csv => {
            let mut collected = CollectingSink::default();
            finder.run(&cli.dirs, &mut collected)?;
            for event in &collected.directories {
                log::info!("{}", output::tsv::format_directory(event));
            }
            CsvOutput::new(&collected.matches).write_to(stdout.lock())?;
        }
    }

    Ok(ExitCode::Success)
}
