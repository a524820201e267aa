//! Line splitting and path resolution for `.hashcheck` manifests.
//!
//! # Line Format
//!
//! ```text
//! <hash><SP><length><SP><path>
//! ```
//!
//! The hash and length tokens never contain spaces, but the path may. A line
//! is therefore split at exactly the first two spaces and everything after
//! the second space is kept verbatim as the path. A generic whitespace
//! tokenizer would corrupt paths such as `./My Documents/a  b.txt`.
//!
//! # Example
//!
//! ```
//! use hashmatch::manifest::parser::{parse_line, resolve_path};
//! use std::path::Path;
//!
//! let parsed = parse_line("abc123 10 ./sub/my file.txt\n").unwrap();
//! assert_eq!(parsed.hash, "abc123");
//! assert_eq!(parsed.length, "10");
//! assert_eq!(parsed.path, "./sub/my file.txt");
//!
//! let path = resolve_path(Path::new("data/"), parsed.path);
//! assert_eq!(path, Path::new("data/sub/my file.txt"));
//! ```

use std::path::{is_separator, Path, PathBuf};

use thiserror::Error;

/// Field separator between hash, length and path.
const SEPARATOR: char = ' ';

/// Prefix stripped from the path field before joining.
const CURRENT_DIR_PREFIX: &str = "./";

/// Reasons a manifest line cannot be split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// No space at all: only a hash (or garbage) is present.
    #[error("missing length field")]
    MissingLength,

    /// Only one space: hash and length are present but there is no path.
    #[error("missing path field")]
    MissingPath,

    /// A field is empty (e.g. a line starting with a space, or a path
    /// field that names nothing beyond `./`).
    #[error("empty {0} field")]
    EmptyField(&'static str),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// The three raw fields of one manifest line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Opaque hash token
    pub hash: &'a str,
    /// Length token, kept as text
    pub length: &'a str,
    /// Raw path field, verbatim (may contain spaces)
    pub path: &'a str,
}

/// Strip the line terminator (`\n`, optionally preceded by `\r`).
#[must_use]
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split one manifest line at its first two spaces.
///
/// The trailing line terminator is removed first. The path field is
/// everything after the second space, unchanged.
///
/// # Errors
///
/// Returns [`LineError`] if the line has fewer than two spaces, if the
/// hash or length token is empty, or if the path field names no file.
pub fn parse_line(line: &str) -> Result<ParsedLine<'_>, LineError> {
    let line = strip_line_terminator(line);

    let (hash, rest) = line
        .split_once(SEPARATOR)
        .ok_or(LineError::MissingLength)?;
    let (length, path) = rest.split_once(SEPARATOR).ok_or(LineError::MissingPath)?;

    if hash.is_empty() {
        return Err(LineError::EmptyField("hash"));
    }
    if length.is_empty() {
        return Err(LineError::EmptyField("length"));
    }
    if relative_part(path).is_empty() {
        return Err(LineError::EmptyField("path"));
    }

    Ok(ParsedLine { hash, length, path })
}

/// Remove trailing separators from a directory argument.
///
/// `data/` and `data` both become `data`, so joined paths never contain
/// repeated separators. A path made only of separators stays a single root
/// separator. Non-UTF-8 directory names are returned unchanged; `Path::join`
/// already avoids doubling separators for them.
#[must_use]
pub fn normalize_dir(dir: &Path) -> PathBuf {
    let Some(s) = dir.to_str() else {
        return dir.to_path_buf();
    };

    let trimmed = s.trim_end_matches(is_separator);
    if trimmed.is_empty() && !s.is_empty() {
        // "/" or "//": keep the root
        return PathBuf::from(&s[..1]);
    }
    PathBuf::from(trimmed)
}

/// Part of a raw path field that is joined onto the directory.
///
/// One leading `./` is dropped, then any leading separators, so the field
/// can never replace the directory when joined.
fn relative_part(raw: &str) -> &str {
    raw.strip_prefix(CURRENT_DIR_PREFIX)
        .unwrap_or(raw)
        .trim_start_matches(is_separator)
}

/// Resolve a raw manifest path field against its manifest's directory.
///
/// A single leading `./` is stripped and the remainder joined with the
/// normalized directory. Leading separators are dropped as well, so
/// `/etc/passwd` or `.//x.bin` still resolve inside `dir`.
#[must_use]
pub fn resolve_path(dir: &Path, raw: &str) -> PathBuf {
    normalize_dir(dir).join(relative_part(raw))
}
