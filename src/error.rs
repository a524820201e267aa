//! Process exit codes and structured error output.
//!
//! Per-directory problems (missing or unreadable manifests, skipped lines)
//! are diagnostics only and never change the exit code.

use serde::Serialize;

/// Exit codes for the hashmatch application.
///
/// - 0: Success (every directory was visited)
/// - 1: General error (strict-mode manifest error, output failure, ...)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the run completed.
    Success = 0,
    /// General error: the run was aborted.
    GeneralError = 1,
    /// Interrupted: the run was interrupted by user (Ctrl+C), 128 + SIGINT.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "HM000",
            Self::GeneralError => "HM001",
            Self::Interrupted => "HM130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "HM001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the run was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

/// Pick the exit code for an error that aborted the run.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let interrupted = err
        .downcast_ref::<crate::duplicates::FinderError>()
        .is_some_and(|e| matches!(e, crate::duplicates::FinderError::Interrupted));
    if interrupted {
        ExitCode::Interrupted
    } else {
        ExitCode::GeneralError
    }
}
