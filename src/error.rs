//! Error types for the external scheduler commands and snapshot export.

use std::io;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure talking to the job-listing or job-cancellation command.
#[derive(Debug, Error)]
pub enum JobError {
    /// The command could not be started (missing binary, permissions, ...)
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The command ran but exited unsuccessfully. `stderr` holds whatever
    /// it printed there, trimmed.
    #[error("`{command}` exited with {status}{}", detail(.stderr))]
    Status {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    /// The command's output was not valid UTF-8
    #[error("`{command}` produced non UTF-8 output")]
    Utf8 { command: String },
}

/// Failure producing a `--export` snapshot.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no column named `{0}` in the job listing")]
    UnknownColumn(String),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to finalize CSV: {0}")]
    Io(#[from] io::Error),
    #[error("invalid UTF-8 in CSV output: {0}")]
    Utf8(#[from] FromUtf8Error),
}

fn detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
