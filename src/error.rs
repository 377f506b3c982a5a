//! Error types for jsongather
//!
//! Per-file failures ([`FileError`]) never stop other files; they are joined into a
//! [`RunOutcome`] together with the single fatal [`EnumerationError`], if any.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bytes did not parse into a [`Record`](crate::Record).
#[derive(Error, Debug)]
#[error("malformed record: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Failure while discovering candidate files. Fatal to the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error walking {}: {message}", .path.display())]
pub struct EnumerationError {
    pub path: PathBuf,
    pub message: String,
}

/// Failure for one selected file. Isolated: other files keep flowing.
#[derive(Error, Debug)]
pub enum FileError {
    /// Open/read failed (or the worker for it could not be started)
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size guard; not read
    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Content is not a valid record
    #[error("decoding {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// Worker thread panicked before delivering a record
    #[error("decode worker for {} panicked", .path.display())]
    WorkerPanicked { path: PathBuf },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::Io { path, .. }
            | FileError::TooLarge { path, .. }
            | FileError::Decode { path, .. }
            | FileError::WorkerPanicked { path } => path,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FileError::Decode { .. })
    }
}

/// Joined result of a full run: empty on success.
///
/// Displays one line per contributing failure (enumeration first), so the
/// whole set can be surfaced once as a single error.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub enumeration: Option<EnumerationError>,
    pub file_errors: Vec<FileError>,
    /// Stopped by an external cancel (e.g. Ctrl+C), not by a walk failure.
    pub cancelled: bool,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.enumeration.is_none() && self.file_errors.is_empty() && !self.cancelled
    }

    /// Enumeration error (0 or 1) plus per-file errors.
    pub fn error_count(&self) -> usize {
        usize::from(self.enumeration.is_some()) + self.file_errors.len()
    }

    pub fn into_result(self) -> Result<(), RunOutcome> {
        if self.is_success() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "no errors");
        }
        let mut lines: Vec<String> = Vec::with_capacity(self.error_count() + 1);
        if self.cancelled {
            lines.push("run cancelled before all files were processed".to_string());
        }
        if let Some(e) = &self.enumeration {
            lines.push(e.to_string());
        }
        lines.extend(self.file_errors.iter().map(|e| e.to_string()));
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for RunOutcome {}
