//! Error taxonomy for bootstrap, per-URL download, and lesson mirroring.

use crate::orchestrator::RunReport;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// The working directory could not be created.
#[derive(Debug, Error)]
pub enum DirectoryCreationError {
    #[error("permission denied creating {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Something other than a directory occupies the target path.
    #[error("{} exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single URL could not be fetched into the working directory.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transfer failed: {0}")]
    Transport(#[from] curl::Error),

    #[error("GET {url} returned HTTP {code}")]
    HttpStatus { url: String, code: u32 },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The lesson mirroring step failed.
#[derive(Debug, Error)]
pub enum LessonDownloadError {
    #[error("mirroring tool `{tool}` not found on PATH")]
    ToolMissing { tool: String },

    #[error("failed to start `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{tool}` exited with {status}")]
    Failed { tool: String, status: ExitStatus },
}

/// Error that aborted a bulk download run. The message names the failing operation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("download of {url} failed")]
    Download {
        url: String,
        #[source]
        source: DownloadError,
    },

    /// The lesson step failed after the downloads; `report` holds their outcomes.
    #[error("lesson download failed")]
    Lesson {
        #[source]
        source: LessonDownloadError,
        report: RunReport,
    },
}
