//! Error types for the preparation pipeline
//!
//! Fatal conditions are [`PrepError`]; a failing `dtc` run is a
//! [`ToolError`] and only gets reported.

use dtsprep_core::RewriteError;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Fatal pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// A required source file is absent
    #[error("file \"{}\" doesn't exist", path.display())]
    MissingFile { path: PathBuf },

    /// The file to rewrite is absent; fatal even when ignoring errors
    #[error("can't find file \"{}\"", path.display())]
    MissingRewriteTarget { path: PathBuf },

    /// No output name can be derived from the path
    #[error("can't rename \"{}\": path has no file name", path.display())]
    InvalidFileName { path: PathBuf },

    /// The rewrite target could not be read
    #[error("can't read \"{}\"", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination file could not be created
    #[error("can't open file \"{}\"", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewritten file could not be moved into place
    #[error("can't save file \"{}\"", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rewrite pass failed
    #[error("rewrite failed")]
    Rewrite(#[from] RewriteError),

    /// Console output failed
    #[error("failed to write report")]
    Report(#[source] std::io::Error),
}

impl PrepError {
    /// Create missing file error
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Process exit status for this error
    ///
    /// Every fatal condition currently shares status 1.
    #[inline]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Failures of the external device-tree compiler
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The program could not be started
    #[error("can't run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure
    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },
}
