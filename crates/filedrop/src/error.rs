//! Error types for filedrop

use std::path::{Path, PathBuf};

use crate::parse::TargetKind;

/// Result type for filedrop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving values and files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operator channel could not produce a line (closed, unreadable).
    #[error("Input channel failed: {source}")]
    Channel {
        #[source]
        source: std::io::Error,
    },

    /// Raw answer text does not fit the requested type.
    #[error("Cannot read {raw:?} as {kind}: {reason}")]
    Parse {
        kind: TargetKind,
        raw: String,
        reason: String,
    },

    /// Creating the destination or copying into it failed during an import,
    /// or the operator ran out of source attempts.
    #[error(
        "Failed to import {} into {}: {source}",
        .source_path.display(),
        .destination.display()
    )]
    Import {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation kept failing until the retry limit was reached.
    #[error(
        "Cannot create directory {} after {attempts} attempt(s): {source}",
        .path.display()
    )]
    Directory {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from filedrop-fs
    #[error(transparent)]
    Fs(#[from] filedrop_fs::Error),
}

impl Error {
    pub(crate) fn channel(source: std::io::Error) -> Self {
        Self::Channel { source }
    }

    pub(crate) fn parse(kind: TargetKind, raw: &str, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            kind,
            raw: raw.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Turn a filesystem failure met during an import into [`Error::Import`].
    ///
    /// Channel and directory errors raised by nested prompts pass through.
    pub(crate) fn during_import(self, source_path: &Path, destination: &Path) -> Self {
        match self {
            Self::Fs(fs) => match fs.into_io() {
                Ok((_, source)) => Self::Import {
                    source_path: source_path.to_path_buf(),
                    destination: destination.to_path_buf(),
                    source,
                },
                Err(other) => Self::Fs(other),
            },
            other => other,
        }
    }
}
