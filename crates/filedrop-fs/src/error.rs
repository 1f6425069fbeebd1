//! Error types for filedrop-fs

use std::path::PathBuf;

/// Result type for filedrop-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in filedrop-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The kind of the underlying I/O failure, if this is an I/O error.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Whether this error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::NotFound)
    }

    /// Split an I/O error into its path and source, handing other errors back.
    pub fn into_io(self) -> std::result::Result<(PathBuf, std::io::Error), Self> {
        match self {
            Self::Io { path, source } => Ok((path, source)),
            other => Err(other),
        }
    }
}
