//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while pruning a [`PathSet`](crate::domain::model::PathSet).
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("path does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to stat {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid anchor pattern")]
    Pattern(#[from] regex::Error),
}

impl PruneError {
    /// Wrap an IO error raised for `path`, folding missing entries into [`PruneError::NotFound`].
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            PruneError::NotFound { path }
        } else {
            PruneError::Stat { path, source }
        }
    }
}

/// Error returned when a configuration or CLI value cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown match mode '{0}'")]
    UnknownMatchMode(String),
    #[error("unknown report format '{0}'")]
    UnknownFormat(String),
}
