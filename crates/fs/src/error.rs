use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("cannot read file info for {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read folder {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file {} is {size} bytes, over the {limit} byte read limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("folder {} is nested deeper than {limit} levels", path.display())]
    DepthExceeded { path: PathBuf, limit: usize },
}

impl FsError {
    pub fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn list_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::ListDir {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FsError::Read {
            path: path.into(),
            source,
        }
    }

    /// Underlying I/O error kind, if this failure came from the OS.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            FsError::Stat { source, .. }
            | FsError::ListDir { source, .. }
            | FsError::Read { source, .. } => Some(source.kind()),
            FsError::TooLarge { .. } | FsError::DepthExceeded { .. } => None,
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;
