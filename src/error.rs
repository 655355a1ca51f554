use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplaceError>;

#[derive(Error, Debug)]
pub enum ReplaceError {
    // Input and output failures keep the offending path
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find regex '{pattern}' in template file {}", path.display())]
    PlaceholderNotFound { pattern: String, path: PathBuf },
}

impl ReplaceError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplaceError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplaceError::Write {
            path: path.into(),
            source,
        }
    }
}
