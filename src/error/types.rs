//! Error types
//!
//! Defines the storage error and the coarse failure taxonomy callers can match on.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Coarse failure classes every [`StorageError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unmounted,
    NotFound,
    Io,
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unmounted => write!(f, "unmounted"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Io => write!(f, "i/o failure"),
            ErrorKind::Decode => write!(f, "decode failure"),
        }
    }
}

/// Storage module errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("External storage is not mounted")]
    Unmounted,

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Path escapes its base directory: {0}")]
    PathEscape(String),

    #[error("Private directory is unavailable")]
    NoPrivateDir,

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

impl StorageError {
    /// Wraps an I/O error, promoting `NotFound` to [`StorageError::NotFound`].
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(path.to_path_buf())
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Classifies this error into the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Unmounted => ErrorKind::Unmounted,
            StorageError::NotFound(_) | StorageError::NotAFile(_) => ErrorKind::NotFound,
            StorageError::Decode(_) => ErrorKind::Decode,
            StorageError::PathEscape(_)
            | StorageError::NoPrivateDir
            | StorageError::Io { .. }
            | StorageError::Encode(_) => ErrorKind::Io,
        }
    }
}

/// Result alias used throughout the crate
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_is_promoted() {
        let err = StorageError::io(
            Path::new("/sd/missing.bin"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_io_other_stays_io() {
        let err = StorageError::io(
            Path::new("/sd/locked.bin"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/sd/locked.bin"));
    }

    #[test]
    fn test_unmounted_kind() {
        assert_eq!(StorageError::Unmounted.kind(), ErrorKind::Unmounted);
        assert_eq!(ErrorKind::Unmounted.to_string(), "unmounted");
    }
}
