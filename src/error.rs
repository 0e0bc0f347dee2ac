//! Failure taxonomy for the smoke procedure
//!
//! Two kinds of failure exist: "could not obtain a handle" and "could not
//! move bytes through / release a handle cleanly". Both are fatal to the
//! whole run; there is no retry and no partial-success reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the write and read phases
#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("Error opening file: {source}")]
    OpenForWrite { path: PathBuf, source: io::Error },

    #[error("Error writing file: {source}")]
    Write { path: PathBuf, source: io::Error },

    // The original harness prints a fixed message here instead of the OS
    // error, so no source is carried.
    #[error("Error opening file!")]
    OpenForRead { path: PathBuf },

    #[error("Error reading file: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Error echoing file: {source}")]
    Echo { path: PathBuf, source: io::Error },

    #[error("Error closing file: {source}")]
    Close { path: PathBuf, source: io::Error },
}

impl SmokeError {
    /// True for the read-phase open failure, which reports the fixed
    /// generic message on stdout rather than an OS error on stderr.
    pub fn is_generic(&self) -> bool {
        matches!(self, SmokeError::OpenForRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_for_write_shows_os_error() {
        let err = SmokeError::OpenForWrite {
            path: PathBuf::from("/tmp/mp/new.txt"),
            source: io::Error::from_raw_os_error(libc::ENOENT),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Error opening file: "));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_open_for_read_is_generic() {
        let err = SmokeError::OpenForRead {
            path: PathBuf::from("/tmp/mp/new.txt"),
        };
        assert_eq!(err.to_string(), "Error opening file!");
        assert!(err.is_generic());
    }

    #[test]
    fn test_close_shows_os_error() {
        let err = SmokeError::Close {
            path: PathBuf::from("/tmp/mp/new.txt"),
            source: io::Error::from_raw_os_error(libc::EBADF),
        };
        assert!(err.to_string().starts_with("Error closing file: "));
        assert!(!err.is_generic());
    }
}
