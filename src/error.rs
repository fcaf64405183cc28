//! Error types for TOC synchronization.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while regenerating a table of contents.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{} not found", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("marker `{marker}` not found")]
    MarkerNotFound { marker: String },

    #[error("end marker `{marker}` must be on a later line than the start marker")]
    MarkerOnStartLine { marker: String },

    #[error("malformed topic tree {}: {reason}", .path.display())]
    MalformedTree { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify an I/O failure on `path`, promoting `NotFound` to [`Error::SourceNotFound`].
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::SourceNotFound { .. } => 2,
            Error::MarkerNotFound { .. } | Error::MarkerOnStartLine { .. } => 3,
            Error::MalformedTree { .. } | Error::Io { .. } | Error::Config { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_becomes_source_not_found() {
        let err = Error::io(
            Path::new("Writerside/mi.tree"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, Error::SourceNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Writerside/mi.tree not found");
    }

    #[test]
    fn test_marker_errors_share_exit_code() {
        let missing = Error::MarkerNotFound {
            marker: "<!-- TOC_END -->".to_string(),
        };
        let same_line = Error::MarkerOnStartLine {
            marker: "<!-- TOC_END -->".to_string(),
        };
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(same_line.exit_code(), 3);
        assert_eq!(
            same_line.to_string(),
            "end marker `<!-- TOC_END -->` must be on a later line than the start marker"
        );
    }

    #[test]
    fn test_other_io_errors_are_unclassified() {
        let err = Error::io(
            Path::new("README.md"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
