//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for restodash operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The input has no header row to resolve columns against
    #[error("Missing header row in {source_name}")]
    MissingHeader { source_name: String },

    /// Malformed delimited input
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a file system error that keeps the underlying I/O error
    pub fn file_system_io(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a missing-header error for the named input
    pub fn missing_header(source_name: impl Into<String>) -> Self {
        Self::MissingHeader {
            source_name: source_name.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_header_names_source() {
        let err = Error::missing_header("listings.csv");
        assert_eq!(err.to_string(), "Missing header row in listings.csv");
    }

    #[test]
    fn test_file_system_io_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_system_io("Failed to read input file", "/data/x.csv", io);
        assert_eq!(err.to_string(), "File system error: Failed to read input file");
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
