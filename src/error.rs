//! Error types for the formsense library.

use std::io;
use thiserror::Error;

/// Result type alias for formsense operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during block-graph analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding a block-graph JSON document.
    #[error("Block graph decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The block-graph document has an unusable shape.
    #[error("Invalid block graph: {0}")]
    InvalidBlockGraph(String),

    /// The analysis provider failed for a page.
    #[error("Provider '{provider}' failed: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Failure description
        message: String,
    },

    /// The analysis provider did not answer within the page timeout.
    #[error("Page {page} timed out after {seconds}s")]
    PageTimeout {
        /// Page number (1-indexed)
        page: u32,
        /// Configured timeout in seconds
        seconds: u64,
    },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error serializing analysis output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::PageTimeout {
            page: 2,
            seconds: 60,
        };
        assert_eq!(err.to_string(), "Page 2 timed out after 60s");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
