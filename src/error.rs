//! Error types for gdocs2md library.

use std::io;
use thiserror::Error;

/// Result type alias for gdocs2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting a document.
///
/// Nothing in the crate retries: the first error aborts the conversion of
/// the current document and is returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document source could not return a document.
    #[error("Unable to retrieve document: {0}")]
    Fetch(String),

    /// An embedded image could not be downloaded or persisted.
    #[error("Unable to download image {uri}: {reason}")]
    Image {
        /// Source URI of the image
        uri: String,
        /// What went wrong
        reason: String,
    },

    /// The document references a structure it does not declare.
    #[error("Malformed document: {0}")]
    MalformedInput(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an image error for the given source URI.
    pub fn image(uri: impl Into<String>, reason: impl ToString) -> Self {
        Error::Image {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }
}
