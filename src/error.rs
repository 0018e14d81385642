//! Error types for pdfoutline.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a document or configuring the classifier.
///
/// Classification itself never fails; every variant here comes from the
/// layout side (loading and decoding the PDF), from serialization, or from
/// a bad configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading inputs or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF library failed to load or decode the document.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text could not be extracted from a page.
    #[error("Text extraction error on page {page}: {message}")]
    TextExtract {
        /// 0-indexed page
        page: u32,
        /// Underlying failure
        message: String,
    },

    /// Serializing an outline failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The classifier configuration is invalid or unreadable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
