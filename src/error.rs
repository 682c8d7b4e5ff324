//! Error types for qrlogo operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrlogo's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for QR generation
#[derive(Error, Debug)]
pub enum Error {
    /// The text to encode was empty or whitespace only
    #[error("No text was provided for the QR code")]
    EmptyPayload,

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console prompt failed
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

/// Failure to load a logo overlay.
///
/// Never escapes the compositor: the pipeline downgrades it to a warning.
#[derive(Error, Debug)]
pub enum LogoError {
    /// The logo file could not be opened or read
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// Logo path as given
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a decodable image
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        /// Logo path as given
        path: PathBuf,
        /// Underlying error
        #[source]
        source: image::ImageError,
    },
}
