//! QR code encoding and decoding
//!
//! Encoding rasterizes straight to an RGB image with the fixed box size and border
//! from [`RenderOptions`](crate::config::RenderOptions). Decoding exists to verify
//! what was written.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::{DARK, EncodedQr, LIGHT, QrEncoder, raster_side};

use serde::{Deserialize, Serialize};

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
