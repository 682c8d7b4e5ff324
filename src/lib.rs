//! qrlogo - QR code generator with a centered logo overlay
//!
//! Encodes text or a URL into a black-on-white QR code (version 8 or larger,
//! 7 px modules, 3-module quiet zone), optionally pastes a logo stretched to
//! 120×120 in the middle, and writes the result as PNG.
//!
//! # Features
//!
//! - **Forgiving paths**: quoted or drag-and-dropped paths, bare directories and
//!   missing extensions all resolve to a concrete `.png` file
//! - **Logo overlay**: alpha-aware blending; a broken logo never prevents the QR
//! - **Verification**: optionally decode the written file back
//!
//! # Example
//!
//! ```no_run
//! use qrlogo::{GenerationRequest, QrPipeline, path};
//!
//! fn main() -> anyhow::Result<()> {
//!     let output = path::resolve("qr_codes/");
//!     let request = GenerationRequest::new("https://example.com", None, output)?;
//!     let report = QrPipeline::default().generate(request)?;
//!
//!     println!("Written to {}", report.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod logo;
pub mod output;
pub mod path;
pub mod pipeline;
pub mod qr;
pub mod session;

// Re-exports for convenience
pub use error::{Error, LogoError, Result};

pub use config::{LogRotation, LoggingOptions, QrLogoConfig, RenderOptions};
pub use logo::LogoOverlay;
pub use pipeline::{GenerationReport, GenerationRequest, QrPipeline};
pub use qr::{EncodedQr, QrDecoder, QrEncoder, QrPayload};
pub use session::{InteractiveSession, Prompter, SessionSummary};
