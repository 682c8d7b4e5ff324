//! Generation pipeline: encode, overlay the logo, save, optionally verify

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::logo;
use crate::qr::{QrDecoder, QrEncoder};
use image::ImageFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything needed for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    payload: String,
    logo_path: Option<PathBuf>,
    output_path: PathBuf,
}

impl GenerationRequest {
    /// Build a request, rejecting blank payloads.
    ///
    /// An empty logo path counts as no logo. `output_path` is used as given; run user
    /// input through [`crate::path::resolve`] first.
    pub fn new(
        payload: impl Into<String>,
        logo_path: Option<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let payload = payload.into();
        if payload.trim().is_empty() {
            return Err(Error::EmptyPayload);
        }

        Ok(Self {
            payload,
            logo_path: logo_path.filter(|p| !p.as_os_str().is_empty()),
            output_path: output_path.into(),
        })
    }

    /// Text to encode
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Optional logo to overlay
    pub fn logo_path(&self) -> Option<&Path> {
        self.logo_path.as_deref()
    }

    /// Destination PNG path
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Outcome of a successful generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Where the PNG was written
    pub path: PathBuf,
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
    /// QR version used
    pub version: i16,
    /// Whether a logo was pasted
    pub logo_applied: bool,
    /// Why the requested logo could not be pasted
    pub logo_warning: Option<String>,
    /// Result of decoding the saved file, when verification ran
    pub verified: Option<bool>,
}

/// Encodes requests and writes them to disk
pub struct QrPipeline {
    options: RenderOptions,
    encoder: QrEncoder,
    verify: bool,
}

impl QrPipeline {
    /// Create a pipeline with the given layout
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            encoder: QrEncoder::with_options(options),
            verify: false,
        }
    }

    /// Decode each saved file and compare it against the payload
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Run one generation.
    ///
    /// Logo problems are reported in the returned [`GenerationReport`]; only encoding
    /// and save failures are errors.
    pub fn generate(&self, request: GenerationRequest) -> Result<GenerationReport> {
        let encoded = self.encoder.encode_str(request.payload())?;
        let mut image = encoded.image;

        let mut logo_applied = false;
        let mut logo_warning = None;
        if let Some(logo_path) = request.logo_path() {
            let logo_size = self.options.logo_size.min(image.width());
            match logo::composite(&mut image, logo_path, logo_size) {
                Ok(()) => logo_applied = true,
                Err(err) => {
                    tracing::warn!("Could not add logo: {err}");
                    logo_warning = Some(err.to_string());
                }
            }
        }

        let path = request.output_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image.save_with_format(&path, ImageFormat::Png)?;

        let (width, height) = image.dimensions();
        tracing::info!(
            path = %path.display(),
            width,
            height,
            version = encoded.version,
            logo_applied,
            "QR code written"
        );

        let verified = self.verify.then(|| self.verify_saved(&path, &request.payload));

        Ok(GenerationReport {
            path,
            width,
            height,
            version: encoded.version,
            logo_applied,
            logo_warning,
            verified,
        })
    }

    fn verify_saved(&self, path: &Path, payload: &str) -> bool {
        match QrDecoder::new().decode_file(path) {
            Ok(decoded) if decoded.as_str() == Some(payload) => true,
            Ok(_) => {
                tracing::warn!(path = %path.display(), "Saved QR decodes to different content");
                false
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "Saved QR could not be decoded: {err}");
                false
            }
        }
    }
}

impl Default for QrPipeline {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
