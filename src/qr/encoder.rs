//! QR code encoder

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};

/// Module fill color
pub const DARK: Rgb<u8> = Rgb([0, 0, 0]);
/// Background and quiet zone color
pub const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// Error correction level used for every code
const EC_LEVEL: EcLevel = EcLevel::M;

/// A rasterized QR code together with the symbol version it was encoded at
#[derive(Debug, Clone)]
pub struct EncodedQr {
    /// Black-on-white raster
    pub image: RgbImage,
    /// QR version actually used (at least the configured floor)
    pub version: i16,
}

/// QR code encoder
pub struct QrEncoder {
    options: RenderOptions,
}

impl QrEncoder {
    /// Create an encoder with the default layout (version 8, 7px modules, 3-module border)
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create an encoder with a specific layout
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Encode text into a black-on-white RGB raster.
    pub fn encode_str(&self, data: &str) -> Result<EncodedQr> {
        self.encode(data.as_bytes())
    }

    /// Encode bytes into a black-on-white RGB raster.
    ///
    /// The configured version is a floor: data that does not fit is re-encoded at the
    /// smallest version that holds it.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedQr> {
        let floor = Version::Normal(self.options.min_version);
        let code = match QrCode::with_version(data, floor, EC_LEVEL) {
            Ok(code) => code,
            Err(QrError::DataTooLong) => {
                tracing::debug!(
                    min_version = self.options.min_version,
                    length = data.len(),
                    "Payload exceeds version floor, selecting a larger version"
                );
                QrCode::with_error_correction_level(data, EC_LEVEL)?
            }
            Err(other) => return Err(other.into()),
        };

        let version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };

        Ok(EncodedQr {
            image: self.rasterize(&code)?,
            version,
        })
    }

    fn rasterize(&self, code: &QrCode) -> Result<RgbImage> {
        let box_size = self.options.box_size;
        let border = self.options.border;
        let modules = code.width() as u32;
        let side = raster_side(modules, &self.options)?;

        let mut image = RgbImage::from_pixel(side, side, LIGHT);
        for (index, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let x = index as u32 % modules;
            let y = index as u32 / modules;
            let px = (x + border) * box_size;
            let py = (y + border) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    image.put_pixel(px + dx, py + dy, DARK);
                }
            }
        }
        Ok(image)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Side length in pixels of a code with `modules` modules per side.
pub fn raster_side(modules: u32, options: &RenderOptions) -> Result<u32> {
    options
        .border
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(modules))
        .and_then(|cells| cells.checked_mul(options.box_size))
        .ok_or_else(|| {
            Error::QrEncode(format!(
                "{modules} modules with border {} at {} px per module exceeds the maximum image size",
                options.border, options.box_size
            ))
        })
}
