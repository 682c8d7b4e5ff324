//! Logo overlay
//!
//! A logo is stretched to a fixed square and pasted in the middle of the QR raster.
//! Images carrying transparency (RGBA, grey+alpha, or palette images with a
//! transparent entry, which the decoders expand to RGBA) are blended through their
//! alpha channel; anything else is pasted as an opaque rectangle.

use crate::error::LogoError;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageReader, Luma, RgbImage};
use std::path::Path;

/// A logo resized to its final square, ready to paste
#[derive(Debug, Clone)]
pub struct LogoOverlay {
    /// Color content of the logo
    pub image: RgbImage,
    /// Per-pixel paste opacity, present when the source had transparency
    pub mask: Option<GrayImage>,
}

impl LogoOverlay {
    /// Build an overlay from an already decoded image, stretching it to `size`×`size`.
    pub fn from_image(source: &DynamicImage, size: u32) -> Self {
        let resized = source.resize_exact(size, size, FilterType::CatmullRom);

        let mask = resized.color().has_alpha().then(|| {
            let rgba = resized.to_rgba8();
            GrayImage::from_fn(size, size, |x, y| Luma([rgba.get_pixel(x, y)[3]]))
        });

        Self {
            image: resized.to_rgb8(),
            mask,
        }
    }

    /// Side length of the overlay in pixels
    pub fn size(&self) -> u32 {
        self.image.width()
    }
}

/// Load a logo file and resize it to `size`×`size`.
pub fn load(path: &Path, size: u32) -> Result<LogoOverlay, LogoError> {
    let io_err = |source| LogoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;

    let decoded = reader.decode().map_err(|source| LogoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Loaded logo"
    );

    Ok(LogoOverlay::from_image(&decoded, size))
}

/// Top-left corner that centers a `size` square on a `width`×`height` base.
///
/// Negative when the base is smaller than the overlay.
pub fn centered_offset(width: u32, height: u32, size: u32) -> (i64, i64) {
    (
        (i64::from(width) - i64::from(size)).div_euclid(2),
        (i64::from(height) - i64::from(size)).div_euclid(2),
    )
}

/// Paste `overlay` centered on `base`, clipping anything that falls outside it.
pub fn paste(base: &mut RgbImage, overlay: &LogoOverlay) {
    let (width, height) = base.dimensions();
    let (left, top) = centered_offset(width, height, overlay.size());

    for (x, y, logo_px) in overlay.image.enumerate_pixels() {
        let bx = left + i64::from(x);
        let by = top + i64::from(y);
        if bx < 0 || by < 0 || bx >= i64::from(width) || by >= i64::from(height) {
            continue;
        }

        let alpha = overlay
            .mask
            .as_ref()
            .map_or(255, |mask| mask.get_pixel(x, y)[0]);
        if alpha == 0 {
            continue;
        }

        let base_px = base.get_pixel_mut(bx as u32, by as u32);
        for (dst, src) in base_px.0.iter_mut().zip(logo_px.0) {
            *dst = blend(src, *dst, alpha);
        }
    }
}

/// Load the logo at `path` and paste it centered on `base`.
///
/// On error `base` is left untouched.
pub fn composite(base: &mut RgbImage, path: &Path, size: u32) -> Result<(), LogoError> {
    let overlay = load(path, size)?;
    paste(base, &overlay);
    Ok(())
}

fn blend(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(src) * a + u32::from(dst) * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    fn checkerboard(side: u32) -> RgbImage {
        RgbImage::from_fn(side, side, |x, y| {
            if (x / 7 + y / 7) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn offset_uses_integer_division() {
        assert_eq!(centered_offset(385, 385, 120), (132, 132));
        assert_eq!(centered_offset(100, 121, 120), (-10, 0));
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(blend(200, 10, 255), 200);
        assert_eq!(blend(200, 10, 0), 10);
        assert_eq!(blend(255, 0, 128), 128);
    }

    #[test]
    fn opaque_logo_is_stretched_and_has_no_mask() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 40, Rgb([10, 20, 30])));
        let overlay = LogoOverlay::from_image(&source, 120);

        assert_eq!(overlay.image.dimensions(), (120, 120));
        assert!(overlay.mask.is_none());
        assert_eq!(*overlay.image.get_pixel(60, 60), Rgb([10, 20, 30]));
    }

    #[test]
    fn alpha_logo_yields_mask() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            50,
            50,
            Rgba([255, 0, 0, 0]),
        ));
        let overlay = LogoOverlay::from_image(&source, 120);

        let mask = overlay.mask.expect("mask");
        assert_eq!(mask.dimensions(), (120, 120));
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn palette_transparency_yields_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexed.png");

        // Index 0 is a fully transparent blue, index 1 an opaque red
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 4, 4);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![0, 0, 255, 255, 0, 0]);
        encoder.set_trns(vec![0, 255]);
        let mut writer = encoder.write_header().unwrap();
        let indices: Vec<u8> = (0..16).map(|i| u8::from(i % 4 >= 2)).collect();
        writer.write_image_data(&indices).unwrap();
        writer.finish().unwrap();

        let overlay = load(&path, 4).unwrap();

        let mask = overlay.mask.expect("palette tRNS should produce a mask");
        for (x, _, alpha) in mask.enumerate_pixels() {
            let expected = if x >= 2 { 255 } else { 0 };
            assert_eq!(alpha[0], expected, "mask at column {x}");
        }
        assert_eq!(*overlay.image.get_pixel(3, 0), Rgb([255, 0, 0]));
    }

    #[test]
    fn opaque_paste_fills_centered_square_only() {
        let mut base = checkerboard(385);
        let original = base.clone();
        let overlay = LogoOverlay {
            image: RgbImage::from_pixel(120, 120, Rgb([0, 128, 255])),
            mask: None,
        };

        paste(&mut base, &overlay);

        for (x, y, px) in base.enumerate_pixels() {
            let inside = (132..252).contains(&x) && (132..252).contains(&y);
            if inside {
                assert_eq!(*px, Rgb([0, 128, 255]));
            } else {
                assert_eq!(px, original.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn transparent_pixels_leave_base_untouched() {
        let mut base = checkerboard(385);
        let original = base.clone();
        let mask = GrayImage::from_fn(120, 120, |x, _| Luma([if x < 60 { 0 } else { 255 }]));
        let overlay = LogoOverlay {
            image: RgbImage::from_pixel(120, 120, Rgb([9, 9, 9])),
            mask: Some(mask),
        };

        paste(&mut base, &overlay);

        for y in 132..252 {
            for x in 132..192 {
                assert_eq!(base.get_pixel(x, y), original.get_pixel(x, y));
            }
            for x in 192..252 {
                assert_eq!(*base.get_pixel(x, y), Rgb([9, 9, 9]));
            }
        }
    }

    #[test]
    fn paste_clips_on_small_base() {
        let mut base = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        let overlay = LogoOverlay {
            image: RgbImage::from_pixel(120, 120, Rgb([1, 2, 3])),
            mask: None,
        };
        paste(&mut base, &overlay);
        assert!(base.pixels().all(|p| *p == Rgb([1, 2, 3])));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut base = checkerboard(385);
        let original = base.clone();
        let err = composite(&mut base, Path::new("/definitely/not/here.png"), 120).unwrap_err();
        assert!(matches!(err, LogoError::Io { .. }));
        assert_eq!(base, original);
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();

        let err = load(&path, 120).unwrap_err();
        assert!(matches!(err, LogoError::Decode { .. }));
    }
}
