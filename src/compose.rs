//! # Logo Compositing
//!
//! Places a logo in the middle of a rendered QR raster.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────── W ────────────────┐
//! │                                   │
//! │          (W-s)/2                  │
//! │         ├──────┼── s ──┤          │
//! │                ┌───────┐          │
//! │                │ logo  │ s = W/5  │
//! │                └───────┘          │
//! │                                   │
//! └───────────────────────────────────┘
//! ```
//!
//! Layers are stacked on an opaque white canvas and the result is flattened
//! to RGB, so composites never carry transparency.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::config::OutputProfile;
use crate::error::{LogoQrError, Result};
use crate::qr::EncodedQr;
use crate::raster::write_png;

/// Logo side as a percentage of the QR raster width.
pub const LOGO_PERCENT: u32 = 20;

/// Where the logo goes on the QR raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    /// Side of the (square) logo in pixels
    pub size: u32,
}

/// Compute the centered logo square for a `width` × `height` raster.
pub fn logo_placement(width: u32, height: u32) -> Result<Placement> {
    let size = width * LOGO_PERCENT / 100;
    if size == 0 || size > height {
        return Err(LogoQrError::InvalidPlacement(format!(
            "{}x{} raster cannot hold a {}% logo",
            width, height, LOGO_PERCENT
        )));
    }
    Ok(Placement {
        x: (width - size) / 2,
        y: (height - size) / 2,
        size,
    })
}

/// Paste `layer` at (x, y), blending through its alpha channel when it has one.
fn paste(canvas: &mut RgbaImage, layer: &DynamicImage, x: u32, y: u32) {
    let top = layer.to_rgba8();
    if layer.color().has_alpha() {
        imageops::overlay(canvas, &top, x as i64, y as i64);
    } else {
        imageops::replace(canvas, &top, x as i64, y as i64);
    }
}

/// Composite `logo` onto the center of `qr`.
///
/// The logo is resized to a square with Lanczos3 regardless of its aspect
/// ratio. Returns the flattened image and where the logo landed.
pub fn composite(qr: &DynamicImage, logo: &DynamicImage) -> Result<(RgbImage, Placement)> {
    let (width, height) = (qr.width(), qr.height());
    let placement = logo_placement(width, height)?;

    let logo = logo.resize_exact(placement.size, placement.size, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    paste(&mut canvas, qr, 0, 0);
    paste(&mut canvas, &logo, placement.x, placement.y);

    Ok((DynamicImage::ImageRgba8(canvas).to_rgb8(), placement))
}

/// What [`create_qr_with_logo`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeReport {
    pub width: u32,
    pub height: u32,
    pub placement: Placement,
}

/// Render `qr` at the profile's scale, put `logo` in the middle and save it.
///
/// A failed write may leave a partial file behind.
pub fn create_qr_with_logo(
    qr: &EncodedQr,
    logo: &DynamicImage,
    output: &Path,
    profile: &OutputProfile,
) -> Result<CompositeReport> {
    let raster = DynamicImage::ImageLuma8(qr.render_raster(profile.scale));
    let (width, height) = (raster.width(), raster.height());

    let (composed, placement) = composite(&raster, logo)?;
    write_png(&DynamicImage::ImageRgb8(composed), output, profile.dpi)?;

    debug!(
        profile = profile.name,
        width,
        height,
        logo = placement.size,
        "composited qr"
    );
    Ok(CompositeReport {
        width,
        height,
        placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{QrErrorLevel, QrPayload};
    use image::{GrayImage, Luma, Rgb};
    use pretty_assertions::assert_eq;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn red_logo(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, RED))
    }

    fn is_red(px: &Rgb<u8>) -> bool {
        px[0] > 200 && px[1] < 60 && px[2] < 60
    }

    /// (min_x, min_y, max_x, max_y) of red pixels, inclusive.
    fn red_bounds(img: &RgbImage) -> (u32, u32, u32, u32) {
        let mut bounds = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, px) in img.enumerate_pixels() {
            if is_red(px) {
                bounds.0 = bounds.0.min(x);
                bounds.1 = bounds.1.min(y);
                bounds.2 = bounds.2.max(x);
                bounds.3 = bounds.3.max(y);
            }
        }
        bounds
    }

    #[test]
    fn test_placement_is_centered_fifth() {
        assert_eq!(
            logo_placement(1000, 1000).unwrap(),
            Placement { x: 400, y: 400, size: 200 }
        );
        assert_eq!(
            logo_placement(530, 530).unwrap(),
            Placement { x: 212, y: 212, size: 106 }
        );
        // Non-square raster: size follows width, offset follows each axis
        assert_eq!(
            logo_placement(500, 300).unwrap(),
            Placement { x: 200, y: 100, size: 100 }
        );
    }

    #[test]
    fn test_placement_too_small() {
        assert!(matches!(
            logo_placement(4, 4),
            Err(LogoQrError::InvalidPlacement(_))
        ));
    }

    #[test]
    fn test_logo_bounding_box() {
        let qr = QrPayload::new("https://example.com", QrErrorLevel::H)
            .encode()
            .unwrap();
        let raster = DynamicImage::ImageLuma8(qr.render_raster(10));
        let w = raster.width();

        let (out, placement) = composite(&raster, &red_logo(64, 48)).unwrap();

        let size = w / 5;
        let offset = (w - size) / 2;
        assert_eq!(placement, Placement { x: offset, y: offset, size });
        assert_eq!(red_bounds(&out), (offset, offset, offset + size - 1, offset + size - 1));
    }

    #[test]
    fn test_composite_is_opaque_rgb() {
        let qr = GrayImage::from_pixel(50, 50, Luma([0]));
        let (out, _) = composite(&DynamicImage::ImageLuma8(qr), &red_logo(10, 10)).unwrap();
        assert_eq!(out.dimensions(), (50, 50));
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(25, 25), &RED);
    }

    #[test]
    fn test_transparent_qr_shows_white_canvas() {
        let qr = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        let logo = red_logo(4, 4);
        let (out, _) = composite(&DynamicImage::ImageRgba8(qr), &logo).unwrap();
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_transparent_logo_leaves_qr_visible() {
        let qr = GrayImage::from_fn(40, 40, |x, _| Luma([if x % 2 == 0 { 0 } else { 255 }]));
        let logo = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 0]));
        let qr = DynamicImage::ImageLuma8(qr);

        let (out, _) = composite(&qr, &DynamicImage::ImageRgba8(logo)).unwrap();

        assert_eq!(out, qr.to_rgb8());
    }

    #[test]
    fn test_create_qr_with_logo_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        let qr = QrPayload::new("hello", QrErrorLevel::H).encode().unwrap();

        let report =
            create_qr_with_logo(&qr, &red_logo(30, 30), &path, &OutputProfile::PRINT).unwrap();

        assert_eq!(report.width, (qr.width() + 8) * 20);
        assert_eq!(report.height, report.width);
        assert_eq!(report.placement, logo_placement(report.width, report.height).unwrap());
        let back = image::open(&path).unwrap();
        assert!(!back.color().has_alpha());
        assert_eq!(crate::raster::read_png_dpi(&path).unwrap(), Some(300));
    }
}
