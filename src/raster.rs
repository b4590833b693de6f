//! PNG encoding with optional `pHYs` resolution metadata.
//!
//! The `image` crate writes PNG fine but has no way to attach a physical
//! resolution, so files that need a DPI tag go through `png` directly.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use image::DynamicImage;
use png::{BitDepth, ColorType, PixelDimensions, Unit};
use tracing::debug;

use crate::config::{dpi_to_ppm, ppm_to_dpi};
use crate::error::Result;

/// Write `img` as an 8-bit PNG, tagging it with `dpi` when given.
///
/// 8-bit L, LA, RGB and RGBA buffers are written as-is. Anything else
/// (16-bit, float) is widened to RGBA8 first.
pub fn write_png(img: &DynamicImage, path: &Path, dpi: Option<u32>) -> Result<()> {
    let (color, bytes) = match img {
        DynamicImage::ImageLuma8(buf) => (ColorType::Grayscale, buf.as_raw().clone()),
        DynamicImage::ImageLumaA8(buf) => (ColorType::GrayscaleAlpha, buf.as_raw().clone()),
        DynamicImage::ImageRgb8(buf) => (ColorType::Rgb, buf.as_raw().clone()),
        DynamicImage::ImageRgba8(buf) => (ColorType::Rgba, buf.as_raw().clone()),
        other => {
            debug!(color = ?other.color(), "widening to rgba8 for png output");
            (ColorType::Rgba, other.to_rgba8().into_raw())
        }
    };

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, img.width(), img.height());
    encoder.set_color(color);
    encoder.set_depth(BitDepth::Eight);
    if let Some(dpi) = dpi {
        let ppm = dpi_to_ppm(dpi);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: Unit::Meter,
        }));
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bytes)?;
    writer.finish()?;

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        ?dpi,
        "wrote png"
    );
    Ok(())
}

/// Read the DPI declared in a PNG's `pHYs` chunk.
///
/// Returns `None` when the chunk is absent or only states an aspect ratio.
pub fn read_png_dpi(path: &Path) -> Result<Option<u32>> {
    let decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    let reader = decoder.read_info()?;
    Ok(reader
        .info()
        .pixel_dims
        .filter(|dims| dims.unit == Unit::Meter)
        .map(|dims| ppm_to_dpi(dims.xppu)))
}
