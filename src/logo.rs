//! # Logo Loading and Conversion
//!
//! Decodes the source logo, optionally knocks out its near-white background,
//! and re-encodes it losslessly as PNG tagged with a print resolution.
//!
//! ## Pipeline
//!
//! ```text
//! logo.jpeg ─→ decode ─→ [knockout_white] ─→ PNG + pHYs ─→ logo_for_qr.png
//! ```
//!
//! The format is sniffed from the file contents, so a PNG saved with a
//! `.jpeg` extension still loads.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use tracing::{debug, info};

use crate::config::DEFAULT_DPI;
use crate::error::{LogoQrError, Result};
use crate::raster::write_png;

/// Options for [`convert_logo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// DPI written into the PNG metadata
    pub dpi: u32,
    /// When set, pixels whose R, G and B all exceed this value become transparent
    pub knockout_white: Option<u8>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            knockout_white: None,
        }
    }
}

/// A converted logo: the decoded pixels plus where and how they were saved.
#[derive(Debug, Clone)]
pub struct LogoAsset {
    pub image: DynamicImage,
    pub dpi: u32,
    pub path: PathBuf,
}

impl LogoAsset {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode a raster logo from disk.
pub fn load_logo(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    let img = ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded logo"
    );
    Ok(img)
}

/// Convert `source` to a DPI-tagged PNG at `destination`.
///
/// The source file is never modified. Pixel dimensions are preserved.
pub fn convert_logo(source: &Path, destination: &Path, options: ConvertOptions) -> Result<LogoAsset> {
    let mut image = load_logo(source)?;

    if let Some(threshold) = options.knockout_white {
        image = DynamicImage::ImageRgba8(knockout_white(&image, threshold));
    }

    write_png(&image, destination, Some(options.dpi))?;
    info!(
        from = %source.display(),
        to = %destination.display(),
        dpi = options.dpi,
        "converted logo"
    );

    Ok(LogoAsset {
        image,
        dpi: options.dpi,
        path: destination.to_path_buf(),
    })
}

/// Make near-white pixels fully transparent.
///
/// A pixel is knocked out when each of R, G and B is strictly greater than
/// `threshold`. Every other pixel keeps its colour at full opacity.
pub fn knockout_white(image: &DynamicImage, threshold: u8) -> RgbaImage {
    let rgb = image.to_rgb8();
    let mut out = RgbaImage::new(rgb.width(), rgb.height());
    let mut cleared = 0usize;
    for (x, y, px) in rgb.enumerate_pixels() {
        let [r, g, b] = px.0;
        let value = if r > threshold && g > threshold && b > threshold {
            cleared += 1;
            Rgba([255, 255, 255, 0])
        } else {
            Rgba([r, g, b, 255])
        };
        out.put_pixel(x, y, value);
    }
    debug!(threshold, cleared, "knocked out near-white pixels");
    out
}

/// Turn a lower-level failure into the fatal conversion error the pipeline reports.
pub(crate) fn conversion_error(path: &Path, err: LogoQrError) -> LogoQrError {
    match err {
        LogoQrError::LogoConversion { .. } => err,
        other => LogoQrError::LogoConversion {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
