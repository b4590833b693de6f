//! # QR Encoding
//!
//! Thin layer over the `qrcode` crate: a payload type, the error correction
//! levels, and raster/SVG rendering with a standard quiet zone.
//!
//! ```
//! use logoqr::qr::{QrErrorLevel, QrPayload};
//!
//! let qr = QrPayload::new("https://example.com", QrErrorLevel::H).encode()?;
//! let raster = qr.render_raster(10);
//! assert_eq!(raster.width(), (qr.width() + 8) * 10);
//! # Ok::<(), logoqr::LogoQrError>(())
//! ```

use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::config::OutputProfile;
use crate::error::Result;

/// # QR Error Correction Level
///
/// | Level | Recovery | Use Case |
/// |-------|----------|----------|
/// | L | ~7% | Clean environments |
/// | M | ~15% | General use |
/// | Q | ~25% | Industrial use |
/// | H | ~30% | Logo overlays (default here) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// Level L: ~7% error recovery
    L,
    /// Level M: ~15% error recovery
    M,
    /// Level Q: ~25% error recovery
    Q,
    /// Level H: ~30% error recovery, needed once a logo covers the center
    #[default]
    H,
}

impl QrErrorLevel {
    /// Share of the symbol that can be damaged and still decode.
    pub fn recovery_ratio(self) -> f32 {
        match self {
            QrErrorLevel::L => 0.07,
            QrErrorLevel::M => 0.15,
            QrErrorLevel::Q => 0.25,
            QrErrorLevel::H => 0.30,
        }
    }
}

impl From<QrErrorLevel> for EcLevel {
    fn from(level: QrErrorLevel) -> Self {
        match level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// Text to encode plus the error correction level to encode it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    data: String,
    level: QrErrorLevel,
}

impl QrPayload {
    pub fn new(data: impl Into<String>, level: QrErrorLevel) -> Self {
        Self {
            data: data.into(),
            level,
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn level(&self) -> QrErrorLevel {
        self.level
    }

    /// Build the module grid. Fails when the data does not fit any version
    /// at this level.
    pub fn encode(&self) -> Result<EncodedQr> {
        let code = QrCode::with_error_correction_level(self.data.as_bytes(), self.level.into())?;
        debug!(
            width = code.width(),
            level = ?self.level,
            "encoded {} bytes",
            self.data.len()
        );
        Ok(EncodedQr { code })
    }
}

/// An encoded QR symbol, ready to render.
pub struct EncodedQr {
    code: QrCode,
}

impl EncodedQr {
    /// Symbol side in modules, without quiet zone.
    pub fn width(&self) -> u32 {
        self.code.width() as u32
    }

    /// Row-major module grid, `true` = dark.
    pub fn modules(&self) -> Vec<bool> {
        self.code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect()
    }

    /// Render black modules on opaque white with a 4-module quiet zone.
    pub fn render_raster(&self, scale: u32) -> GrayImage {
        let scale = scale.max(1);
        self.code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(scale, scale)
            .dark_color(Luma([0u8]))
            .light_color(Luma([255u8]))
            .build()
    }

    /// Render SVG markup with a 4-module quiet zone.
    pub fn render_svg(&self, scale: u32) -> String {
        let scale = scale.max(1);
        self.code
            .render::<svg::Color>()
            .quiet_zone(true)
            .module_dimensions(scale, scale)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }
}

/// Write the plain vector copy of `qr` (no logo) to `output`.
pub fn export_svg(qr: &EncodedQr, output: &Path, profile: &OutputProfile) -> Result<()> {
    let markup = qr.render_svg(profile.scale);
    fs::write(output, markup.as_bytes())?;
    debug!(path = %output.display(), bytes = markup.len(), "wrote svg");
    Ok(())
}
