//! # Output Configuration
//!
//! Fixed output presets and the run configuration the CLI fills in.
//!
//! ## Output Profiles
//!
//! | Profile | File | Format | Scale | DPI tag |
//! |---------|------|--------|-------|---------|
//! | PRINT | `qr_print_ready.png` | PNG | 20 px/module | 300 |
//! | DIGITAL | `qr_digital.png` | PNG | 10 px/module | none |
//! | VECTOR | `qr_editable.svg` | SVG | 10 units/module | n/a |
//!
//! ## Usage
//!
//! ```
//! use logoqr::config::OutputProfile;
//!
//! let profile = OutputProfile::PRINT;
//! println!("{} at {} px/module", profile.file_name, profile.scale);
//! ```

use std::path::PathBuf;

use crate::qr::QrErrorLevel;

/// URL encoded into every QR symbol unless overridden.
pub const DEFAULT_URL: &str =
    "https://search.google.com/local/writereview?placeid=ChIJe2prou8uQg0RgZENtpxAgqY";

/// Source logo looked up in the working directory.
pub const DEFAULT_LOGO: &str = "logo.jpeg";

/// File name of the converted logo.
pub const CONVERTED_LOGO: &str = "logo_for_qr.png";

/// Print resolution written into PNG metadata.
pub const DEFAULT_DPI: u32 = 300;

/// Quiet zone around every rendered symbol, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// File format of an output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Lossless raster with the logo composited in
    Png,
    /// Vector markup, no logo
    Svg,
}

/// # Output Profile
///
/// One output artifact: where it goes, how big its modules are, and
/// whether it carries print resolution metadata.
///
/// ## Calculations
///
/// ```text
/// side_px = (modules + 2 * QUIET_ZONE_MODULES) * scale
///
/// For a version 8 symbol (49 modules) at PRINT:
///   side_px = (49 + 8) * 20 = 1140
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputProfile {
    /// Short label used in status lines
    pub name: &'static str,

    /// File name inside the output directory
    pub file_name: &'static str,

    /// Output format
    pub format: ArtifactFormat,

    /// Pixels (or SVG units) per QR module
    pub scale: u32,

    /// DPI written to the PNG `pHYs` chunk, if any
    pub dpi: Option<u32>,
}

impl OutputProfile {
    /// High resolution copy for printing.
    pub const PRINT: Self = Self {
        name: "print",
        file_name: "qr_print_ready.png",
        format: ArtifactFormat::Png,
        scale: 20,
        dpi: Some(DEFAULT_DPI),
    };

    /// Standard resolution copy for screens and the web.
    pub const DIGITAL: Self = Self {
        name: "digital",
        file_name: "qr_digital.png",
        format: ArtifactFormat::Png,
        scale: 10,
        dpi: None,
    };

    /// Editable vector copy, without logo.
    pub const VECTOR: Self = Self {
        name: "vector",
        file_name: "qr_editable.svg",
        format: ArtifactFormat::Svg,
        scale: 10,
        dpi: None,
    };

    /// Same profile with a different module scale.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Same profile with a different DPI tag. Only meaningful for PNG output.
    pub fn with_dpi(mut self, dpi: Option<u32>) -> Self {
        self.dpi = dpi;
        self
    }

    /// Whether the logo is composited into this artifact.
    #[inline]
    pub fn has_logo(&self) -> bool {
        self.format == ArtifactFormat::Png
    }
}

/// Convert a DPI value to pixels per metre, as stored in a PNG `pHYs` chunk.
///
/// ```
/// use logoqr::config::dpi_to_ppm;
///
/// assert_eq!(dpi_to_ppm(300), 11811);
/// ```
#[inline]
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / 0.0254).round() as u32
}

/// Convert pixels per metre back to DPI.
#[inline]
pub fn ppm_to_dpi(ppm: u32) -> u32 {
    (ppm as f64 * 0.0254).round() as u32
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source logo
    pub logo: PathBuf,
    /// Text encoded into the QR symbol
    pub url: String,
    /// Error correction level
    pub error_level: QrErrorLevel,
    /// Directory receiving every output file
    pub out_dir: PathBuf,
    /// DPI tag for the converted logo
    pub dpi: u32,
    /// Near-white knockout threshold for the converted logo
    pub knockout_white: Option<u8>,
    /// Artifacts to produce, in order
    pub outputs: Vec<OutputProfile>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            logo: PathBuf::from(DEFAULT_LOGO),
            url: DEFAULT_URL.to_string(),
            error_level: QrErrorLevel::H,
            out_dir: PathBuf::from("."),
            dpi: DEFAULT_DPI,
            knockout_white: None,
            outputs: vec![
                OutputProfile::PRINT,
                OutputProfile::DIGITAL,
                OutputProfile::VECTOR,
            ],
        }
    }
}

impl PipelineConfig {
    /// Path of the converted logo for this run.
    pub fn converted_logo_path(&self) -> PathBuf {
        self.out_dir.join(CONVERTED_LOGO)
    }

    /// Path of an artifact for this run.
    pub fn output_path(&self, profile: &OutputProfile) -> PathBuf {
        self.out_dir.join(profile.file_name)
    }
}
