//! # logoqr - Branded QR Code Generator
//!
//! logoqr turns a URL and a logo into ready-to-use QR codes:
//!
//! - **Logo conversion**: any decodable raster → PNG tagged with print DPI
//! - **QR encoding**: delegated to the `qrcode` crate, high error correction
//! - **Compositing**: logo resized to 20% of the symbol and centered on white
//! - **Vector export**: plain SVG for further editing
//!
//! ## Quick Start
//!
//! ```no_run
//! use logoqr::{
//!     compose::create_qr_with_logo,
//!     config::OutputProfile,
//!     logo::{ConvertOptions, convert_logo},
//!     qr::{QrErrorLevel, QrPayload},
//! };
//! use std::path::Path;
//!
//! // Normalize the logo
//! let logo = convert_logo(
//!     Path::new("logo.jpeg"),
//!     Path::new("logo_for_qr.png"),
//!     ConvertOptions::default(),
//! )?;
//!
//! // Encode once, render as often as needed
//! let qr = QrPayload::new("https://example.com", QrErrorLevel::H).encode()?;
//! create_qr_with_logo(&qr, &logo.image, Path::new("qr.png"), &OutputProfile::PRINT)?;
//!
//! # Ok::<(), logoqr::LogoQrError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`logo`] | Logo decoding, white knockout, PNG conversion |
//! | [`qr`] | Payload encoding, raster and SVG rendering |
//! | [`compose`] | Logo placement and compositing |
//! | [`pipeline`] | Full batch with per-step failure handling |
//! | [`config`] | Output profiles and run configuration |
//! | [`raster`] | PNG output with DPI metadata |
//! | [`error`] | Error types |

pub mod compose;
pub mod config;
pub mod error;
pub mod logo;
pub mod pipeline;
pub mod qr;
pub mod raster;

// Re-exports for convenience
pub use config::{OutputProfile, PipelineConfig};
pub use error::LogoQrError;
pub use pipeline::Pipeline;
