//! # Error Types
//!
//! This module defines error types used throughout the logoqr library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for logoqr operations
#[derive(Debug, Error)]
pub enum LogoQrError {
    /// The source logo does not exist
    #[error("Logo file not found: {}", .0.display())]
    MissingLogo(PathBuf),

    /// Logo conversion failed; nothing downstream may use its output
    #[error("Logo conversion failed for {}: {reason}", .path.display())]
    LogoConversion { path: PathBuf, reason: String },

    /// Image decode, resize or encode error
    #[error("Image error: {0}")]
    Image(String),

    /// PNG container error (pHYs chunk read/write)
    #[error("PNG error: {0}")]
    Png(String),

    /// QR encoding error (usually payload too long for the chosen level)
    #[error("QR error: {0}")]
    Qr(String),

    /// QR raster too small to host a logo
    #[error("Invalid logo placement: {0}")]
    InvalidPlacement(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for LogoQrError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => LogoQrError::Io(io),
            other => LogoQrError::Image(other.to_string()),
        }
    }
}

impl From<png::EncodingError> for LogoQrError {
    fn from(e: png::EncodingError) -> Self {
        match e {
            png::EncodingError::IoError(io) => LogoQrError::Io(io),
            other => LogoQrError::Png(other.to_string()),
        }
    }
}

impl From<png::DecodingError> for LogoQrError {
    fn from(e: png::DecodingError) -> Self {
        match e {
            png::DecodingError::IoError(io) => LogoQrError::Io(io),
            other => LogoQrError::Png(other.to_string()),
        }
    }
}

impl From<qrcode::types::QrError> for LogoQrError {
    fn from(e: qrcode::types::QrError) -> Self {
        LogoQrError::Qr(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogoQrError>;
