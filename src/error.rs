// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Top level error type for a packfont run.
//!
//! Each stage keeps its own error (`FontError`, `RasterError`,
//! `PackingExhausted`), `PackfontError` wraps them and names the stage
//! that failed. Only the command line tool turns it into an exit code.

use crate::atlas::{GrowthError, PackingExhausted};
use crate::font::FontError;
use crate::glyph::RasterError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PackfontError {
    /// Settings rejected before any work started
    Config(String),
    /// Font could not be located, read or validated
    Font(FontError),
    /// The rasterizer failed on a glyph
    Raster(RasterError),
    /// No texture up to the maximum dimension could hold the glyphs
    PackingExhausted(PackingExhausted),
    /// PNG encoding failed
    Encode(String),
    /// An output file could not be written
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for PackfontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackfontError::Config(msg) => write!(f, "config: {}", msg),
            PackfontError::Font(e) => write!(f, "font: {}", e),
            PackfontError::Raster(e) => write!(f, "rasterize: {}", e),
            PackfontError::PackingExhausted(e) => write!(f, "pack: {}", e),
            PackfontError::Encode(msg) => write!(f, "encode png: {}", msg),
            PackfontError::Write { path, source } => {
                write!(f, "write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PackfontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackfontError::Font(e) => Some(e),
            PackfontError::Raster(e) => Some(e),
            PackfontError::PackingExhausted(e) => Some(e),
            PackfontError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FontError> for PackfontError {
    fn from(e: FontError) -> Self {
        PackfontError::Font(e)
    }
}

impl From<RasterError> for PackfontError {
    fn from(e: RasterError) -> Self {
        PackfontError::Raster(e)
    }
}

impl From<GrowthError> for PackfontError {
    fn from(e: GrowthError) -> Self {
        match e {
            GrowthError::Exhausted(e) => PackfontError::PackingExhausted(e),
            GrowthError::Raster(e) => PackfontError::Raster(e),
        }
    }
}

impl From<image::ImageError> for PackfontError {
    fn from(e: image::ImageError) -> Self {
        PackfontError::Encode(e.to_string())
    }
}

/// Result alias used across the pipeline
pub type Result<T> = std::result::Result<T, PackfontError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::TextureSize;

    #[test]
    fn test_error_names_stage() {
        let err = PackfontError::Config("oversampling must be at least 1".to_string());
        assert_eq!(err.to_string(), "config: oversampling must be at least 1");

        let err = PackfontError::from(FontError::InvalidIndex { index: 3, available: 1 });
        assert!(err.to_string().starts_with("font: "));
        assert!(err.to_string().contains("font index 3"));
    }

    #[test]
    fn test_growth_error_conversion() {
        let exhausted = PackingExhausted {
            attempts: vec![TextureSize::new(64, 64)],
            max_dim: 64,
        };
        let err = PackfontError::from(GrowthError::Exhausted(exhausted));
        assert!(matches!(err, PackfontError::PackingExhausted(_)));
        assert!(err.to_string().starts_with("pack: "));

        let err = PackfontError::from(GrowthError::Raster(RasterError::InvalidCodepoint(0xD800)));
        assert!(matches!(err, PackfontError::Raster(_)));
    }
}
