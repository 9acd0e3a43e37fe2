// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Glyph requests and rasterization
//!
//! A run packs one contiguous block of codepoints. Each codepoint becomes a
//! [`GlyphRequest`]; a [`GlyphRasterizer`] turns a request into an alpha
//! coverage bitmap plus the offsets a renderer needs to place it.
//!
//! Coordinates follow the usual texture convention: x grows right, y grows
//! down, offsets are relative to the pen position on the baseline, so the
//! top of a capital letter has a negative `y_offset`.
//!
//! [`FontdueRasterizer`] is the default implementation, built on fontdue.

use crate::font::{FontData, FontError};
use fontdue::{Font, FontSettings};
use log::warn;
use serde::{Deserialize, Serialize};

/// Half-open block of codepoints, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl Default for CodepointRange {
    /// Printable ASCII
    fn default() -> Self {
        Self { start: 32, end: 128 }
    }
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn iter(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }

    /// Builds the ordered request list for a run, ascending by codepoint
    pub fn requests(&self, point_size: f32, oversample_x: u32, oversample_y: u32) -> Vec<GlyphRequest> {
        self.iter()
            .map(|cp| GlyphRequest {
                codepoint: cp,
                point_size,
                oversample_x,
                oversample_y,
            })
            .collect()
    }
}

/// One glyph to pack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRequest {
    pub codepoint: u32,
    /// em height in output pixels
    pub point_size: f32,
    pub oversample_x: u32,
    pub oversample_y: u32,
}

impl GlyphRequest {
    pub fn new(codepoint: u32, point_size: f32, oversample: u32) -> Self {
        Self {
            codepoint,
            point_size,
            oversample_x: oversample,
            oversample_y: oversample,
        }
    }
}

/// Rasterizer output for one glyph
///
/// `coverage` is `width * height` bytes, row-major, at the oversampled
/// resolution. Offsets and advance are in output pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_offset2: f32,
    pub y_offset2: f32,
    pub advance_width: f32,
}

impl RasterizedGlyph {
    /// A glyph with no ink, such as a space
    pub fn blank(advance_width: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
            x_offset: 0.0,
            y_offset: 0.0,
            x_offset2: 0.0,
            y_offset2: 0.0,
            advance_width,
        }
    }

    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// Not a Unicode scalar value (surrogates, > U+10FFFF)
    InvalidCodepoint(u32),
    /// Oversampling factors must be at least 1
    InvalidOversampling { x: u32, y: u32 },
    /// Anything the backend reports for a specific glyph
    Glyph { codepoint: u32, reason: String },
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::InvalidCodepoint(cp) => {
                write!(f, "U+{:04X} is not a valid character", cp)
            }
            RasterError::InvalidOversampling { x, y } => {
                write!(f, "invalid oversampling {}x{}", x, y)
            }
            RasterError::Glyph { codepoint, reason } => {
                write!(f, "glyph U+{:04X}: {}", codepoint, reason)
            }
        }
    }
}

impl std::error::Error for RasterError {}

/// Turns one glyph request into a coverage bitmap
///
/// Implementations must be deterministic and free of side effects: the
/// packer calls them once per glyph on every attempt.
pub trait GlyphRasterizer {
    fn rasterize(&self, request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError>;
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for &T {
    fn rasterize(&self, request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError> {
        (**self).rasterize(request)
    }
}

/// fontdue backed rasterizer for one face of a font file
pub struct FontdueRasterizer {
    font: Font,
}

impl FontdueRasterizer {
    pub fn new(data: &FontData) -> Result<Self, FontError> {
        let settings = FontSettings {
            collection_index: data.font_index,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data.bytes.as_slice(), settings).map_err(|e| FontError::Parse {
            path: data.path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(&self, request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError> {
        let ch = char::from_u32(request.codepoint)
            .ok_or(RasterError::InvalidCodepoint(request.codepoint))?;
        let (ox, oy) = (request.oversample_x, request.oversample_y);
        if ox == 0 || oy == 0 {
            return Err(RasterError::InvalidOversampling { x: ox, y: oy });
        }
        if self.font.lookup_glyph_index(ch) == 0 {
            warn!("U+{:04X} has no glyph, packing .notdef", request.codepoint);
        }

        // fontdue scales uniformly, render at the larger factor and box
        // reduce the other axis
        let os = ox.max(oy);
        let scale = os as f32;
        let (metrics, bitmap) = self.font.rasterize(ch, request.point_size * scale);

        let (width, height, coverage) = if ox == oy {
            (metrics.width, metrics.height, bitmap)
        } else {
            box_reduce(&bitmap, metrics.width, metrics.height, os, ox, oy)
        };

        let xmin = metrics.xmin as f32;
        let ymin = metrics.ymin as f32;
        Ok(RasterizedGlyph {
            width: width as u32,
            height: height as u32,
            coverage,
            x_offset: xmin / scale,
            y_offset: -(ymin + metrics.height as f32) / scale,
            x_offset2: (xmin + metrics.width as f32) / scale,
            y_offset2: -ymin / scale,
            advance_width: metrics.advance_width / scale,
        })
    }
}

/// Shrinks a bitmap rendered at factor `os` down to `ox` x `oy` by
/// averaging the source pixels each target pixel covers.
fn box_reduce(
    src: &[u8],
    width: usize,
    height: usize,
    os: u32,
    ox: u32,
    oy: u32,
) -> (usize, usize, Vec<u8>) {
    let (os, ox, oy) = (os as usize, ox as usize, oy as usize);
    let dst_w = (width * ox).div_ceil(os);
    let dst_h = (height * oy).div_ceil(os);
    let span = |i: usize, o: usize, len: usize| {
        let start = i * os / o;
        let end = ((i + 1) * os / o).min(len).max(start + 1);
        (start, end)
    };

    let mut dst = Vec::with_capacity(dst_w * dst_h);
    for dy in 0..dst_h {
        let (y0, y1) = span(dy, oy, height);
        for dx in 0..dst_w {
            let (x0, x1) = span(dx, ox, width);
            let mut sum = 0u32;
            for y in y0..y1 {
                for x in x0..x1 {
                    sum += src[y * width + x] as u32;
                }
            }
            let count = ((y1 - y0) * (x1 - x0)) as u32;
            dst.push((sum / count) as u8);
        }
    }
    (dst_w, dst_h, dst)
}
