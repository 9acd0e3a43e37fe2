// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Atlas module packs glyph bitmaps into one texture.
//!
//! [`packer`] places an ordered glyph list into a single candidate size
//! using shelf packing. [`growth`] walks the size schedule
//! (64x64, 128x64, 128x128, ...) until a pack succeeds.
//!
//! Every attempt owns a fresh [`AtlasBuffer`]; only the successful attempt
//! survives as an [`AtlasResult`].

pub mod growth;
pub mod packer;

pub use growth::{GrowthController, GrowthError, GrowthSchedule, PackEvent, PackingExhausted};
pub use packer::{pack, PackFailure, ShelfPacker};

use crate::glyph::RasterizedGlyph;

/// Smallest texture side tried
pub const MIN_TEXTURE_DIM: u32 = 64;
/// Largest texture side tried
pub const MAX_TEXTURE_DIM: u32 = 2048;

/// Texture dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(dim: u32) -> Self {
        Self::new(dim, dim)
    }

    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Next size in the schedule: double the smaller side, width first on
    /// a square
    pub fn grow(self) -> Self {
        if self.height < self.width {
            Self::new(self.width, self.height * 2)
        } else {
            Self::new(self.width * 2, self.height)
        }
    }

    pub fn fits_within(self, max_dim: u32) -> bool {
        self.width <= max_dim && self.height <= max_dim
    }
}

impl std::fmt::Display for TextureSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Single channel coverage buffer, row-major, top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl AtlasBuffer {
    pub fn new(size: TextureSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            pixels: vec![0; (size.width * size.height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Copies a glyph's coverage with its top-left corner at (x, y)
    ///
    /// The packer only hands out positions where the glyph fits, so the
    /// copy never clips.
    pub fn blit(&mut self, glyph: &RasterizedGlyph, x: u32, y: u32) {
        let w = glyph.width as usize;
        if w == 0 {
            return;
        }
        for (row, src) in glyph.coverage.chunks(w).enumerate() {
            let start = ((y as usize + row) * self.width as usize) + x as usize;
            self.pixels[start..start + w].copy_from_slice(src);
        }
    }
}

/// Where a glyph landed in the atlas and how to draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedGlyph {
    pub codepoint: u32,
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_offset2: f32,
    pub y_offset2: f32,
    pub advance_width: f32,
}

impl PackedGlyph {
    pub fn place(codepoint: u32, x: u32, y: u32, glyph: &RasterizedGlyph) -> Self {
        Self {
            codepoint,
            x0: x,
            y0: y,
            x1: x + glyph.width,
            y1: y + glyph.height,
            x_offset: glyph.x_offset,
            y_offset: glyph.y_offset,
            x_offset2: glyph.x_offset2,
            y_offset2: glyph.y_offset2,
            advance_width: glyph.advance_width,
        }
    }

    /// Box including the trailing padding margin, `(x, y, w, h)`
    pub fn padded_box(&self, padding: u32) -> (u32, u32, u32, u32) {
        (
            self.x0,
            self.y0,
            self.x1 - self.x0 + padding,
            self.y1 - self.y0 + padding,
        )
    }
}

/// The committed outcome of a successful pack
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasResult {
    pub size: TextureSize,
    pub buffer: AtlasBuffer,
    /// in request order
    pub glyphs: Vec<PackedGlyph>,
}
