// RustPixel
// copyright zipxing@hotmail.com 2022～2025
//
// Shelf packing of glyphs into a single texture size

use super::{AtlasBuffer, AtlasResult, PackedGlyph, TextureSize};
use crate::glyph::{GlyphRasterizer, GlyphRequest, RasterError};

/// A horizontal row of glyphs
#[derive(Clone, Copy, Debug)]
struct Shelf {
    /// top edge
    y: u32,
    /// tallest glyph placed so far
    height: u32,
    /// next free x
    cursor: u32,
}

/// Shelf bin packing algorithm implementation
///
/// Rectangles are laid left to right along shelves. A rectangle goes on the
/// first shelf with enough width left and enough height; the newest shelf
/// may grow taller while there is room below it. When nothing fits a new
/// shelf opens under the lowest one.
///
/// Every rectangle keeps `padding` empty pixels to its right and below it,
/// and the texture keeps `padding` pixels along its left and top edges, so
/// padded boxes `[x, x + w + padding) x [y, y + h + padding)` never touch.
#[derive(Debug)]
pub struct ShelfPacker {
    size: TextureSize,
    padding: u32,
    shelves: Vec<Shelf>,
}

impl ShelfPacker {
    pub fn new(size: TextureSize, padding: u32) -> Self {
        ShelfPacker {
            size,
            padding,
            shelves: Vec::new(),
        }
    }

    /// Whether a `width` x `height` rectangle could fit in an empty texture
    pub fn fits_outright(&self, width: u32, height: u32) -> bool {
        let pad = self.padding as u64;
        width as u64 + 2 * pad <= self.size.width as u64
            && height as u64 + 2 * pad <= self.size.height as u64
    }

    /// Places a rectangle, returning its top-left corner
    ///
    /// Returns None if no space is left.
    pub fn insert(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if !self.fits_outright(width, height) {
            return None;
        }
        let pad = self.padding;
        let last = self.shelves.len().checked_sub(1);

        for (i, shelf) in self.shelves.iter_mut().enumerate() {
            if shelf.cursor + width + pad > self.size.width {
                continue;
            }
            let fits = height <= shelf.height
                || (Some(i) == last && shelf.y + height + pad <= self.size.height);
            if fits {
                let pos = (shelf.cursor, shelf.y);
                shelf.cursor += width + pad;
                shelf.height = shelf.height.max(height);
                return Some(pos);
            }
        }

        let y = match self.shelves.last() {
            Some(shelf) => shelf.y + shelf.height + pad,
            None => pad,
        };
        if y + height + pad > self.size.height {
            return None;
        }
        self.shelves.push(Shelf {
            y,
            height,
            cursor: pad + width + pad,
        });
        Some((pad, y))
    }
}

/// Why one pack attempt did not produce an atlas
#[derive(Debug, Clone, PartialEq)]
pub enum PackFailure {
    /// The glyph's padded box is larger than the texture itself
    GlyphTooLarge {
        codepoint: u32,
        width: u32,
        height: u32,
        size: TextureSize,
    },
    /// Ran out of room after `placed` glyphs
    OutOfSpace {
        codepoint: u32,
        placed: usize,
        size: TextureSize,
    },
    /// The rasterizer failed, a bigger texture will not help
    Raster(RasterError),
}

impl PackFailure {
    /// Whether a larger texture might succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PackFailure::Raster(_))
    }
}

impl std::fmt::Display for PackFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackFailure::GlyphTooLarge {
                codepoint,
                width,
                height,
                size,
            } => write!(
                f,
                "glyph U+{:04X} ({}x{}) does not fit a {} texture",
                codepoint, width, height, size
            ),
            PackFailure::OutOfSpace {
                codepoint,
                placed,
                size,
            } => write!(
                f,
                "no room for U+{:04X} in {} after {} glyphs",
                codepoint, size, placed
            ),
            PackFailure::Raster(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PackFailure {}

/// Packs every request into a texture of `size`
///
/// Glyphs are rasterized and placed in request order, so the same inputs
/// always give the same placement. The buffer is allocated here and only
/// handed out on success.
pub fn pack<R: GlyphRasterizer + ?Sized>(
    rasterizer: &R,
    requests: &[GlyphRequest],
    size: TextureSize,
    padding: u32,
) -> Result<AtlasResult, PackFailure> {
    let mut packer = ShelfPacker::new(size, padding);
    let mut buffer = AtlasBuffer::new(size);
    let mut glyphs = Vec::with_capacity(requests.len());

    for request in requests {
        let glyph = rasterizer.rasterize(request).map_err(PackFailure::Raster)?;
        if !packer.fits_outright(glyph.width, glyph.height) {
            return Err(PackFailure::GlyphTooLarge {
                codepoint: request.codepoint,
                width: glyph.width,
                height: glyph.height,
                size,
            });
        }
        let (x, y) = packer
            .insert(glyph.width, glyph.height)
            .ok_or(PackFailure::OutOfSpace {
                codepoint: request.codepoint,
                placed: glyphs.len(),
                size,
            })?;
        buffer.blit(&glyph, x, y);
        glyphs.push(PackedGlyph::place(request.codepoint, x, y, &glyph));
    }

    Ok(AtlasResult {
        size,
        buffer,
        glyphs,
    })
}
