// RustPixel
// copyright zipxing@hotmail.com 2022～2025
//
// Coverage to RGBA conversion and PNG encoding

use crate::atlas::{AtlasBuffer, AtlasResult};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageResult};

/// Texel for any covered pixel
pub const INK: [u8; 4] = [0, 0, 0, 255];
/// Texel for empty pixels
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// RGBA8 pixels, row-major with a top-left origin, stride `width * 4`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Binarizes the atlas coverage: any coverage becomes opaque black,
/// zero stays fully transparent
pub fn encode(atlas: &AtlasResult) -> PixelBuffer {
    encode_buffer(&atlas.buffer)
}

pub fn encode_buffer(buffer: &AtlasBuffer) -> PixelBuffer {
    let data = buffer
        .pixels
        .iter()
        .flat_map(|&c| if c > 0 { INK } else { CLEAR })
        .collect();
    PixelBuffer {
        width: buffer.width,
        height: buffer.height,
        data,
    }
}

/// Encodes the pixel buffer as an RGBA PNG in memory
pub fn encode_png(pixels: &PixelBuffer) -> ImageResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &pixels.data,
        pixels.width,
        pixels.height,
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}
