// RustPixel
// copyright zipxing@hotmail.com 2022～2025
//
// Texture size growth policy

use super::packer::{pack, PackFailure};
use super::{AtlasResult, TextureSize, MAX_TEXTURE_DIM, MIN_TEXTURE_DIM};
use crate::glyph::{GlyphRasterizer, GlyphRequest, RasterError};
use log::{debug, info};

/// Sizes tried by [`GrowthController`], in order
///
/// Starts at `start` and applies [`TextureSize::grow`] until a side would
/// pass `max_dim`.
#[derive(Debug, Clone)]
pub struct GrowthSchedule {
    next: Option<TextureSize>,
    max_dim: u32,
}

impl GrowthSchedule {
    pub fn new(start: TextureSize, max_dim: u32) -> Self {
        Self {
            next: Some(start).filter(|s| s.fits_within(max_dim)),
            max_dim,
        }
    }
}

impl Iterator for GrowthSchedule {
    type Item = TextureSize;

    fn next(&mut self) -> Option<TextureSize> {
        let current = self.next?;
        self.next = Some(current.grow()).filter(|s| s.fits_within(self.max_dim));
        Some(current)
    }
}

/// Progress reported while searching for a size
#[derive(Debug, Clone, Copy)]
pub enum PackEvent<'a> {
    Attempt { size: TextureSize, attempt: usize },
    Rejected { size: TextureSize, failure: &'a PackFailure },
    Packed { size: TextureSize, glyphs: usize },
}

/// Forwards pack events to the log facade
pub fn log_event(event: &PackEvent) {
    match event {
        PackEvent::Attempt { size, attempt } => {
            info!("attempting to pack {} (attempt {})", size, attempt)
        }
        PackEvent::Rejected { size, failure } => debug!("packing {} failed: {}", size, failure),
        PackEvent::Packed { size, glyphs } => info!("packed {} glyphs into {}", glyphs, size),
    }
}

/// Every size up to the limit was tried and none held the glyphs
#[derive(Debug, Clone, PartialEq)]
pub struct PackingExhausted {
    pub attempts: Vec<TextureSize>,
    pub max_dim: u32,
}

impl std::fmt::Display for PackingExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not pack into texture up to maximum size {}x{} ({} attempts)",
            self.max_dim,
            self.max_dim,
            self.attempts.len()
        )
    }
}

impl std::error::Error for PackingExhausted {}

#[derive(Debug, Clone, PartialEq)]
pub enum GrowthError {
    Exhausted(PackingExhausted),
    /// The rasterizer failed, no size would help
    Raster(RasterError),
}

impl std::fmt::Display for GrowthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthError::Exhausted(e) => write!(f, "{}", e),
            GrowthError::Raster(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GrowthError {}

/// Repeats pack attempts over a growing texture
#[derive(Debug, Clone, Copy)]
pub struct GrowthController {
    pub start: TextureSize,
    pub max_dim: u32,
}

impl Default for GrowthController {
    fn default() -> Self {
        Self {
            start: TextureSize::square(MIN_TEXTURE_DIM),
            max_dim: MAX_TEXTURE_DIM,
        }
    }
}

impl GrowthController {
    pub fn new(start: TextureSize, max_dim: u32) -> Self {
        Self { start, max_dim }
    }

    pub fn schedule(&self) -> GrowthSchedule {
        GrowthSchedule::new(self.start, self.max_dim)
    }

    /// Finds the first size in the schedule that holds every glyph,
    /// logging progress
    pub fn find_fit<R: GlyphRasterizer + ?Sized>(
        &self,
        rasterizer: &R,
        requests: &[GlyphRequest],
        padding: u32,
    ) -> Result<AtlasResult, GrowthError> {
        self.find_fit_with(rasterizer, requests, padding, &mut |e| log_event(e))
    }

    /// Same as [`find_fit`](Self::find_fit), reporting to `observer`
    pub fn find_fit_with<R: GlyphRasterizer + ?Sized>(
        &self,
        rasterizer: &R,
        requests: &[GlyphRequest],
        padding: u32,
        observer: &mut dyn FnMut(&PackEvent),
    ) -> Result<AtlasResult, GrowthError> {
        let mut attempts = Vec::new();
        for size in self.schedule() {
            attempts.push(size);
            observer(&PackEvent::Attempt {
                size,
                attempt: attempts.len(),
            });
            match pack(rasterizer, requests, size, padding) {
                Ok(result) => {
                    observer(&PackEvent::Packed {
                        size,
                        glyphs: result.glyphs.len(),
                    });
                    return Ok(result);
                }
                Err(PackFailure::Raster(e)) => return Err(GrowthError::Raster(e)),
                Err(failure) => observer(&PackEvent::Rejected {
                    size,
                    failure: &failure,
                }),
            }
        }
        Err(GrowthError::Exhausted(PackingExhausted {
            attempts,
            max_dim: self.max_dim,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::RasterizedGlyph;

    struct SquareRasterizer(u32);

    impl GlyphRasterizer for SquareRasterizer {
        fn rasterize(&self, _request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError> {
            Ok(RasterizedGlyph {
                width: self.0,
                height: self.0,
                coverage: vec![200; (self.0 * self.0) as usize],
                ..RasterizedGlyph::blank(self.0 as f32)
            })
        }
    }

    struct FailingRasterizer;

    impl GlyphRasterizer for FailingRasterizer {
        fn rasterize(&self, request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError> {
            Err(RasterError::InvalidCodepoint(request.codepoint))
        }
    }

    fn requests(count: u32) -> Vec<GlyphRequest> {
        (0..count).map(|i| GlyphRequest::new(32 + i, 10.0, 1)).collect()
    }

    #[test]
    fn test_schedule_sequence() {
        let sizes: Vec<TextureSize> = GrowthController::default().schedule().collect();
        assert_eq!(sizes.first(), Some(&TextureSize::square(64)));
        assert_eq!(sizes.last(), Some(&TextureSize::square(2048)));
        assert_eq!(sizes.len(), 11);
        for pair in sizes.windows(2) {
            assert!(pair[1].area() > pair[0].area());
            let (a, b) = (pair[0], pair[1]);
            if a.width == a.height {
                assert_eq!(b, TextureSize::new(a.width * 2, a.height));
            } else {
                assert_eq!(b, TextureSize::new(a.width, a.height * 2));
            }
        }
    }

    #[test]
    fn test_schedule_respects_small_limit() {
        let sizes: Vec<TextureSize> = GrowthSchedule::new(TextureSize::square(64), 128).collect();
        assert_eq!(
            sizes,
            vec![
                TextureSize::square(64),
                TextureSize::new(128, 64),
                TextureSize::square(128)
            ]
        );
        assert_eq!(GrowthSchedule::new(TextureSize::square(256), 128).count(), 0);
    }

    #[test]
    fn test_grows_until_fit() {
        // 96 glyphs of 10x10 with padding 1 need more than 64x64 and 128x64
        let controller = GrowthController::default();
        let mut tried = Vec::new();
        let result = controller
            .find_fit_with(&SquareRasterizer(10), &requests(96), 1, &mut |e| {
                if let PackEvent::Attempt { size, .. } = e {
                    tried.push(*size);
                }
            })
            .unwrap();
        assert_eq!(result.size, TextureSize::square(128));
        assert_eq!(
            tried,
            vec![
                TextureSize::square(64),
                TextureSize::new(128, 64),
                TextureSize::square(128)
            ]
        );
        assert_eq!(result.glyphs.len(), 96);
    }

    #[test]
    fn test_exhausts_at_max_dim() {
        let controller = GrowthController::default();
        let err = controller
            .find_fit(&SquareRasterizer(2100), &requests(1), 1)
            .unwrap_err();
        match err {
            GrowthError::Exhausted(e) => {
                assert_eq!(e.attempts.len(), 11);
                assert_eq!(e.attempts.last(), Some(&TextureSize::square(2048)));
                assert_eq!(e.max_dim, 2048);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_raster_error_stops_growth() {
        let mut attempts = 0;
        let err = GrowthController::default()
            .find_fit_with(&FailingRasterizer, &requests(3), 1, &mut |e| {
                if matches!(e, PackEvent::Attempt { .. }) {
                    attempts += 1;
                }
            })
            .unwrap_err();
        assert_eq!(err, GrowthError::Raster(RasterError::InvalidCodepoint(32)));
        assert_eq!(attempts, 1);
    }
}
