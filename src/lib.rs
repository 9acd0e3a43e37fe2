// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! packfont bakes one face of a TrueType/OpenType font into a single bitmap
//! texture atlas plus a `.spritefont` metrics table, for renderers that draw
//! text from one pre-baked glyph sheet.
//!
//! A run walks a contiguous codepoint block (printable ASCII by default),
//! rasterizes every glyph, packs them on shelves into the smallest texture
//! of the growth schedule that holds them all, binarizes the coverage into
//! RGBA and writes `<output>.png` and `<output>.spritefont`.
//!
//! Modules, leaf first:
//!
//! - [`glyph`]: requests, the [`GlyphRasterizer`] trait and its fontdue
//!   implementation
//! - [`font`]: locating and loading font files
//! - [`atlas`]: shelf packing and texture growth
//! - [`encode`]: coverage to RGBA and PNG
//! - [`metrics`]: the `.spritefont` text table
//! - [`config`], [`pipeline`]: settings and the run driver
//! - [`log`]: log4rs setup for the command line tool
//!
//! ```no_run
//! use packfont::{pipeline, PackConfig};
//!
//! let config = PackConfig::new("DejaVuSans", 16.0, "out/dejavu16");
//! let summary = pipeline::run(&config)?;
//! println!("{}", summary);
//! # Ok::<(), packfont::PackfontError>(())
//! ```

pub mod atlas;
pub mod config;
pub mod encode;
pub mod error;
pub mod font;
pub mod glyph;
pub mod log;
pub mod metrics;
pub mod pipeline;

pub use atlas::{AtlasResult, GrowthController, PackedGlyph, TextureSize};
pub use config::PackConfig;
pub use error::{PackfontError, Result};
pub use font::{FontData, FontSource, SystemFontSource};
pub use glyph::{CodepointRange, FontdueRasterizer, GlyphRasterizer, GlyphRequest, RasterizedGlyph};
pub use pipeline::{Artifacts, PackSummary};
