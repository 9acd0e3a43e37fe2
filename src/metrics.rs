// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Metrics table written next to the atlas image (`.spritefont`).
//!
//! ```text
//! CHAR	x0	y0	x1	y1	x0ff	y0ff	xoff2	yoff2	xadvance
//! 32 128
//! 65	0	0	10	12	0	-12	10	0	9
//! ```
//!
//! Fields are tab separated, the second line holds the codepoint range with
//! an exclusive end. Float metrics are truncated toward zero.

use crate::atlas::{AtlasResult, PackedGlyph};
use crate::glyph::CodepointRange;
use std::fmt::Write;

/// Column names, the first line of every metrics file
pub const HEADER: &str = "CHAR\tx0\ty0\tx1\ty1\tx0ff\ty0ff\txoff2\tyoff2\txadvance";

/// Renders the metrics table for a packed atlas
///
/// Rows are ordered by ascending codepoint whatever the order of
/// `atlas.glyphs`.
pub fn serialize(atlas: &AtlasResult, range: CodepointRange) -> String {
    let mut glyphs: Vec<&PackedGlyph> = atlas.glyphs.iter().collect();
    glyphs.sort_by_key(|g| g.codepoint);

    let mut out = String::with_capacity(64 + glyphs.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(out, "{} {}", range.start, range.end);
    for g in glyphs {
        out.push_str(&row(g));
        out.push('\n');
    }
    out
}

/// One tab separated row, without the line break
pub fn row(g: &PackedGlyph) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        g.codepoint,
        g.x0,
        g.y0,
        g.x1,
        g.y1,
        g.x_offset as i32,
        g.y_offset as i32,
        g.x_offset2 as i32,
        g.y_offset2 as i32,
        g.advance_width as i32
    )
}
