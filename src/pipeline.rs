// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Run driver: font → glyph requests → packed atlas → PNG and metrics.
//!
//! Both artifacts are encoded in memory before anything touches the disk,
//! so a failed run leaves no partial output behind.

use crate::atlas::{GrowthController, TextureSize};
use crate::config::PackConfig;
use crate::encode::{encode, encode_png};
use crate::error::{PackfontError, Result};
use crate::font::{FontSource, SystemFontSource};
use crate::glyph::{FontdueRasterizer, GlyphRasterizer};
use crate::metrics;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Encoded outputs of a successful pack
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub png: Vec<u8>,
    pub metrics: String,
    pub size: TextureSize,
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PackSummary {
    pub size: TextureSize,
    pub glyphs: usize,
    pub png_path: PathBuf,
    pub metrics_path: PathBuf,
}

impl std::fmt::Display for PackSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "packed {} glyphs into {}, wrote {} and {}",
            self.glyphs,
            self.size,
            self.png_path.display(),
            self.metrics_path.display()
        )
    }
}

/// Runs with fonts looked up in `config.font_dirs`
pub fn run(config: &PackConfig) -> Result<PackSummary> {
    let source = SystemFontSource::new(config.font_dirs.as_slice());
    run_with(config, &source)
}

pub fn run_with(config: &PackConfig, source: &dyn FontSource) -> Result<PackSummary> {
    config.validate()?;
    log_settings(config);

    let font = source.load(&config.font, config.font_index)?;
    info!(
        "font {} face {} of {}",
        font.path.display(),
        font.font_index,
        font.face_count
    );
    let rasterizer = FontdueRasterizer::new(&font)?;
    let artifacts = build_artifacts(config, &rasterizer)?;

    let (png_path, metrics_path) = output_paths(&config.output);
    write_artifacts(&artifacts, &png_path, &metrics_path)?;
    Ok(PackSummary {
        size: artifacts.size,
        glyphs: config.range.len(),
        png_path,
        metrics_path,
    })
}

/// Packs, encodes and serializes without writing anything
pub fn build_artifacts<R: GlyphRasterizer + ?Sized>(
    config: &PackConfig,
    rasterizer: &R,
) -> Result<Artifacts> {
    config.validate()?;
    let requests = config
        .range
        .requests(config.size, config.oversampling, config.oversampling);
    let controller = GrowthController::new(TextureSize::square(config.start_size), config.max_dim);
    let atlas = controller.find_fit(rasterizer, &requests, config.padding)?;

    let png = encode_png(&encode(&atlas))?;
    let metrics = metrics::serialize(&atlas, config.range);
    Ok(Artifacts {
        png,
        metrics,
        size: atlas.size,
    })
}

/// `<stem>.png` and `<stem>.spritefont`
///
/// Extensions are appended, so a stem like `fonts/arial.16` keeps its dot.
pub fn output_paths(stem: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{}.png", stem)),
        PathBuf::from(format!("{}.spritefont", stem)),
    )
}

/// Writes both files, removing the image again if the metrics fail
pub fn write_artifacts(artifacts: &Artifacts, png_path: &Path, metrics_path: &Path) -> Result<()> {
    write_file(png_path, &artifacts.png)?;
    if let Err(e) = write_file(metrics_path, artifacts.metrics.as_bytes()) {
        if let Err(rm) = std::fs::remove_file(png_path) {
            warn!("could not remove {}: {}", png_path.display(), rm);
        }
        return Err(e);
    }
    info!("wrote {}", png_path.display());
    info!("wrote {}", metrics_path.display());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| PackfontError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn log_settings(config: &PackConfig) {
    info!("font:         {}", config.font);
    info!("size:         {}", config.size);
    info!("output:       {}", config.output);
    info!("padding:      {}", config.padding);
    info!("font index:   {}", config.font_index);
    info!("oversampling: {}", config.oversampling);
    info!("range:        {}..{}", config.range.start, config.range.end);
}
