// RustPixel
// copyright zipxing@hotmail.com 2022～2025
//
// Run settings, from the command line and an optional TOML file

use crate::atlas::{MAX_TEXTURE_DIM, MIN_TEXTURE_DIM};
use crate::error::{PackfontError, Result};
use crate::font::DEFAULT_FONT_DIRS;
use crate::glyph::CodepointRange;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything one packfont run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// font file name or path
    pub font: String,
    /// em height in pixels
    pub size: f32,
    /// output stem, `.png` and `.spritefont` are appended
    pub output: String,
    pub padding: u32,
    pub font_index: u32,
    pub oversampling: u32,
    pub range: CodepointRange,
    pub start_size: u32,
    pub max_dim: u32,
    pub font_dirs: Vec<String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            font: String::new(),
            size: 0.0,
            output: String::new(),
            padding: 1,
            font_index: 0,
            oversampling: 1,
            range: CodepointRange::default(),
            start_size: MIN_TEXTURE_DIM,
            max_dim: MAX_TEXTURE_DIM,
            font_dirs: DEFAULT_FONT_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl PackConfig {
    pub fn new(font: &str, size: f32, output: &str) -> Self {
        Self {
            font: font.to_string(),
            size,
            output: output.to_string(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PackfontError::Config(e.to_string()))
    }

    /// Reads a TOML settings file, missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PackfontError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PackfontError::Config(e.to_string()))
    }

    /// Rejects settings no run could succeed with
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(PackfontError::Config(msg));
        if self.font.is_empty() {
            return fail("font name is empty".to_string());
        }
        if self.output.is_empty() {
            return fail("output name is empty".to_string());
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return fail(format!("font size must be positive, got {}", self.size));
        }
        if self.oversampling == 0 {
            return fail("oversampling must be at least 1".to_string());
        }
        if self.range.is_empty() {
            return fail(format!(
                "codepoint range {}..{} is empty",
                self.range.start, self.range.end
            ));
        }
        if let Some(cp) = self.range.iter().find(|&cp| char::from_u32(cp).is_none()) {
            return fail(format!("U+{:04X} is not a valid character", cp));
        }
        for (name, dim) in [("start size", self.start_size), ("max dimension", self.max_dim)] {
            if !dim.is_power_of_two() || !(MIN_TEXTURE_DIM..=MAX_TEXTURE_DIM).contains(&dim) {
                return fail(format!(
                    "{} must be a power of two in {}..={}, got {}",
                    name, MIN_TEXTURE_DIM, MAX_TEXTURE_DIM, dim
                ));
            }
        }
        if self.start_size > self.max_dim {
            return fail(format!(
                "start size {} is larger than max dimension {}",
                self.start_size, self.max_dim
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackConfig::new("arial", 16.0, "out/arial");
        assert_eq!(config.padding, 1);
        assert_eq!(config.font_index, 0);
        assert_eq!(config.oversampling, 1);
        assert_eq!(config.range, CodepointRange::new(32, 128));
        assert_eq!((config.start_size, config.max_dim), (64, 2048));
        assert_eq!(config.font_dirs.len(), DEFAULT_FONT_DIRS.len());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial() {
        let config = PackConfig::from_toml_str(
            r#"
font = "DejaVuSans"
size = 24.5
output = "atlas"
oversampling = 2
font_dirs = ["/opt/fonts"]

[range]
start = 48
end = 58
"#,
        )
        .unwrap();
        assert_eq!(config.font, "DejaVuSans");
        assert_eq!(config.size, 24.5);
        assert_eq!(config.oversampling, 2);
        assert_eq!(config.padding, 1);
        assert_eq!(config.range, CodepointRange::new(48, 58));
        assert_eq!(config.font_dirs, vec!["/opt/fonts".to_string()]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PackConfig::new("mono", 12.0, "mono12");
        let text = config.to_toml_string().unwrap();
        assert_eq!(PackConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_toml() {
        let err = PackConfig::from_toml_str("size = \"big\"").unwrap_err();
        assert!(matches!(err, PackfontError::Config(_)));
    }

    #[test]
    fn test_validate_rejects() {
        let base = PackConfig::new("arial", 16.0, "arial");
        let cases = vec![
            PackConfig { size: 0.0, ..base.clone() },
            PackConfig { size: f32::NAN, ..base.clone() },
            PackConfig { oversampling: 0, ..base.clone() },
            PackConfig { range: CodepointRange::new(90, 90), ..base.clone() },
            PackConfig { range: CodepointRange::new(0xD7FF, 0xD801), ..base.clone() },
            PackConfig { start_size: 96, ..base.clone() },
            PackConfig { max_dim: 4096, ..base.clone() },
            PackConfig { start_size: 512, max_dim: 256, ..base.clone() },
            PackConfig { font: String::new(), ..base.clone() },
        ];
        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(err.to_string().starts_with("config: "), "{:?}", config);
        }
    }
}
