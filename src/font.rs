// RustPixel
// copyright zipxing@hotmail.com 2022～2025
//
// Font discovery and loading

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Directories searched for a bare font name, in order
pub const DEFAULT_FONT_DIRS: &[&str] = &[
    "C:/Windows/Fonts/",
    "/mnt/c/Windows/Fonts/",
    "/System/Library/Fonts/Supplemental/",
    "/System/Library/Fonts/",
    "$HOME/Library/Fonts/",
    "/usr/share/fonts/truetype/",
    "/usr/local/share/fonts/",
    "$HOME/.local/share/fonts/",
];

/// File extensions tried for a bare font name, in order
const FONT_EXTENSIONS: &[&str] = &["ttf", "ttc"];

/// Raw bytes of a font file plus the face selected from it
#[derive(Debug, Clone)]
pub struct FontData {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub font_index: u32,
    /// faces in the file, 1 for a plain ttf/otf
    pub face_count: u32,
}

impl FontData {
    /// Wraps already loaded bytes, checking the face index
    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>, font_index: u32) -> Result<Self, FontError> {
        let face_count = validate_font_index(&path, &bytes, font_index)?;
        Ok(Self {
            path,
            bytes,
            font_index,
            face_count,
        })
    }
}

#[derive(Debug)]
pub enum FontError {
    /// No `.ttf` or `.ttc` for the name in any searched directory
    NotFound { name: String, searched: Vec<PathBuf> },
    Read { path: PathBuf, source: std::io::Error },
    InvalidIndex { index: u32, available: u32 },
    Parse { path: PathBuf, reason: String },
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontError::NotFound { name, searched } => {
                write!(f, "could not load font '{}' as ttf or ttc", name)?;
                if searched.is_empty() {
                    write!(f, " (no font directory exists)")
                } else {
                    write!(f, " (searched {} locations)", searched.len())
                }
            }
            FontError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            FontError::InvalidIndex { index, available } => write!(
                f,
                "font index {} is not valid, file has {} face(s)",
                index, available
            ),
            FontError::Parse { path, reason } => {
                write!(f, "failed to parse {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Supplies font bytes for a name and face index
pub trait FontSource {
    fn load(&self, name: &str, font_index: u32) -> Result<FontData, FontError>;
}

/// Looks fonts up on the local filesystem
#[derive(Debug, Clone)]
pub struct SystemFontSource {
    dirs: Vec<PathBuf>,
}

impl Default for SystemFontSource {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_DIRS)
    }
}

impl SystemFontSource {
    pub fn new<S: AsRef<str>>(dirs: &[S]) -> Self {
        Self {
            dirs: dirs
                .iter()
                .map(|d| PathBuf::from(expand_home(d.as_ref())))
                .collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Finds the file for `name`
    ///
    /// An existing path wins. Otherwise every existing directory is tried,
    /// first with the name as given when it carries an extension, then with
    /// `.ttf` and `.ttc` appended.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FontError> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }

        let mut searched = Vec::new();
        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!("font dir {} does not exist", dir.display());
                continue;
            }
            debug!("checking font dir {}", dir.display());
            let mut candidates = Vec::new();
            if direct.extension().is_some() {
                candidates.push(dir.join(name));
            }
            for ext in FONT_EXTENSIONS {
                candidates.push(dir.join(format!("{}.{}", name, ext)));
            }
            for candidate in candidates {
                if candidate.is_file() {
                    return Ok(candidate);
                }
                searched.push(candidate);
            }
        }

        Err(FontError::NotFound {
            name: name.to_string(),
            searched,
        })
    }
}

impl FontSource for SystemFontSource {
    fn load(&self, name: &str, font_index: u32) -> Result<FontData, FontError> {
        let path = self.resolve(name)?;
        info!("loading font data from {}", path.display());
        let bytes = std::fs::read(&path).map_err(|source| FontError::Read {
            path: path.clone(),
            source,
        })?;
        FontData::from_bytes(path, bytes, font_index)
    }
}

/// Checks that `font_index` names a face in `bytes`, returning the number
/// of faces in the file
pub fn validate_font_index(path: &Path, bytes: &[u8], font_index: u32) -> Result<u32, FontError> {
    let available = ttf_parser::fonts_in_collection(bytes).unwrap_or(1);
    if font_index >= available {
        return Err(FontError::InvalidIndex {
            index: font_index,
            available,
        });
    }
    ttf_parser::Face::parse(bytes, font_index).map_err(|e| FontError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(available)
}

/// Expand $HOME in path
pub fn expand_home(path: &str) -> String {
    if path.starts_with("$HOME") {
        if let Some(home) = std::env::var_os("HOME") {
            return path.replace("$HOME", home.to_string_lossy().as_ref());
        }
    }
    path.to_string()
}
