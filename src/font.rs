//! Font resolution for the emblem overlay.
//!
//! Glyph fidelity is a hard requirement, so there is no fallback to a bundled
//! default face: when no candidate font file can be located the run aborts.

use anyhow::{Context, Result};
use rusttype::Font;
use std::fs;
use std::path::{Path, PathBuf};

/// Capability: locate a bold sans-serif font file on the host.
pub trait FontSource {
    fn locate(&self) -> Option<PathBuf>;
}

/// Well-known system font files, in preference order. The first path that
/// exists wins.
const CANDIDATE_PATHS: &[&str] = &[
    "C:/Windows/Fonts/arialbd.ttf",
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/segoeui.ttf",
    "C:/Windows/Fonts/calibrib.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
];

/// Probes the fixed system path list.
#[derive(Debug, Default)]
pub struct SystemFontPaths;

impl FontSource for SystemFontPaths {
    fn locate(&self) -> Option<PathBuf> {
        CANDIDATE_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }
}

/// A single caller-supplied font file, e.g. from a CLI flag.
#[derive(Debug)]
pub struct FixedFontPath(pub PathBuf);

impl FontSource for FixedFontPath {
    fn locate(&self) -> Option<PathBuf> {
        self.0.is_file().then(|| self.0.clone())
    }
}

/// Loads the bold font located by `source`. Fatal when nothing is found or
/// the file does not parse as a font.
pub fn load_bold_font(source: &dyn FontSource) -> Result<Font<'static>> {
    let path = source.locate().ok_or_else(|| {
        anyhow::anyhow!("No usable bold font found; pass --font with a TrueType file")
    })?;
    let data =
        fs::read(&path).with_context(|| format!("Failed to read font {}", path.display()))?;
    Font::try_from_vec(data)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse font {}", path.display()))
}

/// Resolves a font from an explicit override path, or by probing the system
/// path list when none is given.
pub fn resolve(explicit: Option<&Path>) -> Result<Font<'static>> {
    match explicit {
        Some(path) => load_bold_font(&FixedFontPath(path.to_path_buf())),
        None => load_bold_font(&SystemFontPaths),
    }
}
