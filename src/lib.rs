//! Batch generation of application icon and installer banner assets from a
//! single source image.
//!
//! The pipeline runs strictly forward: the source artwork has its flat
//! background removed, a letter emblem is composited onto a high-resolution
//! master canvas, and the master is resampled down to every target size before
//! being written out as PNGs, a Windows `.ico`, a macOS `.icns`, and two
//! installer wizard BMPs.

pub mod asset_gen;
pub mod background;
pub mod banner;
pub mod font;
pub mod glyph;
pub mod resample;
