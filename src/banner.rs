//! Installer wizard banner images.
//!
//! Inno Setup takes its wizard artwork as plain opaque BMPs: a tall panel
//! image on the welcome page and a small square logo in the header. Both are
//! built by compositing a resampled icon over a procedurally generated
//! background, then flattening to RGB.

use crate::resample;
use anyhow::{Context, Result};
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::path::Path;
use std::str::FromStr;

/// Dimensions required by the installer builder.
pub const WIZARD_WIDTH: u32 = 164;
pub const WIZARD_HEIGHT: u32 = 314;
pub const WIZARD_SMALL_EDGE: u32 = 55;

/// Icon placement on the large banner.
const WIZARD_ICON_EDGE: u32 = 130;
const WIZARD_ICON_TOP: i64 = 60;

/// Background colors for the two banners.
#[derive(Debug, Clone)]
pub struct BannerPalette {
    pub gradient_top: Rgba<u8>,
    pub gradient_bottom: Rgba<u8>,
    pub matte: Rgba<u8>,
}

impl BannerPalette {
    /// Parses three CSS color strings, falling back to the stock palette for
    /// any value that does not parse.
    pub fn from_css(top: &str, bottom: &str, matte: &str) -> Self {
        Self {
            gradient_top: parse_css_color(top, Rgba([100, 50, 180, 255])),
            gradient_bottom: parse_css_color(bottom, Rgba([30, 120, 220, 255])),
            matte: parse_css_color(matte, Rgba([255, 255, 255, 255])),
        }
    }
}

fn parse_css_color(value: &str, fallback: Rgba<u8>) -> Rgba<u8> {
    css_color::Srgb::from_str(value)
        .map(|color| {
            Rgba([
                (color.red * 255.).round() as u8,
                (color.green * 255.).round() as u8,
                (color.blue * 255.).round() as u8,
                255,
            ])
        })
        .unwrap_or(fallback)
}

/// Opaque two-stop gradient interpolated per row, `top` at y = 0.
pub fn vertical_gradient(width: u32, height: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / height as f32;
        let lerp = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Rgba([
            lerp(top[0], bottom[0]),
            lerp(top[1], bottom[1]),
            lerp(top[2], bottom[2]),
            255,
        ])
    })
}

/// Writes `wizard-image.bmp` and `wizard-small.bmp` into `installer_dir`.
pub fn write_wizard_banners(
    master: &RgbaImage,
    installer_dir: &Path,
    palette: &BannerPalette,
) -> Result<()> {
    let mut large = vertical_gradient(
        WIZARD_WIDTH,
        WIZARD_HEIGHT,
        palette.gradient_top,
        palette.gradient_bottom,
    );
    let icon = resample::resize_exact(master, WIZARD_ICON_EDGE);
    let icon_left = i64::from((WIZARD_WIDTH - WIZARD_ICON_EDGE) / 2);
    imageops::overlay(&mut large, &icon, icon_left, WIZARD_ICON_TOP);
    save_bmp(&large, &installer_dir.join("wizard-image.bmp"))?;
    println!("  ✓ Generated wizard-image.bmp ({WIZARD_WIDTH}x{WIZARD_HEIGHT})");

    let mut small = RgbaImage::from_pixel(WIZARD_SMALL_EDGE, WIZARD_SMALL_EDGE, palette.matte);
    let icon = resample::resize_exact(master, WIZARD_SMALL_EDGE);
    imageops::overlay(&mut small, &icon, 0, 0);
    save_bmp(&small, &installer_dir.join("wizard-small.bmp"))?;
    println!("  ✓ Generated wizard-small.bmp ({WIZARD_SMALL_EDGE}x{WIZARD_SMALL_EDGE})");

    Ok(())
}

// Inno Setup reads the wizard images as opaque BMPs; alpha is dropped after
// compositing over the opaque background.
fn save_bmp(image: &RgbaImage, path: &Path) -> Result<()> {
    let flattened = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut file = std::fs::File::create(path).context("Failed to create BMP file")?;
    DynamicImage::ImageRgb8(flattened)
        .write_to(&mut file, image::ImageOutputFormat::Bmp)
        .context("Failed to write BMP")?;
    Ok(())
}
