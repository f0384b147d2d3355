//! Letter-emblem compositing on the master canvas.

use crate::resample;
use anyhow::{anyhow, Result};
use image::{imageops, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Edge length of the master canvas. 2x the largest 1024 output so every
/// downsample starts from supersampled pixels.
pub const MASTER_EDGE: u32 = 2048;

/// Glyph height as a fraction of the canvas height.
const GLYPH_HEIGHT_FRAC: f32 = 0.55;

/// Peak shadow alpha before blurring.
const SHADOW_ALPHA: f32 = 80.0;

/// Shadow blur sigma as a fraction of the canvas height.
const SHADOW_BLUR_FRAC: f32 = 0.004;

/// Resizes the background-removed foreground up to the master canvas and
/// composites the emblem onto it.
pub fn compose_master(
    foreground: &RgbaImage,
    emblem: char,
    font: &Font<'static>,
) -> Result<RgbaImage> {
    let mut master = resample::resize_exact(foreground, MASTER_EDGE);
    draw_emblem(&mut master, emblem, font)?;
    Ok(master)
}

/// Renders `emblem` centered on the canvas: a blurred drop shadow first, then
/// the solid white glyph, each on its own transparent layer.
///
/// Centering uses the glyph's tight pixel bounding box rather than its
/// advance width, so bearing offsets do not push the letter off-center.
pub fn draw_emblem(canvas: &mut RgbaImage, emblem: char, font: &Font) -> Result<()> {
    let (width, height) = canvas.dimensions();
    let scale = Scale::uniform(height as f32 * GLYPH_HEIGHT_FRAC);
    let glyph = font.glyph(emblem).scaled(scale).positioned(point(0.0, 0.0));
    let bounds = glyph
        .pixel_bounding_box()
        .ok_or_else(|| anyhow!("Font has no visible glyph for {emblem:?}"))?;

    let left = (width as i32 - bounds.width()) / 2;
    let top = (height as i32 - bounds.height()) / 2;
    let offset = (height as i32 / 100).max(2);

    let mut shadow = RgbaImage::new(width, height);
    let mut letter = RgbaImage::new(width, height);
    glyph.draw(|gx, gy, coverage| {
        let x = left + gx as i32;
        let y = top + gy as i32;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return;
        }
        let alpha = (coverage * 255.0).round() as u8;
        letter.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, alpha]));

        let sx = x + offset;
        let sy = y + offset;
        if sx < width as i32 && sy < height as i32 {
            let shadow_alpha = (coverage * SHADOW_ALPHA).round() as u8;
            shadow.put_pixel(sx as u32, sy as u32, Rgba([0, 0, 0, shadow_alpha]));
        }
    });

    let sigma = (height as f32 * SHADOW_BLUR_FRAC).max(1.0);
    let shadow = imageops::blur(&shadow, sigma);

    imageops::overlay(canvas, &shadow, 0, 0);
    imageops::overlay(canvas, &letter, 0, 0);
    Ok(())
}
