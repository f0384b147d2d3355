//! Flat-background removal via saturation-based region growing.
//!
//! The source artwork is assumed to sit on a visually uniform, low-saturation
//! background that touches all four corners. A flood fill seeded at the
//! corners grows through every connected low-saturation pixel; everything it
//! reaches becomes fully transparent. A feathered edge zone around the
//! detected region then ramps alpha with saturation so the cutout keeps
//! anti-aliased edges instead of a hard boundary.
//!
//! If the background shares the foreground's saturation range the fill will
//! eat into the artwork; there is no detection of that case.

use image::{Rgba, RgbaImage};
use std::collections::VecDeque;

/// Saturation below this value is treated as background during region growth.
pub const FLOOD_SATURATION_LIMIT: f32 = 0.10;

/// Lower cutoff of the edge-zone feathering ramp (fully transparent).
pub const FEATHER_LOW: f32 = 0.08;

/// Upper cutoff of the edge-zone feathering ramp (fully opaque).
pub const FEATHER_HIGH: f32 = 0.30;

/// Chebyshev radius of the edge zone grown around the detected background.
pub const EDGE_DILATE_RADIUS: i64 = 2;

/// Side length of the seed patch sampled at each corner.
const CORNER_PATCH: u32 = 4;

/// Saturation of a pixel as `(max - min) / max` over its RGB channels, with
/// pure black defined as zero saturation.
pub fn saturation(pixel: Rgba<u8>) -> f32 {
    let max = pixel[0].max(pixel[1]).max(pixel[2]) as f32;
    let min = pixel[0].min(pixel[1]).min(pixel[2]) as f32;
    if max == 0.0 {
        0.0
    } else {
        (max - min) / max
    }
}

/// Alpha assigned to edge-zone pixels: a linear ramp of saturation between
/// [`FEATHER_LOW`] and [`FEATHER_HIGH`].
pub fn feather_alpha(sat: f32) -> u8 {
    if sat <= FEATHER_LOW {
        0
    } else if sat >= FEATHER_HIGH {
        255
    } else {
        (((sat - FEATHER_LOW) / (FEATHER_HIGH - FEATHER_LOW)) * 255.0).round() as u8
    }
}

/// Replaces the corner-connected low-saturation background with a feathered
/// transparent hole. Background pixels come out as exactly `(0, 0, 0, 0)` so
/// no residual color bleeds into later blends.
pub fn remove_background(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    let mut out = source.clone();
    if width == 0 || height == 0 {
        return out;
    }

    let sat: Vec<f32> = source.pixels().map(|p| saturation(*p)).collect();
    let idx = |x: u32, y: u32| (y * width + x) as usize;

    // Multi-source flood fill over an explicit work queue; each pixel is
    // enqueued at most once.
    let mut background = vec![false; (width * height) as usize];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    let patch_w = CORNER_PATCH.min(width);
    let patch_h = CORNER_PATCH.min(height);
    let corners = [
        (0, 0),
        (width - patch_w, 0),
        (0, height - patch_h),
        (width - patch_w, height - patch_h),
    ];
    for (cx, cy) in corners {
        for y in cy..cy + patch_h {
            for x in cx..cx + patch_w {
                let i = idx(x, y);
                if !background[i] && sat[i] < FLOOD_SATURATION_LIMIT {
                    background[i] = true;
                    queue.push_back((x, y));
                }
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let i = idx(nx as u32, ny as u32);
                if !background[i] && sat[i] < FLOOD_SATURATION_LIMIT {
                    background[i] = true;
                    queue.push_back((nx as u32, ny as u32));
                }
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            if background[idx(x, y)] {
                out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }

    // Feather the ring of foreground pixels bordering the detected region.
    let dilated = dilate(&background, width, height);
    for y in 0..height {
        for x in 0..width {
            let i = idx(x, y);
            if background[i] || !dilated[i] {
                continue;
            }
            let pixel = out.get_pixel_mut(x, y);
            let alpha = pixel[3].min(feather_alpha(sat[i]));
            if alpha == 0 {
                *pixel = Rgba([0, 0, 0, 0]);
            } else {
                pixel[3] = alpha;
            }
        }
    }

    out
}

/// Morphological max-expansion of the mask by [`EDGE_DILATE_RADIUS`].
fn dilate(mask: &[bool], width: u32, height: u32) -> Vec<bool> {
    let mut out = vec![false; mask.len()];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            if !mask[(y * width as i64 + x) as usize] {
                continue;
            }
            for dy in -EDGE_DILATE_RADIUS..=EDGE_DILATE_RADIUS {
                for dx in -EDGE_DILATE_RADIUS..=EDGE_DILATE_RADIUS {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    out[(ny * width as i64 + nx) as usize] = true;
                }
            }
        }
    }
    out
}
