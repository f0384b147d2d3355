//! Premultiplied-alpha resampling.
//!
//! Resizing an image with partially transparent edges using a naive filter
//! blends the (meaningless) color of fully transparent pixels into the edge,
//! leaving dark halos. The fix is to premultiply each channel by normalized
//! alpha, resize in float space, then divide the result back out.

use image::{
    imageops::{self, FilterType},
    Rgba, Rgba32FImage, RgbaImage,
};

/// Minimum divisor used when un-premultiplying near-zero alpha.
pub const ALPHA_DIVISOR_FLOOR: f32 = 1.0 / 512.0;

/// Post-resize alpha below which a pixel is scrubbed to fully transparent.
/// Small icons show fringe artifacts more readily, so small targets get a
/// more aggressive threshold.
pub fn fringe_threshold(edge: u32) -> u8 {
    if edge <= 32 {
        64
    } else if edge <= 64 {
        48
    } else if edge <= 128 {
        32
    } else {
        24
    }
}

/// Forces every pixel with alpha below `threshold` to exactly `(0, 0, 0, 0)`,
/// discarding translucent rims left by the resize filter.
pub fn scrub_fringe(image: &mut RgbaImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        if pixel[3] < threshold {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// Downsamples `source` to an exact `edge` x `edge` bitmap with Lanczos3 over
/// premultiplied alpha, then scrubs the sub-threshold fringe.
pub fn resize_exact(source: &RgbaImage, edge: u32) -> RgbaImage {
    let premultiplied = premultiply(source);
    let resized = imageops::resize(&premultiplied, edge, edge, FilterType::Lanczos3);
    let mut out = unpremultiply(&resized);
    scrub_fringe(&mut out, fringe_threshold(edge));
    out
}

fn premultiply(source: &RgbaImage) -> Rgba32FImage {
    let mut out = Rgba32FImage::new(source.width(), source.height());
    for (dst, src) in out.pixels_mut().zip(source.pixels()) {
        let alpha = src[3] as f32 / 255.0;
        *dst = Rgba([
            src[0] as f32 / 255.0 * alpha,
            src[1] as f32 / 255.0 * alpha,
            src[2] as f32 / 255.0 * alpha,
            alpha,
        ]);
    }
    out
}

fn unpremultiply(source: &Rgba32FImage) -> RgbaImage {
    let mut out = RgbaImage::new(source.width(), source.height());
    for (dst, src) in out.pixels_mut().zip(source.pixels()) {
        let alpha = src[3].clamp(0.0, 1.0);
        let divisor = alpha.max(ALPHA_DIVISOR_FLOOR);
        let restore = |channel: f32| ((channel / divisor).clamp(0.0, 1.0) * 255.0).round() as u8;
        *dst = Rgba([
            restore(src[0]),
            restore(src[1]),
            restore(src[2]),
            (alpha * 255.0).round() as u8,
        ]);
    }
    out
}
