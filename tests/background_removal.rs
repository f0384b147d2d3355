use emblem_gen::background::{
    feather_alpha, remove_background, saturation, FEATHER_HIGH, FEATHER_LOW,
};
use image::{Rgba, RgbaImage};

const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// 100x100 uniform gray field with a 40x40 solid red square in the center.
fn gray_field_with_red_square() -> RgbaImage {
    RgbaImage::from_fn(100, 100, |x, y| {
        if (30..70).contains(&x) && (30..70).contains(&y) {
            RED
        } else {
            GRAY
        }
    })
}

#[test]
fn border_connected_background_becomes_transparent() {
    let cutout = remove_background(&gray_field_with_red_square());

    for (x, y, pixel) in cutout.enumerate_pixels() {
        let inside = (30..70).contains(&x) && (30..70).contains(&y);
        if inside {
            assert_eq!(pixel[3], 255, "foreground pixel ({x},{y}) lost opacity");
        } else {
            assert_eq!(
                *pixel,
                Rgba([0, 0, 0, 0]),
                "background pixel ({x},{y}) survived with color"
            );
        }
    }
}

#[test]
fn interior_low_saturation_region_is_not_reached() {
    // A gray hole fully enclosed by the red square is not corner-connected,
    // so the fill must not reach it.
    let mut source = gray_field_with_red_square();
    for y in 45..55 {
        for x in 45..55 {
            source.put_pixel(x, y, GRAY);
        }
    }

    let cutout = remove_background(&source);
    assert_eq!(cutout.get_pixel(50, 50)[3], 255);
    assert_eq!(*cutout.get_pixel(5, 5), Rgba([0, 0, 0, 0]));
}

#[test]
fn saturation_handles_black_and_gray() {
    assert_eq!(saturation(Rgba([0, 0, 0, 255])), 0.0);
    assert_eq!(saturation(GRAY), 0.0);
    assert!(saturation(RED) > 0.9);
}

#[test]
fn feather_ramp_is_monotonic() {
    let steps = 50;
    let mut previous = feather_alpha(FEATHER_LOW);
    for step in 0..=steps {
        let sat = FEATHER_LOW + (FEATHER_HIGH - FEATHER_LOW) * step as f32 / steps as f32;
        let alpha = feather_alpha(sat);
        assert!(alpha >= previous, "alpha decreased at saturation {sat}");
        previous = alpha;
    }

    assert_eq!(feather_alpha(0.0), 0);
    assert_eq!(feather_alpha(FEATHER_LOW), 0);
    assert_eq!(feather_alpha(FEATHER_HIGH), 255);
    assert_eq!(feather_alpha(1.0), 255);
}

#[test]
fn cutout_resampled_to_16_keeps_red_core() {
    let cutout = remove_background(&gray_field_with_red_square());
    let small = emblem_gen::resample::resize_exact(&cutout, 16);

    assert_eq!(small.dimensions(), (16, 16));
    let center = small.get_pixel(8, 8);
    assert!(center[3] >= 250, "core went transparent: {center:?}");
    assert!(
        center[0] > 180 && center[1] < 80 && center[2] < 80,
        "core is no longer red: {center:?}"
    );
}
