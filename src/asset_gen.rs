//! Pipeline orchestration and icon container writers.

use crate::banner::{self, BannerPalette};
use crate::{background, font, glyph, resample};
use anyhow::{Context, Result};
use icns::{IconFamily, IconType};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Runtime options, filled in from the CLI.
#[derive(Debug)]
pub struct Options {
    pub input: PathBuf,
    pub icons_dir: PathBuf,
    pub installer_dir: PathBuf,
    pub emblem: char,
    pub font: Option<PathBuf>,
    pub banner_top: String,
    pub banner_bottom: String,
    pub matte: String,
}

/// Output filename to square edge length. Files are written in this order.
pub const SIZE_TABLE: &[(&str, u32)] = &[
    ("16x16.png", 16),
    ("32x32.png", 32),
    ("48x48.png", 48),
    ("64x64.png", 64),
    ("128x128.png", 128),
    ("128x128@2x.png", 256),
    ("256x256.png", 256),
    ("512x512.png", 512),
    ("icon.png", 1024),
    ("Square30x30Logo.png", 30),
    ("Square44x44Logo.png", 44),
    ("Square71x71Logo.png", 71),
    ("Square89x89Logo.png", 89),
    ("Square107x107Logo.png", 107),
    ("Square142x142Logo.png", 142),
    ("Square150x150Logo.png", 150),
    ("Square284x284Logo.png", 284),
    ("Square310x310Logo.png", 310),
    ("StoreLogo.png", 50),
];

/// Layer sizes embedded in the `.ico` container, ascending.
pub const ICO_SIZES: &[u32] = &[16, 32, 48, 64, 128, 256];

#[derive(Debug, Deserialize)]
struct IcnsEntry {
    size: u32,
    ostype: String,
}

/// Runs the whole pipeline: load, background removal, emblem compositing,
/// then every output file in a fixed order. Aborts on the first error.
pub fn generate_assets(options: &Options) -> Result<()> {
    let source = image::open(&options.input)
        .context("Failed to load source image")?
        .to_rgba8();
    println!("Source image: {}x{}", source.width(), source.height());

    // Resolve the font up front: without one no emblem can render, and the
    // run must abort before any file is written.
    let font = font::resolve(options.font.as_deref())?;

    let cutout = background::remove_background(&source);
    let master = glyph::compose_master(&cutout, options.emblem, &font)?;

    create_dir_all(&options.icons_dir).context("Can't create icons directory")?;
    create_dir_all(&options.installer_dir).context("Can't create installer directory")?;

    for &(filename, edge) in SIZE_TABLE {
        let resized = resample::resize_exact(&master, edge);
        save_png(&resized, &options.icons_dir.join(filename))?;
        println!("  ✓ Generated {filename} ({edge}x{edge})");
    }

    write_ico(&master, &options.icons_dir.join("icon.ico"))?;
    write_icns(&master, &options.icons_dir.join("icon.icns"))?;

    let palette = BannerPalette::from_css(
        &options.banner_top,
        &options.banner_bottom,
        &options.matte,
    );
    banner::write_wizard_banners(&master, &options.installer_dir, &palette)?;

    println!("\nAll assets generated");
    Ok(())
}

/// Encodes the `.ico` container: one PNG-compressed frame per entry in
/// [`ICO_SIZES`]. The encoder writes the directory header with per-entry
/// byte lengths and offsets, and stores the 256 layer with the
/// zero-dimension marker the format uses for its maximum size.
pub fn encode_ico(master: &RgbaImage) -> Result<Vec<u8>> {
    let mut frames = Vec::new();

    for &size in ICO_SIZES {
        let resized = resample::resize_exact(master, size);

        // Only the 256px layer can be compressed according to the ico specs
        if size == 256 {
            let mut buf = Vec::new();
            write_png(resized.as_raw(), &mut buf, size)?;
            frames.push(IcoFrame::with_encoded(buf, size, size, ColorType::Rgba8)?);
        } else {
            frames.push(IcoFrame::as_png(
                resized.as_raw(),
                size,
                size,
                ColorType::Rgba8,
            )?);
        }
    }

    let mut out = Vec::new();
    let encoder = IcoEncoder::new(&mut out);
    encoder.encode_images(&frames)?;
    Ok(out)
}

fn write_ico(master: &RgbaImage, path: &Path) -> Result<()> {
    println!("Generating icon.ico...");
    let bytes = encode_ico(master)?;
    let mut out_file = BufWriter::new(File::create(path)?);
    out_file.write_all(&bytes)?;
    out_file.flush()?;
    println!("  ✓ Generated icon.ico");
    Ok(())
}

/// Builds the `.icns` icon family from the fixed size/ostype table.
pub fn build_icns(master: &RgbaImage) -> Result<IconFamily> {
    let icns_json = r#"
    {
      "16x16": { "size": 16, "ostype": "is32" },
      "16x16@2x": { "size": 32, "ostype": "ic11" },
      "32x32": { "size": 32, "ostype": "il32" },
      "32x32@2x": { "size": 64, "ostype": "ic12" },
      "128x128": { "size": 128, "ostype": "ic07" },
      "128x128@2x": { "size": 256, "ostype": "ic13" },
      "256x256": { "size": 256, "ostype": "ic08" },
      "256x256@2x": { "size": 512, "ostype": "ic14" },
      "512x512": { "size": 512, "ostype": "ic09" },
      "512x512@2x": { "size": 1024, "ostype": "ic10" }
    }
    "#;

    let entries: HashMap<String, IcnsEntry> = serde_json::from_str(icns_json).unwrap();
    let mut family = IconFamily::new();

    for (name, entry) in &entries {
        let resized = resample::resize_exact(master, entry.size);
        let mut buf = Vec::new();
        write_png(resized.as_raw(), &mut buf, entry.size)?;
        let image = icns::Image::read_png(&buf[..])?;

        family
            .add_icon_with_type(
                &image,
                IconType::from_ostype(entry.ostype.parse().unwrap()).unwrap(),
            )
            .with_context(|| format!("Can't add {name} to icns family"))?;
    }

    Ok(family)
}

fn write_icns(master: &RgbaImage, path: &Path) -> Result<()> {
    println!("Generating icon.icns...");
    let family = build_icns(master)?;
    let mut out_file = BufWriter::new(File::create(path)?);
    family.write(&mut out_file)?;
    out_file.flush()?;
    println!("  ✓ Generated icon.icns");
    Ok(())
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path).context("Failed to create PNG file")?;
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}
