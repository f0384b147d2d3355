use anyhow::Result;
use clap::Parser;
use emblem_gen::asset_gen::{self, Options};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "emblem-gen",
    about = "Generate application icon and installer banner assets from a single source image"
)]
struct Args {
    /// Path to the source image (roughly square artwork on a flat background).
    #[clap(value_name = "INPUT", default_value = "instalador.png")]
    input: PathBuf,

    /// Output directory for the generated application icons.
    #[clap(short, long, value_name = "DIR", default_value = "src-tauri/icons")]
    output: PathBuf,

    /// Output directory for the installer wizard banners.
    #[clap(long, value_name = "DIR", default_value = "installer")]
    installer: PathBuf,

    /// Character overlaid in the center of every icon.
    #[clap(short, long, default_value_t = 'V')]
    emblem: char,

    /// Explicit TrueType font file to use instead of probing system fonts.
    #[clap(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Top color of the large wizard banner gradient (CSS color format).
    #[clap(long, default_value = "rgb(100, 50, 180)")]
    banner_top: String,

    /// Bottom color of the large wizard banner gradient (CSS color format).
    #[clap(long, default_value = "rgb(30, 120, 220)")]
    banner_bottom: String,

    /// Matte color behind the small wizard banner (CSS color format).
    #[clap(long, default_value = "#ffffff")]
    matte: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    asset_gen::generate_assets(&Options {
        input: args.input,
        icons_dir: args.output,
        installer_dir: args.installer,
        emblem: args.emblem,
        font: args.font,
        banner_top: args.banner_top,
        banner_bottom: args.banner_bottom,
        matte: args.matte,
    })
}
