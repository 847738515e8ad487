use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{self, Config},
    error::Result,
    manifest,
    rebuild::{self, Options},
};

/// Command line for the `artforge` binary. Every knob can also come
/// from the environment, so `MENU_WIDTH=64 artforge` and
/// `artforge --menu-width 64` mean the same thing.
#[derive(Parser, Debug)]
#[command(
    name = "artforge",
    version,
    about = "Rebuilds the game's PNG assets from their SVG sources via Inkscape"
)]
pub struct Args {
    /// Assets to rebuild, by stem or path (default: every asset)
    targets: Vec<String>,

    /// Directory holding the SVG sources
    #[arg(long, env = "SOURCE", default_value = config::DEFAULT_SOURCE)]
    source: PathBuf,

    /// Directory the rendered PNGs are written into
    #[arg(long, env = "STATIC", default_value = config::DEFAULT_STATIC)]
    static_dir: PathBuf,

    /// Pixel width for menu artwork
    #[arg(long, env = "MENU_WIDTH", default_value_t = config::DEFAULT_MENU_WIDTH)]
    menu_width: u32,

    /// Pixel width for building and duck artwork
    #[arg(long, env = "BUILDING_WIDTH", default_value_t = config::DEFAULT_BUILDING_WIDTH)]
    building_width: u32,

    /// Inkscape binary to invoke
    #[arg(long, env = "INKSCAPE", default_value = config::DEFAULT_INKSCAPE)]
    inkscape: PathBuf,

    /// Render even when the PNG is newer than its SVG
    #[arg(long, short)]
    force: bool,

    /// Carry on past a failing asset instead of stopping at it
    #[arg(long, short)]
    keep_going: bool,

    /// Render this many assets in parallel (0 = one per CPU)
    #[cfg(feature = "parallel")]
    #[arg(long, short, default_value_t = 1)]
    jobs: usize,

    /// Check the width of each rendered PNG afterwards
    #[cfg(feature = "verify")]
    #[arg(long)]
    verify: bool,

    /// Print the asset table with resolved paths and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            source: self.source.clone(),
            static_dir: self.static_dir.clone(),
            menu_width: self.menu_width,
            building_width: self.building_width,
            inkscape: self.inkscape.clone(),
        }
    }

    fn options(&self) -> Options {
        Options {
            force: self.force,
            keep_going: self.keep_going,
            #[cfg(feature = "parallel")]
            jobs: self.jobs,
            #[cfg(feature = "verify")]
            verify: self.verify,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = args.config();

    if args.list {
        config.validate()?;
        for asset in manifest::ASSETS {
            println!(
                "{} -> {} ({}px)",
                asset.svg(&config).display(),
                asset.png(&config).display(),
                asset.width(&config)
            );
        }
        return Ok(());
    }

    rebuild::rebuild(&config, &args.targets, &args.options())?;
    Ok(())
}
