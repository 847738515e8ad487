use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_SOURCE: &str = "./art";
pub const DEFAULT_STATIC: &str = "./static";
pub const DEFAULT_MENU_WIDTH: u32 = 400;
pub const DEFAULT_BUILDING_WIDTH: u32 = 200;
pub const DEFAULT_INKSCAPE: &str = "inkscape";

/// Where the art lives, where the PNGs go, and how wide each class of
/// asset renders. Populated from the command line and environment by
/// [`crate::cli`]; library callers fill it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the SVG sources.
    pub source: PathBuf,
    /// Directory the rendered PNGs are written into.
    pub static_dir: PathBuf,
    /// Pixel width for menu artwork.
    pub menu_width: u32,
    /// Pixel width for building and duck artwork.
    pub building_width: u32,
    /// Converter binary, either a bare name resolved on PATH or a path.
    pub inkscape: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            static_dir: PathBuf::from(DEFAULT_STATIC),
            menu_width: DEFAULT_MENU_WIDTH,
            building_width: DEFAULT_BUILDING_WIDTH,
            inkscape: PathBuf::from(DEFAULT_INKSCAPE),
        }
    }
}

impl Config {
    /// Rejects zero widths before any converter runs. Negative overrides
    /// never reach this point: the widths are unsigned and the command
    /// line refuses to parse them.
    pub fn validate(&self) -> Result<()> {
        if self.menu_width == 0 {
            return Err(Error::InvalidWidth {
                name: "MENU_WIDTH",
                value: self.menu_width,
            });
        }
        if self.building_width == 0 {
            return Err(Error::InvalidWidth {
                name: "BUILDING_WIDTH",
                value: self.building_width,
            });
        }
        Ok(())
    }
}
