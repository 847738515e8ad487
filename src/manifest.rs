use std::path::PathBuf;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Which configured width an asset renders at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    /// Menu artwork, `MENU_WIDTH` pixels wide.
    Menu,
    /// Building and duck artwork, `BUILDING_WIDTH` pixels wide.
    Building,
}

/// One entry of the fixed rebuild list. The stem is a relative path
/// without extension: the source is `SOURCE/<stem>.svg` and the output
/// is `STATIC/<stem>.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    stem: &'static str,
    class: WidthClass,
}

/// Every PNG the game serves that is generated from SVG artwork.
/// Adding art means adding a line here.
pub const ASSETS: &[Asset] = &[
    Asset::new("gui/letters", WidthClass::Menu),
    Asset::new("gui/duck_shapes", WidthClass::Menu),
    Asset::new("buildings/nest", WidthClass::Building),
    Asset::new("buildings/nests", WidthClass::Building),
    Asset::new("ducks/sitting_duck", WidthClass::Building),
];

impl Asset {
    const fn new(stem: &'static str, class: WidthClass) -> Self {
        Self { stem, class }
    }

    pub fn stem(&self) -> &'static str {
        self.stem
    }

    pub fn class(&self) -> WidthClass {
        self.class
    }

    /// Path of the SVG source under the configured art directory.
    pub fn svg(&self, config: &Config) -> PathBuf {
        config.source.join(format!("{}.svg", self.stem))
    }

    /// Path of the rendered PNG under the configured static directory.
    pub fn png(&self, config: &Config) -> PathBuf {
        config.static_dir.join(format!("{}.png", self.stem))
    }

    /// The pixel width this asset renders at under `config`.
    pub fn width(&self, config: &Config) -> u32 {
        match self.class {
            WidthClass::Menu => config.menu_width,
            WidthClass::Building => config.building_width,
        }
    }
}

/// Looks up an asset by any name a caller plausibly types: the bare stem,
/// the stem with either extension, or a source/output path ending in it.
pub fn find(target: &str) -> Option<&'static Asset> {
    let trimmed = target.trim_start_matches("./");
    let stem = trimmed
        .strip_suffix(".png")
        .or_else(|| trimmed.strip_suffix(".svg"))
        .unwrap_or(trimmed);
    ASSETS.iter().find(|asset| {
        stem == asset.stem
            || stem
                .strip_suffix(asset.stem)
                .is_some_and(|prefix| prefix.ends_with('/'))
    })
}

/// Resolves the requested targets, or the whole table when none are
/// given. Order follows the table, so a full run is deterministic.
pub fn select(targets: &[String]) -> Result<Vec<Asset>> {
    if targets.is_empty() {
        return Ok(ASSETS.to_vec());
    }
    targets
        .iter()
        .map(|target| {
            find(target)
                .copied()
                .ok_or_else(|| Error::UnknownTarget(target.clone()))
        })
        .collect()
}
