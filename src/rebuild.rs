use std::{fs, path::Path, time::SystemTime};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    error::{Error, Result},
    manifest::{self, Asset},
    rasterize::{RenderJob, Rasterizer},
};

/// How a run treats freshness and failures.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Render even when the PNG is newer than its SVG.
    pub force: bool,
    /// Carry on past a failing asset instead of stopping at it.
    pub keep_going: bool,
    /// Worker threads. 1 keeps the run sequential, 0 sizes the pool to
    /// the CPU count.
    #[cfg(feature = "parallel")]
    pub jobs: usize,
    /// Decode each rendered PNG afterwards and check its width.
    #[cfg(feature = "verify")]
    pub verify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            force: false,
            keep_going: false,
            #[cfg(feature = "parallel")]
            jobs: 1,
            #[cfg(feature = "verify")]
            verify: false,
        }
    }
}

/// What a run did. `failed` stays zero unless `keep_going` is set,
/// since the first failure otherwise aborts the run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

enum Outcome {
    Rendered,
    UpToDate,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Rendered => self.rendered += 1,
            Outcome::UpToDate => self.up_to_date += 1,
        }
    }
}

/// Renders every selected asset that is out of date, in table order.
///
/// With `keep_going` a failing asset is logged and the rest still
/// build; the run then fails with [`Error::Incomplete`] so the exit
/// status stays honest. Without it the first failure aborts the run.
pub fn rebuild(config: &Config, targets: &[String], options: &Options) -> Result<Summary> {
    config.validate()?;
    let assets = manifest::select(targets)?;
    let rasterizer = Rasterizer::new(&config.inkscape);

    #[cfg(feature = "parallel")]
    if options.jobs != 1 {
        return rebuild_parallel(config, &assets, &rasterizer, options);
    }

    let mut summary = Summary::default();
    for asset in &assets {
        match run_one(&rasterizer, asset, config, options) {
            Ok(outcome) => summary.record(outcome),
            Err(err) if options.keep_going => {
                summary.failed += 1;
                error!("{}: {err}", asset.stem());
            }
            Err(err) => return Err(err),
        }
    }
    finish(summary, assets.len())
}

#[cfg(feature = "parallel")]
fn rebuild_parallel(
    config: &Config,
    assets: &[Asset],
    rasterizer: &Rasterizer,
    options: &Options,
) -> Result<Summary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()?;
    let results: Vec<(Asset, Result<Outcome>)> = pool.install(|| {
        assets
            .par_iter()
            .map(|asset| (*asset, run_one(rasterizer, asset, config, options)))
            .collect()
    });

    // Workers always run to completion, so every failure is reported
    // even without keep_going; the error policy only picks what to
    // return. Results come back in table order regardless of which
    // worker finished first.
    let mut summary = Summary::default();
    let mut first_failure = None;
    for (asset, result) in results {
        match result {
            Ok(outcome) => summary.record(outcome),
            Err(err) => {
                summary.failed += 1;
                error!("{}: {err}", asset.stem());
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }
    match first_failure {
        Some(err) if !options.keep_going => Err(err),
        _ => finish(summary, assets.len()),
    }
}

fn finish(summary: Summary, total: usize) -> Result<Summary> {
    if summary.failed > 0 {
        return Err(Error::Incomplete {
            failed: summary.failed,
            total,
        });
    }
    info!(
        "{} rendered, {} up to date",
        summary.rendered, summary.up_to_date
    );
    Ok(summary)
}

fn run_one(
    rasterizer: &Rasterizer,
    asset: &Asset,
    config: &Config,
    options: &Options,
) -> Result<Outcome> {
    let svg = asset.svg(config);
    let png = asset.png(config);
    let width = asset.width(config);

    if !options.force && is_fresh(&svg, &png) {
        debug!("{}: up to date", asset.stem());
        return Ok(Outcome::UpToDate);
    }

    info!("{} -> {} ({width}px)", svg.display(), png.display());
    let job = RenderJob { svg, png, width };
    rasterizer.render(&job)?;
    #[cfg(feature = "verify")]
    if options.verify {
        crate::verify::expect_width(&job.png, width)?;
    }
    Ok(Outcome::Rendered)
}

/// A PNG is fresh when it exists and is no older than its SVG, the
/// same timestamp rule `make` applies. Unreadable timestamps count as
/// stale so the converter gets a chance to repair the situation.
///
/// Width changes do not invalidate: rendering leaves no record of the
/// width used, so a run after changing `MENU_WIDTH` needs `force`.
fn is_fresh(svg: &Path, png: &Path) -> bool {
    match (mtime(png), mtime(svg)) {
        (Some(png), Some(svg)) => png >= svg,
        _ => false,
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

#[cfg(test)]
mod tests {
    use std::{fs::File, time::UNIX_EPOCH};

    use super::*;

    #[test]
    fn fresh_requires_both_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("duck.svg");
        let png = dir.path().join("duck.png");

        assert!(!is_fresh(&svg, &png));
        fs::write(&svg, "<svg/>").unwrap();
        assert!(!is_fresh(&svg, &png), "missing png must be stale");

        fs::write(&png, "png").unwrap();
        assert!(is_fresh(&svg, &png), "png written after svg is fresh");
    }

    #[test]
    fn old_png_goes_stale() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("duck.svg");
        let png = dir.path().join("duck.png");
        fs::write(&svg, "<svg/>").unwrap();
        fs::write(&png, "png").unwrap();

        File::options()
            .write(true)
            .open(&png)
            .unwrap()
            .set_modified(UNIX_EPOCH)
            .unwrap();
        assert!(!is_fresh(&svg, &png));
    }

    #[test]
    fn zero_width_stops_before_selection() {
        let config = Config {
            menu_width: 0,
            ..Config::default()
        };
        let result = rebuild(&config, &[], &Options::default());
        assert!(matches!(result, Err(Error::InvalidWidth { .. })));
    }
}
