use std::{fs, io, path::PathBuf, process::Command};

use tracing::debug;

use crate::error::{Error, Result};

const INSTALL_HINT: &str = "install Inkscape, or point INKSCAPE at the binary";

/// One converter invocation: render `svg` to `png` at `width` pixels.
/// Only the width is passed, so the converter keeps the aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub svg: PathBuf,
    pub png: PathBuf,
    pub width: u32,
}

/// The external SVG-to-PNG converter. The program is configurable; the
/// flag contract below is Inkscape's headless PNG export and holds for
/// anything claiming to be a drop-in replacement.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    program: PathBuf,
}

impl Rasterizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the export command without running it.
    fn command(&self, job: &RenderJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--export-type=png")
            .arg("--export-filename")
            .arg(&job.png)
            .arg("--export-width")
            .arg(job.width.to_string())
            .arg(&job.svg);
        cmd
    }

    /// Renders one job, creating the output directory first.
    ///
    /// The source must exist before the converter is invoked; whether it
    /// is well-formed SVG is the converter's call, surfaced through
    /// [`Error::ConverterFailed`] with whatever it wrote to stderr.
    pub fn render(&self, job: &RenderJob) -> Result<()> {
        if !job.svg.is_file() {
            return Err(Error::MissingSource {
                path: job.svg.clone(),
            });
        }
        if let Some(parent) = job.png.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut cmd = self.command(job);
        debug!("running {cmd:?}");
        let output = cmd.output().map_err(|error| {
            if error.kind() == io::ErrorKind::NotFound {
                Error::ConverterNotFound {
                    program: self.program.display().to_string(),
                    hint: INSTALL_HINT,
                }
            } else {
                Error::Io(error)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ConverterFailed {
                svg: job.svg.display().to_string(),
                status: output.status,
                stderr: if stderr.is_empty() {
                    "(no stderr)".to_string()
                } else {
                    stderr
                },
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    fn job() -> RenderJob {
        RenderJob {
            svg: PathBuf::from("art/ducks/sitting_duck.svg"),
            png: PathBuf::from("static/ducks/sitting_duck.png"),
            width: 200,
        }
    }

    #[test]
    fn command_follows_the_export_contract() {
        let cmd = Rasterizer::new("inkscape").command(&job());
        assert_eq!(cmd.get_program(), "inkscape");
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                "--export-type=png",
                "--export-filename",
                "static/ducks/sitting_duck.png",
                "--export-width",
                "200",
                "art/ducks/sitting_duck.svg",
            ]
        );
    }

    #[test]
    fn missing_source_fails_before_spawning() {
        // A converter that cannot exist: if the precheck were skipped,
        // this would surface as ConverterNotFound instead.
        let rasterizer = Rasterizer::new("/nonexistent/rasterizer");
        let result = rasterizer.render(&RenderJob {
            svg: PathBuf::from("/nonexistent/duck.svg"),
            png: PathBuf::from("/tmp/duck.png"),
            width: 200,
        });
        assert!(matches!(result, Err(Error::MissingSource { .. })));
    }

    #[test]
    fn absent_program_maps_to_converter_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("duck.svg");
        fs::write(&svg, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();

        let rasterizer = Rasterizer::new(dir.path().join("no-such-inkscape"));
        let result = rasterizer.render(&RenderJob {
            svg,
            png: dir.path().join("duck.png"),
            width: 200,
        });
        match result {
            Err(Error::ConverterNotFound { program, hint }) => {
                assert!(program.ends_with("no-such-inkscape"));
                assert!(hint.contains("INKSCAPE"));
            }
            other => panic!("expected ConverterNotFound, got {other:?}"),
        }
    }
}
