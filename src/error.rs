use std::{io, path::PathBuf, process::ExitStatus, result};

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing source file {path}")]
    MissingSource { path: PathBuf },
    #[error("converter `{program}` not found ({hint})")]
    ConverterNotFound { program: String, hint: &'static str },
    #[error("converter failed ({status}) rendering {svg}: {stderr}")]
    ConverterFailed {
        svg: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{name} must be a positive pixel width (got {value})")]
    InvalidWidth { name: &'static str, value: u32 },
    #[error("no such asset: {0}")]
    UnknownTarget(String),
    #[error("{failed} of {total} assets failed to build")]
    Incomplete { failed: usize, total: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[cfg(feature = "verify")]
    #[error("{path}: width is {actual}px, expected {expected}px")]
    WidthMismatch {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },
    #[cfg(feature = "verify")]
    #[error(transparent)]
    PngDecoding(#[from] png::DecodingError),
    #[cfg(feature = "parallel")]
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
