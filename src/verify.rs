use std::{fs::File, path::Path};

use crate::error::{Error, Result};

/// Reads the pixel width out of a PNG header. Only the metadata up to
/// the first IDAT chunk is decoded, never the pixel data.
pub fn png_width(path: &Path) -> Result<u32> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    Ok(reader.info().width)
}

/// Checks that a rendered PNG came out at the requested width. The
/// height is the converter's business (it scales by aspect ratio), so
/// only the width is pinned.
pub fn expect_width(path: &Path, expected: u32) -> Result<()> {
    let actual = png_width(path)?;
    if actual != expected {
        return Err(Error::WidthMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}
