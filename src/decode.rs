use crate::error::{Error, Result};
use crate::luminance::{LuminanceSource, RgbLuminanceSource};
use image::io::Reader as ImageReader;
use rqrr::PreparedImage;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Reads the QR code in the image at `path` and returns its text verbatim.
pub fn decode_file(path: &Path) -> Result<String> {
    let exists = path.exists();
    let readable = exists && File::open(path).is_ok();
    if !readable {
        return Err(Error::Unreadable {
            path: path.to_path_buf(),
            exists,
            readable,
        });
    }

    // Sniff the format from the content so a PNG saved under another
    // extension still loads.
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| Error::LoadImage {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    debug!(width = img.width(), height = img.height(), "Loaded image");

    match decode_luminance(&RgbLuminanceSource::new(&img)) {
        Some(text) => text,
        None => Err(Error::NoSymbol {
            path: path.to_path_buf(),
        }),
    }
}

/// Runs detection over `source`. Returns `None` when no grid is found,
/// otherwise the first successful decode or the last grid's error.
pub fn decode_luminance<S: LuminanceSource>(source: &S) -> Option<Result<String>> {
    let mut prepared =
        PreparedImage::prepare_from_greyscale(source.width(), source.height(), |x, y| {
            source.get(x, y)
        });
    let grids = prepared.detect_grids();
    debug!(grids = grids.len(), "Detected QR grids");

    let mut last = None;
    for grid in grids {
        match grid.decode() {
            Ok((_, content)) => return Some(Ok(content)),
            Err(e) => last = Some(Err(Error::Symbol(format!("{e:?}")))),
        }
    }
    last
}
