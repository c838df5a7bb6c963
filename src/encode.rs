use crate::error::Result;
use crate::qr::{BitMatrix, QR_SIZE};
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Output path used when none is given on the command line.
pub const DEFAULT_OUTPUT: &str = "qrcode.png";

/// JPEG quality, half of the encoder's maximum.
pub const JPG_QUALITY: u8 = 50;

/// Target for warnings about a requested format being written as another.
pub const FALLBACK_TARGET: &str = "qr_totp_converter::fallback";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl OutputFormat {
    const SUFFIXES: [(&'static str, OutputFormat); 4] = [
        (".jpg", OutputFormat::Jpeg),
        (".png", OutputFormat::Png),
        (".gif", OutputFormat::Gif),
        (".webp", OutputFormat::WebP),
    ];

    /// Matches the file name suffix case-insensitively.
    pub fn from_suffix(path: &str) -> Option<Self> {
        let lower = path.to_ascii_lowercase();
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|(_, format)| *format)
    }
}

/// Final path and format for a requested output file. Unrecognized
/// suffixes get `.png` appended.
pub fn resolve_output(requested: &str) -> (String, OutputFormat) {
    match OutputFormat::from_suffix(requested) {
        Some(format) => (requested.to_string(), format),
        None => (format!("{requested}.png"), OutputFormat::Png),
    }
}

/// Renders `totp_url` as a QR code and writes it to `output`.
///
/// Returns the path actually written, which may carry an appended `.png`.
pub fn encode_to_file(totp_url: &str, output: &str) -> Result<String> {
    let img = BitMatrix::encode(totp_url, QR_SIZE)?.render_to_image();

    let (path, format) = resolve_output(output);
    debug!(path = %path, ?format, "Writing QR code");
    write_image(&img, Path::new(&path), format)?;

    Ok(path)
}

/// Serializes `img` in `format`. WebP has no encoder here, so it is written
/// as PNG under the requested name.
pub fn write_image(img: &RgbImage, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Png => img.save_with_format(path, ImageFormat::Png)?,
        OutputFormat::Gif => {
            let rgba: RgbaImage = img.convert();
            rgba.save_with_format(path, ImageFormat::Gif)?;
        }
        OutputFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, JPG_QUALITY)
                .encode_image(img)?;
            writer.flush()?;
        }
        OutputFormat::WebP => {
            warn!(
                target: FALLBACK_TARGET,
                path = %path.display(),
                "WEBP format requires additional library. Falling back to PNG."
            );
            img.save_with_format(path, ImageFormat::Png)?;
        }
    }
    Ok(())
}
