use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read file: {} (exists: {exists}, readable: {readable})", path.display())]
    Unreadable {
        path: PathBuf,
        exists: bool,
        readable: bool,
    },

    #[error("Failed to load image: {}", path.display())]
    LoadImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No QR code found in image: {}", path.display())]
    NoSymbol { path: PathBuf },

    #[error("Failed to decode QR code: {0}")]
    Symbol(String),

    #[error("Failed to generate QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
