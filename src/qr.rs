use crate::error::Result;
use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array2;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

/// Side length in pixels of every rendered QR code.
pub const QR_SIZE: usize = 300;

/// Light modules kept around the symbol on each side.
pub const QUIET_ZONE: usize = 4;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Square grid of set/unset modules, already scaled to pixel resolution.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    bits: Array2<bool>,
}

impl BitMatrix {
    /// Encodes `text` as a QR symbol and scales it into a `size` x `size` grid.
    ///
    /// The symbol is padded with a quiet zone, scaled by the largest whole
    /// factor that fits, and centered. If the padded symbol is wider than
    /// `size` the grid grows to fit it.
    pub fn encode(text: &str, size: usize) -> Result<Self> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)?;
        let width = code.width();
        let modules = code.to_colors();

        let padded = width + QUIET_ZONE * 2;
        let side = size.max(padded);
        let scale = (side / padded).max(1);
        let offset = (side - width * scale) / 2;

        debug!(width, scale, offset, side, "Rasterizing QR symbol");

        let bits = Array2::from_shape_fn((side, side), |(y, x)| {
            if x < offset || y < offset {
                return false;
            }
            let (mx, my) = ((x - offset) / scale, (y - offset) / scale);
            mx < width && my < width && modules[my * width + mx] == Color::Dark
        });

        Ok(Self { bits })
    }

    pub fn side(&self) -> usize {
        self.bits.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[[y, x]]
    }

    /// Black for set modules, white everywhere else.
    pub fn render_to_image(&self) -> RgbImage {
        let side = self.side() as u32;
        ImageBuffer::from_fn(side, side, |x, y| {
            if self.get(x as usize, y as usize) {
                BLACK
            } else {
                WHITE
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str =
        "otpauth://totp/Example:alice@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example";

    #[test]
    fn matrix_has_requested_side() {
        let matrix = BitMatrix::encode(URL, QR_SIZE).unwrap();
        assert_eq!(matrix.side(), QR_SIZE);
    }

    #[test]
    fn quiet_zone_is_left_white() {
        let matrix = BitMatrix::encode(URL, QR_SIZE).unwrap();
        for i in 0..QR_SIZE {
            assert!(!matrix.get(i, 0));
            assert!(!matrix.get(0, i));
            assert!(!matrix.get(i, QR_SIZE - 1));
            assert!(!matrix.get(QR_SIZE - 1, i));
        }
    }

    #[test]
    fn finder_pattern_corner_is_dark() {
        let code = QrCode::with_error_correction_level(URL.as_bytes(), EcLevel::L).unwrap();
        let width = code.width();
        let scale = QR_SIZE / (width + QUIET_ZONE * 2);
        let offset = (QR_SIZE - width * scale) / 2;

        let matrix = BitMatrix::encode(URL, QR_SIZE).unwrap();
        assert!(matrix.get(offset, offset));
        assert!(matrix.get(offset + scale - 1, offset + scale - 1));
        assert!(!matrix.get(offset - 1, offset));
    }

    #[test]
    fn rendered_image_is_black_and_white() {
        let img = BitMatrix::encode(URL, QR_SIZE).unwrap().render_to_image();
        assert_eq!(img.dimensions(), (QR_SIZE as u32, QR_SIZE as u32));
        assert!(img.pixels().all(|p| *p == BLACK || *p == WHITE));
        assert!(img.pixels().any(|p| *p == BLACK));
    }

    #[test]
    fn oversized_symbol_grows_the_grid() {
        let matrix = BitMatrix::encode(URL, 10).unwrap();
        assert!(matrix.side() > 10);
    }
}
