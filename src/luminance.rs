//! Greyscale views over decoded images, in the form the QR detector reads.

use image::RgbImage;

/// A read-only, row-addressable 8-bit intensity map.
pub trait LuminanceSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Copies row `y` into `row`, reusing its allocation when it is large
    /// enough and allocating one of exactly `width()` bytes otherwise.
    #[cfg_attr(not(test), allow(dead_code))]
    fn row(&self, y: usize, row: Option<Vec<u8>>) -> Vec<u8>;

    /// The whole intensity map in row-major order.
    fn matrix(&self) -> &[u8];

    fn get(&self, x: usize, y: usize) -> u8 {
        self.matrix()[y * self.width() + x]
    }
}

/// Luma of an RGB triple: `(77R + 150G + 28B) >> 8`.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 28) >> 8) as u8
}

/// Intensity map computed once, up front, from an RGB image.
#[derive(Clone, Debug)]
pub struct RgbLuminanceSource {
    width: usize,
    height: usize,
    luminances: Vec<u8>,
}

impl RgbLuminanceSource {
    pub fn new(image: &RgbImage) -> Self {
        let luminances = image
            .pixels()
            .map(|p| luminance(p[0], p[1], p[2]))
            .collect();

        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            luminances,
        }
    }
}

impl LuminanceSource for RgbLuminanceSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize, row: Option<Vec<u8>>) -> Vec<u8> {
        let mut row = match row {
            Some(buf) if buf.len() >= self.width => buf,
            _ => vec![0; self.width],
        };
        let start = y * self.width;
        row[..self.width].copy_from_slice(&self.luminances[start..start + self.width]);
        row
    }

    fn matrix(&self) -> &[u8] {
        &self.luminances
    }
}
