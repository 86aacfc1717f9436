//! Owned bitmap and mask types for indicator artwork.
//!
//! `embedded-graphics` image types borrow their pixel data, which makes
//! them awkward to store inside a long-lived widget. [`Bitmap`] owns its
//! pixels in an `alloc::Vec` (the same approach the framebuffer takes) and
//! carries a per-pixel coverage bitset standing in for an alpha channel:
//! uncovered pixels are simply not drawn.
//!
//! [`Mask`] is the single-channel derivative of a bitmap: coverage only,
//! no colors. It is produced eagerly by [`Bitmap::to_mask`] when a mask
//! source is installed, so the draw path never has to derive anything.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use thiserror_no_std::Error;

/// Error types for bitmap construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitmapError {
    /// Pixel buffer length does not match the declared dimensions
    #[error("buffer holds {actual} entries but {expected} are required for the declared size")]
    SizeMismatch {
        /// Entries required by the declared size
        expected: usize,
        /// Entries actually supplied
        actual: usize,
    },
}

fn bitset_len(size: Size) -> usize {
    ((size.width * size.height) as usize).div_ceil(8)
}

/// Owned RGB565 bitmap with per-pixel coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<Rgb565>,
    /// One bit per pixel, row-major. A set bit means the pixel is drawn.
    coverage: Vec<u8>,
}

impl Bitmap {
    /// Build a fully covered bitmap from a pixel buffer.
    ///
    /// The buffer must hold exactly `width * height` pixels.
    pub fn from_pixels(size: Size, pixels: Vec<Rgb565>) -> Result<Self, BitmapError> {
        let expected = (size.width * size.height) as usize;
        if pixels.len() != expected {
            return Err(BitmapError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            size,
            pixels,
            coverage: vec![0xFF; bitset_len(size)],
        })
    }

    /// Build a fully covered bitmap from big-endian RGB565 bytes.
    ///
    /// The buffer must hold exactly `width * height * 2` bytes.
    pub fn from_raw(size: Size, data: &[u8]) -> Result<Self, BitmapError> {
        let expected = (size.width * size.height) as usize * 2;
        if data.len() != expected {
            return Err(BitmapError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(2)
            .map(|pair| Rgb565::from(RawU16::new(u16::from_be_bytes([pair[0], pair[1]]))))
            .collect();

        Self::from_pixels(size, pixels)
    }

    /// Fully covered bitmap of a single color. Handy for demos and tests.
    pub fn solid(size: Size, color: Rgb565) -> Self {
        Self {
            size,
            pixels: vec![color; (size.width * size.height) as usize],
            coverage: vec![0xFF; bitset_len(size)],
        }
    }

    /// Mark a pixel as covered (drawn) or uncovered (skipped).
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set_covered(&mut self, x: u32, y: u32, covered: bool) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let index = (y * self.size.width + x) as usize;
        if covered {
            self.coverage[index / 8] |= 1 << (index % 8);
        } else {
            self.coverage[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Whether the pixel at `(x, y)` is drawn.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        let index = (y * self.size.width + x) as usize;
        self.coverage[index / 8] & (1 << (index % 8)) != 0
    }

    /// Color of the pixel at `(x, y)`, or `None` out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[(y * self.size.width + x) as usize])
    }

    /// Derive the single-channel mask of this bitmap.
    ///
    /// This is the "alpha-only render" of the source: colors are discarded
    /// and only the coverage channel survives.
    pub fn to_mask(&self) -> Mask {
        Mask {
            size: self.size,
            coverage: self.coverage.clone(),
        }
    }

    /// Blit every covered pixel at `top_left`.
    pub fn draw_at<D: DrawTarget<Color = Rgb565>>(
        &self,
        top_left: Point,
        target: &mut D,
    ) -> Result<(), D::Error> {
        let size = self.size;
        target.draw_iter((0..size.height).flat_map(|y| {
            (0..size.width).filter_map(move |x| {
                if self.is_covered(x, y) {
                    let point = top_left + Point::new(x as i32, y as i32);
                    Some(Pixel(point, self.pixels[(y * size.width + x) as usize]))
                } else {
                    None
                }
            })
        }))
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

/// Single-channel mask: coverage bits and a size, no colors.
///
/// A mask is drawn by painting a tint color through its covered pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    size: Size,
    coverage: Vec<u8>,
}

impl Mask {
    /// Whether the pixel at `(x, y)` is part of the mask.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        if x >= self.size.width || y >= self.size.height {
            return false;
        }
        let index = (y * self.size.width + x) as usize;
        self.coverage[index / 8] & (1 << (index % 8)) != 0
    }

    /// Paint `color` through the mask at `top_left`.
    pub fn draw_tinted<D: DrawTarget<Color = Rgb565>>(
        &self,
        top_left: Point,
        color: Rgb565,
        target: &mut D,
    ) -> Result<(), D::Error> {
        let size = self.size;
        target.draw_iter((0..size.height).flat_map(|y| {
            (0..size.width).filter_map(move |x| {
                if self.is_covered(x, y) {
                    Some(Pixel(top_left + Point::new(x as i32, y as i32), color))
                } else {
                    None
                }
            })
        }))
    }
}

impl OriginDimensions for Mask {
    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Canvas;

    #[test]
    fn from_pixels_rejects_wrong_length() {
        let result = Bitmap::from_pixels(Size::new(4, 4), vec![Rgb565::RED; 15]);
        assert_eq!(
            result.unwrap_err(),
            BitmapError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let result = Bitmap::from_raw(Size::new(2, 2), &[0u8; 7]);
        assert_eq!(
            result.unwrap_err(),
            BitmapError::SizeMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn from_raw_decodes_big_endian_rgb565() {
        // 0xF800 = pure red, 0x07E0 = pure green
        let bitmap = Bitmap::from_raw(Size::new(2, 1), &[0xF8, 0x00, 0x07, 0xE0]).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some(Rgb565::RED));
        assert_eq!(bitmap.pixel(1, 0), Some(Rgb565::GREEN));
    }

    #[test]
    fn to_mask_preserves_coverage() {
        let mut bitmap = Bitmap::solid(Size::new(3, 3), Rgb565::BLUE);
        bitmap.set_covered(1, 1, false);
        bitmap.set_covered(2, 0, false);

        let mask = bitmap.to_mask();
        assert_eq!(mask.size(), Size::new(3, 3));
        assert!(mask.is_covered(0, 0));
        assert!(!mask.is_covered(1, 1));
        assert!(!mask.is_covered(2, 0));
    }

    #[test]
    fn draw_at_skips_uncovered_pixels() {
        let mut bitmap = Bitmap::solid(Size::new(2, 2), Rgb565::RED);
        bitmap.set_covered(0, 1, false);

        let mut canvas = Canvas::new(4, 4);
        bitmap.draw_at(Point::new(1, 1), &mut canvas).unwrap();

        assert_eq!(canvas.pixel(1, 1), Rgb565::RED);
        assert_eq!(canvas.pixel(2, 1), Rgb565::RED);
        assert_eq!(canvas.pixel(2, 2), Rgb565::RED);
        assert_eq!(canvas.pixel(1, 2), Rgb565::BLACK);
    }

    #[test]
    fn draw_tinted_paints_mask_with_color() {
        let mut source = Bitmap::solid(Size::new(2, 1), Rgb565::RED);
        source.set_covered(1, 0, false);
        let mask = source.to_mask();

        let mut canvas = Canvas::new(4, 4);
        mask.draw_tinted(Point::zero(), Rgb565::CYAN, &mut canvas).unwrap();

        assert_eq!(canvas.pixel(0, 0), Rgb565::CYAN);
        assert_eq!(canvas.pixel(1, 0), Rgb565::BLACK);
    }
}
