use std::ops::{Index, IndexMut};

use crate::error::BmpError;
use crate::pixel::{BYTES_PER_PIXEL, Pixel};

/// Owned, row-major grid of pixels.
///
/// Row 0 is the first row stored in the file. The grid never reorders
/// rows, whatever the sign of the header height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl Image {
    /// Allocate a zero-filled image, reporting allocation failure instead of aborting.
    pub fn try_new(width: usize, height: usize) -> Result<Self, BmpError> {
        let failure = || BmpError::AllocationFailure {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        };
        let len = width.checked_mul(height).ok_or_else(failure)?;
        // Byte size must be addressable too, not just the element count.
        len.checked_mul(BYTES_PER_PIXEL).ok_or_else(failure)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| failure())?;
        pixels.resize(len, Pixel::default());
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Image with every pixel set to `fill`. Fails like [`Image::try_new`].
    pub fn filled(width: usize, height: usize, fill: Pixel) -> Result<Self, BmpError> {
        let mut image = Self::try_new(width, height)?;
        image.pixels.fill(fill);
        Ok(image)
    }

    /// Wrap an existing row-major pixel vector.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(pixels: Vec<Pixel>, width: usize, height: usize) -> Option<Self> {
        if width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row after row.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// One row of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[Pixel] {
        assert!(row < self.height, "row {row} out of bounds");
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Mutable access to one row of `width` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row_mut(&mut self, row: usize) -> &mut [Pixel] {
        assert!(row < self.height, "row {row} out of bounds");
        let start = row * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Iterate rows in file order. Yields nothing for zero-width images.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Iterate rows mutably in file order. Yields nothing for zero-width images.
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [Pixel]> {
        self.pixels.chunks_exact_mut(self.width.max(1))
    }

    /// Pixel at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Borrow as an [`imgref::ImgRef`]. `x` is the column, `y` the row.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width, self.height)
    }

    /// Convert to an [`imgref::ImgVec`] without copying.
    #[cfg(feature = "imgref")]
    pub fn into_imgvec(self) -> imgref::ImgVec<Pixel> {
        imgref::ImgVec::new(self.pixels, self.width, self.height)
    }
}

impl Index<(usize, usize)> for Image {
    type Output = Pixel;

    /// Index by `(row, col)`.
    fn index(&self, (row, col): (usize, usize)) -> &Pixel {
        assert!(col < self.width, "column {col} out of bounds");
        &self.pixels[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for Image {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Pixel {
        assert!(col < self.width, "column {col} out of bounds");
        &mut self.pixels[row * self.width + col]
    }
}
