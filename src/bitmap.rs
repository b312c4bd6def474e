use enough::Stop;

use crate::bmp::{self, BmpHeaders};
use crate::error::BmpError;
use crate::filter::Filter;
use crate::image::Image;

/// A decoded BMP: the headers exactly as read, plus the pixel grid.
///
/// Encoding writes the headers back unchanged, so only pixel bytes can
/// differ between input and output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    headers: BmpHeaders,
    image: Image,
}

impl Bitmap {
    pub(crate) fn from_parts(headers: BmpHeaders, image: Image) -> Self {
        Self { headers, image }
    }

    /// Wrap an image with freshly generated bottom-up 24-bit headers.
    pub fn new(image: Image) -> Result<Self, BmpError> {
        let headers = BmpHeaders::for_image(image.width(), image.height())?;
        Ok(Self { headers, image })
    }

    pub fn headers(&self) -> &BmpHeaders {
        &self.headers
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Mutable pixel access. Replacing the image with one of a different
    /// size makes [`Bitmap::encode`] fail with `DimensionMismatch`.
    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    pub fn into_image(self) -> Image {
        self.image
    }

    pub fn into_parts(self) -> (BmpHeaders, Image) {
        (self.headers, self.image)
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Run one filter over the pixels.
    pub fn apply(&mut self, filter: Filter, stop: impl Stop) -> Result<(), BmpError> {
        filter.apply_dyn(&mut self.image, &stop)
    }

    /// Serialize headers and padded rows.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        bmp::encode(self, &stop)
    }
}
