//! Pixel-row writer for 24-bit BMP data.

use enough::Stop;

use super::header::{BmpHeaders, HEADERS_LEN};
use super::row_padding;
use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{BYTES_PER_PIXEL, to_bgr};

/// Append every row of `image` as BGR triples plus zero padding.
pub fn encode_rows(image: &Image, out: &mut Vec<u8>, stop: &dyn Stop) -> Result<(), BmpError> {
    let pad_bytes = row_padding(image.width());
    for (row_idx, row) in image.rows().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for &px in row {
            out.extend_from_slice(&to_bgr(px));
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    Ok(())
}

/// Write `headers` unchanged followed by the rows of `image`.
///
/// The whole file is built in memory; nothing is returned on error.
pub(crate) fn encode_bmp(
    headers: &BmpHeaders,
    image: &Image,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let width = headers.width()?;
    let height = headers.height();
    if image.width() != width || image.height() != height {
        return Err(BmpError::DimensionMismatch {
            width,
            height,
            actual_width: image.width(),
            actual_height: image.height(),
        });
    }

    // Image already holds width*height pixels, so this cannot overflow.
    let row_bytes = width * BYTES_PER_PIXEL + row_padding(width);
    let mut out = Vec::with_capacity(HEADERS_LEN + row_bytes * height);
    out.extend_from_slice(&headers.to_bytes());

    stop.check()?;
    encode_rows(image, &mut out, stop)?;
    Ok(out)
}
