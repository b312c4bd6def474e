//! Uncompressed 24-bit BMP: headers and the padded row codec.
//!
//! Use top-level [`crate::decode()`], [`crate::encode()`], etc. for whole files;
//! the row-level functions here work on the pixel section alone.

mod decode;
mod encode;
mod header;

pub use decode::{MAX_ZERO_FILL_BYTES, decode_rows};
pub use encode::encode_rows;
pub use header::{
    BmpHeaders, FILE_HEADER_LEN, FileHeader, HEADERS_LEN, INFO_HEADER_LEN, InfoHeader,
    Permissiveness,
};

use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, Pixel};
use enough::Stop;

/// Zero bytes appended to each row so its length is a multiple of 4.
pub fn row_padding(width: usize) -> usize {
    // (width * 3) % 4 without overflowing for huge widths
    (4 - (width % 4) * BYTES_PER_PIXEL % 4) % 4
}

/// Bytes per stored row including padding, or `None` on overflow.
pub fn row_stride(width: usize) -> Option<usize> {
    width
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_add(row_padding(width))
}

/// Parse, validate and decode a whole BMP file.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
    stop: &dyn Stop,
) -> Result<Bitmap, BmpError> {
    let headers = BmpHeaders::parse(data)?;
    headers.validate()?;
    if permissiveness == Permissiveness::Strict {
        headers.validate_strict(data.len())?;
    }
    check_limits(limits, headers.width()?, headers.height())?;
    stop.check()?;
    let image = decode_rows(&data[HEADERS_LEN..], &headers, permissiveness, stop)?;
    Ok(Bitmap::from_parts(headers, image))
}

fn check_limits(limits: Option<&Limits>, width: usize, height: usize) -> Result<(), BmpError> {
    if let Some(limits) = limits {
        limits.check(width, height)?;
        let out_bytes = width
            .saturating_mul(height)
            .saturating_mul(size_of::<Pixel>());
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Encode a bitmap with its original headers.
pub(crate) fn encode(bitmap: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(bitmap.headers(), bitmap.image(), stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_matches_formula() {
        for width in 0..64usize {
            assert_eq!(row_padding(width), (4 - (width * 3) % 4) % 4, "width {width}");
            assert_eq!(row_stride(width).unwrap() % 4, 0);
        }
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        // 15 bytes of pixels round up to 16
        assert_eq!(row_padding(5), 1);
        assert_eq!(row_padding(7), 3);
    }

    #[test]
    fn padding_does_not_overflow() {
        assert_eq!(row_padding(usize::MAX), (4 - (3 * 3) % 4) % 4);
        assert!(row_stride(usize::MAX).is_none());
    }
}
