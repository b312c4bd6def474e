//! Pixel-row reader for 24-bit BMP data.

use enough::Stop;

use super::header::{BmpHeaders, Permissiveness};
use super::row_stride;
use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{BYTES_PER_PIXEL, from_bgr};

/// Most row bytes [`Permissiveness::Permissive`] will zero-fill past the
/// end of the data. Larger gaps are reported as [`BmpError::UnexpectedEof`].
pub const MAX_ZERO_FILL_BYTES: usize = 64 * 1024 * 1024;

/// Read `|height|` rows of `width` BGR triples from `pixel_data`, which
/// starts right after the 54 header bytes. Row padding is skipped.
///
/// Rows land in the image in file order. Truncated data is an error unless
/// `permissiveness` is [`Permissiveness::Permissive`], in which case the
/// missing pixels stay zero.
pub fn decode_rows(
    pixel_data: &[u8],
    headers: &BmpHeaders,
    permissiveness: Permissiveness,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let width = headers.width()?;
    let height = headers.height();
    let too_large = || BmpError::AllocationFailure {
        width: i64::from(headers.info.width),
        height: i64::from(headers.info.height),
    };
    let row_bytes = width.checked_mul(BYTES_PER_PIXEL).ok_or_else(too_large)?;
    let stride = row_stride(width).ok_or_else(too_large)?;

    let permissive = permissiveness == Permissiveness::Permissive;
    if height > 0 && row_bytes > 0 {
        // Last row's padding may be absent; its pixels may not.
        let needed = stride
            .saturating_mul(height - 1)
            .saturating_add(row_bytes);
        let missing = needed.saturating_sub(pixel_data.len());
        if missing > 0 && (!permissive || missing > MAX_ZERO_FILL_BYTES) {
            return Err(BmpError::UnexpectedEof);
        }
    }

    let mut image = Image::try_new(width, height)?;
    stop.check()?;

    for (row, out) in image.rows_mut().enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let src = row
            .checked_mul(stride)
            .and_then(|start| pixel_data.get(start..))
            .unwrap_or(&[]);
        let available = src.len().min(row_bytes);
        if available < row_bytes && !permissive {
            return Err(BmpError::UnexpectedEof);
        }
        for (px, bgr) in out
            .iter_mut()
            .zip(src[..available].chunks_exact(BYTES_PER_PIXEL))
        {
            *px = from_bgr(bgr);
        }
        if available < row_bytes {
            break;
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    fn headers(width: i32, height: i32) -> BmpHeaders {
        let mut h = BmpHeaders::for_image(1, 1).unwrap();
        h.info.width = width;
        h.info.height = height;
        h
    }

    #[test]
    fn skips_padding_between_rows() {
        // width 1: 3 pixel bytes + 1 padding byte per row
        let data = [1, 2, 3, 0xEE, 4, 5, 6, 0xEE];
        let img = decode_rows(&data, &headers(1, 2), Permissiveness::Standard, &Unstoppable)
            .unwrap();
        assert_eq!(img.pixels(), &[Pixel::new(3, 2, 1), Pixel::new(6, 5, 4)]);
    }

    #[test]
    fn negative_height_keeps_file_order() {
        let data = [1, 2, 3, 0, 4, 5, 6, 0];
        let img = decode_rows(&data, &headers(1, -2), Permissiveness::Standard, &Unstoppable)
            .unwrap();
        assert_eq!(img.height(), 2);
        assert_eq!(img[(0, 0)], Pixel::new(3, 2, 1));
    }

    #[test]
    fn final_row_padding_is_optional() {
        let data = [1, 2, 3, 0, 4, 5, 6];
        decode_rows(&data, &headers(1, 2), Permissiveness::Standard, &Unstoppable).unwrap();
    }

    #[test]
    fn truncated_rows_error_unless_permissive() {
        let data = [1, 2, 3, 0, 4];
        let err = decode_rows(&data, &headers(1, 3), Permissiveness::Standard, &Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BmpError::UnexpectedEof));

        let img = decode_rows(&data, &headers(1, 3), Permissiveness::Permissive, &Unstoppable)
            .unwrap();
        assert_eq!(
            img.pixels(),
            &[Pixel::new(3, 2, 1), Pixel::default(), Pixel::default()]
        );
    }

    #[test]
    fn permissive_zero_fill_is_capped() {
        // 40000x40000 declared, no pixel data at all
        let err = decode_rows(
            &[],
            &headers(40_000, 40_000),
            Permissiveness::Permissive,
            &Unstoppable,
        )
        .unwrap_err();
        assert!(matches!(err, BmpError::UnexpectedEof));

        // a gap just under the cap is still filled
        let width = 1024;
        let rows = MAX_ZERO_FILL_BYTES / (width * BYTES_PER_PIXEL);
        let img = decode_rows(
            &[],
            &headers(width as i32, rows as i32),
            Permissiveness::Permissive,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(img.height(), rows);
    }

    #[test]
    fn huge_dimensions_fail_before_allocating() {
        let err = decode_rows(
            &[0u8; 16],
            &headers(i32::MAX, i32::MAX),
            Permissiveness::Standard,
            &Unstoppable,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BmpError::UnexpectedEof | BmpError::AllocationFailure { .. }
        ));
    }
}
