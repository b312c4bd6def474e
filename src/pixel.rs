/// One 24-bit pixel, exposed as red/green/blue.
///
/// The file stores the same three channels in blue-green-red order; the
/// codec swaps them on the way in and out.
pub type Pixel = rgb::RGB8;

/// Bytes per pixel in the file's pixel stream.
pub const BYTES_PER_PIXEL: usize = 3;

/// Build a pixel from a B, G, R byte triple.
#[inline]
pub(crate) fn from_bgr(bgr: &[u8]) -> Pixel {
    Pixel::new(bgr[2], bgr[1], bgr[0])
}

/// Store a pixel as a B, G, R byte triple.
#[inline]
pub(crate) fn to_bgr(px: Pixel) -> [u8; BYTES_PER_PIXEL] {
    [px.b, px.g, px.r]
}

/// Round a non-negative channel value and cap it at 255.
///
/// No lower bound is applied. Callers only pass results of formulas that
/// are non-negative for 0..=255 inputs.
#[inline]
pub(crate) fn clamp_channel(v: f64) -> u8 {
    let rounded = v.round();
    debug_assert!(rounded >= 0.0, "negative channel value {rounded}");
    if rounded > 255.0 { 255 } else { rounded as u8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_order_roundtrip() {
        let px = from_bgr(&[1, 2, 3]);
        assert_eq!(px, Pixel::new(3, 2, 1));
        assert_eq!(to_bgr(px), [1, 2, 3]);
    }

    #[test]
    fn clamp_rounds_half_away_from_zero() {
        assert_eq!(clamp_channel(2.5), 3);
        assert_eq!(clamp_channel(2.49), 2);
        assert_eq!(clamp_channel(254.5), 255);
        assert_eq!(clamp_channel(300.2), 255);
    }
}
