use enough::Stop;

use super::for_each_row;
use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{Pixel, clamp_channel};

/// Replace every channel with the rounded mean of the pixel's three channels.
pub fn grayscale(image: &mut Image, stop: &dyn Stop) -> Result<(), BmpError> {
    for_each_row(image, stop, |row| {
        for px in row {
            let sum = u32::from(px.r) + u32::from(px.g) + u32::from(px.b);
            // mean of three bytes always fits
            let avg = (f64::from(sum) / 3.0).round() as u8;
            *px = Pixel::new(avg, avg, avg);
        }
    })
}

/// Apply the sepia tone matrix, capping each channel at 255.
pub fn sepia(image: &mut Image, stop: &dyn Stop) -> Result<(), BmpError> {
    for_each_row(image, stop, |row| {
        for px in row {
            *px = sepia_pixel(*px);
        }
    })
}

fn sepia_pixel(px: Pixel) -> Pixel {
    let (r, g, b) = (f64::from(px.r), f64::from(px.g), f64::from(px.b));
    Pixel::new(
        clamp_channel(0.393 * r + 0.769 * g + 0.189 * b),
        clamp_channel(0.349 * r + 0.686 * g + 0.168 * b),
        clamp_channel(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

/// Mirror each row horizontally: column `c` swaps with `width - 1 - c`.
pub fn reflect(image: &mut Image, stop: &dyn Stop) -> Result<(), BmpError> {
    for_each_row(image, stop, |row| row.reverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn grayscale_rounds_mean() {
        // (1 + 0 + 0) / 3 = 0.33 -> 0, (1 + 1 + 0) / 3 = 0.67 -> 1
        let px = vec![Pixel::new(1, 0, 0), Pixel::new(1, 1, 0), Pixel::new(255, 255, 254)];
        let mut img = Image::from_pixels(px, 3, 1).unwrap();
        grayscale(&mut img, &Unstoppable).unwrap();
        assert_eq!(
            img.pixels(),
            &[Pixel::new(0, 0, 0), Pixel::new(1, 1, 1), Pixel::new(255, 255, 255)]
        );
    }

    #[test]
    fn sepia_known_values() {
        assert_eq!(sepia_pixel(Pixel::new(0, 0, 0)), Pixel::new(0, 0, 0));
        // 24.98, 22.25, 17.33
        assert_eq!(sepia_pixel(Pixel::new(10, 20, 30)), Pixel::new(25, 22, 17));
    }

    #[test]
    fn sepia_caps_at_255() {
        // white: 344.505, 306.765, 238.935
        assert_eq!(sepia_pixel(Pixel::new(255, 255, 255)), Pixel::new(255, 255, 239));
    }

    #[test]
    fn reflect_odd_width_keeps_middle() {
        let px: Vec<Pixel> = (1..=3u8).map(|v| Pixel::new(v, 0, 0)).collect();
        let mut img = Image::from_pixels(px, 3, 1).unwrap();
        reflect(&mut img, &Unstoppable).unwrap();
        let reds: Vec<u8> = img.pixels().iter().map(|p| p.r).collect();
        assert_eq!(reds, [3, 2, 1]);
    }
}
