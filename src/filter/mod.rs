//! The five pixel filters and their dispatch.
//!
//! Per-pixel filters ([`grayscale`], [`sepia`], [`reflect`]) rewrite the
//! image in place. Convolution filters ([`blur`], [`edges`]) read every
//! neighbor from an unmodified source, so they take `&Image` and return a
//! new image; [`Filter::apply`] swaps the result in afterwards.

mod convolve;
mod pointwise;

pub use convolve::{blur, edges};
pub use pointwise::{grayscale, reflect, sepia};

use core::fmt;
use core::str::FromStr;

use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::Pixel;

/// Which filter to run. Exactly one is applied per image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    /// 3×3 box blur, shrinking at the borders.
    Blur,
    /// Sobel gradient magnitude per channel.
    Edges,
    /// Channel average.
    Grayscale,
    /// Horizontal mirror.
    Reflect,
    /// Fixed sepia tone matrix.
    Sepia,
}

/// How a filter reads its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Each output pixel depends only on itself (or on a mirrored partner
    /// within its row); safe to run in place.
    PerPixel,
    /// Each output pixel depends on a neighborhood; needs an unmodified
    /// source image.
    Convolution,
}

impl Filter {
    pub const ALL: [Filter; 5] = [
        Filter::Blur,
        Filter::Edges,
        Filter::Grayscale,
        Filter::Reflect,
        Filter::Sepia,
    ];

    pub fn kind(self) -> FilterKind {
        match self {
            Filter::Blur | Filter::Edges => FilterKind::Convolution,
            Filter::Grayscale | Filter::Reflect | Filter::Sepia => FilterKind::PerPixel,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Filter::Blur => "blur",
            Filter::Edges => "edges",
            Filter::Grayscale => "grayscale",
            Filter::Reflect => "reflect",
            Filter::Sepia => "sepia",
        }
    }

    /// Single-letter command-line flag (`b`, `e`, `g`, `r`, `s`).
    pub fn flag(self) -> char {
        match self {
            Filter::Blur => 'b',
            Filter::Edges => 'e',
            Filter::Grayscale => 'g',
            Filter::Reflect => 'r',
            Filter::Sepia => 's',
        }
    }

    /// Run this filter over `image`.
    ///
    /// Only fails if `stop` requests cancellation; the image is then left
    /// unchanged for convolution filters and partially filtered otherwise.
    pub fn apply(self, image: &mut Image, stop: impl Stop) -> Result<(), BmpError> {
        self.apply_dyn(image, &stop)
    }

    pub(crate) fn apply_dyn(self, image: &mut Image, stop: &dyn Stop) -> Result<(), BmpError> {
        match self {
            Filter::Grayscale => grayscale(image, stop),
            Filter::Sepia => sepia(image, stop),
            Filter::Reflect => reflect(image, stop),
            Filter::Blur => {
                *image = blur(image, stop)?;
                Ok(())
            }
            Filter::Edges => {
                *image = edges(image, stop)?;
                Ok(())
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Filter::from_str`] for an unknown name or flag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid filter: {0:?}")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    /// Accepts the full name or the one-letter flag, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Filter::ALL
            .into_iter()
            .find(|f| wanted == f.name() || wanted.len() == 1 && wanted.starts_with(f.flag()))
            .ok_or_else(|| ParseFilterError(s.to_owned()))
    }
}

/// Visit every row mutably, checking `stop` every 16 rows.
fn for_each_row(
    image: &mut Image,
    stop: &dyn Stop,
    mut f: impl FnMut(&mut [Pixel]),
) -> Result<(), BmpError> {
    for (row_idx, row) in image.rows_mut().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        f(row);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn parse_names_and_flags() {
        for f in Filter::ALL {
            assert_eq!(f.name().parse::<Filter>().unwrap(), f);
            assert_eq!(f.flag().to_string().parse::<Filter>().unwrap(), f);
            assert_eq!(f.to_string(), f.name());
        }
        assert_eq!("  Sepia ".parse::<Filter>().unwrap(), Filter::Sepia);
        assert!("x".parse::<Filter>().is_err());
        assert!("bl".parse::<Filter>().is_err());
        assert!("".parse::<Filter>().is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(Filter::Blur.kind(), FilterKind::Convolution);
        assert_eq!(Filter::Edges.kind(), FilterKind::Convolution);
        assert_eq!(Filter::Grayscale.kind(), FilterKind::PerPixel);
        assert_eq!(Filter::Reflect.kind(), FilterKind::PerPixel);
        assert_eq!(Filter::Sepia.kind(), FilterKind::PerPixel);
    }

    #[test]
    fn empty_images_pass_through() {
        for f in Filter::ALL {
            for (w, h) in [(0, 0), (0, 3), (3, 0)] {
                let mut img = Image::try_new(w, h).unwrap();
                f.apply(&mut img, Unstoppable).unwrap();
                assert_eq!((img.width(), img.height()), (w, h));
            }
        }
    }
}
