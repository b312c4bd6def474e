//! # bmpfilter
//!
//! Uncompressed 24-bit BMP decoding and encoding, with five pixel filters.
//!
//! ## Byte-identical headers
//!
//! A decoded [`Bitmap`] keeps both header records exactly as read. Encoding
//! writes them back unchanged, followed by the pixel rows with the same
//! per-row padding, so an unfiltered decode/encode reproduces the file
//! (zeroing any garbage in padding bytes and dropping trailing data).
//!
//! ## Filters
//!
//! - [`Filter::Grayscale`], [`Filter::Sepia`], [`Filter::Reflect`]: per pixel, in place
//! - [`Filter::Blur`], [`Filter::Edges`]: 3×3 convolution over an unmodified source
//!
//! ## Non-Goals
//!
//! - Compressed, palettized or non-24-bit BMP variants
//! - Streaming decode; the whole image is held in memory
//! - File I/O or argument handling (callers pass bytes in and get bytes out)
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfilter::{Filter, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let mut bitmap = bmpfilter::decode(data, Unstoppable)?;
//! println!("{}x{}", bitmap.width(), bitmap.height());
//!
//! bitmap.apply(Filter::Sepia, Unstoppable)?;
//! let out: Vec<u8> = bitmap.encode(Unstoppable)?;
//!
//! // or in one call
//! let out2 = bmpfilter::filter_bmp(data, "e".parse()?, Unstoppable)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod decode;
mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod filter;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::{BmpHeaders, FileHeader, InfoHeader, Permissiveness};
pub use decode::DecodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpError;
pub use filter::{Filter, FilterKind, ParseFilterError};
pub use image::Image;
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, Pixel};

/// Decode a BMP file with default settings.
///
/// Fails with [`BmpError::UnsupportedFormat`] unless the file is an
/// uncompressed 24-bit BMP with a 40-byte info header.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a bitmap, reusing its headers unchanged.
pub fn encode(bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bitmap.encode(stop)
}

/// Apply one filter to a decoded bitmap.
pub fn apply_filter(bitmap: &mut Bitmap, filter: Filter, stop: impl Stop) -> Result<(), BmpError> {
    bitmap.apply(filter, stop)
}

/// Decode `data`, apply `filter` and encode the result.
///
/// Nothing is returned unless every step succeeds.
pub fn filter_bmp(data: &[u8], filter: Filter, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    let stop: &dyn Stop = &stop;
    let mut bitmap = bmp::decode(data, None, Permissiveness::default(), stop)?;
    filter.apply_dyn(bitmap.image_mut(), stop)?;
    bmp::encode(&bitmap, stop)
}
