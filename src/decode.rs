use enough::Stop;

use crate::bitmap::Bitmap;
use crate::bmp::{self, Permissiveness};
use crate::error::BmpError;
use crate::limits::Limits;

/// Builder for decoding a BMP file with optional limits and strictness.
///
/// ```
/// use bmpfilter::{DecodeRequest, Limits, Permissiveness, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let data: &[u8] = b"not a bitmap";
/// let result = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode(Unstoppable);
/// assert!(result.is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Parse and validate the headers, then read every row.
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BmpError> {
        bmp::decode(self.data, self.limits, self.permissiveness, &stop)
    }
}
