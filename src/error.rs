use enough::StopReason;

/// Errors from BMP decoding, filtering and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Not an uncompressed 24-bit BMP with a 40-byte info header.
    #[error("unsupported file format")]
    UnsupportedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("not enough memory to store a {width}x{height} image")]
    AllocationFailure { width: i64, height: i64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("image is {actual_width}x{actual_height} but headers declare {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
