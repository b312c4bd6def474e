//! BITMAPFILEHEADER / BITMAPINFOHEADER records.
//!
//! Both records are parsed field by field from little-endian bytes and
//! serialized back the same way, so output headers are byte-identical to
//! the input regardless of in-memory layout.

use crate::error::BmpError;

/// Size of [`FileHeader`] on disk.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of [`InfoHeader`] on disk.
pub const INFO_HEADER_LEN: usize = 40;
/// Both headers; also the only pixel-data offset this crate accepts.
pub const HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const MAGIC: [u8; 2] = *b"BM";

/// Controls how strictly the decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Also reject files whose planes field is not 1 or whose file-size
    /// field disagrees with the input length.
    Strict,

    /// Reject unsupported headers and truncated pixel data.
    #[default]
    Standard,

    /// Zero-fill pixels missing from truncated files, up to
    /// [`MAX_ZERO_FILL_BYTES`](crate::bmp::MAX_ZERO_FILL_BYTES) of row data.
    /// Pair with [`Limits`](crate::Limits) to bound the image size itself.
    Permissive,
}

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// `b"BM"` for supported files.
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the first pixel byte; must be 54.
    pub pixel_offset: u32,
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Negative for top-down row order. The sign is carried through, never
    /// acted on.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// Little-endian reader over a fixed header slice.
struct Fields<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

impl FileHeader {
    fn read(bytes: &[u8; FILE_HEADER_LEN]) -> Self {
        let mut f = Fields::new(bytes);
        Self {
            magic: f.take(),
            file_size: f.u32(),
            reserved1: f.u16(),
            reserved2: f.u16(),
            pixel_offset: f.u32(),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

impl InfoHeader {
    fn read(bytes: &[u8; INFO_HEADER_LEN]) -> Self {
        let mut f = Fields::new(bytes);
        Self {
            header_size: f.u32(),
            width: f.i32(),
            height: f.i32(),
            planes: f.u16(),
            bit_count: f.u16(),
            compression: f.u32(),
            image_size: f.u32(),
            x_pixels_per_meter: f.i32(),
            y_pixels_per_meter: f.i32(),
            colors_used: f.u32(),
            colors_important: f.u32(),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut out = [0u8; INFO_HEADER_LEN];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }
}

/// File header and info header as read from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeaders {
    /// Parse the first 54 bytes of `data`. Does not validate.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        let file: &[u8; FILE_HEADER_LEN] = data
            .get(..FILE_HEADER_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(BmpError::UnexpectedEof)?;
        let info: &[u8; INFO_HEADER_LEN] = data
            .get(FILE_HEADER_LEN..HEADERS_LEN)
            .and_then(|s| s.try_into().ok())
            .ok_or(BmpError::UnexpectedEof)?;
        Ok(Self {
            file: FileHeader::read(file),
            info: InfoHeader::read(info),
        })
    }

    /// Accept only uncompressed 24-bit BMPs with a 40-byte info header and
    /// pixel data at offset 54. Every mismatch is the same error.
    pub fn validate(&self) -> Result<(), BmpError> {
        let supported = self.file.magic == MAGIC
            && self.file.pixel_offset as usize == HEADERS_LEN
            && self.info.header_size as usize == INFO_HEADER_LEN
            && self.info.bit_count == 24
            && self.info.compression == 0;
        if supported {
            Ok(())
        } else {
            Err(BmpError::UnsupportedFormat)
        }
    }

    /// Extra checks applied only in [`Permissiveness::Strict`] mode.
    pub(crate) fn validate_strict(&self, data_len: usize) -> Result<(), BmpError> {
        if self.info.planes != 1 {
            return Err(BmpError::InvalidHeader(format!(
                "BMP planes field is {}, expected 1",
                self.info.planes
            )));
        }
        let file_size = self.file.file_size as usize;
        if file_size != data_len {
            return Err(BmpError::InvalidHeader(format!(
                "BMP file size field ({file_size}) doesn't match actual size ({data_len})"
            )));
        }
        Ok(())
    }

    /// Pixel columns. Negative widths cannot be sized.
    pub fn width(&self) -> Result<usize, BmpError> {
        usize::try_from(self.info.width).map_err(|_| BmpError::AllocationFailure {
            width: i64::from(self.info.width),
            height: i64::from(self.info.height),
        })
    }

    /// Row count: the absolute value of the header height.
    pub fn height(&self) -> usize {
        self.info.height.unsigned_abs() as usize
    }

    /// Whether rows are stored top row first (negative header height).
    pub fn is_top_down(&self) -> bool {
        self.info.height < 0
    }

    /// Serialize both records, byte-identical to what was parsed.
    pub fn to_bytes(&self) -> [u8; HEADERS_LEN] {
        let mut out = [0u8; HEADERS_LEN];
        out[..FILE_HEADER_LEN].copy_from_slice(&self.file.to_bytes());
        out[FILE_HEADER_LEN..].copy_from_slice(&self.info.to_bytes());
        out
    }

    /// Headers for a new bottom-up 24-bit image of the given size.
    ///
    /// Resolution is 2835 pixels per meter (72 DPI).
    pub fn for_image(width: usize, height: usize) -> Result<Self, BmpError> {
        let failure = || BmpError::AllocationFailure {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        };
        let pixel_data_size = super::row_stride(width)
            .and_then(|stride| stride.checked_mul(height))
            .ok_or_else(failure)?;
        let file_size = pixel_data_size
            .checked_add(HEADERS_LEN)
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(failure)?;
        Ok(Self {
            file: FileHeader {
                magic: MAGIC,
                file_size,
                reserved1: 0,
                reserved2: 0,
                pixel_offset: HEADERS_LEN as u32,
            },
            info: InfoHeader {
                header_size: INFO_HEADER_LEN as u32,
                width: i32::try_from(width).map_err(|_| failure())?,
                height: i32::try_from(height).map_err(|_| failure())?,
                planes: 1,
                bit_count: 24,
                compression: 0,
                image_size: pixel_data_size as u32,
                x_pixels_per_meter: 2835,
                y_pixels_per_meter: 2835,
                colors_used: 0,
                colors_important: 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [u8; HEADERS_LEN] {
        let mut h = [0u8; HEADERS_LEN];
        h[0] = b'B';
        h[1] = b'M';
        h[2..6].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        h[6..8].copy_from_slice(&7u16.to_le_bytes());
        h[8..10].copy_from_slice(&9u16.to_le_bytes());
        h[10..14].copy_from_slice(&54u32.to_le_bytes());
        h[14..18].copy_from_slice(&40u32.to_le_bytes());
        h[18..22].copy_from_slice(&5i32.to_le_bytes());
        h[22..26].copy_from_slice(&(-3i32).to_le_bytes());
        h[26..28].copy_from_slice(&1u16.to_le_bytes());
        h[28..30].copy_from_slice(&24u16.to_le_bytes());
        h[38..42].copy_from_slice(&(-1i32).to_le_bytes());
        h[50..54].copy_from_slice(&0xAABB_CCDDu32.to_le_bytes());
        h
    }

    #[test]
    fn parse_reads_every_field() {
        let headers = BmpHeaders::parse(&sample()).unwrap();
        assert_eq!(headers.file.file_size, 0x1234_5678);
        assert_eq!(headers.file.reserved1, 7);
        assert_eq!(headers.file.reserved2, 9);
        assert_eq!(headers.info.width, 5);
        assert_eq!(headers.info.height, -3);
        assert_eq!(headers.info.x_pixels_per_meter, -1);
        assert_eq!(headers.info.colors_important, 0xAABB_CCDD);
        assert_eq!(headers.width().unwrap(), 5);
        assert_eq!(headers.height(), 3);
        assert!(headers.is_top_down());
        headers.validate().unwrap();
    }

    #[test]
    fn serialization_is_byte_identical() {
        let raw = sample();
        let headers = BmpHeaders::parse(&raw).unwrap();
        assert_eq!(headers.to_bytes(), raw);
    }

    #[test]
    fn short_input_is_eof() {
        let raw = sample();
        assert!(matches!(
            BmpHeaders::parse(&raw[..53]),
            Err(BmpError::UnexpectedEof)
        ));
    }

    #[test]
    fn each_unsupported_field_is_rejected() {
        let patches: [(usize, &[u8]); 6] = [
            (0, b"BA"),
            (10, &55u32.to_le_bytes()),
            (14, &108u32.to_le_bytes()),
            (28, &32u16.to_le_bytes()),
            (28, &8u16.to_le_bytes()),
            (30, &1u32.to_le_bytes()),
        ];
        for (offset, bytes) in patches {
            let mut raw = sample();
            raw[offset..offset + bytes.len()].copy_from_slice(bytes);
            let headers = BmpHeaders::parse(&raw).unwrap();
            assert!(
                matches!(headers.validate(), Err(BmpError::UnsupportedFormat)),
                "patch at {offset} should be rejected"
            );
        }
    }

    #[test]
    fn negative_width_cannot_be_sized() {
        let mut raw = sample();
        raw[18..22].copy_from_slice(&(-5i32).to_le_bytes());
        let headers = BmpHeaders::parse(&raw).unwrap();
        assert!(matches!(
            headers.width(),
            Err(BmpError::AllocationFailure { width: -5, .. })
        ));
    }

    #[test]
    fn strict_checks_planes_and_size() {
        let headers = BmpHeaders::parse(&sample()).unwrap();
        assert!(matches!(
            headers.validate_strict(100),
            Err(BmpError::InvalidHeader(_))
        ));
        let mut raw = sample();
        raw[2..6].copy_from_slice(&100u32.to_le_bytes());
        raw[26..28].copy_from_slice(&2u16.to_le_bytes());
        let headers = BmpHeaders::parse(&raw).unwrap();
        assert!(headers.validate_strict(100).is_err());
        raw[26..28].copy_from_slice(&1u16.to_le_bytes());
        let headers = BmpHeaders::parse(&raw).unwrap();
        headers.validate_strict(100).unwrap();
    }

    #[test]
    fn for_image_matches_padded_layout() {
        let headers = BmpHeaders::for_image(5, 2).unwrap();
        headers.validate().unwrap();
        // 5 px * 3 = 15 bytes + 1 padding = 16 per row
        assert_eq!(headers.info.image_size, 32);
        assert_eq!(headers.file.file_size, 86);
        assert!(!headers.is_top_down());
    }
}
