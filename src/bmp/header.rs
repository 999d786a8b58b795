//! BITMAPFILEHEADER and BITMAPINFOHEADER, read and written field by field.

use super::decode::Cursor;
use crate::error::BmpError;

/// "BM" as stored on disk (0x4D42 little-endian).
pub(crate) const SIGNATURE: [u8; 2] = *b"BM";

pub(crate) const FILE_HEADER_SIZE: u32 = 14;
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
pub(crate) const OS2_CORE_HEADER_SIZE: u32 = 12;

/// Compression type 0: uncompressed rows.
pub(crate) const BI_RGB: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub data_offset: u32,
}

impl FileHeader {
    /// Reads the 14-byte header. The signature is checked before anything else so that
    /// a short non-BMP input reports `UnrecognizedFormat`, not `UnexpectedEof`.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        let prefix = cursor.peek(SIGNATURE.len());
        if !SIGNATURE.starts_with(prefix) {
            return Err(BmpError::UnrecognizedFormat);
        }
        let signature = cursor.read_fixed_bytes::<2>()?;
        debug_assert_eq!(signature, SIGNATURE);
        Ok(Self {
            file_size: cursor.get_u32_le()?,
            reserved1: cursor.get_u16_le()?,
            reserved2: cursor.get_u16_le()?,
            data_offset: cursor.get_u32_le()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&SIGNATURE);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    /// Reads the 40-byte BITMAPINFOHEADER. Larger (V4/V5) headers are accepted; only
    /// their leading 40 bytes are interpreted.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        let header_size = cursor.get_u32_le()?;
        if header_size == OS2_CORE_HEADER_SIZE {
            return Err(BmpError::UnsupportedVariant(
                "OS/2 BITMAPCOREHEADER".into(),
            ));
        }
        if header_size < INFO_HEADER_SIZE {
            return Err(BmpError::InvalidHeader(format!(
                "unknown BMP info header size: {header_size}"
            )));
        }
        Ok(Self {
            header_size,
            width: cursor.get_i32_le()?,
            height: cursor.get_i32_le()?,
            planes: cursor.get_u16_le()?,
            bits_per_pixel: cursor.get_u16_le()?,
            compression: cursor.get_u32_le()?,
            image_size: cursor.get_u32_le()?,
            x_pixels_per_meter: cursor.get_i32_le()?,
            y_pixels_per_meter: cursor.get_i32_le()?,
            colors_used: cursor.get_u32_le()?,
            colors_important: cursor.get_u32_le()?,
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}

/// Both headers, in file order.
pub(crate) fn read_headers(cursor: &mut Cursor<'_>) -> Result<(FileHeader, InfoHeader), BmpError> {
    let file = FileHeader::read(cursor)?;
    let info = InfoHeader::read(cursor)?;
    if info.header_size.saturating_add(FILE_HEADER_SIZE) > file.data_offset {
        return Err(BmpError::InvalidHeader(format!(
            "pixel data offset {} overlaps the {}-byte headers",
            file.data_offset,
            info.header_size.saturating_add(FILE_HEADER_SIZE)
        )));
    }
    Ok((file, info))
}
