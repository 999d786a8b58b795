//! BMP wire codec: 24-bit uncompressed decode, 8-bit grayscale palette encode.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_gray_bmp`], etc.

mod decode;
mod encode;
mod header;
mod utils;

pub use utils::row_padding;

use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;
use enough::Stop;

/// Header summary of a decodable BMP, obtained without reading pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: i32,
    /// Signed; negative means rows are stored top-down.
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Byte offset of the first scanline.
    pub data_offset: u32,
    /// File size as declared in the header (may disagree with the real length).
    pub file_size: u32,
}

impl BmpInfo {
    /// Number of stored scanlines.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }
}

/// Parse and validate headers only.
pub(crate) fn probe(data: &[u8]) -> Result<BmpInfo, BmpError> {
    let header = decode::parse_bmp24_header(data)?;
    Ok(BmpInfo {
        width: header.info.width,
        height: header.info.height,
        bits_per_pixel: header.info.bits_per_pixel,
        compression: header.info.compression,
        data_offset: header.file.data_offset,
        file_size: header.file.file_size,
    })
}

/// Decode 24-bit BMP data into an [`Image`] (file row order, BGR samples).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    decode::decode_bmp24(data, limits, stop)
}

/// Encode an image's grayscale plane as an 8-bit palette BMP.
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    encode::encode_gray_bmp(image, stop)
}
