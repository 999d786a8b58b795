//! # graybmp
//!
//! Decode uncompressed 24-bit BMP files, convert them to 8-bit grayscale with the
//! luminosity method, and encode the result as an 8-bit palette-indexed BMP.
//!
//! ## Pipeline
//!
//! `decode → to_grayscale → encode`, each step a single call on one owned [`Image`]:
//!
//! - [`decode_bmp`] / [`DecodeRequest`] / [`read_bmp`]: bytes or a file → [`Image`]
//!   holding `width * |height|` BGR pixels in the row order found in the file.
//! - [`to_grayscale`]: attaches a luminance plane,
//!   `0.299 R + 0.587 G + 0.114 B`, truncated toward zero by default
//!   (see [`LumaRounding`]).
//! - [`encode_gray_bmp`] / [`write_gray_bmp`]: luminance plane → 8-bit BMP with a
//!   256-entry identity gray palette, rows padded to 4 bytes.
//! - [`encode_gray_pgm`] / [`write_gray_pgm`]: luminance plane → binary PGM, for
//!   tools that do not read palette BMPs.
//!
//! Calling a step on an image missing the buffer it needs is an error
//! ([`ErrorKind::InvalidState`]), never a silent no-op.
//!
//! ## Row order
//!
//! BMP rows are never flipped. The signed `height` from the source header is kept on the
//! [`Image`] and written back unchanged, so bottom-up input gives bottom-up output and
//! top-down input gives top-down output. PGM has no such flag, so
//! [`encode_gray_pgm`] writes the topmost row first.
//!
//! ## Non-Goals
//!
//! - RLE or bitfield compression
//! - Input depths other than 24-bit, output depths other than 8-bit
//! - Color profiles
//!
//! ## Usage
//!
//! ```no_run
//! use graybmp::{decode_bmp, encode_gray_bmp, to_grayscale, Unstoppable};
//!
//! let data = std::fs::read("photo.bmp")?;
//! let mut image = decode_bmp(&data, Unstoppable)?;
//! to_grayscale(&mut image)?;
//! let gray = encode_gray_bmp(&image, Unstoppable)?;
//! std::fs::write("photo-gray.bmp", gray)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod file;
mod gray;
mod image;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod pgm;

#[cfg(test)]
mod test_stop;

// Re-exports
pub use bmp::{BmpInfo, row_padding};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, ErrorKind};
pub use file::{convert_file, read_bmp, write_gray_bmp, write_gray_pgm};
pub use gray::{BLUE_WEIGHT, GREEN_WEIGHT, LumaRounding, RED_WEIGHT, luma};
pub use image::{Image, ImageState};
pub use limits::Limits;
pub use pixel::Pixel;

/// Decode a 24-bit uncompressed BMP from memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse and validate the headers of a 24-bit BMP without decoding pixels.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BmpError> {
    bmp::probe(data)
}

/// Attach a grayscale plane to `image`, truncating luminance toward zero.
pub fn to_grayscale(image: &mut Image) -> Result<(), BmpError> {
    gray::convert(image, LumaRounding::Truncate)
}

/// Attach a grayscale plane to `image` with the given rounding mode.
pub fn to_grayscale_with(image: &mut Image, rounding: LumaRounding) -> Result<(), BmpError> {
    gray::convert(image, rounding)
}

/// Encode `image`'s grayscale plane as an 8-bit palette BMP.
pub fn encode_gray_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bmp::encode(image, &stop)
}

/// Encode `image`'s grayscale plane as binary PGM (P5), topmost row first.
pub fn encode_gray_pgm(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    pgm::encode_gray_pgm(image, &stop)
}
