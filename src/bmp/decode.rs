//! 24-bit uncompressed BMP decoder.
//!
//! Rows are read in the order they are stored, each followed by its 4-byte alignment
//! padding. No vertical flip is performed; the signed height travels with the image.

use enough::Stop;

use super::header::{self, BI_RGB, FileHeader, InfoHeader};
use super::row_padding;
use crate::error::BmpError;
use crate::image::{self, Image};
use crate::limits::Limits;
use crate::pixel::Pixel;

const BYTES_PER_PIXEL: usize = 3;

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Up to `n` bytes at the current position, without advancing.
    pub(crate) fn peek(&self, n: usize) -> &'a [u8] {
        let end = self.pos.saturating_add(n).min(self.data.len());
        &self.data[self.pos..end]
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        let bytes = self.data.get(self.pos..end).ok_or(BmpError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Header validation ───────────────────────────────────────────────

/// Headers of a file this decoder can turn into pixels.
pub(crate) struct Bmp24Header {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl Bmp24Header {
    fn width(&self) -> u32 {
        self.info.width.unsigned_abs()
    }

    fn rows(&self) -> u32 {
        self.info.height.unsigned_abs()
    }
}

/// Parse both headers and reject anything other than uncompressed 24-bit.
pub(crate) fn parse_bmp24_header(data: &[u8]) -> Result<Bmp24Header, BmpError> {
    let mut cursor = Cursor::new(data);
    let (file, info) = header::read_headers(&mut cursor)?;

    if info.bits_per_pixel != 24 {
        return Err(BmpError::UnsupportedVariant(format!(
            "BMP bit depth {} unsupported, expected 24",
            info.bits_per_pixel
        )));
    }
    if info.compression != BI_RGB {
        return Err(BmpError::UnsupportedVariant(format!(
            "BMP compression type {} unsupported, expected uncompressed",
            info.compression
        )));
    }
    if info.width < 0 {
        return Err(BmpError::InvalidHeader(format!(
            "BMP width is negative ({})",
            info.width
        )));
    }
    if info.planes != 1 {
        log::warn!("BMP planes field is {}, expected 1; ignoring", info.planes);
    }
    if file.file_size != 0 && file.file_size as usize != data.len() {
        log::warn!(
            "BMP file size field ({}) doesn't match actual size ({})",
            file.file_size,
            data.len()
        );
    }

    log::debug!(
        "BMP header: {}x{} ({}), {} bpp, pixel data at {}",
        info.width,
        info.height,
        if info.height < 0 { "top-down" } else { "bottom-up" },
        info.bits_per_pixel,
        file.data_offset
    );

    Ok(Bmp24Header { file, info })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a 24-bit BMP into an [`Image`] holding `width * |height|` pixels.
pub(crate) fn decode_bmp24(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let header = parse_bmp24_header(data)?;
    let (width, height) = (header.info.width, header.info.height);

    if let Some(limits) = limits {
        limits.check(header.width(), header.rows())?;
    }
    let count = image::pixel_count(width, height)?;
    let out_bytes = count
        .checked_mul(size_of::<Pixel>())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let w = header.width() as usize;
    let rows = header.rows() as usize;
    let row_bytes = w
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let pad = row_padding(w, BYTES_PER_PIXEL);

    let mut cursor = Cursor::new(data);
    cursor.set_position(header.file.data_offset as usize)?;

    // Zero-area rows carry no bytes; |height| alone must not drive the row loop.
    if count == 0 {
        log::debug!("BMP {width}x{height} has no pixels");
        return Ok(Image::decoded(width, height, Vec::new()));
    }

    // Every row must fit before anything is allocated; the last row's padding may be absent.
    let needed = row_bytes
        .checked_add(pad)
        .and_then(|stride| stride.checked_mul(rows))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?
        .saturating_sub(pad);
    if cursor.remaining() < needed {
        return Err(BmpError::UnexpectedEof);
    }

    let mut pixels = Vec::with_capacity(count);
    for row in 0..rows {
        if row % 16 == 0 {
            stop.check()?;
        }
        let scanline = cursor.take(row_bytes)?;
        pixels.extend(
            scanline
                .chunks_exact(BYTES_PER_PIXEL)
                .map(Pixel::from_bgr_bytes),
        );
        if cursor.skip(pad).is_err() {
            log::warn!(
                "BMP row {row} is missing {pad} padding bytes at offset {}",
                cursor.position()
            );
        }
    }

    Ok(Image::decoded(width, height, pixels))
}
