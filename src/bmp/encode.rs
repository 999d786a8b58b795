//! BMP encoder: 8-bit palette-indexed grayscale.

use enough::Stop;

use super::header::{BI_RGB, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader};
use super::utils::{row_padding, row_stride};
use crate::error::BmpError;
use crate::image::Image;

const PALETTE_ENTRIES: u32 = 256;
/// Each entry is blue, green, red, reserved.
const PALETTE_SIZE: u32 = PALETTE_ENTRIES * 4;
/// 14 + 40 + 1024.
const GRAY_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

/// Encode the image's grayscale plane as an 8-bit BMP with an identity gray palette.
///
/// Rows are written in the order they are held in memory and `height` keeps its sign,
/// so a decode → encode pass preserves row order.
pub(crate) fn encode_gray_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let gray = image
        .grayscale()
        .ok_or_else(|| BmpError::invalid_state("encode", "grayscale"))?;
    let (width, height) = (image.width(), image.height());

    let w = usize::try_from(width)
        .map_err(|_| BmpError::InvalidDimensions { width, height })?;
    let h = image.rows();
    let pad = row_padding(w, 1);
    let image_size = row_stride(w, 1)
        .and_then(|stride| stride.checked_mul(h))
        .and_then(|size| u32::try_from(size).ok())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let file_size = image_size
        .checked_add(GRAY_DATA_OFFSET)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    stop.check()?;

    let mut out = Vec::with_capacity(file_size as usize);
    FileHeader {
        file_size,
        reserved1: 0,
        reserved2: 0,
        data_offset: GRAY_DATA_OFFSET,
    }
    .write(&mut out);
    InfoHeader {
        header_size: INFO_HEADER_SIZE,
        width,
        height,
        planes: 1,
        bits_per_pixel: 8,
        compression: BI_RGB,
        image_size,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        colors_used: PALETTE_ENTRIES,
        colors_important: PALETTE_ENTRIES,
    }
    .write(&mut out);
    write_gray_palette(&mut out);

    if w > 0 {
        for (row_idx, row) in gray.chunks_exact(w).take(h).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            out.extend_from_slice(row);
            out.extend(core::iter::repeat_n(0u8, pad));
        }
    }

    debug_assert_eq!(out.len(), file_size as usize);
    log::debug!(
        "encoded {}x{} grayscale BMP, {} bytes ({} padding per row)",
        width,
        height,
        out.len(),
        pad
    );
    Ok(out)
}

/// 256 entries where entry `i` is gray level `i`.
fn write_gray_palette(out: &mut Vec<u8>) {
    for level in 0..=u8::MAX {
        out.extend_from_slice(&[level, level, level, 0]);
    }
}

#[cfg(test)]
mod tests {
    use enough::{StopReason, Unstoppable};

    use super::*;
    use crate::error::ErrorKind;
    use crate::gray::{LumaRounding, convert};
    use crate::pixel::Pixel;
    use crate::test_stop::StopAfter;

    fn gray_image(width: i32, height: i32, fill: impl Fn(usize) -> Pixel) -> Image {
        let n = width as usize * height.unsigned_abs() as usize;
        let mut img = Image::from_pixels(width, height, (0..n).map(fill).collect()).unwrap();
        convert(&mut img, LumaRounding::Truncate).unwrap();
        img
    }

    fn le_u32(data: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(data[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn headers_match_written_length() {
        let img = gray_image(3, 2, |i| Pixel::rgb(i as u8 * 40, 0, 0));
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();

        // 3 samples + 1 padding byte per row.
        assert_eq!(out.len(), 1078 + 2 * 4);
        assert_eq!(&out[0..2], b"BM");
        assert_eq!(le_u32(&out, 2) as usize, out.len());
        assert_eq!(le_u32(&out, 10), 1078);
        assert_eq!(le_u32(&out, 14), 40);
        assert_eq!(le_u32(&out, 34), 8);
        assert_eq!(u16::from_le_bytes([out[28], out[29]]), 8);
        assert_eq!(le_u32(&out, 46), 256);
        assert_eq!(le_u32(&out, 50), 256);
    }

    #[test]
    fn palette_is_identity_gray() {
        let img = gray_image(1, 1, |_| Pixel::default());
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();
        let palette = &out[54..1078];
        for (i, entry) in palette.chunks_exact(4).enumerate() {
            assert_eq!(entry, &[i as u8, i as u8, i as u8, 0]);
        }
    }

    #[test]
    fn rows_are_padded_with_zeros() {
        let img = gray_image(3, 2, |_| Pixel::rgb(255, 255, 255));
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();
        assert_eq!(&out[1078..], &[255, 255, 255, 0, 255, 255, 255, 0]);
    }

    #[test]
    fn width_four_needs_no_padding() {
        let img = gray_image(4, 1, |_| Pixel::default());
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();
        assert_eq!(out.len(), 1078 + 4);
    }

    #[test]
    fn negative_height_is_written_back() {
        let img = gray_image(2, -2, |_| Pixel::default());
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();
        assert_eq!(i32::from_le_bytes(out[22..26].try_into().unwrap()), -2);
        assert_eq!(out.len(), 1078 + 2 * 4);
    }

    #[test]
    fn zero_width_writes_headers_only() {
        let img = gray_image(0, 3, |_| Pixel::default());
        let out = encode_gray_bmp(&img, &Unstoppable).unwrap();
        assert_eq!(out.len(), 1078);
        assert_eq!(le_u32(&out, 34), 0);
    }

    #[test]
    fn missing_grayscale_is_invalid_state() {
        let img = Image::from_pixels(1, 1, vec![Pixel::default()]).unwrap();
        let err = encode_gray_bmp(&img, &Unstoppable).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn stop_before_headers_cancels() {
        let img = gray_image(2, 2, |_| Pixel::default());
        let err = encode_gray_bmp(&img, &StopAfter::new(0)).unwrap_err();
        assert!(matches!(err, BmpError::Cancelled(StopReason::Cancelled)));
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn stop_inside_row_loop_cancels() {
        let img = gray_image(3, 20, |i| Pixel::rgb(i as u8, 0, 0));
        assert!(encode_gray_bmp(&img, &StopAfter::new(3)).is_ok());

        // One check before the headers, then at rows 0 and 16.
        let err = encode_gray_bmp(&img, &StopAfter::new(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }
}
