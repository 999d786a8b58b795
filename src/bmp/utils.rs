//! BMP scanline alignment.

/// Zero bytes appended to a scanline of `width` samples of `bytes_per_pixel` bytes each,
/// so that every stored row is a multiple of 4 bytes long.
///
/// `(4 - (width * bytes_per_pixel) mod 4) mod 4`; computed modulo 4 so it never
/// overflows for any `width`.
pub fn row_padding(width: usize, bytes_per_pixel: usize) -> usize {
    let row_mod = (width % 4) * (bytes_per_pixel % 4) % 4;
    (4 - row_mod) % 4
}

/// Stored row length in bytes including padding, or `None` on overflow.
pub(crate) fn row_stride(width: usize, bytes_per_pixel: usize) -> Option<usize> {
    width
        .checked_mul(bytes_per_pixel)?
        .checked_add(row_padding(width, bytes_per_pixel))
}
