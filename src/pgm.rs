//! Binary PGM (P5) export of the grayscale plane.
//!
//! PGM has no row-order flag, so rows are always written top to bottom.

use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;

/// Encode the image's grayscale plane as `P5\n{width} {rows}\n255\n` followed by the
/// samples, topmost row first.
pub(crate) fn encode_gray_pgm(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let gray = image
        .grayscale()
        .ok_or_else(|| BmpError::invalid_state("encode PGM", "grayscale"))?;
    let (width, height) = (image.width(), image.height());
    let w = usize::try_from(width).map_err(|_| BmpError::InvalidDimensions { width, height })?;
    let h = image.rows();

    stop.check()?;

    let header = format!("P5\n{w} {h}\n255\n");
    let mut out = Vec::with_capacity(header.len() + gray.len());
    out.extend_from_slice(header.as_bytes());

    if w > 0 {
        let rows = gray.chunks_exact(w).take(h);
        let ordered: Box<dyn Iterator<Item = &[u8]> + '_> = if image.is_bottom_up() {
            Box::new(rows.rev())
        } else {
            Box::new(rows)
        };
        for (row_idx, row) in ordered.enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            out.extend_from_slice(row);
        }
    }

    log::debug!("encoded {w}x{h} PGM, {} bytes", out.len());
    Ok(out)
}
