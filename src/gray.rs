//! Luminosity grayscale conversion (ITU-R BT.601 weights).

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::Pixel;

pub const RED_WEIGHT: f64 = 0.299;
pub const GREEN_WEIGHT: f64 = 0.587;
pub const BLUE_WEIGHT: f64 = 0.114;

/// Added before truncation. The weighted sum of integer samples is always a multiple of
/// 0.001, so this only absorbs binary representation error (e.g. r=g=b=1 summing to
/// 0.9999999999999999) and never moves a value across an integer boundary.
const TRUNCATE_EPSILON: f64 = 1e-9;

/// How the floating-point luminance is brought to an 8-bit sample.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LumaRounding {
    /// Truncate toward zero: `(255, 0, 0)` → 76.
    #[default]
    Truncate,
    /// Round half away from zero: `(255, 0, 0)` → 76, `(0, 255, 0)` → 150.
    Nearest,
}

/// Luminance of one pixel.
pub fn luma(pixel: Pixel, rounding: LumaRounding) -> u8 {
    let y = RED_WEIGHT * f64::from(pixel.red)
        + GREEN_WEIGHT * f64::from(pixel.green)
        + BLUE_WEIGHT * f64::from(pixel.blue);
    let y = match rounding {
        LumaRounding::Truncate => (y + TRUNCATE_EPSILON).trunc(),
        LumaRounding::Nearest => y.round(),
    };
    y.clamp(0.0, 255.0) as u8
}

/// Fill the image's grayscale plane from its pixels, allocating it on first use.
///
/// Re-running overwrites the plane with identical values.
pub fn convert(image: &mut Image, rounding: LumaRounding) -> Result<(), BmpError> {
    let (pixels, gray) = image
        .planes_mut()
        .ok_or_else(|| BmpError::invalid_state("convert to grayscale", "pixel"))?;
    for (out, &px) in gray.iter_mut().zip(pixels) {
        *out = luma(px, rounding);
    }
    Ok(())
}
