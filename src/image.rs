use crate::error::BmpError;
use crate::pixel::Pixel;

/// Where an [`Image`] is in the decode → grayscale → encode pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageState {
    /// Dimensions only, no pixel data.
    Unloaded,
    /// Color pixels present, no grayscale plane yet.
    Decoded,
    /// Both the color pixels and the grayscale plane are present.
    Grayscaled,
}

/// A decoded raster: color pixels plus an optional grayscale plane.
///
/// Both buffers hold `width * rows` samples in the row order found in the source
/// file. `height` keeps the sign from the file header (negative means the rows are
/// stored top-down) and is written back unchanged on encode.
///
/// Dropping the `Image` releases both buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: i32,
    height: i32,
    pixels: Option<Vec<Pixel>>,
    grayscale: Option<Vec<u8>>,
}

impl Image {
    /// An image with dimensions but no buffers. A negative `width` is rejected.
    pub fn unloaded(width: i32, height: i32) -> Result<Self, BmpError> {
        check_width(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: None,
            grayscale: None,
        })
    }

    /// Wrap caller-supplied pixels. `pixels.len()` must equal `width * |height|`.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Pixel>) -> Result<Self, BmpError> {
        check_width(width, height)?;
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BmpError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::decoded(width, height, pixels))
    }

    /// Length already validated by the caller.
    pub(crate) fn decoded(width: i32, height: i32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(
            Some(pixels.len()),
            (width as usize).checked_mul(height.unsigned_abs() as usize)
        );
        Self {
            width,
            height,
            pixels: Some(pixels),
            grayscale: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Signed height as stored in the BMP header.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of scanlines, i.e. `|height|`.
    pub fn rows(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    /// Positive height means the first stored row is the bottom of the picture.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    pub fn state(&self) -> ImageState {
        match (&self.pixels, &self.grayscale) {
            (Some(_), Some(_)) => ImageState::Grayscaled,
            (Some(_), None) => ImageState::Decoded,
            (None, _) => ImageState::Unloaded,
        }
    }

    /// Color pixels, row-major in file row order.
    pub fn pixels(&self) -> Option<&[Pixel]> {
        self.pixels.as_deref()
    }

    /// Luminance plane, same indexing as [`Image::pixels`].
    pub fn grayscale(&self) -> Option<&[u8]> {
        self.grayscale.as_deref()
    }

    /// Split into owned buffers, consuming the image.
    pub fn into_parts(self) -> (Option<Vec<Pixel>>, Option<Vec<u8>>) {
        (self.pixels, self.grayscale)
    }

    /// Pixels plus a grayscale buffer of matching length, allocated on first use.
    pub(crate) fn planes_mut(&mut self) -> Option<(&[Pixel], &mut [u8])> {
        let pixels = self.pixels.as_deref()?;
        let gray = self.grayscale.get_or_insert_with(|| vec![0u8; pixels.len()]);
        Some((pixels, gray.as_mut_slice()))
    }

    /// Zero-copy view of the color pixels as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn pixels_imgref(&self) -> Option<imgref::ImgRef<'_, Pixel>> {
        let pixels = self.pixels()?;
        Some(imgref::ImgRef::new(pixels, self.width as usize, self.rows()))
    }

    /// Zero-copy view of the grayscale plane as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn grayscale_imgref(&self) -> Option<imgref::ImgRef<'_, u8>> {
        let gray = self.grayscale()?;
        Some(imgref::ImgRef::new(gray, self.width as usize, self.rows()))
    }
}

fn check_width(width: i32, height: i32) -> Result<(), BmpError> {
    if width < 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// `width * |height|`, or `DimensionsTooLarge` if it does not fit a `usize`.
pub(crate) fn pixel_count(width: i32, height: i32) -> Result<usize, BmpError> {
    usize::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(height.unsigned_abs() as usize))
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}
