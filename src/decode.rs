use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding a 24-bit BMP with optional resource limits.
///
/// ```
/// use graybmp::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let err = DecodeRequest::new(b"not a bitmap")
///     .with_limits(&limits)
///     .decode(Unstoppable)
///     .unwrap_err();
/// assert_eq!(err.kind(), graybmp::ErrorKind::Format);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or pixel buffer exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decoder. No [`Image`] is returned on any failure path.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
