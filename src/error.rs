use enough::StopReason;

/// Errors from BMP decoding, grayscale conversion, and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i32, height: i32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid dimensions {width}x{height}: width must not be negative")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("cannot {operation}: image has no {missing} buffer")]
    InvalidState {
        operation: &'static str,
        missing: &'static str,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`BmpError`].
///
/// Lets callers tell "not a usable BMP" from "disk error" from "called out of order"
/// without matching on every variant.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Open/read/write failure at the byte source or sink.
    Io,
    /// Signature mismatch, truncated or malformed headers, unsupported variant.
    Format,
    /// Operation invoked on an [`crate::Image`] lacking the buffer it needs.
    InvalidState,
    /// A configured [`crate::Limits`] bound was exceeded.
    Limit,
    /// The caller's stop token fired.
    Cancelled,
}

impl BmpError {
    /// Which [`ErrorKind`] this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::UnexpectedEof
            | Self::DimensionsTooLarge { .. } => ErrorKind::Format,
            Self::LimitExceeded(_) => ErrorKind::Limit,
            Self::InvalidDimensions { .. }
            | Self::BufferSizeMismatch { .. }
            | Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    pub(crate) fn invalid_state(operation: &'static str, missing: &'static str) -> Self {
        Self::InvalidState { operation, missing }
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
