use alloc::string::String;

use crate::pixel::PixelLayout;

/// Errors from QOI decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QoiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`QoiError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something the codec cannot work with.
    InvalidArgument,
    /// The input bytes are not a well-formed QOI header.
    Format,
    /// The output buffer could not be allocated.
    OutOfMemory,
    /// A caller-supplied [`crate::Limits`] bound was exceeded.
    LimitExceeded,
    /// Reading or writing a file failed.
    Io,
}

impl QoiError {
    /// Which broad class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::BufferTooSmall { .. } | Self::LayoutMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::UnrecognizedFormat | Self::InvalidHeader(_) | Self::UnexpectedEof => {
                ErrorKind::Format
            }
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
        }
    }
}
