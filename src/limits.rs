use crate::error::QoiError;
use crate::header::QoiDescriptor;

/// Caller-imposed resource limits for encode/decode.
///
/// All fields default to `None` (no limit). The format's fixed cap of
/// [`crate::MAX_PIXELS`] applies regardless of what is set here.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the buffer the codec allocates.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    pub fn with_max_width(mut self, max: u64) -> Self {
        self.max_width = Some(max);
        self
    }

    pub fn with_max_height(mut self, max: u64) -> Self {
        self.max_height = Some(max);
        self
    }

    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    pub fn with_max_memory_bytes(mut self, max: u64) -> Self {
        self.max_memory_bytes = Some(max);
        self
    }

    /// Reject descriptors whose dimensions fall outside these limits.
    pub(crate) fn check(&self, desc: &QoiDescriptor) -> Result<(), QoiError> {
        exceeds("width", u64::from(desc.width), self.max_width)?;
        exceeds("height", u64::from(desc.height), self.max_height)?;
        exceeds("pixel count", desc.pixel_count(), self.max_pixels)
    }

    /// Reject an allocation of `bytes` if it is over the memory limit.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), QoiError> {
        exceeds("allocation size", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, max: Option<u64>) -> Result<(), QoiError> {
    match max {
        Some(max) if value > max => Err(QoiError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
