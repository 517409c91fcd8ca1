//! File wrappers. The codec itself never touches the filesystem; these only
//! move bytes between disk and [`crate::decode`]/[`crate::encode`].

use std::path::Path;

use crate::decode::{DecodeOutput, decode_stream};
use crate::encode::encode_pixels;
use crate::error::QoiError;
use crate::header::QoiDescriptor;

/// Read a `.qoi` file and decode it to `channels` output channels (0 = as stored).
pub fn read_file(path: impl AsRef<Path>, channels: u8) -> Result<DecodeOutput, QoiError> {
    let data = std::fs::read(path)?;
    decode_stream(&data, channels, None)
}

/// Encode `pixels` and write the stream to `path`, returning the byte count.
///
/// Nothing is written if encoding fails.
pub fn write_file(
    path: impl AsRef<Path>,
    pixels: &[u8],
    desc: &QoiDescriptor,
) -> Result<usize, QoiError> {
    let encoded = encode_pixels(pixels, desc, None)?;
    std::fs::write(path, &encoded)?;
    Ok(encoded.len())
}
