//! The 14-byte QOI header and the image descriptor it carries.

use alloc::format;

use crate::cursor::{ByteReader, write_u32_be};
use crate::error::QoiError;
use crate::pixel::PixelLayout;

/// `"qoif"` read as a big-endian u32.
pub const QOI_MAGIC: u32 = 0x716f_6966;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 14;

/// Trailer closing every stream.
pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Largest width * height the codec accepts, on encode and decode.
pub const MAX_PIXELS: u64 = 400_000_000;

/// Colorspace tag. Stored in the header but never affects the pixel data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Colorspace {
    /// sRGB color channels with linear alpha.
    #[default]
    Srgb = 0,
    /// All channels linear.
    Linear = 1,
}

impl Colorspace {
    pub fn from_u8(value: u8) -> Result<Self, QoiError> {
        match value {
            0 => Ok(Self::Srgb),
            1 => Ok(Self::Linear),
            other => Err(QoiError::InvalidArgument(format!(
                "colorspace {other} is not 0 (sRGB) or 1 (linear)"
            ))),
        }
    }
}

/// Image descriptor: everything the header records about an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QoiDescriptor {
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    pub colorspace: Colorspace,
}

impl QoiDescriptor {
    pub fn new(width: u32, height: u32, channels: u8, colorspace: Colorspace) -> Self {
        Self {
            width,
            height,
            channels,
            colorspace,
        }
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Layout of the raw pixel buffer this descriptor describes.
    pub fn layout(&self) -> Option<PixelLayout> {
        PixelLayout::from_channels(self.channels)
    }

    /// Parse and validate a header. Only the first [`HEADER_SIZE`] bytes are read.
    pub fn from_bytes(data: &[u8]) -> Result<Self, QoiError> {
        decode_header(data)
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        encode_header(self)
    }

    /// Check a caller-supplied descriptor before encoding.
    pub(crate) fn validate(&self) -> Result<(), QoiError> {
        if self.width == 0 || self.height == 0 {
            return Err(QoiError::InvalidArgument(format!(
                "image dimensions {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.layout().is_none() {
            return Err(QoiError::InvalidArgument(format!(
                "channel count {} is not 3 or 4",
                self.channels
            )));
        }
        if self.pixel_count() > MAX_PIXELS {
            return Err(QoiError::InvalidArgument(format!(
                "{}x{} exceeds the {MAX_PIXELS} pixel cap",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Serialize `desc` as magic ∥ width ∥ height ∥ channels ∥ colorspace.
pub fn encode_header(desc: &QoiDescriptor) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    let mut pos = 0;
    write_u32_be(&mut out, &mut pos, QOI_MAGIC);
    write_u32_be(&mut out, &mut pos, desc.width);
    write_u32_be(&mut out, &mut pos, desc.height);
    out[pos] = desc.channels;
    out[pos + 1] = desc.colorspace as u8;
    out
}

/// Parse a header, rejecting anything a conforming encoder could not have written.
pub fn decode_header(data: &[u8]) -> Result<QoiDescriptor, QoiError> {
    let mut r = ByteReader::new(data);
    let magic = r.read_u32_be()?;
    if magic != QOI_MAGIC {
        return Err(QoiError::UnrecognizedFormat);
    }
    let width = r.read_u32_be()?;
    let height = r.read_u32_be()?;
    let channels = r.read_u8_err()?;
    let colorspace = r.read_u8_err()?;

    if width == 0 || height == 0 {
        return Err(QoiError::InvalidHeader(format!(
            "zero dimension {width}x{height}"
        )));
    }
    if PixelLayout::from_channels(channels).is_none() {
        return Err(QoiError::InvalidHeader(format!(
            "channel count {channels} is not 3 or 4"
        )));
    }
    let colorspace = Colorspace::from_u8(colorspace).map_err(|_| {
        QoiError::InvalidHeader(format!("colorspace {colorspace} is not 0 or 1"))
    })?;
    let desc = QoiDescriptor::new(width, height, channels, colorspace);
    if desc.pixel_count() > MAX_PIXELS {
        return Err(QoiError::InvalidHeader(format!(
            "{width}x{height} exceeds the {MAX_PIXELS} pixel cap"
        )));
    }
    Ok(desc)
}
