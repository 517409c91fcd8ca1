//! Opcode decoder: QOI stream in, raw pixels out.

use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::cache::ColorCache;
use crate::cursor::ByteReader;
use crate::error::QoiError;
use crate::header::{END_MARKER, HEADER_SIZE, QoiDescriptor, decode_header};
use crate::limits::Limits;
use crate::ops::*;
use crate::pixel::{PixelLayout, Rgba};

/// Decoded image: owned pixels plus the descriptor parsed from the header.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    /// Header as stored in the stream. `descriptor.channels` is the stored
    /// channel count, which may differ from [`DecodeOutput::layout`].
    pub descriptor: QoiDescriptor,
    /// Layout of [`DecodeOutput::pixels`].
    pub layout: PixelLayout,
}

impl DecodeOutput {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`QoiError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(QoiError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Borrowed [`imgref::ImgRef`] view of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width() as usize,
            self.height() as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, QoiError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width() as usize,
            self.height() as usize,
        ))
    }
}

/// Decode request builder.
///
/// ```no_run
/// use zenqoi::{DecodeRequest, Limits};
///
/// let data: &[u8] = &[]; // your QOI bytes
/// let limits = Limits::default().with_max_pixels(16_000_000);
/// let decoded = DecodeRequest::new(data)
///     .with_channels(3)
///     .with_limits(&limits)
///     .decode()?;
/// println!("{}x{}", decoded.width(), decoded.height());
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    channels: u8,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            channels: 0,
            limits: None,
        }
    }

    /// Output channel count: 3, 4, or 0 for whatever the header says.
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Apply resource limits to the header dimensions and output allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(&self) -> Result<DecodeOutput, QoiError> {
        decode_stream(self.data, self.channels, self.limits)
    }
}

pub(crate) fn decode_stream(
    data: &[u8],
    channels: u8,
    limits: Option<&Limits>,
) -> Result<DecodeOutput, QoiError> {
    let requested = match channels {
        0 => None,
        n => Some(PixelLayout::from_channels(n).ok_or_else(|| {
            QoiError::InvalidArgument(alloc::format!(
                "output channel count {n} is not 0, 3 or 4"
            ))
        })?),
    };
    if data.len() < HEADER_SIZE + END_MARKER.len() {
        return Err(QoiError::UnexpectedEof);
    }

    let descriptor = decode_header(data)?;
    if let Some(limits) = limits {
        limits.check(&descriptor)?;
    }
    let layout = match requested {
        Some(layout) => layout,
        None => descriptor.layout().ok_or(QoiError::UnrecognizedFormat)?,
    };

    let pixel_count = usize::try_from(descriptor.pixel_count()).map_err(|_| {
        QoiError::InvalidHeader(alloc::format!(
            "{}x{} does not fit in memory on this target",
            descriptor.width,
            descriptor.height
        ))
    })?;
    let out_channels = layout.channels();
    let out_len = pixel_count
        .checked_mul(out_channels)
        .ok_or(QoiError::OutOfMemory { bytes: usize::MAX })?;
    if let Some(limits) = limits {
        limits.check_memory(out_len)?;
    }
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(out_len)
        .map_err(|_| QoiError::OutOfMemory { bytes: out_len })?;

    let mut reader = ByteReader::new(data);
    reader.skip_to(HEADER_SIZE);
    let mut state = DecoderState::new(data.len() - END_MARKER.len());
    for _ in 0..pixel_count {
        let px = state.next_pixel(&mut reader);
        pixels.extend_from_slice(&px.to_bytes()[..out_channels]);
    }

    Ok(DecodeOutput {
        pixels,
        descriptor,
        layout,
    })
}

/// Everything the decoder carries from one output pixel to the next.
struct DecoderState {
    cache: ColorCache,
    curr: Rgba,
    run: u8,
    /// Opcodes start only before this offset; the last 8 bytes are the end marker.
    opcode_end: usize,
}

impl DecoderState {
    fn new(opcode_end: usize) -> Self {
        Self {
            cache: ColorCache::new(),
            curr: Rgba::START,
            run: 0,
            opcode_end,
        }
    }

    /// Resolve the next output pixel.
    ///
    /// Once the opcode region is used up the last pixel repeats. Payload
    /// bytes of the final opcode may reach into the end marker, and anything
    /// past the buffer reads as zero.
    fn next_pixel(&mut self, reader: &mut ByteReader<'_>) -> Rgba {
        if self.run > 0 {
            self.run -= 1;
            return self.curr;
        }
        if reader.position() >= self.opcode_end {
            return self.curr;
        }

        let tag = reader.read_u8();
        let px = &mut self.curr;
        match tag {
            OP_RGBA => {
                px.r = reader.read_u8();
                px.g = reader.read_u8();
                px.b = reader.read_u8();
                px.a = reader.read_u8();
            }
            OP_RGB => {
                px.r = reader.read_u8();
                px.g = reader.read_u8();
                px.b = reader.read_u8();
            }
            _ => match tag & OP_MASK {
                OP_LUMA => {
                    let b2 = reader.read_u8();
                    let dg = (tag & PAYLOAD_MASK).wrapping_sub(32);
                    px.r = px
                        .r
                        .wrapping_add(dg.wrapping_add(b2 >> 4 & 0x0f).wrapping_sub(8));
                    px.g = px.g.wrapping_add(dg);
                    px.b = px
                        .b
                        .wrapping_add(dg.wrapping_add(b2 & 0x0f).wrapping_sub(8));
                }
                OP_DIFF => {
                    px.r = px.r.wrapping_add(tag >> 4 & 0x03).wrapping_sub(2);
                    px.g = px.g.wrapping_add(tag >> 2 & 0x03).wrapping_sub(2);
                    px.b = px.b.wrapping_add(tag & 0x03).wrapping_sub(2);
                }
                OP_INDEX => {
                    *px = self.cache.get(usize::from(tag & PAYLOAD_MASK));
                }
                _ => {
                    self.run = tag & PAYLOAD_MASK;
                }
            },
        }

        self.cache.store(self.curr);
        self.curr
    }
}

/// Decode to the channel count stored in the header.
pub fn decode(data: &[u8]) -> Result<DecodeOutput, QoiError> {
    decode_stream(data, 0, None)
}

/// Decode to `channels` output channels (0 = as stored, 3 drops alpha, 4 adds
/// opaque alpha to RGB streams).
pub fn decode_with_channels(data: &[u8], channels: u8) -> Result<DecodeOutput, QoiError> {
    decode_stream(data, channels, None)
}

/// Read just the header.
pub fn probe(data: &[u8]) -> Result<QoiDescriptor, QoiError> {
    decode_header(data)
}
