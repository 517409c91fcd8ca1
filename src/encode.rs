//! Opcode encoder: raw pixels in, QOI stream out.

use alloc::vec::Vec;

use crate::cache::ColorCache;
use crate::cursor::ByteWriter;
use crate::error::QoiError;
use crate::header::{END_MARKER, HEADER_SIZE, QoiDescriptor, encode_header};
use crate::limits::Limits;
use crate::ops::*;
use crate::pixel::Rgba;

#[cfg(feature = "rgb")]
use rgb::ComponentBytes as _;

/// Encode request builder.
///
/// ```
/// use zenqoi::{Colorspace, EncodeRequest, QoiDescriptor};
///
/// let desc = QoiDescriptor::new(2, 1, 4, Colorspace::Srgb);
/// let encoded = EncodeRequest::new(desc).encode(&[0, 0, 0, 255, 0, 0, 0, 255])?;
/// assert_eq!(encoded.len(), 23);
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    descriptor: QoiDescriptor,
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(descriptor: QoiDescriptor) -> Self {
        Self {
            descriptor,
            limits: None,
        }
    }

    /// Apply resource limits to the input dimensions and output allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode an interleaved RGB or RGBA buffer laid out as the descriptor says.
    ///
    /// Bytes past `width * height * channels` are ignored.
    pub fn encode(&self, pixels: &[u8]) -> Result<Vec<u8>, QoiError> {
        encode_pixels(pixels, &self.descriptor, self.limits)
    }

    /// Encode typed pixels. The descriptor's channel count must match `P`.
    #[cfg(feature = "rgb")]
    pub fn encode_typed<P: crate::EncodePixel>(&self, pixels: &[P]) -> Result<Vec<u8>, QoiError>
    where
        [P]: rgb::ComponentBytes<u8>,
    {
        let expected = P::layout();
        if self.descriptor.layout() != Some(expected) {
            return Err(QoiError::InvalidArgument(alloc::format!(
                "descriptor has {} channels but pixels are {expected:?}",
                self.descriptor.channels
            )));
        }
        self.encode(pixels.as_bytes())
    }
}

/// Worst-case encoded size: every pixel as its full raw opcode, plus header
/// and end marker. The encoder reserves exactly this much up front.
pub fn max_encoded_len(desc: &QoiDescriptor) -> Option<usize> {
    let pixels = usize::try_from(desc.pixel_count()).ok()?;
    pixels
        .checked_mul(usize::from(desc.channels) + 1)?
        .checked_add(HEADER_SIZE + END_MARKER.len())
}

pub(crate) fn encode_pixels(
    pixels: &[u8],
    desc: &QoiDescriptor,
    limits: Option<&Limits>,
) -> Result<Vec<u8>, QoiError> {
    desc.validate()?;
    if let Some(limits) = limits {
        limits.check(desc)?;
    }
    if pixels.is_empty() {
        return Err(QoiError::InvalidArgument("empty pixel buffer".into()));
    }

    let channels = usize::from(desc.channels);
    let too_large = || {
        QoiError::InvalidArgument(alloc::format!(
            "{}x{} does not fit in memory on this target",
            desc.width,
            desc.height
        ))
    };
    let pixel_count = usize::try_from(desc.pixel_count()).map_err(|_| too_large())?;
    let expected = pixel_count.checked_mul(channels).ok_or_else(too_large)?;
    if pixels.len() < expected {
        return Err(QoiError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let capacity = max_encoded_len(desc).ok_or_else(too_large)?;
    if let Some(limits) = limits {
        limits.check_memory(capacity)?;
    }

    let mut out = ByteWriter::with_capacity(capacity)?;
    out.write_slice(&encode_header(desc));

    let mut state = EncoderState::new();
    let last = pixel_count - 1;
    for (i, chunk) in pixels[..expected].chunks_exact(channels).enumerate() {
        state.push(Rgba::from_chunk(chunk), i == last, &mut out);
    }

    out.write_slice(&END_MARKER);
    debug_assert!(out.position() <= capacity);
    Ok(out.into_inner())
}

/// Everything the encoder carries from one pixel to the next.
struct EncoderState {
    cache: ColorCache,
    prev: Rgba,
    run: u8,
}

impl EncoderState {
    fn new() -> Self {
        Self {
            cache: ColorCache::new(),
            prev: Rgba::START,
            run: 0,
        }
    }

    fn flush_run(&mut self, out: &mut ByteWriter) {
        if self.run > 0 {
            out.write_u8(OP_RUN | (self.run - 1));
            self.run = 0;
        }
    }

    fn push(&mut self, px: Rgba, is_last: bool, out: &mut ByteWriter) {
        if px == self.prev {
            self.run += 1;
            if self.run == MAX_RUN || is_last {
                self.flush_run(out);
            }
            return;
        }

        self.flush_run(out);

        let (slot, hit) = self.cache.lookup_or_insert(px);
        if hit {
            out.write_u8(OP_INDEX | slot as u8);
        } else if px.a == self.prev.a {
            // Two's-complement reading of mod-256 differences.
            let dr = px.r.wrapping_sub(self.prev.r) as i8;
            let dg = px.g.wrapping_sub(self.prev.g) as i8;
            let db = px.b.wrapping_sub(self.prev.b) as i8;
            let dr_dg = dr.wrapping_sub(dg);
            let db_dg = db.wrapping_sub(dg);

            if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
                out.write_u8(
                    OP_DIFF | ((dr + 2) as u8) << 4 | ((dg + 2) as u8) << 2 | (db + 2) as u8,
                );
            } else if (-32..=31).contains(&dg)
                && (-8..=7).contains(&dr_dg)
                && (-8..=7).contains(&db_dg)
            {
                out.write_u8(OP_LUMA | (dg + 32) as u8);
                out.write_u8(((dr_dg + 8) as u8) << 4 | (db_dg + 8) as u8);
            } else {
                out.write_slice(&[OP_RGB, px.r, px.g, px.b]);
            }
        } else {
            out.write_slice(&[OP_RGBA, px.r, px.g, px.b, px.a]);
        }

        self.prev = px;
    }
}

/// Encode an interleaved buffer. Shorthand for [`EncodeRequest::encode`].
pub fn encode(pixels: &[u8], desc: &QoiDescriptor) -> Result<Vec<u8>, QoiError> {
    encode_pixels(pixels, desc, None)
}

/// Encode RGB8 pixels.
#[cfg(feature = "rgb")]
pub fn encode_rgb8(
    pixels: &[rgb::RGB8],
    width: u32,
    height: u32,
    colorspace: crate::Colorspace,
) -> Result<Vec<u8>, QoiError> {
    EncodeRequest::new(QoiDescriptor::new(width, height, 3, colorspace)).encode_typed(pixels)
}

/// Encode RGBA8 pixels.
#[cfg(feature = "rgb")]
pub fn encode_rgba8(
    pixels: &[rgb::RGBA8],
    width: u32,
    height: u32,
    colorspace: crate::Colorspace,
) -> Result<Vec<u8>, QoiError> {
    EncodeRequest::new(QoiDescriptor::new(width, height, 4, colorspace)).encode_typed(pixels)
}

/// Encode an [`imgref::ImgRef`]. Padded (strided) images are compacted first.
#[cfg(feature = "imgref")]
pub fn encode_img<P: crate::EncodePixel>(
    img: imgref::ImgRef<'_, P>,
    colorspace: crate::Colorspace,
) -> Result<Vec<u8>, QoiError>
where
    [P]: rgb::ComponentBytes<u8>,
{
    let width = u32::try_from(img.width())
        .map_err(|_| QoiError::InvalidArgument("image width exceeds u32".into()))?;
    let height = u32::try_from(img.height())
        .map_err(|_| QoiError::InvalidArgument("image height exceeds u32".into()))?;
    let channels = P::layout().channels() as u8;
    let request = EncodeRequest::new(QoiDescriptor::new(width, height, channels, colorspace));
    if img.stride() == img.width() {
        let len = img.width() * img.height();
        let buf = img.buf();
        let contiguous = buf.get(..len).ok_or(QoiError::BufferTooSmall {
            needed: len,
            actual: buf.len(),
        })?;
        request.encode_typed(contiguous)
    } else {
        let compact: Vec<P> = img.pixels().collect();
        request.encode_typed(&compact)
    }
}
