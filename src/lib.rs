//! # zenqoi
//!
//! QOI ("Quite OK Image") lossless image decoder and encoder.
//!
//! A QOI stream is a 14-byte header, a run of byte-aligned opcodes, and an
//! 8-byte end marker. There is no entropy coding; each opcode says how to
//! derive the next pixel(s) from the previous pixel and a 64-entry cache of
//! recently seen colors:
//!
//! | Opcode | Bits | Meaning |
//! |---|---|---|
//! | INDEX | `00iiiiii` | pixel from cache slot `i` |
//! | DIFF | `01rrggbb` | per-channel delta in -2..=1 |
//! | LUMA | `10gggggg rrrrbbbb` | green delta -32..=31, red/blue relative to it |
//! | RUN | `11llllll` | repeat previous pixel `l + 1` times |
//! | RGB | `0xfe r g b` | raw color, alpha unchanged |
//! | RGBA | `0xff r g b a` | raw color and alpha |
//!
//! All channel deltas wrap modulo 256.
//!
//! Every call owns its own cache and run state, so encoders and decoders can
//! run on any number of threads at once.
//!
//! ## Non-Goals
//!
//! - Streaming/incremental decode (the whole stream is in memory)
//! - Animation or multiple frames
//! - Integrity checks on the opcode body: a valid header followed by a
//!   garbage body decodes to garbage pixels, not an error
//! - Container formats (PNG etc.); hand this crate raw interleaved pixels
//!
//! ## Usage
//!
//! ```
//! use zenqoi::{Colorspace, DecodeRequest, EncodeRequest, QoiDescriptor};
//!
//! let pixels = [255u8, 0, 0, 255, 0, 0, 255, 128];
//! let desc = QoiDescriptor::new(2, 1, 4, Colorspace::Srgb);
//! let encoded = EncodeRequest::new(desc).encode(&pixels)?;
//!
//! let decoded = DecodeRequest::new(&encoded).decode()?;
//! assert_eq!(decoded.descriptor, desc);
//! assert_eq!(decoded.pixels(), &pixels[..]);
//!
//! // Drop alpha on the way out
//! let rgb = DecodeRequest::new(&encoded).with_channels(3).decode()?;
//! assert_eq!(rgb.pixels(), &[255, 0, 0, 0, 0, 255]);
//! # Ok::<(), zenqoi::QoiError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod cache;
mod cursor;
mod error;
mod header;
mod limits;
mod ops;
mod pixel;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod io;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, decode, decode_with_channels, probe};
pub use encode::{EncodeRequest, encode, max_encoded_len};
pub use error::{ErrorKind, QoiError};
pub use header::{
    Colorspace, END_MARKER, HEADER_SIZE, MAX_PIXELS, QOI_MAGIC, QoiDescriptor, decode_header,
    encode_header,
};
pub use limits::Limits;
pub use pixel::PixelLayout;

#[cfg(feature = "rgb")]
pub use encode::{encode_rgb8, encode_rgba8};
#[cfg(feature = "rgb")]
pub use pixel::{DecodePixel, EncodePixel};

#[cfg(feature = "imgref")]
pub use encode::encode_img;

#[cfg(feature = "std")]
pub use io::{read_file, write_file};
