//! Opcode tags.
//!
//! The top two bits select the class, except `OP_RGB`/`OP_RGBA` which are
//! matched as whole bytes before the class mask is applied.

pub(crate) const OP_INDEX: u8 = 0x00; // 00xxxxxx
pub(crate) const OP_DIFF: u8 = 0x40; // 01xxxxxx
pub(crate) const OP_LUMA: u8 = 0x80; // 10xxxxxx
pub(crate) const OP_RUN: u8 = 0xc0; // 11xxxxxx
pub(crate) const OP_RGB: u8 = 0xfe; // 11111110
pub(crate) const OP_RGBA: u8 = 0xff; // 11111111

pub(crate) const OP_MASK: u8 = 0xc0;
pub(crate) const PAYLOAD_MASK: u8 = 0x3f;

/// Longest run a single `OP_RUN` can carry. Stored biased by -1, so the
/// largest stored value is 61 and 62/63 stay free for `OP_RGB`/`OP_RGBA`.
pub(crate) const MAX_RUN: u8 = 62;
