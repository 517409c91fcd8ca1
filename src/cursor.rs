//! Big-endian byte cursors over unaligned buffers.
//!
//! Header fields sit at offsets with no alignment guarantee, so every
//! multi-byte value is assembled byte by byte, most significant first.

use alloc::vec::Vec;

use crate::error::QoiError;

/// Read cursor over a borrowed byte slice.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to `pos`, clamped to the end of the buffer.
    pub fn skip_to(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Read one byte, or 0 past the end of the buffer.
    #[inline]
    pub fn read_u8(&mut self) -> u8 {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => 0,
        }
    }

    pub fn read_u8_err(&mut self) -> Result<u8, QoiError> {
        let b = *self.data.get(self.pos).ok_or(QoiError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, QoiError> {
        let end = self.pos.checked_add(4).ok_or(QoiError::UnexpectedEof)?;
        let bytes = self.data.get(self.pos..end).ok_or(QoiError::UnexpectedEof)?;
        let val = u32::from(bytes[0]) << 24
            | u32::from(bytes[1]) << 16
            | u32::from(bytes[2]) << 8
            | u32::from(bytes[3]);
        self.pos = end;
        Ok(val)
    }
}

/// Write `val` most significant byte first at `*pos`, advancing it by 4.
///
/// `buf` must have room; callers write into fixed-size arrays.
pub(crate) fn write_u32_be(buf: &mut [u8], pos: &mut usize, val: u32) {
    buf[*pos] = (val >> 24) as u8;
    buf[*pos + 1] = (val >> 16) as u8;
    buf[*pos + 2] = (val >> 8) as u8;
    buf[*pos + 3] = val as u8;
    *pos += 4;
}

/// Append cursor over an owned, pre-reserved output buffer.
pub(crate) struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Reserve exactly `capacity` bytes up front.
    pub fn with_capacity(capacity: usize) -> Result<Self, QoiError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| QoiError::OutOfMemory { bytes: capacity })?;
        Ok(Self { buf })
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_is_big_endian_at_any_offset() {
        let data = [0xaa, 0x71, 0x6f, 0x69, 0x66, 0x00, 0x00, 0x01, 0x00];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u8(), 0xaa);
        assert_eq!(r.read_u32_be().unwrap(), 0x716f_6966);
        assert_eq!(r.read_u32_be().unwrap(), 256);
        assert_eq!(r.position(), 9);
    }

    #[test]
    fn short_read_fails_without_advancing() {
        let mut r = ByteReader::new(&[1, 2, 3]);
        assert!(matches!(r.read_u32_be(), Err(QoiError::UnexpectedEof)));
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u8_err().unwrap(), 1);
    }

    #[test]
    fn read_past_end_is_zero() {
        let mut r = ByteReader::new(&[7]);
        assert_eq!(r.read_u8(), 7);
        assert_eq!(r.read_u8(), 0);
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn writer_appends() {
        let mut w = ByteWriter::with_capacity(5).unwrap();
        w.write_u8(9);
        w.write_slice(&[1, 2, 3, 4]);
        assert_eq!(w.position(), 5);
        assert_eq!(w.into_inner(), [9, 1, 2, 3, 4]);
    }

    #[test]
    fn u32_written_at_unaligned_offset() {
        let mut buf = [0u8; 6];
        let mut pos = 1;
        write_u32_be(&mut buf, &mut pos, 0x716f_6966);
        assert_eq!(pos, 5);
        assert_eq!(buf, [0, 0x71, 0x6f, 0x69, 0x66, 0]);
        assert_eq!(ByteReader::new(&buf[1..]).read_u32_be().unwrap(), 0x716f_6966);
    }
}
