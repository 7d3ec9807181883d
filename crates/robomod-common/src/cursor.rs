//! Big-endian byte cursor.
//!
//! SFD containers and the models stored in them are GameCube data, so every
//! multi-byte integer is big-endian. [`ByteCursor`] reads them from a borrowed
//! slice without copying, and the free functions cover the common case of a
//! single pointer read at a known offset.

use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

/// Read a big-endian u32 at `index`.
///
/// Fails with [`Error::OutOfRange`] when `[index, index + 4)` is not inside
/// `data`.
///
/// # Example
///
/// ```
/// use robomod_common::read_u32_be;
///
/// let data = [0x00, 0x00, 0x80, 0x00, 0xFF];
/// assert_eq!(read_u32_be(&data, 0).unwrap(), 0x8000);
/// assert!(read_u32_be(&data, 2).is_err());
/// ```
#[inline]
pub fn read_u32_be(data: &[u8], index: usize) -> Result<u32> {
    try_read_u32_be(data, index).ok_or(Error::OutOfRange {
        index,
        needed: 4,
        len: data.len(),
    })
}

/// Read a big-endian u32 at `index`, or `None` if it does not fit.
///
/// Use this where running off the end of the buffer is an expected stop
/// condition rather than a failure.
#[inline]
pub fn try_read_u32_be(data: &[u8], index: usize) -> Option<u32> {
    let end = index.checked_add(4)?;
    data.get(index..end).map(BigEndian::read_u32)
}

/// A cursor over a byte slice that reads big-endian values.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor over `data` starting at `position`.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Read bytes and advance the position.
    ///
    /// On failure the position is left unchanged.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self
            .position
            .checked_add(count)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or(Error::OutOfRange {
                index: self.position,
                needed: count,
                len: self.data.len(),
            })?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size array, copied out of the buffer.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_be() {
        let data = [0x00, 0x00, 0x80, 0x00, 0x12, 0x34, 0x56, 0x78];
        assert_eq!(read_u32_be(&data, 0).unwrap(), 32768);
        assert_eq!(read_u32_be(&data, 4).unwrap(), 0x12345678);
        assert_eq!(read_u32_be(&data, 2).unwrap(), 0x80001234);
    }

    #[test]
    fn test_read_u32_be_out_of_range() {
        let data = [0u8; 6];
        match read_u32_be(&data, 3) {
            Err(Error::OutOfRange { index, needed, len }) => {
                assert_eq!((index, needed, len), (3, 4, 6));
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(read_u32_be(&data, usize::MAX - 1).is_err());
    }

    #[test]
    fn test_try_read_is_none_at_end() {
        let data = [0u8, 0, 0, 1];
        assert_eq!(try_read_u32_be(&data, 0), Some(1));
        assert_eq!(try_read_u32_be(&data, 1), None);
        assert_eq!(try_read_u32_be(&data, 4), None);
    }

    #[test]
    fn test_cursor_primitives() {
        let data = [0x00, 0x04, 0x00, 0x00, 0x00, 0x02, b'R', b'G', b'B', b'A'];
        let mut cursor = ByteCursor::new_at(&data, 0);

        assert_eq!(cursor.read_u16().unwrap(), 4);
        assert_eq!(cursor.read_u32().unwrap(), 2);
        assert_eq!(&cursor.read_array::<4>().unwrap(), b"RGBA");
        assert!(cursor.read_u16().is_err());
    }

    #[test]
    fn test_cursor_starts_at_offset() {
        let data = [0xFF, 0xFF, 0x00, 0x00, 0x00, 0x2A];
        let mut cursor = ByteCursor::new_at(&data, 2);

        assert_eq!(cursor.read_u32().unwrap(), 42);
    }

    #[test]
    fn test_failed_read_keeps_position() {
        let data = [0x00, 0x00, 0x00, 0x07, 0xFF, 0xFF];
        let mut cursor = ByteCursor::new_at(&data, 0);

        assert_eq!(cursor.read_u32().unwrap(), 7);
        match cursor.read_u32() {
            Err(Error::OutOfRange { index, needed, len }) => {
                assert_eq!((index, needed, len), (4, 4, 6));
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert_eq!(cursor.read_u16().unwrap(), 0xFFFF);
    }
}
