//! Binary reader for fixed-offset parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor over a byte slice that
//! reads little-endian integers and fixed-length buffers. Every read is
//! exact: asking for more bytes than remain yields [`Error::ShortRead`].

use byteorder::{ByteOrder, LittleEndian};
use zerocopy::FromBytes;

use crate::{utf16, Error, Result};

/// A binary reader over a byte slice.
///
/// # Example
///
/// ```
/// use ido_common::BinaryReader;
///
/// let data = [0x01, 0x00, 0xFE, 0xFF, 0x2A];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u16().unwrap(), 1);
/// assert_eq!(reader.read_i16().unwrap(), -2);
/// assert_eq!(reader.read_u8().unwrap(), 42);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::ShortRead {
                expected: count,
                actual: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_bytes(2).map(LittleEndian::read_i16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes(4).map(LittleEndian::read_i32)
    }

    /// Read a UTF-16LE string from a fixed-size buffer, stopping at the first
    /// zero code unit.
    ///
    /// The whole buffer is consumed regardless of where the string ends.
    pub fn read_utf16_in_buffer(&mut self, buffer_size: usize) -> Result<String> {
        let bytes = self.read_bytes(buffer_size)?;
        Ok(utf16::decode_in_buffer(bytes))
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::ShortRead {
            expected: size,
            actual: bytes.len(),
        })
    }

    /// Check for magic bytes at the current position without advancing.
    ///
    /// Returns `false` when fewer bytes than the magic remain.
    pub fn peek_magic(&self, magic: &[u8]) -> bool {
        self.peek_bytes(magic.len()).is_ok_and(|bytes| bytes == magic)
    }
}
