// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte readers feeding [`Dtype::read_into_slice`](crate::Dtype::read_into_slice).
//!
//! Streams are packed little-endian with no alignment padding. Strings are a
//! u32 byte length followed by UTF-8 bytes.

use crate::config::{STRING_LEN_PREFIX_SIZE, STRING_READ_CHUNK};
use crate::error::ReadError;
use std::io;

/// Source of little-endian primitives.
///
/// Only [`read_exact`](ByteReader::read_exact) is required.
pub trait ByteReader {
    /// Fill `buf` completely or fail.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError>;

    /// Bytes left in the source, when known.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError>
    where
        Self: Sized,
    {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_bool(&mut self) -> Result<bool, ReadError>
    where
        Self: Sized,
    {
        Ok(self.read_array::<1>()?[0] != 0)
    }

    fn read_u8(&mut self) -> Result<u8, ReadError>
    where
        Self: Sized,
    {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_i8(&mut self) -> Result<i8, ReadError>
    where
        Self: Sized,
    {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    fn read_u16(&mut self) -> Result<u16, ReadError>
    where
        Self: Sized,
    {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    fn read_i16(&mut self) -> Result<i16, ReadError>
    where
        Self: Sized,
    {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, ReadError>
    where
        Self: Sized,
    {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_i32(&mut self) -> Result<i32, ReadError>
    where
        Self: Sized,
    {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Result<u64, ReadError>
    where
        Self: Sized,
    {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> Result<i64, ReadError>
    where
        Self: Sized,
    {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    fn read_f32(&mut self) -> Result<f32, ReadError>
    where
        Self: Sized,
    {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64, ReadError>
    where
        Self: Sized,
    {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Length-prefixed UTF-8 string.
    fn read_string(&mut self) -> Result<String, ReadError>
    where
        Self: Sized,
    {
        let len = u32::from_le_bytes(self.read_array::<STRING_LEN_PREFIX_SIZE>()?) as usize;
        if let Some(have) = self.remaining_hint() {
            if len > have {
                return Err(ReadError::UnexpectedEof { need: len, have });
            }
        }

        // Grow with the bytes actually delivered.
        let mut bytes = Vec::with_capacity(len.min(STRING_READ_CHUNK));
        while bytes.len() < len {
            let start = bytes.len();
            let step = (len - start).min(STRING_READ_CHUNK);
            bytes.resize(start + step, 0);
            self.read_exact(&mut bytes[start..])?;
        }
        String::from_utf8(bytes).map_err(|_| ReadError::InvalidUtf8)
    }
}

impl<R: ByteReader + ?Sized> ByteReader for &mut R {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        (**self).read_exact(buf)
    }

    fn remaining_hint(&self) -> Option<usize> {
        (**self).remaining_hint()
    }
}

/// Reader over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ReadError> {
        if count > self.remaining() {
            return Err(ReadError::UnexpectedEof {
                need: count,
                have: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }
}

impl ByteReader for SliceReader<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let bytes = self.read_bytes(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.remaining())
    }
}

/// Adapter for any [`io::Read`].
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
}

impl<R: io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteReader for IoReader<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        io::Read::read_exact(&mut self.inner, buf)?;
        Ok(())
    }
}
