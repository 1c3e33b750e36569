// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Stream deserialization: platform-width integers always occupy 8 bytes,
// reader failures surface as errors.

#![allow(clippy::float_cmp)]
#![allow(clippy::missing_panics_doc)]

use dtype::{ByteReader, Dtype, Error, IoReader, ReadError, Slice, SliceReader, Value};
use std::io::Cursor;

fn le_i64s(values: &[i64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn test_int_consumes_eight_bytes_per_element() {
    let bytes = le_i64s(&[1, -2, 3]);
    let mut reader = SliceReader::new(&bytes);
    let mut slice = Dtype::Int.slice_of(3);

    Dtype::Int
        .read_into_slice(&mut slice, &mut reader)
        .expect("read ints");
    assert_eq!(reader.position(), 24);
    assert_eq!(slice, Slice::Int(vec![1, -2, 3]));
}

#[test]
fn test_uint_from_io_source() {
    let bytes: Vec<u8> = [10u64, 20].iter().flat_map(|v| v.to_le_bytes()).collect();
    let mut reader = IoReader::new(Cursor::new(bytes));
    let mut slice = Dtype::Uint.slice_of(2);

    Dtype::Uint
        .read_into_slice(&mut slice, &mut reader)
        .expect("read uints");
    assert_eq!(slice.get(1), Some(Value::Uint(20)));
    assert_eq!(reader.into_inner().position(), 16);
}

#[test]
fn test_fixed_width_reads_their_own_size() {
    let mut bytes = vec![1u8, 0];
    bytes.extend_from_slice(&(-5i16).to_le_bytes());
    bytes.extend_from_slice(&2.5f32.to_le_bytes());
    let mut reader = SliceReader::new(&bytes);

    let mut flags = Dtype::Bool.slice_of(2);
    Dtype::Bool.read_into_slice(&mut flags, &mut reader).expect("bools");
    let mut shorts = Dtype::Int16.slice_of(1);
    Dtype::Int16.read_into_slice(&mut shorts, &mut reader).expect("i16");
    let mut floats = Dtype::Float32.slice_of(1);
    Dtype::Float32.read_into_slice(&mut floats, &mut reader).expect("f32");

    assert_eq!(flags, Slice::Bool(vec![true, false]));
    assert_eq!(shorts.get(0), Some(Value::Int16(-5)));
    assert_eq!(floats.get(0), Some(Value::Float32(2.5)));
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_truncated_stream_is_an_error() {
    let bytes = le_i64s(&[1]);
    let mut slice = Dtype::Int.slice_of(2);
    let err = Dtype::Int
        .read_into_slice(&mut slice, &mut SliceReader::new(&bytes))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Read(ReadError::UnexpectedEof { need: 8, have: 0 })
    ));

    let mut reader = IoReader::new(Cursor::new(vec![0u8; 3]));
    let mut slice = Dtype::Int32.slice_of(1);
    assert!(matches!(
        Dtype::Int32.read_into_slice(&mut slice, &mut reader),
        Err(Error::Read(ReadError::Io(_)))
    ));
}

/// Reader producing an endless run of one byte.
struct Repeat(u8);

impl ByteReader for Repeat {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        buf.fill(self.0);
        Ok(())
    }
}

#[test]
fn test_custom_reader() {
    let mut slice = Dtype::Uint32.slice_of(2);
    Dtype::Uint32
        .read_into_slice(&mut slice, &mut Repeat(0x01))
        .expect("read");
    assert_eq!(slice, Slice::Uint32(vec![0x0101_0101; 2]));
}
