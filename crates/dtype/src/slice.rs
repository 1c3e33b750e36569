// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed element containers and their stream deserialization.

use crate::config::PLATFORM_WIDTH_WIRE_SIZE;
use crate::descriptor::Dtype;
use crate::error::{Error, ReadError, Result};
use crate::reader::ByteReader;
use crate::value::{Complex, Value};

/// Homogeneous container of elements of one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    Bool(Vec<bool>),
    Int(Vec<isize>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Uint(Vec<usize>),
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Uint64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Complex64(Vec<Complex<f32>>),
    Complex128(Vec<Complex<f64>>),
    String(Vec<String>),
    Uintptr(Vec<usize>),
    /// Addresses; allocation only.
    UnsafePointer(Vec<usize>),
    /// `size` bytes per element of a custom descriptor.
    Raw { dtype: Dtype, data: Vec<u8> },
}

impl Slice {
    /// Descriptor of the elements.
    pub fn dtype(&self) -> Dtype {
        match self {
            Slice::Bool(_) => Dtype::Bool,
            Slice::Int(_) => Dtype::Int,
            Slice::Int8(_) => Dtype::Int8,
            Slice::Int16(_) => Dtype::Int16,
            Slice::Int32(_) => Dtype::Int32,
            Slice::Int64(_) => Dtype::Int64,
            Slice::Uint(_) => Dtype::Uint,
            Slice::Uint8(_) => Dtype::Uint8,
            Slice::Uint16(_) => Dtype::Uint16,
            Slice::Uint32(_) => Dtype::Uint32,
            Slice::Uint64(_) => Dtype::Uint64,
            Slice::Float32(_) => Dtype::Float32,
            Slice::Float64(_) => Dtype::Float64,
            Slice::Complex64(_) => Dtype::Complex64,
            Slice::Complex128(_) => Dtype::Complex128,
            Slice::String(_) => Dtype::String,
            Slice::Uintptr(_) => Dtype::Uintptr,
            Slice::UnsafePointer(_) => Dtype::UnsafePointer,
            Slice::Raw { dtype, .. } => *dtype,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Slice::Bool(v) => v.len(),
            Slice::Int(v) => v.len(),
            Slice::Uint(v) | Slice::Uintptr(v) | Slice::UnsafePointer(v) => v.len(),
            Slice::Int8(v) => v.len(),
            Slice::Int16(v) => v.len(),
            Slice::Int32(v) => v.len(),
            Slice::Int64(v) => v.len(),
            Slice::Uint8(v) => v.len(),
            Slice::Uint16(v) => v.len(),
            Slice::Uint32(v) => v.len(),
            Slice::Uint64(v) => v.len(),
            Slice::Float32(v) => v.len(),
            Slice::Float64(v) => v.len(),
            Slice::Complex64(v) => v.len(),
            Slice::Complex128(v) => v.len(),
            Slice::String(v) => v.len(),
            Slice::Raw { dtype, data } => data.len().checked_div(dtype.size()).unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` as a [`Value`]. None for pointers, raw containers and
    /// out-of-bounds indices.
    pub fn get(&self, i: usize) -> Option<Value> {
        let value = match self {
            Slice::Bool(v) => Value::Bool(*v.get(i)?),
            Slice::Int(v) => Value::Int(*v.get(i)?),
            Slice::Int8(v) => Value::Int8(*v.get(i)?),
            Slice::Int16(v) => Value::Int16(*v.get(i)?),
            Slice::Int32(v) => Value::Int32(*v.get(i)?),
            Slice::Int64(v) => Value::Int64(*v.get(i)?),
            Slice::Uint(v) => Value::Uint(*v.get(i)?),
            Slice::Uint8(v) => Value::Uint8(*v.get(i)?),
            Slice::Uint16(v) => Value::Uint16(*v.get(i)?),
            Slice::Uint32(v) => Value::Uint32(*v.get(i)?),
            Slice::Uint64(v) => Value::Uint64(*v.get(i)?),
            Slice::Float32(v) => Value::Float32(*v.get(i)?),
            Slice::Float64(v) => Value::Float64(*v.get(i)?),
            Slice::Complex64(v) => Value::Complex64(*v.get(i)?),
            Slice::Complex128(v) => Value::Complex128(*v.get(i)?),
            Slice::String(v) => Value::String(v.get(i)?.clone()),
            Slice::Uintptr(v) => Value::Uintptr(*v.get(i)?),
            Slice::UnsafePointer(_) | Slice::Raw { .. } => return None,
        };
        Some(value)
    }
}

/// Read a platform-width signed integer: always 64 bits on the wire.
fn read_isize<R: ByteReader>(reader: &mut R, dtype: Dtype) -> std::result::Result<isize, ReadError> {
    let raw = i64::from_le_bytes(reader.read_array::<PLATFORM_WIDTH_WIRE_SIZE>()?);
    isize::try_from(raw).map_err(|_| ReadError::OutOfRange {
        dtype,
        value: i128::from(raw),
    })
}

/// Read a platform-width unsigned integer: always 64 bits on the wire.
fn read_usize<R: ByteReader>(reader: &mut R, dtype: Dtype) -> std::result::Result<usize, ReadError> {
    let raw = u64::from_le_bytes(reader.read_array::<PLATFORM_WIDTH_WIRE_SIZE>()?);
    usize::try_from(raw).map_err(|_| ReadError::OutOfRange {
        dtype,
        value: i128::from(raw),
    })
}

/// Fill every element of `v` with `read`.
fn fill<T, R, F>(v: &mut [T], reader: &mut R, mut read: F) -> std::result::Result<(), ReadError>
where
    R: ByteReader,
    F: FnMut(&mut R) -> std::result::Result<T, ReadError>,
{
    for slot in v.iter_mut() {
        *slot = read(&mut *reader)?;
    }
    Ok(())
}

impl Dtype {
    /// Container of `n` zero-valued elements of this descriptor.
    pub fn slice_of(&self, n: usize) -> Slice {
        match self {
            Dtype::Bool => Slice::Bool(vec![false; n]),
            Dtype::Int => Slice::Int(vec![0; n]),
            Dtype::Int8 => Slice::Int8(vec![0; n]),
            Dtype::Int16 => Slice::Int16(vec![0; n]),
            Dtype::Int32 => Slice::Int32(vec![0; n]),
            Dtype::Int64 => Slice::Int64(vec![0; n]),
            Dtype::Uint => Slice::Uint(vec![0; n]),
            Dtype::Uint8 => Slice::Uint8(vec![0; n]),
            Dtype::Uint16 => Slice::Uint16(vec![0; n]),
            Dtype::Uint32 => Slice::Uint32(vec![0; n]),
            Dtype::Uint64 => Slice::Uint64(vec![0; n]),
            Dtype::Float32 => Slice::Float32(vec![0.0; n]),
            Dtype::Float64 => Slice::Float64(vec![0.0; n]),
            Dtype::Complex64 => Slice::Complex64(vec![Complex::default(); n]),
            Dtype::Complex128 => Slice::Complex128(vec![Complex::default(); n]),
            Dtype::String => Slice::String(vec![String::new(); n]),
            Dtype::Uintptr => Slice::Uintptr(vec![0; n]),
            Dtype::UnsafePointer => Slice::UnsafePointer(vec![0; n]),
            Dtype::Custom(c) => Slice::Raw {
                dtype: *self,
                data: vec![0; n.saturating_mul(c.size())],
            },
        }
    }

    /// Populate every element of `slice`, in order, from `reader`.
    ///
    /// `slice` must have been allocated for this descriptor. Int, Uint and
    /// Uintptr are read as 64-bit values and narrowed to the platform width.
    pub fn read_into_slice<R: ByteReader>(&self, slice: &mut Slice, reader: &mut R) -> Result<()> {
        if slice.dtype() != *self {
            return Err(Error::SliceMismatch {
                expected: *self,
                found: slice.dtype(),
            });
        }

        match slice {
            Slice::Bool(v) => fill(v, reader, |r| r.read_bool())?,
            Slice::Int(v) => fill(v, reader, |r| read_isize(r, Dtype::Int))?,
            Slice::Int8(v) => fill(v, reader, |r| r.read_i8())?,
            Slice::Int16(v) => fill(v, reader, |r| r.read_i16())?,
            Slice::Int32(v) => fill(v, reader, |r| r.read_i32())?,
            Slice::Int64(v) => fill(v, reader, |r| r.read_i64())?,
            Slice::Uint(v) => fill(v, reader, |r| read_usize(r, Dtype::Uint))?,
            Slice::Uint8(v) => fill(v, reader, |r| r.read_u8())?,
            Slice::Uint16(v) => fill(v, reader, |r| r.read_u16())?,
            Slice::Uint32(v) => fill(v, reader, |r| r.read_u32())?,
            Slice::Uint64(v) => fill(v, reader, |r| r.read_u64())?,
            Slice::Float32(v) => fill(v, reader, |r| r.read_f32())?,
            Slice::Float64(v) => fill(v, reader, |r| r.read_f64())?,
            Slice::Complex64(v) => {
                fill(v, reader, |r| Ok(Complex::new(r.read_f32()?, r.read_f32()?)))?
            }
            Slice::Complex128(v) => {
                fill(v, reader, |r| Ok(Complex::new(r.read_f64()?, r.read_f64()?)))?
            }
            Slice::String(v) => fill(v, reader, |r| r.read_string())?,
            Slice::Uintptr(v) => fill(v, reader, |r| read_usize(r, Dtype::Uintptr))?,
            Slice::UnsafePointer(_) => return Err(Error::UnsupportedRead(*self)),
            Slice::Raw { data, .. } => reader.read_exact(data)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Kind;
    use crate::reader::SliceReader;

    #[test]
    fn test_slice_of_zero_values() {
        let s = Dtype::Float32.slice_of(3);
        assert_eq!(s, Slice::Float32(vec![0.0; 3]));
        assert_eq!(s.dtype(), Dtype::Float32);
        assert_eq!(s.len(), 3);
        assert!(Dtype::String.slice_of(0).is_empty());

        let rgb = Dtype::custom("rgb", 3, Kind::Uint);
        let raw = rgb.slice_of(4);
        assert_eq!(raw.len(), 4);
        assert!(matches!(raw, Slice::Raw { ref data, .. } if data.len() == 12));
    }

    #[test]
    fn test_len_of_platform_width_containers() {
        for dtype in [Dtype::Int, Dtype::Uint, Dtype::Uintptr, Dtype::UnsafePointer] {
            let s = dtype.slice_of(5);
            assert_eq!(s.dtype(), dtype);
            assert_eq!(s.len(), 5);
            assert!(dtype.slice_of(0).is_empty());
        }
        assert_eq!(Slice::Int(vec![-1, 0, 1]).len(), 3);
    }

    #[test]
    fn test_read_int32() {
        let mut bytes = Vec::new();
        for v in [1i32, -2, 3] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut slice = Dtype::Int32.slice_of(3);
        let mut reader = SliceReader::new(&bytes);
        Dtype::Int32
            .read_into_slice(&mut slice, &mut reader)
            .expect("read");
        assert_eq!(slice, Slice::Int32(vec![1, -2, 3]));
        assert_eq!(slice.get(1), Some(Value::Int32(-2)));
    }

    #[test]
    fn test_platform_width_reads_eight_bytes() {
        let mut bytes = 42i64.to_le_bytes().to_vec();
        bytes.extend_from_slice(&7u64.to_le_bytes());
        let mut reader = SliceReader::new(&bytes);

        let mut ints = Dtype::Int.slice_of(1);
        Dtype::Int.read_into_slice(&mut ints, &mut reader).expect("int");
        assert_eq!(reader.position(), 8);
        assert_eq!(ints.get(0), Some(Value::Int(42)));

        let mut ptrs = Dtype::Uintptr.slice_of(1);
        Dtype::Uintptr.read_into_slice(&mut ptrs, &mut reader).expect("uintptr");
        assert_eq!(reader.position(), 16);
        assert_eq!(ptrs.get(0), Some(Value::Uintptr(7)));
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_platform_width_out_of_range() {
        let bytes = (1i64 << 40).to_le_bytes();
        let mut slice = Dtype::Int.slice_of(1);
        let err = Dtype::Int
            .read_into_slice(&mut slice, &mut SliceReader::new(&bytes))
            .unwrap_err();
        assert!(matches!(err, Error::Read(ReadError::OutOfRange { .. })));
    }

    #[test]
    fn test_read_mixed_elements() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&(-1.0f32).to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(b"hi");
        let mut reader = SliceReader::new(&bytes);

        let mut c = Dtype::Complex64.slice_of(1);
        Dtype::Complex64.read_into_slice(&mut c, &mut reader).expect("complex");
        assert_eq!(c, Slice::Complex64(vec![Complex::new(1.0, -1.0)]));

        let mut s = Dtype::String.slice_of(1);
        Dtype::String.read_into_slice(&mut s, &mut reader).expect("string");
        assert_eq!(s.get(0), Some(Value::String("hi".to_string())));
    }

    #[test]
    fn test_raw_custom_elements() {
        let rgb = Dtype::custom("rgb", 3, Kind::Uint);
        let bytes = [1, 2, 3, 4, 5, 6];
        let mut slice = rgb.slice_of(2);
        rgb.read_into_slice(&mut slice, &mut SliceReader::new(&bytes))
            .expect("raw");
        assert_eq!(
            slice,
            Slice::Raw {
                dtype: rgb,
                data: bytes.to_vec()
            }
        );
        assert_eq!(slice.get(0), None);
    }

    #[test]
    fn test_read_errors_propagate() {
        let mut slice = Dtype::Int64.slice_of(2);
        let bytes = 5i64.to_le_bytes();
        let err = Dtype::Int64
            .read_into_slice(&mut slice, &mut SliceReader::new(&bytes))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Read(ReadError::UnexpectedEof { need: 8, have: 0 })
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_mismatch_and_unsupported() {
        let mut slice = Dtype::Int8.slice_of(1);
        assert!(matches!(
            Dtype::Uint8.read_into_slice(&mut slice, &mut SliceReader::new(&[0])),
            Err(Error::SliceMismatch {
                expected: Dtype::Uint8,
                found: Dtype::Int8
            })
        ));

        let mut ptrs = Dtype::UnsafePointer.slice_of(1);
        assert!(matches!(
            Dtype::UnsafePointer.read_into_slice(&mut ptrs, &mut SliceReader::new(&[0; 8])),
            Err(Error::UnsupportedRead(Dtype::UnsafePointer))
        ));
    }
}
