// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Int-to-value constructors keyed by descriptor.
//!
//! Integer targets convert with `as` semantics (wrapping on narrowing), float
//! and complex targets take the integer as the real part.

use crate::descriptor::Dtype;
use crate::error::{Error, Result};
use crate::value::{Complex, Value};
use dashmap::DashMap;

/// Builds a value of a descriptor's type from a machine integer.
pub type ConsFromInt = fn(isize) -> Value;

fn int_from_int(a: isize) -> Value {
    Value::Int(a)
}

fn int8_from_int(a: isize) -> Value {
    Value::Int8(a as i8)
}

fn int16_from_int(a: isize) -> Value {
    Value::Int16(a as i16)
}

fn int32_from_int(a: isize) -> Value {
    Value::Int32(a as i32)
}

fn int64_from_int(a: isize) -> Value {
    Value::Int64(a as i64)
}

fn uint_from_int(a: isize) -> Value {
    Value::Uint(a as usize)
}

fn uint8_from_int(a: isize) -> Value {
    Value::Uint8(a as u8)
}

fn uint16_from_int(a: isize) -> Value {
    Value::Uint16(a as u16)
}

fn uint32_from_int(a: isize) -> Value {
    Value::Uint32(a as u32)
}

fn uint64_from_int(a: isize) -> Value {
    Value::Uint64(a as u64)
}

fn float32_from_int(a: isize) -> Value {
    Value::Float32(a as f32)
}

fn float64_from_int(a: isize) -> Value {
    Value::Float64(a as f64)
}

fn complex64_from_int(a: isize) -> Value {
    Value::Complex64(Complex::new(a as f64 as f32, 0.0))
}

fn complex128_from_int(a: isize) -> Value {
    Value::Complex128(Complex::new(a as f64, 0.0))
}

fn string_from_int(a: isize) -> Value {
    Value::String(a.to_string())
}

/// Pre-registered constructors: every built-in number plus String.
const BUILTIN_CONSTRUCTORS: [(Dtype, ConsFromInt); 15] = [
    (Dtype::Int, int_from_int),
    (Dtype::Int8, int8_from_int),
    (Dtype::Int16, int16_from_int),
    (Dtype::Int32, int32_from_int),
    (Dtype::Int64, int64_from_int),
    (Dtype::Uint, uint_from_int),
    (Dtype::Uint8, uint8_from_int),
    (Dtype::Uint16, uint16_from_int),
    (Dtype::Uint32, uint32_from_int),
    (Dtype::Uint64, uint64_from_int),
    (Dtype::Float32, float32_from_int),
    (Dtype::Float64, float64_from_int),
    (Dtype::Complex64, complex64_from_int),
    (Dtype::Complex128, complex128_from_int),
    (Dtype::String, string_from_int),
];

/// Constructor table. Lock-free reads, never held across set locks.
pub struct ConstructorTable {
    table: DashMap<Dtype, ConsFromInt>,
}

impl ConstructorTable {
    /// Table seeded with the built-in constructors.
    pub fn new() -> Self {
        let table = DashMap::with_capacity(BUILTIN_CONSTRUCTORS.len());
        for (dtype, cons) in BUILTIN_CONSTRUCTORS {
            table.insert(dtype, cons);
        }
        Self { table }
    }

    pub fn get(&self, dtype: &Dtype) -> Option<ConsFromInt> {
        self.table.get(dtype).map(|entry| *entry)
    }

    pub fn contains(&self, dtype: &Dtype) -> bool {
        self.table.contains_key(dtype)
    }

    /// Install `cons` unless a constructor already exists. Returns true if
    /// installed.
    pub fn install_if_absent(&self, dtype: Dtype, cons: ConsFromInt) -> bool {
        let mut installed = false;
        self.table.entry(dtype).or_insert_with(|| {
            installed = true;
            cons
        });
        installed
    }

    /// Install or replace; returns the previous constructor.
    pub fn replace(&self, dtype: Dtype, cons: ConsFromInt) -> Option<ConsFromInt> {
        self.table.insert(dtype, cons)
    }

    pub fn from_int(&self, dtype: &Dtype, v: isize) -> Result<Value> {
        let cons = self.get(dtype).ok_or(Error::NoConstructor(*dtype))?;
        Ok(cons(v))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for ConstructorTable {
    fn default() -> Self {
        Self::new()
    }
}
