// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Numpy dtype codes.
//!
//! | Code | Dtype |
//! |------|-------|
//! | `b1` | Bool |
//! | `i1` `i2` `i4` `i8` | Int8..Int64 (and Int at its native width) |
//! | `u1` `u2` `u4` `u8` | Uint8..Uint64 (and Uint at its native width) |
//! | `f4` `f8` | Float32, Float64 |
//! | `c8` `c16` | Complex64, Complex128 |
//!
//! String, Uintptr and UnsafePointer have no code. Decoding a width shared by
//! a fixed-width type and the platform-width one yields the platform-width
//! descriptor (`i8` is Int on 64-bit targets).

use crate::config::NATIVE_INT_SIZE;
use crate::descriptor::Dtype;
use crate::error::{Error, Result};
use dashmap::DashMap;

/// Numpy code of the platform-width signed integer.
const NATIVE_INT_CODE: &str = match NATIVE_INT_SIZE {
    2 => "i2",
    4 => "i4",
    _ => "i8",
};

/// Numpy code of the platform-width unsigned integer.
const NATIVE_UINT_CODE: &str = match NATIVE_INT_SIZE {
    2 => "u2",
    4 => "u4",
    _ => "u8",
};

/// Every built-in code, for table-driven checks.
pub const BUILTIN_CODES: [&str; 13] = [
    "b1", "i1", "i2", "i4", "i8", "u1", "u2", "u4", "u8", "f4", "f8", "c8", "c16",
];

/// Forward table for built-in descriptors.
pub fn builtin_code(dtype: &Dtype) -> Option<&'static str> {
    let code = match dtype {
        Dtype::Bool => "b1",
        Dtype::Int => NATIVE_INT_CODE,
        Dtype::Int8 => "i1",
        Dtype::Int16 => "i2",
        Dtype::Int32 => "i4",
        Dtype::Int64 => "i8",
        Dtype::Uint => NATIVE_UINT_CODE,
        Dtype::Uint8 => "u1",
        Dtype::Uint16 => "u2",
        Dtype::Uint32 => "u4",
        Dtype::Uint64 => "u8",
        Dtype::Float32 => "f4",
        Dtype::Float64 => "f8",
        Dtype::Complex64 => "c8",
        Dtype::Complex128 => "c16",
        Dtype::String | Dtype::Uintptr | Dtype::UnsafePointer | Dtype::Custom(_) => return None,
    };
    Some(code)
}

/// Reverse table for built-in codes, with platform-width disambiguation.
pub fn builtin_from_code(code: &str) -> Option<Dtype> {
    let fixed = match code {
        "b1" => Dtype::Bool,
        "i1" => Dtype::Int8,
        "i2" => Dtype::Int16,
        "i4" => Dtype::Int32,
        "i8" => Dtype::Int64,
        "u1" => Dtype::Uint8,
        "u2" => Dtype::Uint16,
        "u4" => Dtype::Uint32,
        "u8" => Dtype::Uint64,
        "f4" => Dtype::Float32,
        "f8" => Dtype::Float64,
        "c8" => Dtype::Complex64,
        "c16" => Dtype::Complex128,
        _ => return None,
    };
    let resolved = match fixed {
        Dtype::Int16 | Dtype::Int32 | Dtype::Int64 if fixed.size() == Dtype::Int.size() => {
            Dtype::Int
        }
        Dtype::Uint16 | Dtype::Uint32 | Dtype::Uint64 if fixed.size() == Dtype::Uint.size() => {
            Dtype::Uint
        }
        other => other,
    };
    Some(resolved)
}

/// Codes for custom descriptors, consulted after the built-in tables.
#[derive(Debug, Default)]
pub struct NumpyCodes {
    forward: DashMap<Dtype, String>,
    reverse: DashMap<String, Dtype>,
}

impl NumpyCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a descriptor.
    pub fn encode(&self, dtype: &Dtype) -> Result<String> {
        if let Some(code) = builtin_code(dtype) {
            return Ok(code.to_string());
        }
        match self.forward.get(dtype) {
            Some(code) => Ok(code.clone()),
            None => {
                log::trace!("[DTYPE] no numpy code for {}", dtype);
                Err(Error::UnsupportedNumpyConversion(*dtype))
            }
        }
    }

    /// Decode a code.
    pub fn decode(&self, code: &str) -> Result<Dtype> {
        if let Some(dtype) = builtin_from_code(code) {
            return Ok(dtype);
        }
        match self.reverse.get(code) {
            Some(dtype) => Ok(*dtype),
            None => {
                log::trace!("[DTYPE] unknown numpy code {:?}", code);
                Err(Error::UnsupportedNumpyDecode(code.to_string()))
            }
        }
    }

    /// Ok if `code` could be recorded for `dtype` without conflict.
    ///
    /// Reads the tables only; [`register`](Self::register) still settles
    /// races between concurrent registrations.
    pub fn check(&self, dtype: Dtype, code: &str) -> Result<()> {
        let conflict = || Error::NumpyCodeConflict {
            dtype,
            code: code.to_string(),
        };
        if dtype.is_builtin() || builtin_from_code(code).is_some() {
            return Err(conflict());
        }
        if self.reverse.get(code).is_some_and(|owner| *owner != dtype) {
            return Err(conflict());
        }
        if self.forward.get(&dtype).is_some_and(|existing| *existing != code) {
            return Err(conflict());
        }
        Ok(())
    }

    /// Record `code` for a custom descriptor.
    ///
    /// Re-registering the same pairing is a no-op. Built-in descriptors,
    /// built-in codes and codes or descriptors already paired differently are
    /// rejected.
    pub fn register(&self, dtype: Dtype, code: &str) -> Result<()> {
        let conflict = || Error::NumpyCodeConflict {
            dtype,
            code: code.to_string(),
        };

        if dtype.is_builtin() || builtin_from_code(code).is_some() {
            log::warn!("[DTYPE] refusing numpy code {:?} for {}: built-in", code, dtype);
            return Err(conflict());
        }

        // Reverse entry first: it decides ownership of the code.
        let owner = *self
            .reverse
            .entry(code.to_string())
            .or_insert(dtype);
        if owner != dtype {
            log::warn!("[DTYPE] numpy code {:?} already denotes {}", code, owner);
            return Err(conflict());
        }

        let existing = self
            .forward
            .entry(dtype)
            .or_insert_with(|| code.to_string())
            .clone();
        if existing != code {
            log::warn!("[DTYPE] {} already encodes as {:?}", dtype, existing);
            self.reverse.remove_if(code, |_, d| *d == dtype);
            return Err(conflict());
        }

        log::debug!("[DTYPE] numpy code {:?} <-> {}", code, dtype);
        Ok(())
    }
}
