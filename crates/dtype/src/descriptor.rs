// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element type descriptors.
//!
//! A [`Dtype`] identifies one concrete element type. The built-in universe is a
//! closed set of variants; anything else is a [`CustomDtype`] carrying its own
//! name, size and kind as plain data. Descriptors are `Copy` and never change
//! after creation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::size_of;

/// Semantic category of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    String,
    Pointer,
}

impl Kind {
    /// Lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::String => "string",
            Self::Pointer => "pointer",
        }
    }

    /// Parse a kind name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            "float" => Some(Self::Float),
            "complex" => Some(Self::Complex),
            "string" => Some(Self::String),
            "pointer" => Some(Self::Pointer),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of a descriptor defined outside the built-in universe.
///
/// A custom descriptor is identified by its name: two values with the same
/// name are the same type whatever their size and kind.
#[derive(Debug, Clone, Copy)]
pub struct CustomDtype {
    name: &'static str,
    size: usize,
    kind: Kind,
}

impl CustomDtype {
    pub const fn new(name: &'static str, size: usize, kind: Kind) -> Self {
        Self { name, size, kind }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }
}

impl PartialEq for CustomDtype {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CustomDtype {}

impl Hash for CustomDtype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Runtime descriptor of an element type.
///
/// Two descriptors are equal iff they denote the same type: built-ins compare
/// by variant, custom descriptors by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dtype {
    Bool,
    /// Platform-width signed integer (`isize`).
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width unsigned integer (`usize`).
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    /// Pair of `f32`.
    Complex64,
    /// Pair of `f64`.
    Complex128,
    String,
    Uintptr,
    UnsafePointer,
    Custom(CustomDtype),
}

impl Dtype {
    /// Alias of [`Dtype::Uint8`].
    pub const BYTE: Dtype = Dtype::Uint8;

    /// Built-in descriptors in registration order.
    pub const BUILTINS: [Dtype; 18] = [
        Dtype::Bool,
        Dtype::Int,
        Dtype::Int8,
        Dtype::Int16,
        Dtype::Int32,
        Dtype::Int64,
        Dtype::Uint,
        Dtype::Uint8,
        Dtype::Uint16,
        Dtype::Uint32,
        Dtype::Uint64,
        Dtype::Float32,
        Dtype::Float64,
        Dtype::Complex64,
        Dtype::Complex128,
        Dtype::String,
        Dtype::Uintptr,
        Dtype::UnsafePointer,
    ];

    /// Create a custom descriptor.
    pub const fn custom(name: &'static str, size: usize, kind: Kind) -> Self {
        Dtype::Custom(CustomDtype::new(name, size, kind))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Dtype::Bool => "bool",
            Dtype::Int => "int",
            Dtype::Int8 => "int8",
            Dtype::Int16 => "int16",
            Dtype::Int32 => "int32",
            Dtype::Int64 => "int64",
            Dtype::Uint => "uint",
            Dtype::Uint8 => "uint8",
            Dtype::Uint16 => "uint16",
            Dtype::Uint32 => "uint32",
            Dtype::Uint64 => "uint64",
            Dtype::Float32 => "float32",
            Dtype::Float64 => "float64",
            Dtype::Complex64 => "complex64",
            Dtype::Complex128 => "complex128",
            Dtype::String => "string",
            Dtype::Uintptr => "uintptr",
            Dtype::UnsafePointer => "unsafe.Pointer",
            Dtype::Custom(c) => c.name(),
        }
    }

    /// Bytes occupied by one in-memory value.
    pub const fn size(&self) -> usize {
        match self {
            Dtype::Bool | Dtype::Int8 | Dtype::Uint8 => 1,
            Dtype::Int16 | Dtype::Uint16 => 2,
            Dtype::Int32 | Dtype::Uint32 | Dtype::Float32 => 4,
            Dtype::Int64 | Dtype::Uint64 | Dtype::Float64 | Dtype::Complex64 => 8,
            Dtype::Complex128 => 16,
            Dtype::Int => size_of::<isize>(),
            Dtype::Uint | Dtype::Uintptr => size_of::<usize>(),
            Dtype::String => size_of::<String>(),
            Dtype::UnsafePointer => size_of::<*const ()>(),
            Dtype::Custom(c) => c.size(),
        }
    }

    pub const fn kind(&self) -> Kind {
        match self {
            Dtype::Bool => Kind::Bool,
            Dtype::Int | Dtype::Int8 | Dtype::Int16 | Dtype::Int32 | Dtype::Int64 => Kind::Int,
            Dtype::Uint
            | Dtype::Uint8
            | Dtype::Uint16
            | Dtype::Uint32
            | Dtype::Uint64
            | Dtype::Uintptr => Kind::Uint,
            Dtype::Float32 | Dtype::Float64 => Kind::Float,
            Dtype::Complex64 | Dtype::Complex128 => Kind::Complex,
            Dtype::String => Kind::String,
            Dtype::UnsafePointer => Kind::Pointer,
            Dtype::Custom(c) => c.kind(),
        }
    }

    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Dtype::Custom(_))
    }

    /// Width depends on the target (`isize`/`usize`). These are always
    /// exchanged as 64-bit quantities on the wire.
    pub const fn is_platform_width(&self) -> bool {
        matches!(self, Dtype::Int | Dtype::Uint | Dtype::Uintptr)
    }
}

impl From<CustomDtype> for Dtype {
    fn from(c: CustomDtype) -> Self {
        Dtype::Custom(c)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
