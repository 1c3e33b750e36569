// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dtype - Runtime element type descriptors
//!
//! Descriptors identify the element type of a numeric array at runtime. This
//! crate provides the descriptors themselves, a registry that gives every
//! descriptor a stable ID and sorts it into type classes, the numpy dtype
//! code mapping and an int-to-value constructor table.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtype::{Dtype, Kind, Registry, Result, TypeClass};
//!
//! fn main() -> Result<()> {
//!     let registry = Registry::new();
//!
//!     // Built-ins are seeded
//!     registry.type_class_check(&Dtype::Float64, TypeClass::Ord)?;
//!     assert_eq!(registry.numpy_dtype(&Dtype::Int16)?, "i2");
//!
//!     // Custom descriptors cascade into the more general classes
//!     const F16: Dtype = Dtype::custom("float16", 2, Kind::Float);
//!     registry.register_float(F16);
//!     registry.type_class_check(&F16, TypeClass::Eq)?;
//!     assert_eq!(registry.find_by_name("float16")?, F16);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Type Classes
//!
//! ```text
//!   Float --> Number --+
//!     |                +--> Eq --> All
//!     +-----> Ord -----+
//! ```
//!
//! Registering into a class registers into every class it points to. A
//! Number is not assumed to be ordered (complex numbers are not). The other
//! classes (Signed, Unsigned, Complex, ...) only hold built-ins.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Dtype`] | Descriptor: built-in variant or [`CustomDtype`] |
//! | [`Registry`] | IDs, type classes, numpy codes, constructors |
//! | [`TypeClass`] | Type class identifier |
//! | [`Value`] | One element of a built-in descriptor |
//! | [`Slice`] | Homogeneous container read from a [`ByteReader`] |
//!
//! ## Features
//!
//! - `config-loaders` (default): declare custom descriptors in YAML, see
//!   [`loaders`]

pub mod codec;
pub mod config;
pub mod constructors;
pub mod descriptor;
mod error;
/// Type-inference traits implemented by descriptors.
pub mod infer;
pub mod loaders;
pub mod reader;
pub mod registry;
pub mod slice;
pub mod typeclass;
pub mod value;

pub use constructors::ConsFromInt;
pub use descriptor::{CustomDtype, Dtype, Kind};
pub use error::{Error, ReadError, Result};
pub use infer::{Substitutable, Subs, Type, TypeVarSet, TypeVariable};
pub use reader::{ByteReader, IoReader, SliceReader};
pub use registry::Registry;
pub use slice::Slice;
pub use typeclass::{TypeClass, TypeClassSet};
pub use value::{Complex, Value};

#[cfg(feature = "config-loaders")]
pub use loaders::{DtypeDocument, YamlLoader};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
