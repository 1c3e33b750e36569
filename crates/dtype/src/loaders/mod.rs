// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime loaders for custom descriptor declarations.
//!
//! # Example
//!
//! ```rust,ignore
//! use dtype::loaders::YamlLoader;
//! use dtype::Registry;
//!
//! let doc = YamlLoader::load_from_file("dtypes.yaml")?;
//! let declared = doc.apply(Registry::global())?;
//! ```

#[cfg(feature = "config-loaders")]
pub mod yaml;

#[cfg(feature = "config-loaders")]
pub use yaml::{DtypeDocument, DtypeEntry, YamlLoader};
