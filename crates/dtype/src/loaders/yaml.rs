// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML dtype declarations.
//!
//! # Example YAML
//!
//! ```yaml
//! # dtypes.yaml
//! dtypes:
//!   - name: float16
//!     size: 2
//!     kind: float      # bool | int | uint | float | complex | string | pointer
//!     class: float     # all | eq | ord | number | float
//!     numpy: f2
//!
//!   - name: date
//!     size: 4
//!     kind: int
//!     class: ord
//! ```
//!
//! Keyword values are case-insensitive. `class` names the cascade entry point
//! the descriptor is registered through and defaults to `all`.

use crate::descriptor::{Dtype, Kind};
use crate::error::{Error, Result};
use crate::registry::Registry;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// YAML dtype loader.
pub struct YamlLoader;

/// Root YAML document structure.
#[derive(Debug, Default, Deserialize)]
pub struct DtypeDocument {
    /// Declared descriptors, registered in order.
    #[serde(default)]
    pub dtypes: Vec<DtypeEntry>,
}

/// A single descriptor declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct DtypeEntry {
    pub name: String,
    /// Bytes per element.
    pub size: usize,
    /// bool, int, uint, float, complex, string or pointer
    pub kind: String,
    /// all, eq, ord, number or float
    #[serde(default = "default_class")]
    pub class: String,
    /// Custom numpy code (optional)
    #[serde(default)]
    pub numpy: Option<String>,
}

fn default_class() -> String {
    "all".to_string()
}

/// Registration entry point named by `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryPoint {
    All,
    Eq,
    Ord,
    Number,
    Float,
}

impl EntryPoint {
    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "eq" => Some(Self::Eq),
            "ord" => Some(Self::Ord),
            "number" => Some(Self::Number),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    fn register(self, registry: &Registry, dtype: Dtype) {
        match self {
            Self::All => registry.register(dtype),
            Self::Eq => registry.register_eq(dtype),
            Self::Ord => registry.register_ord(dtype),
            Self::Number => registry.register_number(dtype, None),
            Self::Float => registry.register_float(dtype),
        }
    }
}

/// Entry checked against the registry, ready to register.
struct Resolved<'a> {
    dtype: Dtype,
    entry_point: EntryPoint,
    numpy: Option<&'a str>,
}

impl YamlLoader {
    /// Load dtype declarations from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DtypeDocument> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ConfigFileNotFound(path.display().to_string()),
            _ => Error::Config(format!("Failed to read YAML file: {}", e)),
        })?;
        Self::parse_yaml(&yaml_content)
    }

    /// Parse YAML content.
    pub fn parse_yaml(yaml_content: &str) -> Result<DtypeDocument> {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))
    }
}

impl DtypeDocument {
    /// Register every declared descriptor into `registry`.
    ///
    /// All entries, numpy codes included, are validated before anything is
    /// registered, so a rejected document leaves the registry untouched. Only
    /// a concurrent registration racing this call can still make a numpy
    /// code fail after its descriptor was registered. A name that is
    /// already registered with the same size and kind resolves to the
    /// existing descriptor, which makes re-applying a document a no-op.
    ///
    /// Returns the descriptors in declaration order.
    pub fn apply(&self, registry: &Registry) -> Result<Vec<Dtype>> {
        let mut resolved: Vec<Resolved<'_>> = Vec::with_capacity(self.dtypes.len());
        for entry in &self.dtypes {
            let item = resolve(entry, registry, &resolved).map_err(|e| {
                log::warn!("[DTYPE] rejected dtype entry {:?}: {}", entry.name, e);
                e
            })?;
            resolved.push(item);
        }

        let mut declared = Vec::with_capacity(resolved.len());
        for item in resolved {
            item.entry_point.register(registry, item.dtype);
            if let Some(code) = item.numpy {
                registry.register_numpy_code(item.dtype, code)?;
            }
            declared.push(item.dtype);
        }
        log::debug!("[DTYPE] applied {} dtype declarations", declared.len());
        Ok(declared)
    }
}

fn resolve<'a>(
    entry: &'a DtypeEntry,
    registry: &Registry,
    earlier: &[Resolved<'_>],
) -> Result<Resolved<'a>> {
    if entry.name.is_empty() {
        return Err(Error::Config("dtype name must not be empty".to_string()));
    }
    if entry.size == 0 {
        return Err(Error::Config(format!("dtype {} has size 0", entry.name)));
    }
    let kind = Kind::parse(&entry.kind)
        .ok_or_else(|| Error::Config(format!("Invalid kind: {}", entry.kind)))?;
    let entry_point = EntryPoint::parse(&entry.class)
        .ok_or_else(|| Error::Config(format!("Invalid class: {}", entry.class)))?;

    let existing = earlier
        .iter()
        .map(|r| r.dtype)
        .find(|d| d.name() == entry.name)
        .or_else(|| registry.find_by_name(&entry.name).ok());

    let dtype = match existing {
        Some(d) if d.size() == entry.size && d.kind() == kind => d,
        Some(d) => {
            return Err(Error::Config(format!(
                "dtype {} already registered as {} bytes of kind {}",
                entry.name,
                d.size(),
                d.kind()
            )));
        }
        // Custom names live as long as the process, like the registry.
        None => Dtype::custom(Box::leak(entry.name.clone().into_boxed_str()), entry.size, kind),
    };

    let numpy = entry.numpy.as_deref();
    if let Some(code) = numpy {
        check_numpy_code(dtype, code, registry, earlier)?;
    }

    Ok(Resolved {
        dtype,
        entry_point,
        numpy,
    })
}

/// Reject a code the registry or an earlier entry already pairs differently.
fn check_numpy_code(
    dtype: Dtype,
    code: &str,
    registry: &Registry,
    earlier: &[Resolved<'_>],
) -> Result<()> {
    let clash = earlier.iter().any(|r| match r.numpy {
        Some(other) if other == code => r.dtype != dtype,
        Some(_) => r.dtype == dtype,
        None => false,
    });
    if clash {
        return Err(Error::NumpyCodeConflict {
            dtype,
            code: code.to_string(),
        });
    }
    registry.check_numpy_code(dtype, code)
}
