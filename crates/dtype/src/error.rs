// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for descriptor lookups, conversions and container reads.

use crate::descriptor::Dtype;
use crate::typeclass::TypeClass;
use std::fmt;

/// Errors returned by registry, codec and constructor operations.
///
/// Every variant is recoverable; nothing in this crate panics on these
/// conditions.
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Type-class Errors
    // ========================================================================
    /// Raw type-class index outside the declared enumeration.
    UnknownTypeClass(i32),
    /// Descriptor is not a member of the requested type class.
    NotInTypeClass { dtype: Dtype, class: TypeClass },
    /// No registered descriptor renders to this name.
    NameNotFound(String),

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// Descriptor has no numpy dtype code.
    UnsupportedNumpyConversion(Dtype),
    /// Numpy dtype code is not recognized.
    UnsupportedNumpyDecode(String),
    /// Custom numpy code clashes with an existing pairing.
    NumpyCodeConflict { dtype: Dtype, code: String },
    /// No int constructor registered for the descriptor.
    NoConstructor(Dtype),

    // ========================================================================
    // Container Errors
    // ========================================================================
    /// Container was allocated for a different descriptor.
    SliceMismatch { expected: Dtype, found: Dtype },
    /// Descriptor has no stream representation.
    UnsupportedRead(Dtype),
    /// Underlying byte reader failed.
    Read(ReadError),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid dtype declaration.
    Config(String),
    /// Configuration file not found at specified path.
    ConfigFileNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTypeClass(index) => {
                write!(f, "Unknown/unsupported type class to check: {}", index)
            }
            Error::NotInTypeClass { dtype, class } => {
                write!(f, "Type {} is not a member of {}", dtype, class.name())
            }
            Error::NameNotFound(name) => write!(
                f,
                "Cannot find a dtype named {:?}; custom dtypes must be registered first",
                name
            ),
            Error::UnsupportedNumpyConversion(dtype) => {
                write!(f, "Unsupported dtype conversion to numpy dtype: {}", dtype)
            }
            Error::UnsupportedNumpyDecode(code) => {
                write!(f, "Unsupported dtype conversion from {:?} to dtype", code)
            }
            Error::NumpyCodeConflict { dtype, code } => {
                write!(f, "Numpy code {:?} conflicts with existing mapping for {}", code, dtype)
            }
            Error::NoConstructor(dtype) => {
                write!(f, "No int constructor registered for {}", dtype)
            }
            Error::SliceMismatch { expected, found } => write!(
                f,
                "Container mismatch: expected {} elements, found {}",
                expected, found
            ),
            Error::UnsupportedRead(dtype) => write!(f, "Cannot read {} from a stream", dtype),
            Error::Read(e) => write!(f, "Read error: {}", e),
            Error::Config(msg) => write!(f, "Invalid dtype configuration: {}", msg),
            Error::ConfigFileNotFound(path) => write!(f, "Config file not found: {}", path),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Error::Read(e)
    }
}

/// Convenient alias for results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by a [`ByteReader`](crate::reader::ByteReader).
#[derive(Debug)]
pub enum ReadError {
    /// Stream ended before a full element was read.
    UnexpectedEof { need: usize, have: usize },
    /// I/O error from the underlying source.
    Io(std::io::Error),
    /// String payload is not valid UTF-8.
    InvalidUtf8,
    /// Wire value does not fit the in-memory width.
    OutOfRange { dtype: Dtype, value: i128 },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { need, have } => {
                write!(f, "Unexpected end of stream: need {} bytes, have {}", need, have)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidUtf8 => write!(f, "Invalid UTF-8 in string payload"),
            Self::OutOfRange { dtype, value } => {
                write!(f, "Value {} out of range for {}", value, dtype)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_names_the_dtype() {
        let err = Error::NotInTypeClass {
            dtype: Dtype::Float64,
            class: TypeClass::Unsigned,
        };
        assert_eq!(err.to_string(), "Type float64 is not a member of Unsigned");

        let err = Error::UnsupportedNumpyDecode("zz9".into());
        assert!(err.to_string().contains("\"zz9\""));
    }

    #[test]
    fn test_read_error_is_chained() {
        let err = Error::from(ReadError::UnexpectedEof { need: 8, have: 3 });
        let source = err.source().expect("read errors expose their source");
        assert_eq!(source.to_string(), "Unexpected end of stream: need 8 bytes, have 3");
    }
}
