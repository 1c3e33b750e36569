// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dtype Configuration - Single Source of Truth
//!
//! Layout constants shared by the codec, the stream reader and the registry.
//! **Never hardcode these widths elsewhere.**
//!
//! Runtime declarations of custom descriptors live in
//! [`loaders`](crate::loaders) (feature `config-loaders`).

use std::mem::size_of;

/// Byte width of the platform-width integers (Int, Uint, Uintptr).
///
/// Decides which numpy code Int/Uint encode to and which fixed-width code
/// decodes back to them.
pub const NATIVE_INT_SIZE: usize = size_of::<isize>();

/// Bytes a platform-width integer occupies in a stream, whatever the target.
///
/// Values are narrowed to [`NATIVE_INT_SIZE`] after reading.
pub const PLATFORM_WIDTH_WIRE_SIZE: usize = 8;

/// Number of built-in descriptors. Custom descriptors get IDs from here on.
pub const BUILTIN_COUNT: usize = 18;

/// Length prefix of a string element in a stream (u32, little-endian).
pub const STRING_LEN_PREFIX_SIZE: usize = 4;

/// Largest buffer growth per step while reading a string payload, so a bogus
/// length prefix cannot force one huge allocation.
pub const STRING_READ_CHUNK: usize = 64 * 1024;
