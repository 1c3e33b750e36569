// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type classes: named, independently locked sets of descriptors.
//!
//! # Cascade
//!
//! Registering into a specific class also registers into every more general
//! one. Each entry point is a fixed pipeline of classes, most specific first:
//!
//! ```text
//! Float -> Number -> Ord -> Eq -> All
//! ```
//!
//! A pipeline takes the locks of its classes in exactly this order, so two
//! concurrent registrations can never wait on each other in a cycle. Readers
//! only ever hold one set lock at a time.

use crate::descriptor::Dtype;
use crate::error::Error;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;

/// Type class identifiers.
///
/// `All` is the registry itself; the discriminant is the raw index accepted
/// by [`TypeClass::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TypeClass {
    All = 0,
    /// Types with dedicated code paths in the array layer.
    Specialized = 1,
    Addable = 2,
    /// Addition and subtraction are defined.
    Number = 3,
    /// A total or partial order is defined.
    Ord = 4,
    /// Equality comparison is defined.
    Eq = 5,
    Unsigned = 6,
    Signed = 7,
    SignedNonComplex = 8,
    /// NaN, +Inf and -Inf are values of the type.
    Float = 9,
    Complex = 10,
    FloatOrComplex = 11,
    NonComplexNumber = 12,
    Generatable = 13,
}

impl TypeClass {
    /// Number of declared classes.
    pub const COUNT: usize = 14;

    /// Every class in index order.
    pub const ALL: [TypeClass; Self::COUNT] = [
        TypeClass::All,
        TypeClass::Specialized,
        TypeClass::Addable,
        TypeClass::Number,
        TypeClass::Ord,
        TypeClass::Eq,
        TypeClass::Unsigned,
        TypeClass::Signed,
        TypeClass::SignedNonComplex,
        TypeClass::Float,
        TypeClass::Complex,
        TypeClass::FloatOrComplex,
        TypeClass::NonComplexNumber,
        TypeClass::Generatable,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Diagnostic name.
    pub const fn name(self) -> &'static str {
        match self {
            TypeClass::All => "All",
            TypeClass::Specialized => "Specialized",
            TypeClass::Addable => "Addable",
            TypeClass::Number => "Number",
            TypeClass::Ord => "Ord",
            TypeClass::Eq => "Eq",
            TypeClass::Unsigned => "Unsigned",
            TypeClass::Signed => "Signed",
            TypeClass::SignedNonComplex => "SignedNonComplex",
            TypeClass::Float => "Float",
            TypeClass::Complex => "Complex",
            TypeClass::FloatOrComplex => "FloatOrComplex",
            TypeClass::NonComplexNumber => "NonComplexNumber",
            TypeClass::Generatable => "Generatable",
        }
    }

    /// Position in the global lock order. Only classes that take part in a
    /// cascade have one.
    pub(crate) const fn cascade_rank(self) -> Option<u8> {
        match self {
            TypeClass::Float => Some(0),
            TypeClass::Number => Some(1),
            TypeClass::Ord => Some(2),
            TypeClass::Eq => Some(3),
            TypeClass::All => Some(4),
            _ => None,
        }
    }
}

impl TryFrom<i32> for TypeClass {
    type Error = Error;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(Error::UnknownTypeClass(index))
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cascade pipelines, most specific class first.
pub(crate) const ALL_CASCADE: &[TypeClass] = &[TypeClass::All];
pub(crate) const EQ_CASCADE: &[TypeClass] = &[TypeClass::Eq, TypeClass::All];
pub(crate) const ORD_CASCADE: &[TypeClass] = &[TypeClass::Ord, TypeClass::Eq, TypeClass::All];
pub(crate) const NUMBER_CASCADE: &[TypeClass] =
    &[TypeClass::Number, TypeClass::Eq, TypeClass::All];
pub(crate) const FLOAT_CASCADE: &[TypeClass] = &[
    TypeClass::Float,
    TypeClass::Number,
    TypeClass::Ord,
    TypeClass::Eq,
    TypeClass::All,
];

/// True if `pipeline` follows the global lock order.
pub(crate) fn is_lock_ordered(pipeline: &[TypeClass]) -> bool {
    pipeline.windows(2).all(|w| match (w[0].cascade_rank(), w[1].cascade_rank()) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    })
}

/// Members of one type class behind its own lock.
pub struct TypeClassSet {
    class: TypeClass,
    members: Mutex<Vec<Dtype>>,
}

impl TypeClassSet {
    pub(crate) fn new(class: TypeClass, seed: &[Dtype]) -> Self {
        Self {
            class,
            members: Mutex::new(seed.to_vec()),
        }
    }

    pub fn class(&self) -> TypeClass {
        self.class
    }

    pub fn name(&self) -> &'static str {
        self.class.name()
    }

    pub fn contains(&self, dtype: &Dtype) -> bool {
        self.members.lock().contains(dtype)
    }

    /// Index of `dtype` in insertion order.
    pub fn position(&self, dtype: &Dtype) -> Option<usize> {
        self.members.lock().iter().position(|d| d == dtype)
    }

    /// First member whose rendered name is `name`.
    pub fn find_by_name(&self, name: &str) -> Option<Dtype> {
        self.members.lock().iter().find(|d| d.name() == name).copied()
    }

    /// Copy of the members in insertion order.
    pub fn snapshot(&self) -> Vec<Dtype> {
        self.members.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<Dtype>> {
        self.members.lock()
    }
}

impl fmt::Debug for TypeClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeClassSet")
            .field("class", &self.class)
            .field("members", &*self.members.lock())
            .finish()
    }
}

/// Insert `dtype` unless present. Returns true if it was appended.
pub(crate) fn insert_unique(members: &mut Vec<Dtype>, dtype: Dtype) -> bool {
    if members.contains(&dtype) {
        return false;
    }
    members.push(dtype);
    true
}
