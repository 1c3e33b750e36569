// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-inference surface.
//!
//! A Hindley-Milner style engine works over types that can be substituted,
//! report their free type variables and be normalized. Descriptors are
//! ground types: substitution returns them unchanged, they have no free
//! variables and no component types.

use crate::descriptor::Dtype;
use std::convert::Infallible;
use std::fmt;

/// A type variable, named by a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVariable(pub char);

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of type variables, duplicates dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeVarSet(Vec<TypeVariable>);

impl TypeVarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `tv` was already present.
    pub fn insert(&mut self, tv: TypeVariable) -> bool {
        if self.0.contains(&tv) {
            return false;
        }
        self.0.push(tv);
        true
    }

    pub fn contains(&self, tv: &TypeVariable) -> bool {
        self.0.contains(tv)
    }

    pub fn union(mut self, other: &TypeVarSet) -> Self {
        for tv in other.iter() {
            self.insert(*tv);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeVariable> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TypeVariable> for TypeVarSet {
    fn from_iter<I: IntoIterator<Item = TypeVariable>>(iter: I) -> Self {
        let mut set = Self::new();
        for tv in iter {
            set.insert(tv);
        }
        set
    }
}

/// Substitution: type variable to type.
#[derive(Debug, Clone, PartialEq)]
pub struct Subs<T> {
    entries: Vec<(TypeVariable, T)>,
}

impl<T> Subs<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `tv`, replacing any previous binding.
    pub fn add(&mut self, tv: TypeVariable, ty: T) {
        match self.entries.iter_mut().find(|(v, _)| *v == tv) {
            Some(entry) => entry.1 = ty,
            None => self.entries.push((tv, ty)),
        }
    }

    pub fn get(&self, tv: &TypeVariable) -> Option<&T> {
        self.entries.iter().find(|(v, _)| v == tv).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVariable, &T)> {
        self.entries.iter().map(|(v, t)| (v, t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Subs<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Something a substitution can be applied to.
pub trait Substitutable {
    fn apply<T>(&self, subs: &Subs<T>) -> Self
    where
        Self: Sized;

    fn free_type_var(&self) -> TypeVarSet;
}

/// A type as seen by the inference engine.
pub trait Type: Substitutable + fmt::Display {
    type Error;

    fn name(&self) -> String {
        self.to_string()
    }

    /// Rename type variables from `k` to `v`.
    fn normalize(&self, k: &TypeVarSet, v: &TypeVarSet) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Component types, empty for ground types.
    fn types(&self) -> Vec<Self>
    where
        Self: Sized;

    fn eq_type(&self, other: &Self) -> bool;
}

impl Substitutable for Dtype {
    fn apply<T>(&self, _subs: &Subs<T>) -> Self {
        *self
    }

    fn free_type_var(&self) -> TypeVarSet {
        TypeVarSet::new()
    }
}

impl Type for Dtype {
    type Error = Infallible;

    fn normalize(&self, _k: &TypeVarSet, _v: &TypeVarSet) -> Result<Self, Infallible> {
        Ok(*self)
    }

    fn types(&self) -> Vec<Self> {
        Vec::new()
    }

    fn eq_type(&self, other: &Self) -> bool {
        self == other
    }
}
