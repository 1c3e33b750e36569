// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor registry.
//!
//! The [`Registry`] owns the `All` set (every known descriptor, in
//! first-registration order), the thirteen type-class sets, the constructor
//! table and the custom numpy codes. Built-ins are seeded when the registry
//! is created, before anything else can observe it.
//!
//! # Thread Safety
//!
//! - Each type-class set: its own `parking_lot::Mutex`
//! - Registrations lock a cascade pipeline in the fixed order
//!   Float -> Number -> Ord -> Eq -> All and insert under those locks
//! - Lookups lock one set at a time
//! - Constructor table and numpy codes: `DashMap`, never touched while a set
//!   lock is held

use crate::codec::NumpyCodes;
use crate::constructors::{ConsFromInt, ConstructorTable};
use crate::descriptor::Dtype;
use crate::error::{Error, Result};
use crate::typeclass::{
    insert_unique, is_lock_ordered, TypeClass, TypeClassSet, ALL_CASCADE, EQ_CASCADE,
    FLOAT_CASCADE, NUMBER_CASCADE, ORD_CASCADE,
};
use crate::value::Value;
use std::sync::OnceLock;

// Built-in memberships. `All` and `Eq` are `Dtype::BUILTINS`.
mod seeds {
    use crate::descriptor::Dtype::{self, *};

    pub(super) const SPECIALIZED: &[Dtype] = &[
        Bool, Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64,
        Complex64, Complex128, String,
    ];
    pub(super) const ADDABLE: &[Dtype] = &[
        Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64,
        Complex64, Complex128, String,
    ];
    pub(super) const NUMBER: &[Dtype] = &[
        Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64,
        Complex64, Complex128,
    ];
    pub(super) const ORD: &[Dtype] = &[
        Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64, String,
    ];
    pub(super) const UNSIGNED: &[Dtype] = &[Uint, Uint8, Uint16, Uint32, Uint64];
    pub(super) const SIGNED: &[Dtype] = &[
        Int, Int8, Int16, Int32, Int64, Float32, Float64, Complex64, Complex128,
    ];
    pub(super) const SIGNED_NON_COMPLEX: &[Dtype] = &[Int, Int8, Int16, Int32, Int64, Float32, Float64];
    pub(super) const FLOAT: &[Dtype] = &[Float32, Float64];
    pub(super) const COMPLEX: &[Dtype] = &[Complex64, Complex128];
    pub(super) const FLOAT_OR_COMPLEX: &[Dtype] = &[Float32, Float64, Complex64, Complex128];
    pub(super) const NON_COMPLEX_NUMBER: &[Dtype] = &[
        Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64,
    ];
    pub(super) const GENERATABLE: &[Dtype] = &[
        Bool, Int, Int8, Int16, Int32, Int64, Uint, Uint8, Uint16, Uint32, Uint64, Float32, Float64,
        String,
    ];
}

fn builtin_members(class: TypeClass) -> &'static [Dtype] {
    match class {
        // Every built-in supports equality.
        TypeClass::All | TypeClass::Eq => &Dtype::BUILTINS,
        TypeClass::Specialized => seeds::SPECIALIZED,
        TypeClass::Addable => seeds::ADDABLE,
        TypeClass::Number => seeds::NUMBER,
        TypeClass::Ord => seeds::ORD,
        TypeClass::Unsigned => seeds::UNSIGNED,
        TypeClass::Signed => seeds::SIGNED,
        TypeClass::SignedNonComplex => seeds::SIGNED_NON_COMPLEX,
        TypeClass::Float => seeds::FLOAT,
        TypeClass::Complex => seeds::COMPLEX,
        TypeClass::FloatOrComplex => seeds::FLOAT_OR_COMPLEX,
        TypeClass::NonComplexNumber => seeds::NON_COMPLEX_NUMBER,
        TypeClass::Generatable => seeds::GENERATABLE,
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Registry of descriptors, type classes, constructors and numpy codes.
pub struct Registry {
    /// Indexed by [`TypeClass::index`].
    sets: [TypeClassSet; TypeClass::COUNT],
    constructors: ConstructorTable,
    numpy: NumpyCodes,
}

impl Registry {
    /// Registry seeded with the built-in descriptors.
    pub fn new() -> Self {
        Self {
            sets: TypeClass::ALL.map(|class| TypeClassSet::new(class, builtin_members(class))),
            constructors: ConstructorTable::new(),
            numpy: NumpyCodes::new(),
        }
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// The set backing `class`. `All` is the registry proper.
    pub fn set(&self, class: TypeClass) -> &TypeClassSet {
        &self.sets[class.index()]
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Add `dtype` to the registry. No-op if already present.
    pub fn register(&self, dtype: Dtype) {
        self.cascade(dtype, ALL_CASCADE);
    }

    /// Register `dtype` as equatable (Eq, All).
    pub fn register_eq(&self, dtype: Dtype) {
        self.cascade(dtype, EQ_CASCADE);
    }

    /// Register `dtype` as ordered (Ord, Eq, All).
    pub fn register_ord(&self, dtype: Dtype) {
        self.cascade(dtype, ORD_CASCADE);
    }

    /// Register `dtype` as a number (Number, Eq, All).
    ///
    /// A number is not assumed to be ordered. `constructor`, when given, is
    /// installed only if `dtype` has none yet; use
    /// [`register_constructor`](Self::register_constructor) to replace one.
    pub fn register_number(&self, dtype: Dtype, constructor: Option<ConsFromInt>) {
        // Installed before the membership becomes visible.
        if let Some(cons) = constructor {
            if self.constructors.install_if_absent(dtype, cons) {
                log::debug!("[DTYPE] int constructor installed for {}", dtype);
            }
        }
        self.cascade(dtype, NUMBER_CASCADE);
    }

    /// Register `dtype` as floating point (Float, Number, Ord, Eq, All).
    pub fn register_float(&self, dtype: Dtype) {
        self.cascade(dtype, FLOAT_CASCADE);
    }

    /// Install or replace the int constructor of `dtype`.
    pub fn register_constructor(&self, dtype: Dtype, cons: ConsFromInt) -> Option<ConsFromInt> {
        log::debug!("[DTYPE] int constructor set for {}", dtype);
        self.constructors.replace(dtype, cons)
    }

    /// Give a custom descriptor a numpy code.
    pub fn register_numpy_code(&self, dtype: Dtype, code: &str) -> Result<()> {
        self.numpy.register(dtype, code)
    }

    /// Ok if [`register_numpy_code`](Self::register_numpy_code) would accept
    /// the pairing now.
    pub fn check_numpy_code(&self, dtype: Dtype, code: &str) -> Result<()> {
        self.numpy.check(dtype, code)
    }

    /// Insert `dtype` into every class of `pipeline`, holding all of the
    /// pipeline's locks. Locks are taken in pipeline order.
    fn cascade(&self, dtype: Dtype, pipeline: &[TypeClass]) {
        debug_assert!(is_lock_ordered(pipeline), "cascade out of lock order: {:?}", pipeline);

        let mut guards: Vec<_> = pipeline
            .iter()
            .map(|class| (*class, self.set(*class).lock()))
            .collect();

        // Every pipeline ends in All; a name denotes one descriptor.
        if let Some((_, all)) = guards.last() {
            if let Some(owner) = all.iter().find(|d| d.name() == dtype.name() && **d != dtype) {
                log::warn!(
                    "[DTYPE] {} not registered: name already denotes {:?}",
                    dtype,
                    owner
                );
                return;
            }
        }

        for (class, members) in &mut guards {
            if insert_unique(members, dtype) {
                log::debug!("[DTYPE] {} registered in {}", dtype, class);
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Stable identifier: position at first registration, or -1.
    ///
    /// Linear scan; the universe holds a few dozen descriptors.
    pub fn id(&self, dtype: &Dtype) -> isize {
        self.set(TypeClass::All)
            .position(dtype)
            .map_or(-1, |i| i as isize)
    }

    /// Registered descriptor whose name is `name`.
    pub fn find_by_name(&self, name: &str) -> Result<Dtype> {
        self.set(TypeClass::All)
            .find_by_name(name)
            .ok_or_else(|| Error::NameNotFound(name.to_string()))
    }

    /// Ok if `dtype` is a member of `class`.
    pub fn type_class_check(&self, dtype: &Dtype, class: TypeClass) -> Result<()> {
        if self.set(class).contains(dtype) {
            Ok(())
        } else {
            Err(Error::NotInTypeClass {
                dtype: *dtype,
                class,
            })
        }
    }

    /// [`type_class_check`](Self::type_class_check) with a raw class index.
    pub fn type_class_check_index(&self, dtype: &Dtype, class: i32) -> Result<()> {
        self.type_class_check(dtype, TypeClass::try_from(class)?)
    }

    pub fn is_member(&self, dtype: &Dtype, class: TypeClass) -> bool {
        self.set(class).contains(dtype)
    }

    /// Snapshot of `class` in insertion order.
    pub fn members(&self, class: TypeClass) -> Vec<Dtype> {
        self.set(class).snapshot()
    }

    /// Snapshot of every registered descriptor, ordered by ID.
    pub fn all_types(&self) -> Vec<Dtype> {
        self.members(TypeClass::All)
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.set(TypeClass::All).len()
    }

    pub fn is_empty(&self) -> bool {
        self.set(TypeClass::All).is_empty()
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Numpy dtype code of `dtype`.
    pub fn numpy_dtype(&self, dtype: &Dtype) -> Result<String> {
        self.numpy.encode(dtype)
    }

    /// Descriptor for a numpy dtype code.
    pub fn from_numpy_dtype(&self, code: &str) -> Result<Dtype> {
        self.numpy.decode(code)
    }

    /// Value of type `dtype` built from `v`.
    pub fn from_int(&self, dtype: &Dtype, v: isize) -> Result<Value> {
        self.constructors.from_int(dtype, v)
    }

    pub fn has_constructor(&self, dtype: &Dtype) -> bool {
        self.constructors.contains(dtype)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.all_types())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Kind;
    use crate::descriptor::Dtype::{Complex128, Float64, UnsafePointer};

    const F16: Dtype = Dtype::custom("float16", 2, Kind::Float);

    fn count(registry: &Registry, class: TypeClass, dtype: &Dtype) -> usize {
        registry
            .members(class)
            .iter()
            .filter(|d| *d == dtype)
            .count()
    }

    #[test]
    fn test_builtin_ids_follow_seed_order() {
        let registry = Registry::new();
        for (i, dtype) in Dtype::BUILTINS.iter().enumerate() {
            assert_eq!(registry.id(dtype), i as isize);
        }
        assert_eq!(registry.id(&F16), -1);
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_builtin_memberships_are_registered() {
        let registry = Registry::new();
        for class in TypeClass::ALL {
            for dtype in registry.members(class) {
                assert_ne!(registry.id(&dtype), -1, "{} from {} has no ID", dtype, class);
            }
        }
    }

    #[test]
    fn test_register_appends_once() {
        let registry = Registry::new();
        registry.register(F16);
        registry.register(F16);
        assert_eq!(registry.id(&F16), 18);
        assert_eq!(registry.len(), 19);
        assert!(registry.type_class_check(&F16, TypeClass::Eq).is_err());
    }

    #[test]
    fn test_builtin_name_is_not_shadowed() {
        let registry = Registry::new();
        let fake = Dtype::custom("int32", 4, Kind::Int);
        registry.register_ord(fake);
        assert_eq!(registry.len(), 18);
        assert_eq!(registry.id(&fake), -1);
        assert!(!registry.is_member(&fake, TypeClass::Ord));
        assert_eq!(registry.find_by_name("int32").ok(), Some(Dtype::Int32));
    }

    #[test]
    fn test_register_float_cascades() {
        let registry = Registry::new();
        registry.register_float(F16);
        registry.register_float(F16);
        for class in [
            TypeClass::Float,
            TypeClass::Number,
            TypeClass::Ord,
            TypeClass::Eq,
            TypeClass::All,
        ] {
            assert_eq!(count(&registry, class, &F16), 1, "{}", class);
        }
        assert!(!registry.is_member(&F16, TypeClass::Signed));
    }

    #[test]
    fn test_register_number_does_not_imply_ord() {
        let registry = Registry::new();
        let c32 = Dtype::custom("complex32", 4, Kind::Complex);
        registry.register_number(c32, None);
        assert!(registry.type_class_check(&c32, TypeClass::Number).is_ok());
        assert!(registry.type_class_check(&c32, TypeClass::Eq).is_ok());
        assert!(matches!(
            registry.type_class_check(&c32, TypeClass::Ord),
            Err(Error::NotInTypeClass { class: TypeClass::Ord, .. })
        ));
        // Built-in complex numbers are not ordered either.
        assert!(registry.type_class_check(&Complex128, TypeClass::Ord).is_err());
    }

    #[test]
    fn test_register_ord_and_eq() {
        let registry = Registry::new();
        let date = Dtype::custom("date", 4, Kind::Int);
        let handle = Dtype::custom("handle", 8, Kind::Pointer);
        registry.register_ord(date);
        registry.register_eq(handle);

        assert!(registry.is_member(&date, TypeClass::Ord));
        assert!(registry.is_member(&date, TypeClass::Eq));
        assert!(registry.is_member(&handle, TypeClass::Eq));
        assert!(!registry.is_member(&handle, TypeClass::Ord));
        assert_eq!(registry.id(&date), 18);
        assert_eq!(registry.id(&handle), 19);
    }

    #[test]
    fn test_type_class_check_index() {
        let registry = Registry::new();
        assert!(registry
            .type_class_check_index(&Float64, TypeClass::Number as i32)
            .is_ok());
        assert!(matches!(
            registry.type_class_check_index(&Float64, TypeClass::COUNT as i32),
            Err(Error::UnknownTypeClass(14))
        ));
        assert!(matches!(
            registry.type_class_check_index(&Float64, TypeClass::Unsigned as i32),
            Err(Error::NotInTypeClass { .. })
        ));
        assert!(registry.type_class_check(&UnsafePointer, TypeClass::All).is_ok());
    }

    #[test]
    fn test_find_by_name() {
        let registry = Registry::new();
        assert_eq!(registry.find_by_name("float64").ok(), Some(Float64));
        assert!(matches!(
            registry.find_by_name("f00b4rb4z"),
            Err(Error::NameNotFound(_))
        ));
        assert!(registry.find_by_name("float16").is_err());
        registry.register_float(F16);
        assert_eq!(registry.find_by_name("float16").ok(), Some(F16));
    }

    #[test]
    fn test_number_constructor_installed_once() {
        fn half_from_int(a: isize) -> Value {
            Value::Uint16(a as u16)
        }
        fn other(_: isize) -> Value {
            Value::Uint16(0)
        }

        let registry = Registry::new();
        let h = Dtype::custom("half", 2, Kind::Float);
        assert!(matches!(registry.from_int(&h, 5), Err(Error::NoConstructor(_))));

        registry.register_number(h, Some(half_from_int));
        registry.register_number(h, Some(other));
        assert_eq!(registry.from_int(&h, 5).ok(), Some(Value::Uint16(5)));

        assert!(registry.register_constructor(h, other).is_some());
        assert_eq!(registry.from_int(&h, 5).ok(), Some(Value::Uint16(0)));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = Registry::new();
        let b = Registry::new();
        a.register_float(F16);
        assert_ne!(a.id(&F16), -1);
        assert_eq!(b.id(&F16), -1);
    }
}
