// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory type registry.

use std::collections::BTreeMap;

use super::TypeIntrospector;
use crate::model::{Instance, ProbeEnum, TypeInfo};

/// A Rust type that describes itself as a class.
///
/// `#[derive(Probe)]` implements this for structs. The returned metadata
/// lists one setter and one getter per field, any `implements` supertypes,
/// and a zero-argument constructor when the struct opts in with
/// `#[probe(default)]`.
pub trait Bean: Instance + Sized {
    fn type_info() -> TypeInfo;
}

/// Named types keyed by their registered name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a type.
    pub fn register(&mut self, info: TypeInfo) -> &mut Self {
        self.types.insert(info.name.clone(), info);
        self
    }

    /// Register a derived bean type.
    pub fn register_bean<T: Bean>(&mut self) -> &mut Self {
        self.register(T::type_info())
    }

    /// Register a derived enum type.
    pub fn register_enum<E: ProbeEnum>(&mut self) -> &mut Self {
        self.register(TypeInfo::enumeration(E::NAME, E::constants().iter().copied()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
        self.types.values()
    }
}

impl TypeIntrospector for TypeRegistry {
    fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}
