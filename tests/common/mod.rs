// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

use accessor_probe::{
    object_ref, ConstructorInfo, DescriptorCache, Instance, InvokeError, MemberInfo, ObjectRef,
    ObjectReport, TypeInfo, TypeRef, TypeRegistry, Value, Verifier,
};

// Re-export canonical test utilities from accessor_probe::testing
pub use accessor_probe::testing::{
    builtin_cache, instantiate, population_registry, Fault, Faulty, Plain, POPULATION_CLASSES,
};

/// Seed used wherever a test wants repeatable values.
pub const SEED: u64 = 0x5eed;

// ============================================================================
// OBJECTS UNDER TEST
// ============================================================================

/// A boolean property that counts how often its setter runs.
#[derive(Debug, Default)]
pub struct Toggle {
    pub enabled: bool,
    pub sets: usize,
}

impl Toggle {
    pub const NAME: &'static str = "fixtures::Toggle";

    pub fn type_info() -> TypeInfo {
        TypeInfo::class(Self::NAME)
            .member(MemberInfo::setter("set_enabled", TypeRef::Primitive(accessor_probe::Scalar::Bool)))
            .member(MemberInfo::getter("is_enabled", TypeRef::Primitive(accessor_probe::Scalar::Bool)))
            .constructor(ConstructorInfo::nullary(|| object_ref(Toggle::default())))
    }
}

impl Instance for Toggle {
    fn type_name(&self) -> &str {
        Self::NAME
    }

    fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        match member {
            "set_enabled" => {
                InvokeError::check_arity(member, args, 1)?;
                self.sets += 1;
                self.enabled = args[0].as_bool().unwrap_or(false);
                Ok(Value::Unit)
            }
            "is_enabled" => Ok(Value::Bool(self.enabled)),
            _ => Err(InvokeError::NoSuchMember {
                type_name: Self::NAME.to_string(),
                member: member.to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// How many times `set_enabled` ran on a [`Toggle`] object.
pub fn toggle_sets(object: &ObjectRef) -> usize {
    object
        .borrow()
        .as_any()
        .downcast_ref::<Toggle>()
        .map(|toggle| toggle.sets)
        .expect("object is not a Toggle")
}

// ============================================================================
// REGISTRIES
// ============================================================================

/// Interface used for stand-in tests.
pub const HANDLER: &str = "fixtures::Handler";

/// `fixtures::Faulty` holding a value of `ty`, plus the `Handler` interface
/// and the `Plain` bean.
pub fn faulty_registry(ty: TypeRef, fault: Fault) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeInfo::interface(HANDLER)
                .member(MemberInfo::new("handle", vec![TypeRef::Str], TypeRef::Primitive(accessor_probe::Scalar::Bool))),
        )
        .register(Faulty::type_info("fixtures::Faulty", ty, fault))
        .register(Toggle::type_info())
        .register_bean::<Plain>();
    registry
}

/// `fixtures::Holder` stores a `fixtures::Node`, and a node can only be built
/// from another node.
pub fn recursive_registry() -> TypeRegistry {
    let node = TypeRef::named("fixtures::Node");
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeInfo::class("fixtures::Node").constructor(ConstructorInfo::new(vec![node.clone()], |_| {
                Ok(object_ref(Plain::new("node")))
            })),
        )
        .register(Faulty::type_info("fixtures::Holder", node, Fault::None));
    registry
}

// ============================================================================
// RUNNERS
// ============================================================================

/// Verify with the built-in tables and a fixed seed.
pub fn inspect(registry: &TypeRegistry, object: &ObjectRef) -> ObjectReport {
    let cache = builtin_cache();
    inspect_with(registry, &cache, object)
}

pub fn inspect_with(registry: &TypeRegistry, cache: &DescriptorCache, object: &ObjectRef) -> ObjectReport {
    Verifier::new(registry, cache)
        .with_seed(Some(SEED))
        .inspect(object, true)
        .expect("verification failed fatally")
}

/// Categories of the report's findings, in order.
pub fn categories(report: &ObjectReport) -> Vec<String> {
    report.findings.iter().map(|f| f.category.clone()).collect()
}

// ============================================================================
// DESCRIPTOR DOCUMENTS
// ============================================================================

/// Write `<dir>/<name>.json` and return its path.
pub fn write_descriptor(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    fs::write(&path, json).expect("cannot write descriptor document");
    path
}

/// A document with one `exclude.class` entry.
pub fn exclude_class_document(class: &str) -> String {
    format!(
        r#"{{"configurations": [{{"category": "exclude.class", "elements": [{{"primary": "{}"}}]}}]}}"#,
        class
    )
}
