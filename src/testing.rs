// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical objects under test, well-behaved and otherwise.

#![doc(hidden)]

use std::any::Any;

use crate::descriptor::DescriptorCache;
use crate::introspect::{Bean, TypeRegistry};
use crate::model::{
    object_ref, ConstructorInfo, Instance, InvokeError, ObjectRef, TypeInfo, TypeRef, Value,
};

/// A one-property bean: `set_name` / `get_name`, equal by name.
#[derive(Debug, Clone)]
pub struct Plain {
    name: String,
    panicking: bool,
}

impl Plain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            panicking: false,
        }
    }

    /// Make `get_name` panic.
    pub fn panicking(mut self) -> Self {
        self.panicking = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Instance for Plain {
    fn type_name(&self) -> &str {
        "Plain"
    }

    fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        match member {
            "set_name" => {
                InvokeError::check_arity(member, args, 1)?;
                match &args[0] {
                    Value::Str(name) => self.name = name.clone(),
                    other => {
                        return Err(InvokeError::Argument {
                            member: member.to_string(),
                            source: crate::model::ValueMismatch::new(TypeRef::Str, other),
                        })
                    }
                }
                Ok(Value::Unit)
            }
            "get_name" => {
                InvokeError::check_arity(member, args, 0)?;
                if self.panicking {
                    panic!("get_name is broken");
                }
                Ok(Value::Str(self.name.clone()))
            }
            _ => Err(InvokeError::NoSuchMember {
                type_name: "Plain".to_string(),
                member: member.to_string(),
            }),
        }
    }

    fn render(&self) -> String {
        format!("Plain({})", self.name)
    }

    fn equals(&self, other: &dyn Instance) -> bool {
        other
            .as_any()
            .downcast_ref::<Plain>()
            .is_some_and(|other| other.name == self.name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Bean for Plain {
    fn type_info() -> TypeInfo {
        TypeInfo::class("Plain")
            .property("name", TypeRef::Str)
            .constructor(ConstructorInfo::nullary(|| object_ref(Plain::new(""))))
    }
}

/// How a [`Faulty`] accessor misbehaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// No fault: stores and returns the value.
    None,
    /// Getter always returns null.
    ReturnsNull,
    /// Getter always returns this boolean.
    ReturnsConstant(bool),
    /// Getter returns a different string than was stored.
    Perturbs,
    /// Getter wraps the stored object in a fresh object.
    Rewraps,
    /// Setter panics.
    SetterPanics,
}

/// A single-property object with a configurable fault.
///
/// The property is `value`: `set_value` / `get_value`, or `is_value` when
/// the declared type is boolean.
#[derive(Debug, Clone)]
pub struct Faulty {
    type_name: String,
    fault: Fault,
    stored: Value,
}

impl Faulty {
    pub fn new(type_name: impl Into<String>, fault: Fault) -> Self {
        Self {
            type_name: type_name.into(),
            fault,
            stored: Value::Null,
        }
    }

    /// Type metadata for a faulty class whose property has type `ty`.
    pub fn type_info(type_name: &str, ty: TypeRef, fault: Fault) -> TypeInfo {
        let getter = if ty.is_boolean() { "is_value" } else { "get_value" };
        let name = type_name.to_string();
        TypeInfo::class(type_name)
            .member(crate::model::MemberInfo::setter("set_value", ty.clone()))
            .member(crate::model::MemberInfo::getter(getter, ty))
            .constructor(ConstructorInfo::nullary(move || {
                object_ref(Faulty::new(name.clone(), fault.clone()))
            }))
    }
}

impl Instance for Faulty {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        match member {
            "set_value" => {
                InvokeError::check_arity(member, args, 1)?;
                if matches!(self.fault, Fault::SetterPanics) {
                    panic!("set_value refuses everything");
                }
                self.stored = args[0].clone();
                Ok(Value::Unit)
            }
            "get_value" | "is_value" => {
                InvokeError::check_arity(member, args, 0)?;
                Ok(match &self.fault {
                    Fault::None | Fault::SetterPanics => self.stored.clone(),
                    Fault::ReturnsNull => Value::Null,
                    Fault::ReturnsConstant(value) => Value::Bool(*value),
                    Fault::Perturbs => match &self.stored {
                        Value::Str(s) => Value::Str(format!("{}!", s)),
                        other => other.clone(),
                    },
                    Fault::Rewraps => Value::object(Plain::new(self.stored.render())),
                })
            }
            _ => Err(InvokeError::NoSuchMember {
                type_name: self.type_name.clone(),
                member: member.to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Instantiate a registered class through its zero-argument constructor.
pub fn instantiate(registry: &TypeRegistry, class: &str) -> ObjectRef {
    use crate::introspect::TypeIntrospector;

    let index = registry
        .type_info(class)
        .and_then(TypeInfo::nullary_constructor)
        .unwrap_or_else(|| panic!("{} has no zero-argument constructor", class));
    registry
        .construct(class, index, &[])
        .unwrap_or_else(|err| panic!("cannot construct {}: {}", class, err))
}

/// A loaded cache with only the built-in tables.
pub fn builtin_cache() -> DescriptorCache {
    let cache = DescriptorCache::builtin("accessor-probe");
    cache
        .ensure_loaded()
        .unwrap_or_else(|err| panic!("built-in tables failed to load: {}", err));
    cache
}

/// Ten candidate types under `zoo`: two interfaces, one abstract class, one
/// class whose only constructor panics, and six well-behaved classes with
/// one property each.
pub fn population_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(TypeInfo::interface("zoo::Feeder"))
        .register(TypeInfo::interface("zoo::Keeper"))
        .register(TypeInfo::abstract_class("zoo::Animal"))
        .register(
            TypeInfo::class("zoo::Broken").constructor(ConstructorInfo::nullary(|| {
                panic!("zoo::Broken cannot be built")
            })),
        );
    for (name, ty) in POPULATION_CLASSES {
        registry.register(Faulty::type_info(
            name,
            ty.parse().unwrap_or(TypeRef::Str),
            Fault::None,
        ));
    }
    registry
}

/// The well-behaved classes of [`population_registry`].
pub const POPULATION_CLASSES: [(&str, &str); 6] = [
    ("zoo::Cage", "String"),
    ("zoo::Diet", "i32"),
    ("zoo::Enclosure", "Option<i64>"),
    ("zoo::Label", "char"),
    ("zoo::Schedule", "Vec<String>"),
    ("zoo::Ticket", "bool"),
];
