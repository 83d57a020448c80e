// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Property-bag objects for types declared at runtime (JSON catalogs).
//!
//! A [`RecordClass`] maps member names to properties once; every [`Record`]
//! of that class shares it and keeps only its field values.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Deserialize;

use crate::engine::AccessorConventions;
use crate::model::{Instance, InvokeError, MemberInfo, TypeRef, Value};

/// What a setter does with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyBehavior {
    /// Keep the value; the getter returns it.
    #[default]
    Store,
    /// Drop the value; the getter keeps returning the neutral value.
    Discard,
}

/// A declared property of a record class.
#[derive(Debug, Clone)]
pub struct RecordProperty {
    pub name: String,
    pub ty: TypeRef,
    pub behavior: PropertyBehavior,
}

#[derive(Debug, Clone)]
enum Accessor {
    Set(usize),
    Get(usize),
}

/// Shared definition of a record type.
#[derive(Debug)]
pub struct RecordClass {
    name: String,
    properties: Vec<RecordProperty>,
    members: HashMap<String, Accessor>,
}

impl RecordClass {
    /// `readable` / `writable` say which accessors exist for each property.
    pub fn new(
        name: impl Into<String>,
        properties: Vec<(RecordProperty, bool, bool)>,
        conventions: &AccessorConventions,
    ) -> Arc<Self> {
        let mut members = HashMap::new();
        let mut props = Vec::with_capacity(properties.len());
        for (index, (property, readable, writable)) in properties.into_iter().enumerate() {
            if writable {
                members.insert(conventions.setter_name(&property.name), Accessor::Set(index));
            }
            if readable {
                members.insert(
                    conventions.getter_name(&property.name, property.ty.is_boolean()),
                    Accessor::Get(index),
                );
            }
            props.push(property);
        }
        Arc::new(Self {
            name: name.into(),
            properties: props,
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[RecordProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&RecordProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Member names with their accessor signature, sorted by name.
    pub fn members(&self) -> Vec<MemberInfo> {
        let mut members: Vec<MemberInfo> = self
            .members
            .iter()
            .map(|(name, accessor)| match accessor {
                Accessor::Set(index) => {
                    MemberInfo::setter(name.clone(), self.properties[*index].ty.clone())
                }
                Accessor::Get(index) => {
                    MemberInfo::getter(name.clone(), self.properties[*index].ty.clone())
                }
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }
}

/// An instance of a [`RecordClass`].
#[derive(Debug, Clone)]
pub struct Record {
    class: Arc<RecordClass>,
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(class: Arc<RecordClass>) -> Self {
        Self {
            class,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    /// Set a field directly, as a constructor does. Behavior is not applied.
    pub fn set_field(&mut self, property: impl Into<String>, value: Value) {
        self.fields.insert(property.into(), value);
    }

    pub fn class(&self) -> &Arc<RecordClass> {
        &self.class
    }
}

impl Instance for Record {
    fn type_name(&self) -> &str {
        &self.class.name
    }

    fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        let accessor = self
            .class
            .members
            .get(member)
            .cloned()
            .ok_or_else(|| InvokeError::NoSuchMember {
                type_name: self.class.name.clone(),
                member: member.to_string(),
            })?;

        match accessor {
            Accessor::Set(index) => {
                InvokeError::check_arity(member, args, 1)?;
                let property = &self.class.properties[index];
                if property.behavior == PropertyBehavior::Store {
                    self.fields.insert(property.name.clone(), args[0].clone());
                }
                Ok(Value::Unit)
            }
            Accessor::Get(index) => {
                InvokeError::check_arity(member, args, 0)?;
                let property = &self.class.properties[index];
                Ok(self
                    .fields
                    .get(&property.name)
                    .cloned()
                    .unwrap_or_else(|| Value::neutral(&property.ty)))
            }
        }
    }

    fn render(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value.render()))
            .collect();
        format!("{} {{ {} }}", self.class.name, fields.join(", "))
    }

    fn equals(&self, other: &dyn Instance) -> bool {
        other.as_any().downcast_ref::<Record>().is_some_and(|other| {
            other.class.name == self.class.name
                && other.fields.len() == self.fields.len()
                && self
                    .fields
                    .iter()
                    .all(|(name, value)| other.fields.get(name).is_some_and(|v| v.equals(value)))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
