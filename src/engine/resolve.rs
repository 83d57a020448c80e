// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning declared parameter types into something that can be synthesized.

use super::discovery::AccessorPair;
use crate::descriptor::DescriptorTables;
use crate::error::Warning;
use crate::introspect::TypeIntrospector;
use crate::model::{TypeRef, OBJECT};

/// Type resolution against one introspector and one set of rule tables.
pub struct Resolver<'a, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
    tables: &'a DescriptorTables,
}

impl<'a, I: TypeIntrospector + ?Sized> Resolver<'a, I> {
    pub fn new(introspector: &'a I, tables: &'a DescriptorTables) -> Self {
        Self {
            introspector,
            tables,
        }
    }

    /// The configured substitute for `declared`, or `declared` itself.
    pub fn substitute(&self, declared: &TypeRef) -> TypeRef {
        self.tables
            .substitute(declared)
            .unwrap_or_else(|| declared.clone())
    }

    /// The concrete type to synthesize for a setter parameter.
    ///
    /// Substitution comes first. An interface or abstract class that is left
    /// over is replaced by the paired getter's return type; without one the
    /// parameter cannot be resolved.
    pub fn resolve_verifiable_type(
        &self,
        member: &str,
        declared: &TypeRef,
        paired_return: Option<&TypeRef>,
    ) -> Result<TypeRef, Warning> {
        let substituted = self.substitute(declared);
        self.ensure_known(member, &substituted)?;

        if !self.is_polymorphic(&substituted) {
            return Ok(substituted);
        }

        match paired_return {
            Some(returns) if *returns != TypeRef::Unit => {
                self.ensure_known(member, returns)?;
                Ok(returns.clone())
            }
            _ => Err(Warning::Unresolvable {
                member: member.to_string(),
                declared: declared.clone(),
            }),
        }
    }

    /// Can the getter hand back what the setter took?
    ///
    /// Assignability in either direction decides first; the
    /// primitive-inclusion table is consulted only when that fails.
    pub fn accept_pair(&self, pair: &AccessorPair, verifiable: &TypeRef) -> Result<(), Warning> {
        let returns = &pair.getter.returns;
        let assignable = self.introspector.is_assignable(returns, verifiable)
            || self.introspector.is_assignable(verifiable, returns);
        if assignable || self.tables.includes(verifiable, returns) {
            return Ok(());
        }
        Err(Warning::NotVerifiable {
            setter: pair.setter.name.clone(),
            getter: pair.getter.name.clone(),
            parameter: verifiable.clone(),
            returns: returns.clone(),
        })
    }

    /// Named types (also as array components) must be known.
    fn ensure_known(&self, member: &str, ty: &TypeRef) -> Result<(), Warning> {
        match ty {
            TypeRef::Named(name) if name != OBJECT && self.introspector.type_info(name).is_none() => {
                Err(Warning::TypeNotFound {
                    member: member.to_string(),
                    type_name: name.clone(),
                })
            }
            TypeRef::Array(component) => self.ensure_known(member, component),
            _ => Ok(()),
        }
    }

    /// Interfaces, abstract classes and the bare root type.
    fn is_polymorphic(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(name) if name == OBJECT => {
                self.introspector.type_info(name).is_none()
            }
            TypeRef::Named(name) => self
                .introspector
                .type_info(name)
                .is_some_and(|info| info.is_interface() || info.is_abstract()),
            _ => false,
        }
    }
}
