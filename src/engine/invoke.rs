// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Setter-then-getter round trips and the assertion rules applied to them.

use tracing::trace;

use super::discovery::AccessorPair;
use super::resolve::Resolver;
use super::standin::is_stand_in;
use super::synth::Synthesizer;
use crate::contracts::check_pair_accepted;
use crate::descriptor::{Category, DescriptorTables};
use crate::error::{Failure, Glitch, Warning};
use crate::introspect::TypeIntrospector;
use crate::model::{ObjectRef, TypeRef, Value};

/// Arguments prepared for one pair.
///
/// Boolean pairs carry a second argument set whose first argument is the
/// complement of the first set's, so a getter that always answers the same
/// constant cannot pass.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    pub declared: TypeRef,
    pub verifiable: TypeRef,
    pub arguments: Vec<Value>,
    pub opposite: Option<Vec<Value>>,
}

impl MemberDescriptor {
    /// The argument sets, in the order they are tried.
    pub fn passes(&self) -> impl Iterator<Item = &[Value]> {
        std::iter::once(self.arguments.as_slice()).chain(self.opposite.as_deref())
    }

    pub fn pass_count(&self) -> usize {
        1 + usize::from(self.opposite.is_some())
    }
}

/// Everything one object's pairs are checked against.
pub struct PairChecker<'a, 'b, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
    tables: &'a DescriptorTables,
    resolver: Resolver<'a, I>,
    synthesizer: &'b mut Synthesizer<'a, I>,
}

impl<'a, 'b, I: TypeIntrospector + ?Sized> PairChecker<'a, 'b, I> {
    pub fn new(
        introspector: &'a I,
        tables: &'a DescriptorTables,
        synthesizer: &'b mut Synthesizer<'a, I>,
    ) -> Self {
        Self {
            introspector,
            tables,
            resolver: Resolver::new(introspector, tables),
            synthesizer,
        }
    }

    /// Verify one pair on `object`. `Ok` is a successful verification.
    pub fn verify_pair(
        &mut self,
        object: &ObjectRef,
        type_name: &str,
        pair: &AccessorPair,
    ) -> Result<(), Failure> {
        let descriptor = self.prepare(type_name, pair)?;
        for arguments in descriptor.passes() {
            self.round_trip(object, pair, &descriptor, arguments)?;
        }
        trace!(
            setter = %pair.setter.name,
            passes = descriptor.pass_count(),
            "pair verified"
        );
        Ok(())
    }

    /// Exclusions, resolution, acceptance and synthesis: everything that can
    /// rule a pair out before it is invoked.
    pub fn prepare(&mut self, type_name: &str, pair: &AccessorPair) -> Result<MemberDescriptor, Warning> {
        let declared = pair.parameter().cloned().ok_or_else(|| Warning::NoParameters {
            type_name: type_name.to_string(),
            setter: pair.setter.name.clone(),
        })?;

        self.check_exclusions(type_name, pair, &declared)?;

        let verifiable = self.resolver.resolve_verifiable_type(
            &pair.setter.name,
            &declared,
            Some(&pair.getter.returns),
        )?;
        self.resolver.accept_pair(pair, &verifiable)?;
        check_pair_accepted(self.introspector, self.tables, pair, &verifiable);

        let first = self.synthesizer.synthesize(&verifiable, 0)?;
        let mut rest = Vec::with_capacity(pair.setter.params.len().saturating_sub(1));
        for extra in pair.setter.params.iter().skip(1) {
            let ty = self.resolver.substitute(extra);
            rest.push(self.synthesizer.synthesize(&ty, 0)?);
        }

        let opposite = if verifiable.is_boolean() {
            first.complement().map(|flipped| {
                std::iter::once(flipped)
                    .chain(rest.iter().cloned())
                    .collect::<Vec<_>>()
            })
        } else {
            None
        };
        let arguments = std::iter::once(first).chain(rest).collect();

        Ok(MemberDescriptor {
            declared,
            verifiable,
            arguments,
            opposite,
        })
    }

    fn check_exclusions(
        &self,
        type_name: &str,
        pair: &AccessorPair,
        declared: &TypeRef,
    ) -> Result<(), Warning> {
        let excluded = |rule: String| Warning::Excluded {
            type_name: type_name.to_string(),
            setter: pair.setter.name.clone(),
            getter: pair.getter.name.clone(),
            rule,
        };

        if self.tables.excludes_setter(type_name, &pair.setter.name) {
            return Err(excluded(Category::ExcludeMethodPairBySetter.to_string()));
        }
        for ty in [declared, &pair.getter.returns] {
            if self.tables.excludes_type(ty) {
                return Err(excluded(format!(
                    "{} ({})",
                    Category::ExcludeMethodPairsByType,
                    ty
                )));
            }
        }
        Ok(())
    }

    fn round_trip(
        &self,
        object: &ObjectRef,
        pair: &AccessorPair,
        descriptor: &MemberDescriptor,
        arguments: &[Value],
    ) -> Result<(), Glitch> {
        let setter = &pair.setter.name;
        let getter = &pair.getter.name;

        self.introspector
            .invoke(object, setter, arguments)
            .map_err(|source| Glitch::Invocation {
                member: setter.clone(),
                argument_type: descriptor.verifiable.clone(),
                source,
            })?;

        let returned = self
            .introspector
            .invoke(object, getter, &[])
            .map_err(|source| Glitch::Invocation {
                member: getter.clone(),
                argument_type: pair.getter.returns.clone(),
                source,
            })?;

        let expected = &arguments[0];
        assert_round_trip(setter, getter, expected, &returned)
    }
}

/// The comparison rules, in order: identity passes; a null read-back fails
/// as "not same"; a stand-in on either side must be identical; otherwise
/// values must be equal.
pub fn assert_round_trip(
    setter: &str,
    getter: &str,
    expected: &Value,
    returned: &Value,
) -> Result<(), Glitch> {
    if expected.same(returned) {
        return Ok(());
    }
    if returned.is_null() {
        return Err(Glitch::NotSame {
            setter: setter.to_string(),
            getter: getter.to_string(),
            expected: expected.render(),
        });
    }
    if is_stand_in(expected) || is_stand_in(returned) {
        return Err(Glitch::ProxyMismatch {
            setter: setter.to_string(),
            getter: getter.to_string(),
            expected: expected.render(),
            actual: returned.render(),
        });
    }
    if !expected.equals(returned) {
        return Err(Glitch::NotEqual {
            setter: setter.to_string(),
            getter: getter.to_string(),
            expected: expected.render(),
            actual: returned.render(),
        });
    }
    Ok(())
}
