// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Value synthesis: a representative, non-null value for any resolved type.
//!
//! | Type               | Synthesized value                                   |
//! |--------------------|-----------------------------------------------------|
//! | `String`           | `"<sequence>-<random suffix>"`                      |
//! | scalar / `Option`  | uniformly random value of that width                |
//! | `Vec<T>`           | empty array of `T`                                  |
//! | enum               | first declared constant                             |
//! | interface          | a [`StandIn`]                                       |
//! | concrete class     | built through one of its constructors, recursively  |
//! | abstract class     | none: [`Warning::AbstractType`]                     |
//!
//! Constructor arguments are synthesized one level deeper. At
//! [`MAX_RECURSION_DEPTH`] the branch fails with [`Warning::EndlessLoop`],
//! which is passed up unchanged instead of trying further constructors.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::standin::StandIn;
use crate::descriptor::DescriptorTables;
use crate::error::Warning;
use crate::introspect::TypeIntrospector;
use crate::model::{Scalar, TypeInfo, TypeKind, TypeRef, Value, OBJECT};

/// Depth at which synthesis gives up on a branch.
pub const MAX_RECURSION_DEPTH: usize = 15;

/// Type and constant of the value used for enums that declare no constants.
pub const PLACEHOLDER_ENUM: (&str, &str) = ("accessor_probe::Placeholder", "Placeholder");

const SUFFIX_LEN: usize = 8;

/// Synthesizes values for one verification run.
pub struct Synthesizer<'a, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
    tables: &'a DescriptorTables,
    rng: StdRng,
    sequence: u64,
}

impl<'a, I: TypeIntrospector + ?Sized> Synthesizer<'a, I> {
    /// A synthesizer with a fixed seed, or an entropy-seeded one.
    pub fn new(introspector: &'a I, tables: &'a DescriptorTables, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            introspector,
            tables,
            rng,
            sequence: 0,
        }
    }

    pub fn synthesize(&mut self, ty: &TypeRef, depth: usize) -> Result<Value, Warning> {
        if depth >= MAX_RECURSION_DEPTH {
            return Err(Warning::EndlessLoop {
                type_ref: ty.clone(),
                depth,
            });
        }

        match ty {
            TypeRef::Unit => Ok(Value::Unit),
            TypeRef::Primitive(scalar) | TypeRef::Boxed(scalar) => Ok(self.scalar(*scalar)),
            TypeRef::Str => Ok(Value::Str(self.string())),
            TypeRef::Array(component) => Ok(Value::Array {
                component: (**component).clone(),
                items: Vec::new(),
            }),
            TypeRef::Named(name) => {
                let Some(info) = self.introspector.type_info(name) else {
                    if name == OBJECT {
                        return Err(Warning::AbstractType {
                            type_ref: ty.clone(),
                        });
                    }
                    return Err(Warning::TypeNotFound {
                        member: format!("value of {}", ty),
                        type_name: name.clone(),
                    });
                };
                self.named(ty, info, depth)
            }
        }
    }

    fn named(&mut self, ty: &TypeRef, info: &'a TypeInfo, depth: usize) -> Result<Value, Warning> {
        match &info.kind {
            TypeKind::Enum { constants } => Ok(match constants.first() {
                Some(constant) => Value::Enum {
                    type_name: info.name.clone(),
                    constant: constant.clone(),
                },
                None => Value::Enum {
                    type_name: PLACEHOLDER_ENUM.0.to_string(),
                    constant: PLACEHOLDER_ENUM.1.to_string(),
                },
            }),
            TypeKind::Interface => {
                let members = self.introspector.public_members(&info.name);
                Ok(Value::object(StandIn::new(info.name.clone(), members)))
            }
            TypeKind::Class { is_abstract: true } => Err(Warning::AbstractType {
                type_ref: ty.clone(),
            }),
            TypeKind::Class { is_abstract: false } => self.instantiate(info, depth),
        }
    }

    /// Zero-argument constructor first, then the rest in declaration order.
    fn instantiate(&mut self, info: &'a TypeInfo, depth: usize) -> Result<Value, Warning> {
        let nullary = info.nullary_constructor();
        let order = nullary
            .into_iter()
            .chain((0..info.constructors.len()).filter(|&i| Some(i) != nullary));

        let mut tried = 0usize;
        let mut cause = String::from("no constructors");
        for index in order {
            tried += 1;
            let constructor = &info.constructors[index];

            let mut args = Vec::with_capacity(constructor.params.len());
            let mut failed = None;
            for param in &constructor.params {
                let substituted = self
                    .tables
                    .substitute(param)
                    .unwrap_or_else(|| param.clone());
                match self.synthesize(&substituted, depth + 1) {
                    Ok(value) => args.push(value),
                    Err(endless @ Warning::EndlessLoop { .. }) => return Err(endless),
                    Err(other) => {
                        failed = Some(other.to_string());
                        break;
                    }
                }
            }
            if let Some(reason) = failed {
                cause = reason;
                continue;
            }

            match self.introspector.construct(&info.name, index, &args) {
                Ok(object) => {
                    trace!(class = %info.name, constructor = index, "instantiated");
                    return Ok(Value::Object(object));
                }
                Err(err) => cause = err.to_string(),
            }
        }

        Err(Warning::Instantiation {
            class: info.name.clone(),
            tried,
            cause,
        })
    }

    fn scalar(&mut self, scalar: Scalar) -> Value {
        let rng = &mut self.rng;
        match scalar {
            Scalar::Bool => Value::Bool(rng.gen()),
            Scalar::I8 => Value::I8(rng.gen()),
            Scalar::I16 => Value::I16(rng.gen()),
            Scalar::I32 => Value::I32(rng.gen()),
            Scalar::I64 => Value::I64(rng.gen()),
            Scalar::F32 => Value::F32(rng.gen_range(-1.0e6..1.0e6)),
            Scalar::F64 => Value::F64(rng.gen_range(-1.0e12..1.0e12)),
            Scalar::Char => Value::Char(rng.gen()),
        }
    }

    fn string(&mut self) -> String {
        self.sequence += 1;
        let suffix: String = (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("{}-{}", self.sequence, suffix)
    }
}
