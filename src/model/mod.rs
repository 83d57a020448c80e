// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine's object model.
//!
//! Rust has no runtime reflection, so the engine works on a small dynamic
//! model instead: [`TypeRef`] names types, [`Value`] carries data, and
//! [`Instance`] is anything that answers to member names. [`TypeInfo`]
//! describes named types (members, supertypes, constructors) for whoever
//! implements [`TypeIntrospector`](crate::TypeIntrospector).

mod info;
mod instance;
mod type_ref;
mod value;

pub use info::{ConstructorInfo, Factory, MemberInfo, TypeInfo, TypeKind};
pub use instance::{object_ref, Instance, InvokeError, ObjectRef, ProbeEnum, Reflect, ValueMismatch};
pub use type_ref::{Scalar, TypeParseError, TypeRef, OBJECT};
pub use value::Value;
