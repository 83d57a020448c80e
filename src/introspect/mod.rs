// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The introspection seam between the engine and the objects it tests.
//!
//! The engine never looks at Rust types. It asks a [`TypeIntrospector`] to
//! list members, answer assignability questions, invoke members and run
//! constructors. [`TypeRegistry`] is the in-memory implementation most
//! callers want; anything else (a scripting bridge, an FFI layer) can plug in
//! by implementing the two required methods.

mod record;
mod registry;

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use crate::model::{InvokeError, MemberInfo, ObjectRef, TypeInfo, TypeRef, Value, OBJECT};

pub use record::{PropertyBehavior, Record, RecordClass, RecordProperty};
pub use registry::{Bean, TypeRegistry};

/// Capability interface over whatever introspection the host offers.
pub trait TypeIntrospector {
    /// Metadata for a named type.
    fn type_info(&self, name: &str) -> Option<&TypeInfo>;

    /// Every registered type name, sorted.
    fn type_names(&self) -> Vec<&str>;

    /// Public members of a type, inherited ones included.
    ///
    /// A member declared on the type hides an inherited member with the same
    /// signature. Supertypes are visited breadth-first, each at most once.
    fn public_members(&self, name: &str) -> Vec<MemberInfo> {
        let mut members: Vec<MemberInfo> = Vec::new();
        let mut seen_signatures: HashSet<String> = HashSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: Vec<&str> = vec![name];

        while !queue.is_empty() {
            let mut next = Vec::new();
            for type_name in queue {
                if !visited.insert(type_name) {
                    continue;
                }
                let Some(info) = self.type_info(type_name) else {
                    continue;
                };
                for member in &info.members {
                    if seen_signatures.insert(member.signature()) {
                        members.push(member.clone());
                    }
                }
                next.extend(info.supertypes.iter().map(String::as_str));
            }
            queue = next;
        }

        members
    }

    /// True if `sub` is `sup` or (transitively) declares it as a supertype.
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![sub];
        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(info) = self.type_info(current) {
                stack.extend(info.supertypes.iter().map(String::as_str));
            }
        }
        false
    }

    /// Can a value of type `source` be stored where `target` is expected?
    fn is_assignable(&self, target: &TypeRef, source: &TypeRef) -> bool {
        if target == source {
            return true;
        }
        match (target, source) {
            (TypeRef::Named(t), s) if t == OBJECT => s.is_reference(),
            (TypeRef::Named(t), TypeRef::Named(s)) => self.is_subtype(s, t),
            (TypeRef::Array(t), TypeRef::Array(s)) => {
                t.is_reference() && s.is_reference() && self.is_assignable(t, s)
            }
            _ => false,
        }
    }

    /// Invoke a member on an object.
    ///
    /// A member that panics, or an object that is already borrowed, becomes
    /// an [`InvokeError`] instead of unwinding through the caller.
    fn invoke(&self, target: &ObjectRef, member: &str, args: &[Value]) -> Result<Value, InvokeError> {
        let mut instance = target.try_borrow_mut().map_err(|_| InvokeError::Reentrant {
            member: member.to_string(),
        })?;
        panic::catch_unwind(AssertUnwindSafe(|| instance.invoke(member, args))).unwrap_or_else(
            |payload| {
                Err(InvokeError::Panicked {
                    member: member.to_string(),
                    message: panic_message(payload.as_ref()),
                })
            },
        )
    }

    /// Run the `index`-th constructor of a class.
    fn construct(&self, class: &str, index: usize, args: &[Value]) -> Result<ObjectRef, InvokeError> {
        let member = format!("{}::new#{}", class, index);
        let constructor = self
            .type_info(class)
            .and_then(|info| info.constructors.get(index))
            .ok_or_else(|| InvokeError::NoSuchMember {
                type_name: class.to_string(),
                member: member.clone(),
            })?;
        InvokeError::check_arity(&member, args, constructor.params.len())?;

        let factory = &constructor.factory;
        panic::catch_unwind(AssertUnwindSafe(|| factory(args))).unwrap_or_else(|payload| {
            Err(InvokeError::Panicked {
                member,
                message: panic_message(payload.as_ref()),
            })
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
