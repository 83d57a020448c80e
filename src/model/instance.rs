// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Objects under test and the conversions between Rust fields and [`Value`]s.
//!
//! An object under test is anything implementing [`Instance`]: it answers to
//! member names with dynamic arguments. `#[derive(Probe)]` writes that impl
//! for plain structs; hand-written impls are the way to model odd accessors
//! (ones that copy, drop, or rewrap what they were given).
//!
//! [`Reflect`] is the bridge for field types. The derive macro calls
//! `Reflect::from_value` on setter arguments and `Reflect::to_value` on
//! getter results, so a field of any `Reflect` type can take part in a round
//! trip.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use super::type_ref::{Scalar, TypeRef};
use super::value::Value;

/// Shared, interior-mutable handle to an object under test.
///
/// Identity of a handle (`Rc::ptr_eq`) is what the identity-first assertion
/// rule checks.
pub type ObjectRef = Rc<RefCell<dyn Instance>>;

/// Wrap an instance into a fresh [`ObjectRef`].
pub fn object_ref<T: Instance>(instance: T) -> ObjectRef {
    Rc::new(RefCell::new(instance))
}

/// A dynamically invocable object.
pub trait Instance: Any {
    /// Registered name of the object's type.
    fn type_name(&self) -> &str;

    /// Invoke a public member by name.
    fn invoke(&mut self, member: &str, args: &[Value]) -> Result<Value, InvokeError>;

    /// String form used in reports.
    fn render(&self) -> String {
        format!("{} {{ .. }}", self.type_name())
    }

    /// Value equality with another instance. Identity is checked before this
    /// is ever called, so the default (no two distinct objects are equal)
    /// gives identity semantics.
    fn equals(&self, other: &dyn Instance) -> bool {
        let _ = other;
        false
    }

    fn as_any(&self) -> &dyn Any;
}

/// Failure invoking a member or constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvokeError {
    #[error("{type_name} has no public member '{member}'")]
    NoSuchMember { type_name: String, member: String },

    #[error("'{member}' expects {expected} argument(s), got {found}")]
    Arity {
        member: String,
        expected: usize,
        found: usize,
    },

    #[error("'{member}' rejected its argument: {source}")]
    Argument {
        member: String,
        #[source]
        source: ValueMismatch,
    },

    #[error("object is already borrowed while invoking '{member}'")]
    Reentrant { member: String },

    #[error("'{member}' panicked: {message}")]
    Panicked { member: String, message: String },

    #[error("'{member}' failed: {message}")]
    Failed { member: String, message: String },
}

impl InvokeError {
    /// Convenience for the common arity check in hand-written instances.
    pub fn check_arity(member: &str, args: &[Value], expected: usize) -> Result<(), InvokeError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(InvokeError::Arity {
                member: member.to_string(),
                expected,
                found: args.len(),
            })
        }
    }
}

/// A value did not have the shape a field expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: TypeRef,
    pub found: String,
}

impl ValueMismatch {
    pub fn new(expected: TypeRef, found: &Value) -> Self {
        Self {
            expected,
            found: found.kind_name(),
        }
    }
}

/// Conversion between a Rust field type and [`Value`].
pub trait Reflect: Sized {
    /// The declared type of a field of this Rust type.
    fn type_ref() -> TypeRef;

    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Result<Self, ValueMismatch>;
}

macro_rules! reflect_scalar {
    ($($ty:ty => $scalar:ident, $variant:ident;)*) => {
        $(
            impl Reflect for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::Primitive(Scalar::$scalar)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
                    match value {
                        Value::$variant(v) => Ok(*v),
                        other => Err(ValueMismatch::new(Self::type_ref(), other)),
                    }
                }
            }
        )*
    };
}

reflect_scalar! {
    bool => Bool, Bool;
    i8 => I8, I8;
    i16 => I16, I16;
    i32 => I32, I32;
    i64 => I64, I64;
    f32 => F32, F32;
    f64 => F64, F64;
    char => Char, Char;
}

impl Reflect for String {
    fn type_ref() -> TypeRef {
        TypeRef::Str
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(ValueMismatch::new(TypeRef::Str, other)),
        }
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_ref() -> TypeRef {
        match T::type_ref() {
            TypeRef::Primitive(scalar) => TypeRef::Boxed(scalar),
            other => other,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::array(T::type_ref())
    }

    fn to_value(&self) -> Value {
        Value::Array {
            component: T::type_ref(),
            items: self.iter().map(Reflect::to_value).collect(),
        }
    }

    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Array { items, .. } => items.iter().map(T::from_value).collect(),
            other => Err(ValueMismatch::new(Self::type_ref(), other)),
        }
    }
}

/// Object handles are stored as-is, so a compliant accessor hands back the
/// very same reference it was given.
impl Reflect for ObjectRef {
    fn type_ref() -> TypeRef {
        TypeRef::object()
    }

    fn to_value(&self) -> Value {
        Value::Object(Rc::clone(self))
    }

    fn from_value(value: &Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Object(object) => Ok(Rc::clone(object)),
            other => Err(ValueMismatch::new(TypeRef::object(), other)),
        }
    }
}

/// A fieldless enum usable as an accessor type.
///
/// `#[derive(Probe)]` on an enum implements this together with [`Reflect`].
pub trait ProbeEnum: Reflect {
    /// Registered name of the enum type.
    const NAME: &'static str;

    /// Constant names in declaration order.
    fn constants() -> &'static [&'static str];
}
