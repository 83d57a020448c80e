// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dynamic values passed to and returned from accessors.

use std::fmt;
use std::rc::Rc;

use super::instance::ObjectRef;
use super::type_ref::{Scalar, TypeRef};

/// A value flowing through a setter/getter round trip.
#[derive(Clone)]
pub enum Value {
    Null,
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Enum { type_name: String, constant: String },
    Array { component: TypeRef, items: Vec<Value> },
    Object(ObjectRef),
}

impl Value {
    /// Wrap an instance into a fresh object reference.
    pub fn object<T: super::Instance>(instance: T) -> Self {
        Value::Object(super::instance::object_ref(instance))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The neutral value a member of the given return type yields when it
    /// has nothing better to say: zero, `false`, `'\0'`, unit or null.
    pub fn neutral(ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Unit => Value::Unit,
            TypeRef::Primitive(scalar) => match scalar {
                Scalar::Bool => Value::Bool(false),
                Scalar::I8 => Value::I8(0),
                Scalar::I16 => Value::I16(0),
                Scalar::I32 => Value::I32(0),
                Scalar::I64 => Value::I64(0),
                Scalar::F32 => Value::F32(0.0),
                Scalar::F64 => Value::F64(0.0),
                Scalar::Char => Value::Char('\0'),
            },
            _ => Value::Null,
        }
    }

    /// Reference identity. Only objects have identity; `Null` is the same
    /// as `Null`; every other pair of values is never "the same".
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }

    /// Value equality.
    ///
    /// Objects compare by identity first and then through
    /// [`Instance::equals`](super::Instance::equals). An object that is
    /// currently borrowed elsewhere compares unequal rather than panicking.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits() || a == b,
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits() || a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Enum {
                    type_name: ta,
                    constant: ca,
                },
                Value::Enum {
                    type_name: tb,
                    constant: cb,
                },
            ) => ta == tb && ca == cb,
            (
                Value::Array {
                    component: ca,
                    items: ia,
                },
                Value::Array {
                    component: cb,
                    items: ib,
                },
            ) => ca == cb && ia.len() == ib.len() && ia.iter().zip(ib).all(|(a, b)| a.equals(b)),
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                match (a.try_borrow(), b.try_borrow()) {
                    (Ok(a), Ok(b)) => a.equals(&*b),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Logical complement of a boolean value; `None` for anything else.
    pub fn complement(&self) -> Option<Value> {
        self.as_bool().map(|b| Value::Bool(!b))
    }

    /// The human-readable string form used in glitch messages.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Unit => "()".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::I8(v) => v.to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Char(v) => format!("{:?}", v),
            Value::Str(v) => format!("{:?}", v),
            Value::Enum {
                type_name,
                constant,
            } => format!("{}::{}", type_name, constant),
            Value::Array { component, items } => {
                let rendered: Vec<String> = items.iter().map(Value::render).collect();
                format!("Vec<{}>[{}]", component, rendered.join(", "))
            }
            Value::Object(object) => match object.try_borrow() {
                Ok(instance) => instance.render(),
                Err(_) => "<borrowed object>".to_string(),
            },
        }
    }

    /// Short name of the value's shape, for mismatch messages.
    pub fn kind_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Unit => "()".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::I8(_) => "i8".to_string(),
            Value::I16(_) => "i16".to_string(),
            Value::I32(_) => "i32".to_string(),
            Value::I64(_) => "i64".to_string(),
            Value::F32(_) => "f32".to_string(),
            Value::F64(_) => "f64".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Str(_) => "String".to_string(),
            Value::Enum { type_name, .. } => type_name.clone(),
            Value::Array { component, .. } => format!("Vec<{}>", component),
            Value::Object(object) => match object.try_borrow() {
                Ok(instance) => instance.type_name().to_string(),
                Err(_) => "object".to_string(),
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(object) => write!(f, "Object({:p}: {})", Rc::as_ptr(object), self.render()),
            other => f.write_str(&other.render()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
