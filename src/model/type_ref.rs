// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type references as the engine sees them.
//!
//! A `TypeRef` is the engine's only notion of "type". It is deliberately
//! small: scalars, their nullable counterparts, strings, arrays, unit, and
//! named types that live in a [`TypeIntrospector`](crate::TypeIntrospector).
//! Everything the descriptor documents say about types is written in the
//! spelling produced by `Display` here, and parsed back with `FromStr`.
//!
//! # Spelling
//!
//! | TypeRef                    | Spelling        |
//! |----------------------------|-----------------|
//! | `Unit`                     | `()`            |
//! | `Primitive(Scalar::I32)`   | `i32`           |
//! | `Boxed(Scalar::I32)`       | `Option<i32>`   |
//! | `Str`                      | `String`        |
//! | `Array(Str)`               | `Vec<String>`   |
//! | `Named("shop::Order")`     | `shop::Order`   |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Name of the implicit root type every reference type is assignable to.
pub const OBJECT: &str = "Object";

/// Fixed-width scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

impl Scalar {
    pub const ALL: [Scalar; 8] = [
        Scalar::Bool,
        Scalar::I8,
        Scalar::I16,
        Scalar::I32,
        Scalar::I64,
        Scalar::F32,
        Scalar::F64,
        Scalar::Char,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::Char => "char",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Scalar::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to a type, resolved lazily against an introspector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeRef {
    /// The empty return type of setters.
    Unit,
    /// A non-nullable scalar.
    Primitive(Scalar),
    /// The nullable counterpart of a scalar.
    Boxed(Scalar),
    /// An owned string.
    Str,
    /// A homogeneous array of the component type.
    Array(Box<TypeRef>),
    /// A class, interface or enum known to the introspector by name.
    Named(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// The implicit root reference type.
    pub fn object() -> Self {
        TypeRef::Named(OBJECT.to_string())
    }

    /// The scalar behind a primitive or boxed type.
    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            TypeRef::Primitive(s) | TypeRef::Boxed(s) => Some(*s),
            _ => None,
        }
    }

    /// True for `bool` and `Option<bool>`: these get the dual-pass protocol.
    pub fn is_boolean(&self) -> bool {
        self.scalar() == Some(Scalar::Bool)
    }

    /// True for types that may hold `Null`.
    pub fn is_reference(&self) -> bool {
        !matches!(self, TypeRef::Unit | TypeRef::Primitive(_))
    }

    /// The registered name, if this is a named type.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The primitive/boxed counterpart of a scalar type.
    pub fn counterpart(&self) -> Option<TypeRef> {
        match self {
            TypeRef::Primitive(s) => Some(TypeRef::Boxed(*s)),
            TypeRef::Boxed(s) => Some(TypeRef::Primitive(*s)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Unit => f.write_str("()"),
            TypeRef::Primitive(s) => write!(f, "{}", s),
            TypeRef::Boxed(s) => write!(f, "Option<{}>", s),
            TypeRef::Str => f.write_str("String"),
            TypeRef::Array(component) => write!(f, "Vec<{}>", component),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

/// Error parsing a type spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type name")]
    Empty,
    #[error("unbalanced generic brackets in '{0}'")]
    Unbalanced(String),
    #[error("invalid character {found:?} in type name '{input}'")]
    InvalidCharacter { input: String, found: char },
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.is_empty() {
            return Err(TypeParseError::Empty);
        }
        if s == "()" {
            return Ok(TypeRef::Unit);
        }
        if s == "String" || s == "str" {
            return Ok(TypeRef::Str);
        }
        if let Some(scalar) = Scalar::from_name(s) {
            return Ok(TypeRef::Primitive(scalar));
        }
        if let Some(inner) = generic_argument(s, "Option")? {
            let inner: TypeRef = inner.parse()?;
            // A nullable reference is still the reference type itself
            return Ok(match inner {
                TypeRef::Primitive(scalar) => TypeRef::Boxed(scalar),
                other => other,
            });
        }
        if let Some(inner) = generic_argument(s, "Vec")? {
            return Ok(TypeRef::array(inner.parse()?));
        }
        if let Some(found) = s
            .chars()
            .find(|c| !(c.is_alphanumeric() || *c == '_' || *c == ':' || *c == '.'))
        {
            return Err(TypeParseError::InvalidCharacter {
                input: s.to_string(),
                found,
            });
        }
        Ok(TypeRef::Named(s.to_string()))
    }
}

/// Extract `T` from `Wrapper<T>`, or `None` if `s` isn't that wrapper.
fn generic_argument<'a>(s: &'a str, wrapper: &str) -> Result<Option<&'a str>, TypeParseError> {
    let Some(rest) = s.strip_prefix(wrapper) else {
        return Ok(None);
    };
    let Some(rest) = rest.strip_prefix('<') else {
        return Ok(None);
    };
    let inner = rest
        .strip_suffix('>')
        .ok_or_else(|| TypeParseError::Unbalanced(s.to_string()))?;

    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(TypeParseError::Unbalanced(s.to_string()));
        }
    }
    if depth != 0 {
        return Err(TypeParseError::Unbalanced(s.to_string()));
    }
    Ok(Some(inner))
}
