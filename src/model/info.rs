// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type metadata: what an introspector knows about a named type.

use std::fmt;
use std::sync::Arc;

use super::instance::{InvokeError, ObjectRef};
use super::type_ref::TypeRef;
use super::value::Value;

/// Builds an instance from synthesized constructor arguments.
pub type Factory = Arc<dyn Fn(&[Value]) -> Result<ObjectRef, InvokeError> + Send + Sync>;

/// What kind of named type this is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Class { is_abstract: bool },
    Interface,
    Enum { constants: Vec<String> },
}

/// A public member: name, parameter types, return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub returns: TypeRef,
}

impl MemberInfo {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }

    /// A one-parameter member returning unit.
    pub fn setter(name: impl Into<String>, param: TypeRef) -> Self {
        Self::new(name, vec![param], TypeRef::Unit)
    }

    /// A zero-parameter member.
    pub fn getter(name: impl Into<String>, returns: TypeRef) -> Self {
        Self::new(name, Vec::new(), returns)
    }

    /// Name plus parameter list, the identity used for overriding.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.signature(), self.returns)
    }
}

/// A way to build an instance of a class.
#[derive(Clone)]
pub struct ConstructorInfo {
    pub params: Vec<TypeRef>,
    /// Non-public constructors are still used, the way a reflective tester
    /// makes them accessible first.
    pub public: bool,
    pub factory: Factory,
}

impl ConstructorInfo {
    pub fn new<F>(params: Vec<TypeRef>, factory: F) -> Self
    where
        F: Fn(&[Value]) -> Result<ObjectRef, InvokeError> + Send + Sync + 'static,
    {
        Self {
            params,
            public: true,
            factory: Arc::new(factory),
        }
    }

    /// A zero-argument constructor.
    pub fn nullary<F>(factory: F) -> Self
    where
        F: Fn() -> ObjectRef + Send + Sync + 'static,
    {
        Self::new(Vec::new(), move |_| Ok(factory()))
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("params", &self.params)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Everything known about a named type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    /// Direct supertypes: superclass and implemented interfaces.
    pub supertypes: Vec<String>,
    /// Members declared on this type (inherited ones are resolved by the
    /// introspector).
    pub members: Vec<MemberInfo>,
    pub constructors: Vec<ConstructorInfo>,
}

impl TypeInfo {
    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            members: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Class { is_abstract: false })
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Class { is_abstract: true })
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let constants = constants.into_iter().map(Into::into).collect();
        Self::with_kind(name, TypeKind::Enum { constants })
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a `set_<property>` / `get_<property>` pair of the given type.
    pub fn property(self, property: &str, ty: TypeRef) -> Self {
        self.member(MemberInfo::setter(format!("set_{}", property), ty.clone()))
            .member(MemberInfo::getter(format!("get_{}", property), ty))
    }

    pub fn constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Class { is_abstract: true })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    /// Concrete classes are the only types that can be instantiated.
    pub fn is_concrete_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class { is_abstract: false })
    }

    /// Index of a zero-argument constructor, if the class has one.
    pub fn nullary_constructor(&self) -> Option<usize> {
        self.constructors.iter().position(|c| c.params.is_empty())
    }
}
