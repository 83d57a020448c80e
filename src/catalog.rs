// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON type catalogs: types declared at runtime, for the CLI.
//!
//! ```json
//! {
//!   "classes": [{
//!     "name": "shop::Order",
//!     "implements": ["shop::Entity"],
//!     "properties": [
//!       { "name": "id", "type": "i64" },
//!       { "name": "note", "type": "String", "access": "write" },
//!       { "name": "total", "type": "f64", "behavior": "discard" }
//!     ],
//!     "constructors": [[], ["id"]]
//!   }],
//!   "interfaces": [{
//!     "name": "shop::Entity",
//!     "members": [{ "name": "get_id", "returns": "i64" }]
//!   }],
//!   "enums": [{ "name": "shop::Status", "constants": ["Open", "Closed"] }]
//! }
//! ```
//!
//! Class instances are [`Record`]s. A constructor is the list of properties
//! it assigns, so `[]` is the zero-argument constructor; a class without a
//! `constructors` entry gets only that one.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::AccessorConventions;
use crate::introspect::{PropertyBehavior, Record, RecordClass, RecordProperty, TypeRegistry};
use crate::model::{
    object_ref, ConstructorInfo, InvokeError, MemberInfo, TypeInfo, TypeParseError, TypeRef,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: invalid type '{spelling}': {source}")]
    InvalidType {
        context: String,
        spelling: String,
        #[source]
        source: TypeParseError,
    },

    #[error("constructor of {class} assigns unknown property '{property}'")]
    UnknownProperty { class: String, property: String },

    #[error("type '{name}' is declared more than once")]
    Duplicate { name: String },
}

/// Which accessors a property has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    #[default]
    ReadWrite,
    Read,
    Write,
}

impl Access {
    fn readable(self) -> bool {
        matches!(self, Access::ReadWrite | Access::Read)
    }

    fn writable(self) -> bool {
        matches!(self, Access::ReadWrite | Access::Write)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub behavior: PropertyBehavior,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub constructors: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "unit_spelling")]
    pub returns: String,
}

fn unit_spelling() -> String {
    "()".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub constants: Vec<String>,
}

/// A parsed catalog, not yet validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, CatalogError> {
        serde_json::from_str(text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate every declaration and register it.
    pub fn into_registry(self, conventions: &AccessorConventions) -> Result<TypeRegistry, CatalogError> {
        let mut registry = TypeRegistry::new();
        let mut seen = BTreeSet::new();
        let mut claim = |name: &str| {
            if seen.insert(name.to_string()) {
                Ok(())
            } else {
                Err(CatalogError::Duplicate {
                    name: name.to_string(),
                })
            }
        };

        for decl in self.enums {
            claim(&decl.name)?;
            registry.register(TypeInfo::enumeration(decl.name, decl.constants));
        }

        for decl in self.interfaces {
            claim(&decl.name)?;
            let mut info = TypeInfo::interface(decl.name.as_str());
            for supertype in decl.extends {
                info = info.extends(supertype);
            }
            for member in decl.members {
                let context = format!("{}::{}", decl.name, member.name);
                let params = member
                    .params
                    .iter()
                    .map(|p| parse_type(&context, p))
                    .collect::<Result<Vec<_>, _>>()?;
                let returns = parse_type(&context, &member.returns)?;
                info = info.member(MemberInfo::new(member.name, params, returns));
            }
            registry.register(info);
        }

        for decl in self.classes {
            claim(&decl.name)?;
            registry.register(class_info(decl, conventions)?);
        }

        Ok(registry)
    }
}

fn parse_type(context: &str, spelling: &str) -> Result<TypeRef, CatalogError> {
    spelling.parse().map_err(|source| CatalogError::InvalidType {
        context: context.to_string(),
        spelling: spelling.to_string(),
        source,
    })
}

fn class_info(decl: ClassDecl, conventions: &AccessorConventions) -> Result<TypeInfo, CatalogError> {
    let mut properties = Vec::with_capacity(decl.properties.len());
    for property in decl.properties {
        let context = format!("{}.{}", decl.name, property.name);
        let ty = parse_type(&context, &property.ty)?;
        let (readable, writable) = (property.access.readable(), property.access.writable());
        properties.push((
            RecordProperty {
                name: property.name,
                ty,
                behavior: property.behavior,
            },
            readable,
            writable,
        ));
    }
    let class = RecordClass::new(decl.name.as_str(), properties, conventions);

    let mut info = if decl.is_abstract {
        TypeInfo::abstract_class(decl.name.as_str())
    } else {
        TypeInfo::class(decl.name.as_str())
    };
    for supertype in decl.implements {
        info = info.extends(supertype);
    }
    for member in class.members() {
        info = info.member(member);
    }

    let constructors = decl.constructors.unwrap_or_else(|| vec![Vec::new()]);
    for assigned in constructors {
        let mut params = Vec::with_capacity(assigned.len());
        for property in &assigned {
            let ty = class
                .property(property)
                .map(|p| p.ty.clone())
                .ok_or_else(|| CatalogError::UnknownProperty {
                    class: decl.name.clone(),
                    property: property.clone(),
                })?;
            params.push(ty);
        }
        info = info.constructor(record_constructor(Arc::clone(&class), assigned, params));
    }

    Ok(info)
}

fn record_constructor(class: Arc<RecordClass>, assigned: Vec<String>, params: Vec<TypeRef>) -> ConstructorInfo {
    ConstructorInfo::new(params, move |args| {
        InvokeError::check_arity(&format!("{}::new", class.name()), args, assigned.len())?;
        let mut record = Record::new(Arc::clone(&class));
        for (property, value) in assigned.iter().zip(args) {
            record.set_field(property.as_str(), value.clone());
        }
        Ok(object_ref(record))
    })
}
