// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Built-in table contents.

use super::{Category, Declaration, DescriptorTables};
use crate::model::{Scalar, TypeRef};

/// Primitive-return inclusions: a nullable scalar may round trip through
/// its primitive form and back. Always present, whatever the documents say.
pub(crate) fn seed_includes(tables: &mut DescriptorTables) {
    for scalar in Scalar::ALL {
        let primitive = TypeRef::Primitive(scalar).to_string();
        let boxed = TypeRef::Boxed(scalar).to_string();
        tables.insert(
            Category::IncludePrimitiveReturnType,
            boxed.clone(),
            Some(primitive.clone()),
            Declaration::Include,
        );
        tables.insert(
            Category::IncludePrimitiveReturnType,
            primitive,
            Some(boxed),
            Declaration::Include,
        );
    }
}

/// Substitutions used when no document configures the cache: every
/// primitive becomes its nullable form, and `Object` becomes `String`.
pub(crate) fn seed_substitutions(tables: &mut DescriptorTables) {
    for scalar in Scalar::ALL {
        tables.insert(
            Category::SubstituteSetterType,
            TypeRef::Primitive(scalar).to_string(),
            None,
            Declaration::Substitute(TypeRef::Boxed(scalar)),
        );
    }
    tables.insert(
        Category::SubstituteSetterType,
        TypeRef::object().to_string(),
        None,
        Declaration::Substitute(TypeRef::Str),
    );
}
