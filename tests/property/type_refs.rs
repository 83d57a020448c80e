// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use accessor_probe::{Scalar, TypeRef};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop::sample::select(Scalar::ALL.to_vec())
}

/// Qualified names never collide with built-in spellings.
fn named_strategy() -> impl Strategy<Value = TypeRef> {
    prop::string::string_regex("[a-z]{2,6}::[A-Z][a-z]{1,8}")
        .unwrap()
        .prop_map(TypeRef::named)
}

fn type_strategy() -> impl Strategy<Value = TypeRef> {
    let leaf = prop_oneof![
        Just(TypeRef::Str),
        scalar_strategy().prop_map(TypeRef::Primitive),
        scalar_strategy().prop_map(TypeRef::Boxed),
        named_strategy(),
    ];
    leaf.prop_recursive(3, 8, 1, |inner| inner.prop_map(TypeRef::array))
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Displayed spellings parse back to the same type.
    #[test]
    fn display_is_a_canonical_spelling(ty in type_strategy()) {
        let spelling = ty.to_string();
        prop_assert_eq!(spelling.parse::<TypeRef>(), Ok(ty));
    }

    /// Normalizing a spelling twice changes nothing.
    #[test]
    fn normalization_is_idempotent(ty in type_strategy(), padded in any::<bool>()) {
        let spelling = if padded { format!("  {}  ", ty) } else { ty.to_string() };
        let once = spelling.parse::<TypeRef>().unwrap().to_string();
        let twice = once.parse::<TypeRef>().unwrap().to_string();
        prop_assert_eq!(once, twice);
    }

    /// `Option<T>` of a reference type is just `T`.
    #[test]
    fn nullable_references_collapse(ty in type_strategy()) {
        prop_assume!(ty.is_reference());
        let wrapped = format!("Option<{}>", ty);
        prop_assert_eq!(wrapped.parse::<TypeRef>(), Ok(ty));
    }

    /// Boxed and primitive forms are each other's counterpart.
    #[test]
    fn counterparts_are_involutive(scalar in scalar_strategy()) {
        let primitive = TypeRef::Primitive(scalar);
        let boxed = primitive.counterpart().unwrap();
        prop_assert_eq!(boxed.clone(), TypeRef::Boxed(scalar));
        prop_assert_eq!(boxed.counterpart(), Some(primitive));
    }

    /// Unbalanced brackets never parse.
    #[test]
    fn unbalanced_generics_are_rejected(ty in type_strategy(), extra in 1usize..3) {
        let spelling = format!("Vec<{}{}", ty, ">".repeat(extra + 1));
        prop_assert!(spelling.parse::<TypeRef>().is_err());
    }
}

#[test]
fn object_is_a_plain_named_type() {
    assert_eq!(TypeRef::object().to_string(), "Object");
    assert!(TypeRef::object().is_reference());
    assert!(!TypeRef::Primitive(Scalar::I32).is_reference());
}
