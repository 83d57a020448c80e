// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pairing on catalog records and hand-registered types.

use std::path::Path;

use super::common::{categories, inspect, instantiate, recursive_registry, Fault, Faulty};
use accessor_probe::engine::MAX_RECURSION_DEPTH;
use accessor_probe::{
    object_ref, AccessorConventions, Catalog, MemberInfo, Scalar, TypeInfo, TypeIntrospector,
    TypeRef, TypeRegistry,
};

const COUNTER: &str = r#"{
    "classes": [
        {
            "name": "shop::Counter",
            "properties": [
                { "name": "count", "type": "i32" },
                { "name": "label", "type": "String", "behavior": "discard" },
                { "name": "note", "type": "String", "access": "write" },
                { "name": "total", "type": "f64", "access": "read" }
            ]
        }
    ]
}"#;

fn counter_registry() -> TypeRegistry {
    Catalog::parse(COUNTER, Path::new("counter.json"))
        .unwrap()
        .into_registry(&AccessorConventions::default())
        .unwrap()
}

#[test]
fn catalog_record_outcomes_follow_member_order() {
    let registry = counter_registry();
    let object = instantiate(&registry, "shop::Counter");
    let report = inspect(&registry, &object);

    // set_count passes, set_label drops its value, set_note has no getter,
    // total has no setter at all
    assert_eq!(report.counters.verifications, 2);
    assert_eq!(report.counters.glitches, 1);
    assert_eq!(report.counters.warnings, 1);
    assert_eq!(categories(&report), vec!["not same", "no corresponding getter"]);
    assert_eq!(report.findings[0].subject, "shop::Counter::set_label");
}

#[test]
fn custom_conventions_pair_other_prefixes() {
    let conventions = AccessorConventions {
        setter_prefix: "with_".into(),
        getter_prefix: "read_".into(),
        boolean_getter_prefix: "has_".into(),
    };
    let registry = Catalog::parse(COUNTER, Path::new("counter.json"))
        .unwrap()
        .into_registry(&conventions)
        .unwrap();
    let names: Vec<String> = registry
        .public_members("shop::Counter")
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert!(names.contains(&"with_count".to_string()));
    assert!(names.contains(&"read_count".to_string()));

    let cache = super::common::builtin_cache();
    let object = instantiate(&registry, "shop::Counter");
    let report = accessor_probe::Verifier::new(&registry, &cache)
        .with_conventions(conventions)
        .inspect(&object, false)
        .unwrap();
    assert_eq!(report.counters.verifications, 2);
    assert_eq!(report.counters.warnings, 1);
}

#[test]
fn overloaded_setter_is_ambiguous() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeInfo::class("fixtures::Overloaded")
            .member(MemberInfo::setter("set_size", TypeRef::Primitive(Scalar::I32)))
            .member(MemberInfo::setter("set_size", TypeRef::Str))
            .member(MemberInfo::getter("get_size", TypeRef::Str))
            .member(MemberInfo::getter("set_nothing", TypeRef::Unit))
            .member(MemberInfo::getter("get_nothing", TypeRef::Str)),
    );
    let object = object_ref(Faulty::new("fixtures::Overloaded", Fault::None));
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.verifications, 0);
    assert_eq!(
        categories(&report),
        vec!["setter without parameters", "ambiguous setter"]
    );
}

#[test]
fn self_referential_constructor_hits_the_depth_guard() {
    let registry = recursive_registry();
    let object = instantiate(&registry, "fixtures::Holder");
    let report = inspect(&registry, &object);

    assert_eq!(categories(&report), vec!["endless loop"]);
    assert!(
        report.findings[0]
            .message
            .contains(&format!("depth {}", MAX_RECURSION_DEPTH)),
        "{}",
        report.findings[0].message
    );
}

#[test]
fn unknown_parameter_type_is_not_found() {
    let mut registry = TypeRegistry::new();
    registry.register(Faulty::type_info(
        "fixtures::Faulty",
        TypeRef::named("fixtures::Ghost"),
        Fault::None,
    ));
    let object = instantiate(&registry, "fixtures::Faulty");
    let report = inspect(&registry, &object);
    assert_eq!(categories(&report), vec!["type not found"]);
}

#[test]
fn mismatched_getter_is_not_verifiable() {
    let mut registry = TypeRegistry::new();
    registry.register(
        TypeInfo::class("fixtures::Mixed")
            .member(MemberInfo::setter("set_value", TypeRef::Str))
            .member(MemberInfo::getter("get_value", TypeRef::Primitive(Scalar::I64))),
    );
    let object = object_ref(Faulty::new("fixtures::Mixed", Fault::None));
    let report = inspect(&registry, &object);
    assert_eq!(categories(&report), vec!["not verifiable"]);
}
