// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pair exclusions and substitutions declared in code.

use super::common::{categories, faulty_registry, inspect_with, instantiate, Fault};
use accessor_probe::{Category, DescriptorCache, InlineSource, TypeRef, Warning};

fn cache_with(source: InlineSource) -> DescriptorCache {
    let cache = DescriptorCache::new("accessor-probe", vec![Box::new(source)]);
    cache.ensure_loaded().unwrap();
    cache
}

#[test]
fn type_exclusion_wins_over_type_not_found() {
    let registry = faulty_registry(TypeRef::named("Ghost"), Fault::None);
    let object = instantiate(&registry, "fixtures::Faulty");

    let plain = cache_with(InlineSource::new("none"));
    let report = inspect_with(&registry, &plain, &object);
    assert_eq!(categories(&report), vec!["type not found"]);

    let excluding = cache_with(InlineSource::new("ghost").declare(
        Category::ExcludeMethodPairsByType,
        "Ghost",
        None,
    ));
    let report = inspect_with(&registry, &excluding, &object);
    assert_eq!(categories(&report), vec!["excluded"]);
    assert!(report.findings[0]
        .message
        .contains("exclude.method.pairs.by.type (Ghost)"));
}

#[test]
fn setter_exclusion_is_per_class() {
    let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
    let object = instantiate(&registry, "fixtures::Faulty");

    let cache = cache_with(
        InlineSource::new("faulty")
            .declare(
                Category::ExcludeMethodPairBySetter,
                "fixtures::Faulty",
                Some("set_value"),
            )
            .declare(
                Category::ExcludeMethodPairBySetter,
                "fixtures::Other",
                Some("set_name"),
            ),
    );
    let report = inspect_with(&registry, &cache, &object);
    assert_eq!(report.counters.glitches, 0);
    assert_eq!(report.counters.warnings, 1);
    assert_eq!(categories(&report), vec!["excluded"]);
}

#[test]
fn excluded_pair_never_reaches_the_setter() {
    let registry = faulty_registry(TypeRef::Primitive(accessor_probe::Scalar::I32), Fault::SetterPanics);
    let object = instantiate(&registry, "fixtures::Faulty");
    let cache = cache_with(InlineSource::new("i32").declare(
        Category::ExcludeMethodPairsByType,
        "i32",
        None,
    ));
    let report = inspect_with(&registry, &cache, &object);
    assert_eq!(report.counters.verifications, 0);
    assert_eq!(categories(&report), vec!["excluded"]);
}

#[test]
fn interface_substitution_is_verified_as_the_substitute() {
    let registry = faulty_registry(TypeRef::named(super::common::HANDLER), Fault::Perturbs);
    let object = instantiate(&registry, "fixtures::Faulty");
    let cache = cache_with(InlineSource::new("handler").declare(
        Category::SubstituteSetterType,
        super::common::HANDLER,
        Some("String"),
    ));

    // The getter still returns a Handler, which a String cannot be
    let report = inspect_with(&registry, &cache, &object);
    assert_eq!(report.counters.verifications, 0);
    assert!(matches!(
        categories(&report).as_slice(),
        [category] if category == "not verifiable"
    ));

    let warning = Warning::NotVerifiable {
        setter: "set_value".into(),
        getter: "get_value".into(),
        parameter: TypeRef::Str,
        returns: TypeRef::named(super::common::HANDLER),
    };
    assert_eq!(report.findings[0].message, warning.to_string());
}
