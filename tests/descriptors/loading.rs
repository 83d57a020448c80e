// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents found by the JSON loader and what they turn into.

use std::path::Path;

use super::common::{exclude_class_document, write_descriptor};
use accessor_probe::descriptor::parse_document;
use accessor_probe::{
    Category, Declaration, DescriptorCache, DescriptorError, EngineError, JsonDocumentLoader,
    Scalar, TypeRef,
};
use tempfile::TempDir;

const NAME: &str = "accessor-probe";

fn json_cache(dirs: &[&Path]) -> DescriptorCache {
    let loader = JsonDocumentLoader::new(dirs.iter().copied());
    DescriptorCache::new(NAME, vec![Box::new(loader)])
}

#[test]
fn document_replaces_default_substitutions() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Legacy"));
    let cache = json_cache(&[dir.path()]);
    cache.ensure_loaded().unwrap();

    assert_eq!(
        cache.lookup(Category::ExcludeClass, "shop::Legacy", None).unwrap(),
        Some(Declaration::Skip)
    );
    assert_eq!(
        cache.lookup(Category::SubstituteSetterType, "i32", None).unwrap(),
        None
    );
    // Inclusions are built in whatever the documents say
    let tables = cache.snapshot().unwrap();
    assert!(tables.includes(&TypeRef::Boxed(Scalar::Bool), &TypeRef::Primitive(Scalar::Bool)));
}

#[test]
fn missing_documents_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "someone-else", &exclude_class_document("shop::Legacy"));
    let cache = json_cache(&[dir.path()]);
    cache.ensure_loaded().unwrap();

    let tables = cache.snapshot().unwrap();
    assert_eq!(tables.class_exclusion("shop::Legacy"), None);
    assert_eq!(
        tables.substitute(&TypeRef::Primitive(Scalar::I32)),
        Some(TypeRef::Boxed(Scalar::I32))
    );
    assert_eq!(tables.substitute(&TypeRef::object()), Some(TypeRef::Str));
}

#[test]
fn documents_from_every_directory_are_merged() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_descriptor(first.path(), NAME, &exclude_class_document("shop::Legacy"));
    write_descriptor(
        second.path(),
        NAME,
        r#"{"configurations": [{
            "category": "substitute.setter.type",
            "elements": [{"primary": "shop::Handler", "secondary": "shop::LoggingHandler"}]
        }]}"#,
    );
    let cache = json_cache(&[first.path(), second.path()]);
    cache.ensure_loaded().unwrap();

    let tables = cache.snapshot().unwrap();
    assert_eq!(tables.class_exclusion("shop::Legacy"), Some(Declaration::Skip));
    assert_eq!(
        tables.substitute(&TypeRef::named("shop::Handler")),
        Some(TypeRef::named("shop::LoggingHandler"))
    );
}

#[test]
fn inactive_elements_and_spellings() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        dir.path(),
        NAME,
        r#"{"configurations": [
            {"category": "exclude.class", "elements": [
                {"primary": "shop::Audit", "secondary": "caution"},
                {"primary": "shop::Dormant", "active": false}
            ]},
            {"category": "exclude.method.pairs.by.type", "elements": [
                {"primary": " Option<String> "}
            ]},
            {"category": "exclude.method.pair.by.setter", "elements": [
                {"primary": "shop::Order", "secondary": "set_total"}
            ]}
        ]}"#,
    );
    let cache = json_cache(&[dir.path()]);
    cache.ensure_loaded().unwrap();
    let tables = cache.snapshot().unwrap();

    assert_eq!(tables.class_exclusion("shop::Audit"), Some(Declaration::Caution));
    assert_eq!(tables.class_exclusion("shop::Dormant"), None);
    assert!(tables.excludes_type(&TypeRef::Str));
    assert!(tables.excludes_setter("shop::Order", "set_total"));
    assert_eq!(tables.len(Category::ExcludeClass), 1);
}

#[test]
fn declared_inclusions_are_ignored() {
    let text = r#"{"configurations": [{
        "category": "include.primitive.return.type",
        "elements": [{"primary": "String", "secondary": "i32"}]
    }]}"#;
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), NAME, text);
    let cache = json_cache(&[dir.path()]);
    cache.ensure_loaded().unwrap();

    let tables = cache.snapshot().unwrap();
    assert!(!tables.includes(&TypeRef::Str, &TypeRef::Primitive(Scalar::I32)));
    assert_eq!(
        tables.len(Category::IncludePrimitiveReturnType),
        Scalar::ALL.len() * 2
    );
}

#[test]
fn malformed_document_fails_the_cache_for_good() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), NAME, "{ not json");
    let cache = json_cache(&[dir.path()]);

    let first = cache.ensure_loaded().unwrap_err();
    assert!(
        matches!(first, EngineError::Descriptor(DescriptorError::Malformed { .. })),
        "{first}"
    );

    // Fixing the file does not help: failure is terminal
    write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Legacy"));
    assert!(matches!(
        cache.ensure_loaded(),
        Err(EngineError::CacheFailed { .. })
    ));
    assert!(matches!(cache.snapshot(), Err(EngineError::CacheFailed { .. })));
    assert!(matches!(
        cache.reload_if_stale(),
        Err(EngineError::CacheFailed { .. })
    ));
    assert_eq!(cache.generation(), 0);
}

#[test]
fn validation_errors_name_the_problem() {
    let path = Path::new("bad.json");

    let unknown = parse_document(
        r#"{"configurations": [{"category": "exclude.everything", "elements": []}]}"#,
        path,
    )
    .unwrap_err();
    assert!(matches!(
        unknown,
        DescriptorError::UnknownCategory { ref category, .. } if category == "exclude.everything"
    ));

    let no_setter = parse_document(
        r#"{"configurations": [{"category": "exclude.method.pair.by.setter",
            "elements": [{"primary": "shop::Order"}]}]}"#,
        path,
    )
    .unwrap_err();
    assert!(matches!(
        no_setter,
        DescriptorError::Invalid {
            category: Category::ExcludeMethodPairBySetter,
            ..
        }
    ));

    let bad_target = parse_document(
        r#"{"configurations": [{"category": "substitute.setter.type",
            "elements": [{"primary": "shop::Handler", "secondary": "Vec<"}]}]}"#,
        path,
    )
    .unwrap_err();
    assert!(bad_target.to_string().contains("substitute.setter.type"), "{bad_target}");

    let empty_primary = parse_document(
        r#"{"configurations": [{"category": "exclude.class", "elements": [{"primary": " "}]}]}"#,
        path,
    )
    .unwrap_err();
    assert!(empty_primary.to_string().contains("empty primary"));
}
