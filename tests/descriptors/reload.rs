// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hot reload of changed documents.

use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use super::common::{
    exclude_class_document, faulty_registry, inspect_with, instantiate, population_registry,
    write_descriptor, Fault, POPULATION_CLASSES, SEED,
};
use accessor_probe::{
    Declaration, DescriptorCache, EngineError, JsonDocumentLoader, PopulationVerifier, TypeRef,
    Verifier,
};
use tempfile::TempDir;

const NAME: &str = "accessor-probe";

/// Push a file's mtime forward so the change is visible on coarse clocks.
fn touch_later(path: &Path, seconds: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(seconds))
        .unwrap();
}

fn setter_exclusion(class: &str, setter: &str) -> String {
    format!(
        r#"{{"configurations": [{{"category": "exclude.method.pair.by.setter",
            "elements": [{{"primary": "{}", "secondary": "{}"}}]}}]}}"#,
        class, setter
    )
}

#[test]
fn changed_document_is_reloaded_once() {
    let dir = TempDir::new().unwrap();
    let path = write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Old"));
    let cache = DescriptorCache::new(NAME, vec![Box::new(JsonDocumentLoader::new([dir.path()]))]);
    cache.ensure_loaded().unwrap();
    let before = cache.snapshot().unwrap();
    assert_eq!(cache.generation(), 1);
    assert!(!cache.reload_if_stale().unwrap());

    write_descriptor(dir.path(), NAME, &exclude_class_document("shop::New"));
    touch_later(&path, 60);

    assert!(cache.reload_if_stale().unwrap());
    assert_eq!(cache.generation(), 2);
    assert!(!cache.reload_if_stale().unwrap());

    let after = cache.snapshot().unwrap();
    assert_eq!(after.class_exclusion("shop::New"), Some(Declaration::Skip));
    assert_eq!(after.class_exclusion("shop::Old"), None);
    // Snapshots taken earlier are untouched
    assert_eq!(before.class_exclusion("shop::Old"), Some(Declaration::Skip));
}

#[test]
fn verification_picks_up_edited_documents() {
    let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
    let dir = TempDir::new().unwrap();
    let path = write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Unrelated"));
    let cache = DescriptorCache::new(NAME, vec![Box::new(JsonDocumentLoader::new([dir.path()]))]);
    cache.ensure_loaded().unwrap();

    let object = instantiate(&registry, "fixtures::Faulty");
    let report = inspect_with(&registry, &cache, &object);
    assert_eq!(report.counters.glitches, 1);

    write_descriptor(dir.path(), NAME, &setter_exclusion("fixtures::Faulty", "set_value"));
    touch_later(&path, 60);

    let report = inspect_with(&registry, &cache, &object);
    assert_eq!(report.counters.glitches, 0);
    assert_eq!(report.counters.warnings, 1);
    assert_eq!(cache.generation(), 2);
}

#[test]
fn deleted_document_triggers_a_reload_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Old"));
    let cache = DescriptorCache::new(NAME, vec![Box::new(JsonDocumentLoader::new([dir.path()]))]);
    cache.ensure_loaded().unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(cache.reload_if_stale().unwrap());

    let tables = cache.snapshot().unwrap();
    assert_eq!(tables.class_exclusion("shop::Old"), None);
    assert_eq!(tables.substitute(&TypeRef::object()), Some(TypeRef::Str));
}

#[test]
fn broken_edit_fails_the_next_verification() {
    let registry = faulty_registry(TypeRef::Str, Fault::None);
    let dir = TempDir::new().unwrap();
    let path = write_descriptor(dir.path(), NAME, &exclude_class_document("shop::Old"));
    let cache = DescriptorCache::new(NAME, vec![Box::new(JsonDocumentLoader::new([dir.path()]))]);
    cache.ensure_loaded().unwrap();

    write_descriptor(dir.path(), NAME, r#"{"configurations": [{"category": 3}]}"#);
    touch_later(&path, 60);

    let object = instantiate(&registry, "fixtures::Faulty");
    let err = accessor_probe::Verifier::new(&registry, &cache)
        .inspect(&object, false)
        .unwrap_err();
    assert!(matches!(err, EngineError::Descriptor(_)), "{err}");
    assert!(matches!(
        cache.snapshot(),
        Err(EngineError::CacheFailed { .. })
    ));
}

#[test]
fn population_run_keeps_one_generation() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), NAME, &exclude_class_document("zoo::Nothing"));
    let cache = DescriptorCache::new(NAME, vec![Box::new(JsonDocumentLoader::new([dir.path()]))]);
    cache.ensure_loaded().unwrap();

    let registry = population_registry();
    let population = PopulationVerifier::new(Verifier::new(&registry, &cache).with_seed(Some(SEED)))
        .parallel(false);
    let names = population.candidates("zoo");

    // zoo::Diet (i32) is examined after the first candidate has ticked
    let edited = AtomicBool::new(false);
    let report = population
        .verify_with_progress(&names, || {
            if !edited.swap(true, Ordering::SeqCst) {
                let path = write_descriptor(
                    dir.path(),
                    NAME,
                    r#"{"configurations": [{"category": "exclude.method.pairs.by.type",
                        "elements": [{"primary": "i32"}]}]}"#,
                );
                touch_later(&path, 60);
            }
        })
        .unwrap();

    assert!(edited.load(Ordering::SeqCst));
    assert_eq!(report.counters.verifications, POPULATION_CLASSES.len());
    assert_eq!(report.counters.warnings, 0);
    assert_eq!(cache.generation(), 1);

    // The edit applies from the next run on
    let next = population.verify_namespace("zoo").unwrap();
    assert_eq!(cache.generation(), 2);
    assert_eq!(next.counters.verifications, POPULATION_CLASSES.len() - 1);
    assert_eq!(next.counters.warnings, 1);
}
