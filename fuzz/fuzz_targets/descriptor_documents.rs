// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for descriptor documents.
//!
//! Builds structurally valid JSON from arbitrary categories and elements so
//! the fuzzer spends its time in validation rather than in the JSON parser.

#![no_main]

use accessor_probe::descriptor::{parse_document, DescriptorCache, InlineSource};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

const CATEGORIES: &[&str] = &[
    "exclude.class",
    "exclude.method.pair.by.setter",
    "exclude.method.pairs.by.type",
    "include.primitive.return.type",
    "substitute.setter.type",
];

#[derive(Debug, Arbitrary)]
struct FuzzElement {
    active: Option<bool>,
    primary: String,
    secondary: Option<String>,
}

#[derive(Debug, Arbitrary)]
struct FuzzConfiguration {
    category: u8,
    raw_category: Option<String>,
    elements: Vec<FuzzElement>,
}

fuzz_target!(|configs: Vec<FuzzConfiguration>| {
    let configurations: Vec<_> = configs
        .iter()
        .take(16)
        .map(|config| {
            let category = config
                .raw_category
                .clone()
                .unwrap_or_else(|| CATEGORIES[config.category as usize % CATEGORIES.len()].to_string());
            let elements: Vec<_> = config
                .elements
                .iter()
                .take(64)
                .map(|e| {
                    let mut element = serde_json::json!({ "primary": e.primary });
                    if let Some(active) = e.active {
                        element["active"] = active.into();
                    }
                    if let Some(secondary) = &e.secondary {
                        element["secondary"] = secondary.as_str().into();
                    }
                    element
                })
                .collect();
            serde_json::json!({ "category": category, "elements": elements })
        })
        .collect();
    let text = serde_json::json!({ "configurations": configurations }).to_string();

    // INVARIANT 1: never panics, whatever the elements say
    let Ok(document) = parse_document(&text, Path::new("fuzz.json")) else {
        return;
    };

    // INVARIANT 2: whatever validated once loads into a cache
    let mut source = InlineSource::new("fuzz");
    for configuration in &document.configurations {
        for element in configuration.elements.iter().filter(|e| e.active) {
            source = source.declare(
                configuration.category,
                element.primary.clone(),
                element.secondary.as_deref(),
            );
        }
    }
    let cache = DescriptorCache::new("fuzz", vec![Box::new(source)]);
    assert!(cache.ensure_loaded().is_ok(), "{text}");
});
