// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Configuration files and the environment, end to end.

use std::env;
use std::fs;

use super::common::{exclude_class_document, write_descriptor};
use accessor_probe::config::DESCRIPTOR_PATH_ENV;
use accessor_probe::{ConfigError, Declaration, ProbeConfig};
use tempfile::TempDir;

#[test]
fn config_file_selects_directories_and_name() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("descriptors");
    fs::create_dir(&docs).unwrap();
    write_descriptor(&docs, "shop", &exclude_class_document("shop::Legacy"));
    write_descriptor(&docs, "accessor-probe", &exclude_class_document("shop::Other"));

    let config_path = dir.path().join("probe.json");
    fs::write(
        &config_path,
        serde_json::json!({
            "descriptor_name": "shop",
            "descriptor_dirs": [docs],
            "parallel": false,
        })
        .to_string(),
    )
    .unwrap();

    let config = ProbeConfig::from_file(&config_path).unwrap();
    assert!(!config.parallel);

    let cache = config.descriptor_cache();
    assert_eq!(cache.name(), "shop");
    cache.ensure_loaded().unwrap();
    let tables = cache.snapshot().unwrap();
    assert_eq!(tables.class_exclusion("shop::Legacy"), Some(Declaration::Skip));
    assert_eq!(tables.class_exclusion("shop::Other"), None);
}

#[test]
fn environment_adds_directories() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "accessor-probe", &exclude_class_document("shop::Legacy"));

    env::set_var(DESCRIPTOR_PATH_ENV, dir.path());
    let config = ProbeConfig::load(None);
    env::remove_var(DESCRIPTOR_PATH_ENV);

    let config = config.unwrap();
    assert_eq!(config.descriptor_dirs, vec![dir.path().to_path_buf()]);
    let cache = config.descriptor_cache();
    cache.ensure_loaded().unwrap();
    assert_eq!(
        cache.snapshot().unwrap().class_exclusion("shop::Legacy"),
        Some(Declaration::Skip)
    );
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ProbeConfig::load(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
