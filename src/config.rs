// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration.
//!
//! Layers, later ones winning: built-in defaults, an optional JSON file,
//! `ACCESSOR_PROBE_DESCRIPTORS` (extra descriptor directories, in the
//! platform's path-list syntax), then whatever the CLI overrides.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::descriptor::{DescriptorCache, JsonDocumentLoader};
use crate::engine::AccessorConventions;

/// Environment variable naming extra descriptor directories.
pub const DESCRIPTOR_PATH_ENV: &str = "ACCESSOR_PROBE_DESCRIPTORS";

pub const DEFAULT_DESCRIPTOR_NAME: &str = "accessor-probe";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    pub conventions: AccessorConventions,
    /// File stem of descriptor documents: `<dir>/<descriptor_name>.json`.
    pub descriptor_name: String,
    pub descriptor_dirs: Vec<PathBuf>,
    /// Fixes the value synthesizer's random stream.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            conventions: AccessorConventions::default(),
            descriptor_name: DEFAULT_DESCRIPTOR_NAME.to_string(),
            descriptor_dirs: Vec::new(),
            seed: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl ProbeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, or the given file, with the environment layered on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(value) = env::var_os(DESCRIPTOR_PATH_ENV) {
            config.apply_descriptor_path(&value);
        }
        Ok(config)
    }

    /// Append every non-empty entry of a path list.
    pub fn apply_descriptor_path(&mut self, value: &OsStr) {
        self.descriptor_dirs
            .extend(env::split_paths(value).filter(|p| !p.as_os_str().is_empty()));
    }

    /// A cache over this configuration's descriptor directories.
    pub fn descriptor_cache(&self) -> DescriptorCache {
        let loader = JsonDocumentLoader::new(self.descriptor_dirs.iter().cloned());
        DescriptorCache::new(self.descriptor_name.as_str(), vec![Box::new(loader)])
    }
}
