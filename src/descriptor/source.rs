// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where descriptor documents come from.
//!
//! A document on disk is JSON:
//!
//! ```json
//! {
//!   "configurations": [
//!     {
//!       "category": "substitute.setter.type",
//!       "elements": [
//!         { "primary": "shop::Handler", "secondary": "shop::LoggingHandler" },
//!         { "active": false, "primary": "Object", "secondary": "String" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `active` defaults to true. Raw documents are validated into
//! [`ParsedDocument`] before the cache sees them, so type spellings in
//! type-keyed categories come out normalized.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Deserialize;

use super::{Category, DescriptorError};
use crate::model::TypeRef;

/// Loader boundary for descriptor documents.
pub trait DescriptorSource: Send + Sync {
    /// Documents that configure the cache called `name`.
    fn discover(&self, name: &str) -> Vec<PathBuf>;

    fn parse_and_validate(&self, path: &Path) -> Result<ParsedDocument, DescriptorError>;

    fn last_modified(&self, path: &Path) -> Option<SystemTime>;

    /// Supplementary documents are merged in but never stand in for real
    /// ones: with only supplementary documents found, the built-in defaults
    /// are still seeded.
    fn is_supplementary(&self) -> bool {
        false
    }
}

/// A validated descriptor document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub configurations: Vec<Configuration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub category: Category,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub active: bool,
    pub primary: String,
    pub secondary: Option<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    configurations: Vec<RawConfiguration>,
}

#[derive(Deserialize)]
struct RawConfiguration {
    category: String,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
struct RawElement {
    #[serde(default = "default_active")]
    active: bool,
    primary: String,
    #[serde(default)]
    secondary: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Parse and validate document text. `path` is only used in errors.
pub fn parse_document(text: &str, path: &Path) -> Result<ParsedDocument, DescriptorError> {
    let raw: RawDocument = serde_json::from_str(text).map_err(|source| DescriptorError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut configurations = Vec::with_capacity(raw.configurations.len());
    for raw_config in raw.configurations {
        let category: Category =
            raw_config
                .category
                .parse()
                .map_err(|_| DescriptorError::UnknownCategory {
                    path: path.to_path_buf(),
                    category: raw_config.category.clone(),
                })?;
        let elements = raw_config
            .elements
            .into_iter()
            .map(|raw| {
                validate_element(
                    category,
                    Element {
                        active: raw.active,
                        primary: raw.primary,
                        secondary: raw.secondary,
                    },
                    path,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        configurations.push(Configuration { category, elements });
    }

    Ok(ParsedDocument { configurations })
}

/// Check one element against its category and normalize type spellings.
pub(crate) fn validate_element(
    category: Category,
    mut element: Element,
    path: &Path,
) -> Result<Element, DescriptorError> {
    let invalid = |reason: String| DescriptorError::Invalid {
        path: path.to_path_buf(),
        category,
        reason,
    };

    if element.primary.trim().is_empty() {
        return Err(invalid("element has an empty primary key".to_string()));
    }

    match category {
        Category::ExcludeClass | Category::IncludePrimitiveReturnType => {}
        Category::ExcludeMethodPairBySetter => {
            if element.secondary.as_deref().map_or(true, |s| s.trim().is_empty()) {
                return Err(invalid(format!(
                    "'{}' names no setter to exclude",
                    element.primary
                )));
            }
        }
        Category::ExcludeMethodPairsByType => {
            element.primary = normalize_type(&element.primary).map_err(&invalid)?;
        }
        Category::SubstituteSetterType => {
            element.primary = normalize_type(&element.primary).map_err(&invalid)?;
            let target = element
                .secondary
                .as_deref()
                .ok_or_else(|| invalid(format!("'{}' has no substitute", element.primary)))?;
            element.secondary = Some(normalize_type(target).map_err(&invalid)?);
        }
    }

    Ok(element)
}

fn normalize_type(spelling: &str) -> Result<String, String> {
    spelling
        .parse::<TypeRef>()
        .map(|ty| ty.to_string())
        .map_err(|err| format!("'{}' is not a type: {}", spelling, err))
}

/// Finds `<dir>/<name>.json` in each search directory.
#[derive(Debug, Clone, Default)]
pub struct JsonDocumentLoader {
    dirs: Vec<PathBuf>,
}

impl JsonDocumentLoader {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl DescriptorSource for JsonDocumentLoader {
    fn discover(&self, name: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.json", name);
        self.dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .filter(|path| path.is_file())
            .collect()
    }

    fn parse_and_validate(&self, path: &Path) -> Result<ParsedDocument, DescriptorError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DescriptorError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                DescriptorError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        parse_document(&text, path)
    }

    fn last_modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

/// Declarations made in code rather than in a document.
///
/// Exclusions that belong next to the type they concern (a builder that
/// registers a type and also knows one of its pairs cannot round trip) go
/// here. The source is supplementary: it never suppresses the defaults.
#[derive(Debug, Clone)]
pub struct InlineSource {
    label: String,
    document: ParsedDocument,
    stamp: SystemTime,
}

impl InlineSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            document: ParsedDocument::default(),
            stamp: SystemTime::now(),
        }
    }

    /// Add one active declaration.
    pub fn declare(
        mut self,
        category: Category,
        primary: impl Into<String>,
        secondary: Option<&str>,
    ) -> Self {
        let element = Element {
            active: true,
            primary: primary.into(),
            secondary: secondary.map(str::to_string),
        };
        match self
            .document
            .configurations
            .iter_mut()
            .find(|c| c.category == category)
        {
            Some(config) => config.elements.push(element),
            None => self.document.configurations.push(Configuration {
                category,
                elements: vec![element],
            }),
        }
        self
    }

    fn virtual_path(&self) -> PathBuf {
        PathBuf::from(format!("inline:{}", self.label))
    }
}

impl DescriptorSource for InlineSource {
    fn discover(&self, _name: &str) -> Vec<PathBuf> {
        if self.document.configurations.is_empty() {
            Vec::new()
        } else {
            vec![self.virtual_path()]
        }
    }

    fn parse_and_validate(&self, path: &Path) -> Result<ParsedDocument, DescriptorError> {
        if path != self.virtual_path() {
            return Err(DescriptorError::Missing {
                path: path.to_path_buf(),
            });
        }
        let configurations = self
            .document
            .configurations
            .iter()
            .map(|config| {
                let elements = config
                    .elements
                    .iter()
                    .cloned()
                    .map(|element| validate_element(config.category, element, path))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Configuration {
                    category: config.category,
                    elements,
                })
            })
            .collect::<Result<Vec<_>, DescriptorError>>()?;
        Ok(ParsedDocument { configurations })
    }

    fn last_modified(&self, _path: &Path) -> Option<SystemTime> {
        Some(self.stamp)
    }

    fn is_supplementary(&self) -> bool {
        true
    }
}
