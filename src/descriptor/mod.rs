// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Descriptor-driven configuration: exclusion, substitution and inclusion
//! rules, loaded from documents and reloaded when they change.
//!
//! # States
//!
//! ```text
//!   Unloaded ──load ok──▶ Loaded ──stale, reload ok──▶ Loaded (generation + 1)
//!      │                    │
//!      └──load fails──▶ Failed ◀──reload fails──┘
//! ```
//!
//! `Failed` is terminal. Lookups in `Unloaded` return
//! [`EngineError::CacheNotLoaded`]; lookups in `Failed` return
//! [`EngineError::CacheFailed`].
//!
//! One `RwLock` guards everything. A reload holds the write lock while it
//! builds a fresh `Arc<DescriptorTables>` and replaces the old one, so
//! readers wait instead of seeing a half-built table. Tables handed out by
//! [`DescriptorCache::snapshot`] are never mutated.

mod defaults;
mod source;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::EngineError;
use crate::model::TypeRef;

pub use source::{
    parse_document, Configuration, DescriptorSource, Element, InlineSource, JsonDocumentLoader,
    ParsedDocument,
};

/// Secondary key that turns a class exclusion into a caution.
pub const CAUTION_MARKER: &str = "caution";

/// The five rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ExcludeClass,
    ExcludeMethodPairBySetter,
    ExcludeMethodPairsByType,
    IncludePrimitiveReturnType,
    SubstituteSetterType,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::ExcludeClass,
        Category::ExcludeMethodPairBySetter,
        Category::ExcludeMethodPairsByType,
        Category::IncludePrimitiveReturnType,
        Category::SubstituteSetterType,
    ];

    /// Spelling used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ExcludeClass => "exclude.class",
            Category::ExcludeMethodPairBySetter => "exclude.method.pair.by.setter",
            Category::ExcludeMethodPairsByType => "exclude.method.pairs.by.type",
            Category::IncludePrimitiveReturnType => "include.primitive.return.type",
            Category::SubstituteSetterType => "substitute.setter.type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown descriptor category '{}'", s))
    }
}

/// What a table entry declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Skip,
    Caution,
    Substitute(TypeRef),
    Include,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Skip => f.write_str("skip"),
            Declaration::Caution => f.write_str("caution"),
            Declaration::Substitute(ty) => write!(f, "substitute with {}", ty),
            Declaration::Include => f.write_str("include"),
        }
    }
}

/// A document could not be turned into tables. Always fatal.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("descriptor document {path} disappeared before it could be read")]
    Missing { path: PathBuf },

    #[error("cannot read descriptor document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("descriptor document {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("descriptor document {path} uses unknown category '{category}'")]
    UnknownCategory { path: PathBuf, category: String },

    #[error("descriptor document {path}, {category}: {reason}")]
    Invalid {
        path: PathBuf,
        category: Category,
        reason: String,
    },
}

type Key = (String, Option<String>);

/// An immutable set of rule tables.
#[derive(Debug, Clone, Default)]
pub struct DescriptorTables {
    tables: HashMap<Category, HashMap<Key, Declaration>>,
}

impl DescriptorTables {
    pub(crate) fn insert(
        &mut self,
        category: Category,
        primary: String,
        secondary: Option<String>,
        declaration: Declaration,
    ) {
        self.tables
            .entry(category)
            .or_default()
            .insert((primary, secondary), declaration);
    }

    pub fn get(&self, category: Category, primary: &str, secondary: Option<&str>) -> Option<&Declaration> {
        self.tables
            .get(&category)?
            .get(&(primary.to_string(), secondary.map(str::to_string)))
    }

    pub fn len(&self, category: Category) -> usize {
        self.tables.get(&category).map_or(0, HashMap::len)
    }

    /// Entries of one category, sorted by key.
    pub fn entries(&self, category: Category) -> Vec<(&str, Option<&str>, &Declaration)> {
        let sorted: BTreeMap<&Key, &Declaration> = self
            .tables
            .get(&category)
            .map(|table| table.iter().collect())
            .unwrap_or_default();
        sorted
            .into_iter()
            .map(|((primary, secondary), declaration)| {
                (primary.as_str(), secondary.as_deref(), declaration)
            })
            .collect()
    }

    /// Substitute for a declared type, if one is configured.
    pub fn substitute(&self, ty: &TypeRef) -> Option<TypeRef> {
        match self.get(Category::SubstituteSetterType, &ty.to_string(), None) {
            Some(Declaration::Substitute(to)) => Some(to.clone()),
            _ => None,
        }
    }

    /// Is `(parameter, returns)` declared as an acceptable pairing?
    pub fn includes(&self, parameter: &TypeRef, returns: &TypeRef) -> bool {
        self.get(
            Category::IncludePrimitiveReturnType,
            &parameter.to_string(),
            Some(&returns.to_string()),
        )
        .is_some()
    }

    /// `Skip` or `Caution` for an excluded class.
    pub fn class_exclusion(&self, class: &str) -> Option<Declaration> {
        self.get(Category::ExcludeClass, class, None).cloned()
    }

    pub fn excludes_setter(&self, class: &str, setter: &str) -> bool {
        self.get(Category::ExcludeMethodPairBySetter, class, Some(setter))
            .is_some()
    }

    pub fn excludes_type(&self, ty: &TypeRef) -> bool {
        self.get(Category::ExcludeMethodPairsByType, &ty.to_string(), None)
            .is_some()
    }

    fn import(&mut self, document: ParsedDocument) {
        for configuration in document.configurations {
            let category = configuration.category;
            for element in configuration.elements.into_iter().filter(|e| e.active) {
                let Element {
                    primary, secondary, ..
                } = element;
                match category {
                    Category::IncludePrimitiveReturnType => {
                        warn!(
                            primary = %primary,
                            "ignoring {} entry; primitive inclusions are built in",
                            category
                        );
                    }
                    Category::ExcludeClass => {
                        let declaration = if secondary.as_deref() == Some(CAUTION_MARKER) {
                            Declaration::Caution
                        } else {
                            Declaration::Skip
                        };
                        self.insert(category, primary, None, declaration);
                    }
                    Category::ExcludeMethodPairBySetter => {
                        self.insert(category, primary, secondary, Declaration::Skip);
                    }
                    Category::ExcludeMethodPairsByType => {
                        self.insert(category, primary, None, Declaration::Skip);
                    }
                    Category::SubstituteSetterType => {
                        // Validation already parsed the target
                        if let Some(Ok(to)) = secondary.as_deref().map(str::parse::<TypeRef>) {
                            self.insert(category, primary, None, Declaration::Substitute(to));
                        }
                    }
                }
            }
        }
    }
}

enum CacheState {
    Unloaded,
    Loaded {
        tables: Arc<DescriptorTables>,
        stamps: Vec<(usize, PathBuf, Option<SystemTime>)>,
    },
    Failed {
        reason: String,
    },
}

struct Inner {
    state: CacheState,
    generation: u64,
}

/// Shared, hot-reloadable rule tables.
pub struct DescriptorCache {
    name: String,
    sources: Vec<Box<dyn DescriptorSource>>,
    inner: RwLock<Inner>,
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("name", &self.name)
            .field("sources", &self.sources.len())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl DescriptorCache {
    pub fn new(name: impl Into<String>, sources: Vec<Box<dyn DescriptorSource>>) -> Self {
        Self {
            name: name.into(),
            sources,
            inner: RwLock::new(Inner {
                state: CacheState::Unloaded,
                generation: 0,
            }),
        }
    }

    /// A cache with no sources: only the built-in tables.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many successful loads have happened.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Load on first use. A no-op once loaded.
    pub fn ensure_loaded(&self) -> Result<(), EngineError> {
        {
            let inner = self.inner.read();
            match &inner.state {
                CacheState::Loaded { .. } => return Ok(()),
                CacheState::Failed { reason } => return Err(self.failed(reason)),
                CacheState::Unloaded => {}
            }
        }

        let mut inner = self.inner.write();
        // Another thread may have loaded while we waited for the lock
        match &inner.state {
            CacheState::Loaded { .. } => Ok(()),
            CacheState::Failed { reason } => Err(self.failed(reason)),
            CacheState::Unloaded => self.load_into(&mut inner),
        }
    }

    /// Reload from scratch if any document changed since the last load.
    /// Returns whether a reload happened.
    pub fn reload_if_stale(&self) -> Result<bool, EngineError> {
        {
            let inner = self.inner.read();
            match &inner.state {
                CacheState::Failed { reason } => return Err(self.failed(reason)),
                CacheState::Loaded { stamps, .. } if !self.is_stale(stamps) => return Ok(false),
                _ => {}
            }
        }

        let mut inner = self.inner.write();
        let must_load = match &inner.state {
            CacheState::Failed { reason } => return Err(self.failed(reason)),
            CacheState::Unloaded => true,
            CacheState::Loaded { stamps, .. } => self.is_stale(stamps),
        };
        if must_load {
            self.load_into(&mut inner)?;
        }
        Ok(must_load)
    }

    /// Look up one declaration.
    pub fn lookup(
        &self,
        category: Category,
        primary: &str,
        secondary: Option<&str>,
    ) -> Result<Option<Declaration>, EngineError> {
        let tables = self.snapshot()?;
        Ok(tables.get(category, primary, secondary).cloned())
    }

    /// The current tables. They stay valid (and unchanged) after a reload.
    pub fn snapshot(&self) -> Result<Arc<DescriptorTables>, EngineError> {
        let inner = self.inner.read();
        match &inner.state {
            CacheState::Loaded { tables, .. } => Ok(Arc::clone(tables)),
            CacheState::Unloaded => Err(EngineError::CacheNotLoaded {
                name: self.name.clone(),
            }),
            CacheState::Failed { reason } => Err(self.failed(reason)),
        }
    }

    fn failed(&self, reason: &str) -> EngineError {
        EngineError::CacheFailed {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    fn is_stale(&self, stamps: &[(usize, PathBuf, Option<SystemTime>)]) -> bool {
        stamps.iter().any(|(source, path, previous)| {
            let current = self.sources[*source].last_modified(path);
            match (previous, current) {
                (Some(previous), Some(current)) => current > *previous,
                (None, None) => false,
                _ => true,
            }
        })
    }

    fn load_into(&self, inner: &mut Inner) -> Result<(), EngineError> {
        match self.build() {
            Ok((tables, stamps)) => {
                inner.generation += 1;
                info!(
                    cache = %self.name,
                    generation = inner.generation,
                    documents = stamps.len(),
                    "descriptor tables loaded"
                );
                inner.state = CacheState::Loaded {
                    tables: Arc::new(tables),
                    stamps,
                };
                Ok(())
            }
            Err(err) => {
                error!(cache = %self.name, "descriptor load failed: {}", err);
                inner.state = CacheState::Failed {
                    reason: err.to_string(),
                };
                Err(EngineError::Descriptor(err))
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn build(
        &self,
    ) -> Result<(DescriptorTables, Vec<(usize, PathBuf, Option<SystemTime>)>), DescriptorError> {
        let mut tables = DescriptorTables::default();
        defaults::seed_includes(&mut tables);

        let mut stamps = Vec::new();
        let mut primary_documents = 0usize;
        for (index, source) in self.sources.iter().enumerate() {
            for path in source.discover(&self.name) {
                // Capture the stamp before parsing so an edit made during the
                // parse is seen as stale next time
                let stamp = source.last_modified(&path);
                let document = source.parse_and_validate(&path)?;
                debug!(path = %path.display(), "imported descriptor document");
                tables.import(document);
                stamps.push((index, path, stamp));
                if !source.is_supplementary() {
                    primary_documents += 1;
                }
            }
        }

        if primary_documents == 0 {
            debug!(cache = %self.name, "no descriptor documents found; seeding defaults");
            defaults::seed_substitutions(&mut tables);
        }

        Ok((tables, stamps))
    }
}
