// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Round-trip verification of setter/getter pairs on mutable data objects.
//!
//! Given an object, the engine discovers its `set_x` / `get_x` (or `is_x`)
//! pairs, synthesizes a value for each setter, reads it back through the
//! getter and checks that what came back is what went in. Every pair ends in
//! a success, a warning (the pair could not be tested) or a glitch (it was
//! tested and failed). Descriptor documents tune the run: exclusions,
//! type substitutions and tolerated type mismatches.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │  introspect  │────▶│    engine     │────▶│    report    │
//! │ (registry,   │     │ (discovery,   │     │ (counters,   │
//! │  records)    │     │  synth, ...)  │     │  findings)   │
//! └──────────────┘     └───────────────┘     └──────────────┘
//!        ▲                     ▲                     │
//!        │                     │                     ▼
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │   catalog    │     │  descriptor   │     │  population  │
//! │ (JSON types) │     │ (cache, docs) │     │ (namespaces) │
//! └──────────────┘     └───────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use accessor_probe::{Anticipated, DescriptorCache, Probe, TypeRegistry, Verifier};
//!
//! #[derive(Probe, Default)]
//! #[probe(default)]
//! struct Account {
//!     owner: String,
//!     active: bool,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_bean::<Account>();
//! let cache = DescriptorCache::builtin("accessor-probe");
//!
//! let object = accessor_probe::object_ref(Account::default());
//! let report = Verifier::new(&registry, &cache).verify_object(&object, &Anticipated::clean(), false)?;
//! assert_eq!(report.counters.verifications, 2);
//! ```

// Lets derived impls name `::accessor_probe` from inside this crate too.
extern crate self as accessor_probe;

pub mod catalog;
pub mod config;
pub mod contracts;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod introspect;
pub mod model;
pub mod population;
pub mod report;
pub mod testing;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, ProbeConfig};
pub use descriptor::{
    Category, Declaration, DescriptorCache, DescriptorError, DescriptorSource, DescriptorTables,
    InlineSource, JsonDocumentLoader,
};
pub use engine::{AccessorConventions, AccessorPair, Verifier};
pub use error::{EngineError, Failure, Glitch, Warning};
pub use introspect::{Bean, Record, RecordClass, TypeIntrospector, TypeRegistry};
pub use model::{
    object_ref, ConstructorInfo, Instance, InvokeError, MemberInfo, ObjectRef, ProbeEnum, Reflect,
    Scalar, TypeInfo, TypeKind, TypeRef, Value, ValueMismatch,
};
pub use population::PopulationVerifier;
pub use report::{Anticipated, Finding, ObjectReport, OutcomeCounters, OutcomeKind, PopulationReport};

#[cfg(feature = "derive")]
pub use accessor_probe_macros::Probe;
