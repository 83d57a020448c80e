// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Population verification: every candidate type in a namespace.
//!
//! Each candidate is classified before the engine sees it:
//!
//! | Candidate                                   | Outcome              |
//! |---------------------------------------------|----------------------|
//! | unknown to the introspector                 | caution              |
//! | interface, abstract class or enum           | skip                 |
//! | `exclude.class` (skip / caution)            | skip / caution       |
//! | cannot be constructed                       | caution              |
//! | otherwise                                   | verified, folded in  |
//!
//! With the `parallel` feature candidates are examined on rayon's pool.
//! Objects never cross threads: each worker constructs, verifies and drops
//! its own. Results are folded in candidate order, so reports do not depend
//! on scheduling.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::contracts::check_population_sum;
use crate::descriptor::{Declaration, DescriptorTables};
use crate::engine::{Synthesizer, Verifier};
use crate::error::EngineError;
use crate::introspect::TypeIntrospector;
use crate::model::{TypeKind, TypeRef, Value};
use crate::report::{ObjectReport, PopulationReport};

enum Candidate {
    Verified(ObjectReport),
    Caution { subject: String, reason: String },
    Skip { subject: String, reason: String },
}

/// Does `name` live in `namespace`? Matching is by whole `::` segments; the
/// empty namespace matches everything.
pub fn in_namespace(name: &str, namespace: &str) -> bool {
    namespace.is_empty()
        || name == namespace
        || name
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Runs the single-object engine over many candidate types.
pub struct PopulationVerifier<'a, I: TypeIntrospector + Sync + ?Sized> {
    verifier: Verifier<'a, I>,
    verbose: bool,
    parallel: bool,
}

impl<'a, I: TypeIntrospector + Sync + ?Sized> PopulationVerifier<'a, I> {
    pub fn new(verifier: Verifier<'a, I>) -> Self {
        Self {
            verifier,
            verbose: false,
            parallel: cfg!(feature = "parallel"),
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Examine candidates sequentially even when built with `parallel`.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel && cfg!(feature = "parallel");
        self
    }

    /// Candidate names in `namespace`, sorted.
    pub fn candidates(&self, namespace: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .verifier
            .introspector()
            .type_names()
            .into_iter()
            .filter(|name| in_namespace(name, namespace))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    pub fn verify_namespace(&self, namespace: &str) -> Result<PopulationReport, EngineError> {
        let names = self.candidates(namespace);
        let mut report = self.verify_with_progress(&names, || {})?;
        report.namespace = namespace.to_string();
        Ok(report)
    }

    pub fn verify_candidates<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> Result<PopulationReport, EngineError> {
        self.verify_with_progress(names, || {})
    }

    /// Like [`verify_candidates`](Self::verify_candidates), calling `tick`
    /// once per examined candidate. The whole run uses the tables of one
    /// descriptor generation.
    pub fn verify_with_progress<S, F>(&self, names: &[S], tick: F) -> Result<PopulationReport, EngineError>
    where
        S: AsRef<str> + Sync,
        F: Fn() + Sync,
    {
        let cache = self.verifier.cache();
        cache.reload_if_stale()?;
        let tables = cache.snapshot()?;

        let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let examine = |name: &&str| {
            let outcome = self.examine(name, &tables);
            tick();
            outcome
        };

        let outcomes: Vec<Result<Candidate, EngineError>> = {
            #[cfg(feature = "parallel")]
            {
                if self.parallel {
                    sorted.par_iter().map(examine).collect()
                } else {
                    sorted.iter().map(examine).collect()
                }
            }
            #[cfg(not(feature = "parallel"))]
            {
                sorted.iter().map(examine).collect()
            }
        };

        let mut report = PopulationReport::default();
        for outcome in outcomes {
            match outcome? {
                Candidate::Verified(object) => report.fold_object(object),
                Candidate::Caution { subject, reason } => {
                    debug!(candidate = %subject, "caution: {}", reason);
                    report.record_caution(&subject, reason);
                }
                Candidate::Skip { subject, reason } => {
                    debug!(candidate = %subject, "skip: {}", reason);
                    report.record_skip(&subject, reason);
                }
            }
        }

        check_population_sum(&report);
        info!(
            candidates = sorted.len(),
            verifications = report.counters.verifications,
            warnings = report.counters.warnings,
            glitches = report.counters.glitches,
            cautions = report.counters.cautions,
            skips = report.counters.skips,
            "population verified"
        );
        Ok(report)
    }

    fn examine(&self, name: &str, tables: &DescriptorTables) -> Result<Candidate, EngineError> {
        let introspector = self.verifier.introspector();
        let subject = name.to_string();

        let Some(info) = introspector.type_info(name) else {
            return Ok(Candidate::Caution {
                subject,
                reason: "type is unknown to the introspector".to_string(),
            });
        };

        let ineligible = match &info.kind {
            TypeKind::Interface => Some("interface"),
            TypeKind::Class { is_abstract: true } => Some("abstract class"),
            TypeKind::Enum { .. } => Some("enum"),
            TypeKind::Class { is_abstract: false } => None,
        };
        if let Some(kind) = ineligible {
            return Ok(Candidate::Skip {
                subject,
                reason: format!("{} cannot be instantiated", kind),
            });
        }

        match tables.class_exclusion(name) {
            Some(Declaration::Caution) => {
                return Ok(Candidate::Caution {
                    subject,
                    reason: "marked for caution by exclude.class".to_string(),
                })
            }
            Some(_) => {
                return Ok(Candidate::Skip {
                    subject,
                    reason: "excluded by exclude.class".to_string(),
                })
            }
            None => {}
        }

        let mut synthesizer = Synthesizer::new(introspector, tables, self.verifier.seed());
        let object = match synthesizer.synthesize(&TypeRef::named(name), 0) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Ok(Candidate::Caution {
                    subject,
                    reason: format!("construction produced {} instead of an object", other.kind_name()),
                })
            }
            Err(warning) => {
                return Ok(Candidate::Caution {
                    subject,
                    reason: warning.to_string(),
                })
            }
        };

        self.verifier
            .inspect_with_tables(&object, tables, self.verbose)
            .map(Candidate::Verified)
    }
}
