// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The accessor verification engine.
//!
//! For one object:
//!
//! ```text
//! members ──discover──▶ pairs ──exclusions──▶ resolve ──accept──▶ synthesize
//!                                                                    │
//!            outcome ◀── compare ◀── getter() ◀── setter(value) ◀────┘
//! ```
//!
//! Every pair ends in exactly one outcome: a success, a warning (never
//! attempted) or a glitch (attempted and wrong). Only descriptor cache
//! failures abort the run.

mod discovery;
mod invoke;
mod resolve;
mod standin;
mod synth;

use serde::Deserialize;
use tracing::{debug, info, info_span, warn};

use crate::contracts::check_counters_consistent;
use crate::descriptor::{DescriptorCache, DescriptorTables};
use crate::error::{EngineError, Failure, Glitch, Warning};
use crate::introspect::TypeIntrospector;
use crate::model::{InvokeError, ObjectRef, TypeRef};
use crate::report::{Anticipated, ObjectReport};

pub use discovery::{discover_pairs, AccessorPair};
pub use invoke::{assert_round_trip, MemberDescriptor, PairChecker};
pub use resolve::Resolver;
pub use standin::{is_stand_in, StandIn};
pub use synth::{Synthesizer, MAX_RECURSION_DEPTH, PLACEHOLDER_ENUM};

/// Member naming conventions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessorConventions {
    pub setter_prefix: String,
    pub getter_prefix: String,
    pub boolean_getter_prefix: String,
}

impl Default for AccessorConventions {
    fn default() -> Self {
        Self {
            setter_prefix: "set_".to_string(),
            getter_prefix: "get_".to_string(),
            boolean_getter_prefix: "is_".to_string(),
        }
    }
}

impl AccessorConventions {
    pub fn is_setter(&self, name: &str) -> bool {
        name.starts_with(&self.setter_prefix)
    }

    pub fn is_getter(&self, name: &str) -> bool {
        name.starts_with(&self.getter_prefix) || name.starts_with(&self.boolean_getter_prefix)
    }

    /// Property name of a setter.
    pub fn property_of<'n>(&self, setter: &'n str) -> Option<&'n str> {
        setter.strip_prefix(self.setter_prefix.as_str())
    }

    pub fn setter_name(&self, property: &str) -> String {
        format!("{}{}", self.setter_prefix, property)
    }

    pub fn getter_name(&self, property: &str, boolean: bool) -> String {
        let prefix = if boolean {
            &self.boolean_getter_prefix
        } else {
            &self.getter_prefix
        };
        format!("{}{}", prefix, property)
    }
}

/// Single-object entry point.
pub struct Verifier<'a, I: TypeIntrospector + ?Sized> {
    introspector: &'a I,
    cache: &'a DescriptorCache,
    conventions: AccessorConventions,
    seed: Option<u64>,
}

impl<'a, I: TypeIntrospector + ?Sized> Verifier<'a, I> {
    pub fn new(introspector: &'a I, cache: &'a DescriptorCache) -> Self {
        Self {
            introspector,
            cache,
            conventions: AccessorConventions::default(),
            seed: None,
        }
    }

    pub fn with_conventions(mut self, conventions: AccessorConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Fix the random seed so synthesized values repeat across runs.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn introspector(&self) -> &'a I {
        self.introspector
    }

    pub fn cache(&self) -> &'a DescriptorCache {
        self.cache
    }

    pub fn conventions(&self) -> &AccessorConventions {
        &self.conventions
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Verify `object` and require the counts in `anticipated`.
    pub fn verify_object(
        &self,
        object: &ObjectRef,
        anticipated: &Anticipated,
        verbose: bool,
    ) -> Result<ObjectReport, EngineError> {
        let report = self.inspect(object, verbose)?;
        report.ensure(anticipated)?;
        Ok(report)
    }

    /// Verify `object` and return whatever was found.
    pub fn inspect(&self, object: &ObjectRef, verbose: bool) -> Result<ObjectReport, EngineError> {
        self.cache.reload_if_stale()?;
        let tables = self.cache.snapshot()?;
        self.inspect_with_tables(object, &tables, verbose)
    }

    /// [`inspect`](Self::inspect) against tables the caller already holds.
    pub(crate) fn inspect_with_tables(
        &self,
        object: &ObjectRef,
        tables: &DescriptorTables,
        verbose: bool,
    ) -> Result<ObjectReport, EngineError> {
        let type_name = match object.try_borrow() {
            Ok(instance) => instance.type_name().to_string(),
            Err(_) => {
                let mut report = ObjectReport::new("<borrowed object>");
                report.record_glitch(
                    "<borrowed object>",
                    &Glitch::Invocation {
                        member: "type_name".to_string(),
                        argument_type: TypeRef::Unit,
                        source: InvokeError::Reentrant {
                            member: "type_name".to_string(),
                        },
                    },
                );
                return Ok(report);
            }
        };

        let span = info_span!("verify_object", type_name = %type_name);
        let _enter = span.enter();

        let mut report = ObjectReport::new(&type_name);
        if self.introspector.type_info(&type_name).is_none() {
            let warning = Warning::UnknownObjectType {
                type_name: type_name.clone(),
            };
            log_finding(verbose, &type_name, &warning);
            report.record_warning(&type_name, &warning);
            return Ok(report);
        }

        let members = self.introspector.public_members(&type_name);
        let mut synthesizer = Synthesizer::new(self.introspector, tables, self.seed);
        let mut checker = PairChecker::new(self.introspector, tables, &mut synthesizer);

        for discovered in discover_pairs(&type_name, &members, &self.conventions) {
            let pair = match discovered {
                Ok(pair) => pair,
                Err(warning) => {
                    log_finding(verbose, &type_name, &warning);
                    report.record_warning(&type_name, &warning);
                    continue;
                }
            };

            let subject = format!("{}::{}", type_name, pair.setter.name);
            match checker.verify_pair(object, &type_name, &pair) {
                Ok(()) => {
                    debug!(pair = %subject, "verified");
                    report.record_success();
                }
                Err(Failure::Warning(warning)) => {
                    log_finding(verbose, &subject, &warning);
                    report.record_warning(&subject, &warning);
                }
                Err(Failure::Glitch(glitch)) => {
                    log_finding(verbose, &subject, &glitch);
                    report.record_glitch(&subject, &glitch);
                }
                Err(Failure::Fatal(err)) => return Err(err),
            }
        }

        check_counters_consistent(&report.counters);
        info!(
            verifications = report.counters.verifications,
            warnings = report.counters.warnings,
            glitches = report.counters.glitches,
            "object verified"
        );
        Ok(report)
    }
}

fn log_finding(verbose: bool, subject: &str, finding: &dyn std::fmt::Display) {
    if verbose {
        warn!(subject, "{}", finding);
    } else {
        debug!(subject, "{}", finding);
    }
}
