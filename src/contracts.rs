// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the verification engine.
//!
//! Debug-mode assertions over the engine's own bookkeeping. They compile to
//! nothing in release builds and fail loudly while tests run.
//!
//! | Contract function              | Invariant                                         |
//! |--------------------------------|---------------------------------------------------|
//! | `check_counters_consistent`    | glitches never outnumber verifications            |
//! | `check_pair_accepted`          | an invoked pair's types can round trip            |
//! | `check_population_sum`         | population counters = objects + own outcomes      |
//!
//! # Usage
//!
//! ```ignore
//! use accessor_probe::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_counters_consistent(&report.counters);
//! ```

use crate::descriptor::DescriptorTables;
use crate::engine::AccessorPair;
use crate::introspect::TypeIntrospector;
use crate::model::TypeRef;
use crate::report::{OutcomeCounters, OutcomeKind, PopulationReport};

// ============================================================================
// COUNTER CONTRACTS
// ============================================================================

/// Every glitch is also a verification.
///
/// # Panics (debug builds only)
/// Panics if `glitches > verifications`.
#[inline]
pub fn check_counters_consistent(counters: &OutcomeCounters) {
    debug_assert!(
        counters.glitches <= counters.verifications,
        "Contract violation: {} glitch(es) but only {} verification(s)",
        counters.glitches,
        counters.verifications
    );
}

/// Population counters are the pointwise sum of the object counters plus
/// the population's own cautions and skips.
///
/// # Panics (debug builds only)
/// Panics if any counter disagrees with that sum.
#[inline]
pub fn check_population_sum(report: &PopulationReport) {
    let mut expected = OutcomeCounters::default();
    for object in &report.objects {
        expected += object.counters;
    }
    for finding in &report.findings {
        debug_assert!(
            matches!(finding.kind, OutcomeKind::Caution | OutcomeKind::Skip),
            "Contract violation: population-level finding of kind {} for {}",
            finding.kind,
            finding.subject
        );
        expected.record(finding.kind);
    }

    debug_assert_eq!(
        report.counters, expected,
        "Contract violation: population counters are not the sum of their parts"
    );
    check_counters_consistent(&report.counters);
}

// ============================================================================
// PAIR CONTRACTS
// ============================================================================

/// A pair about to be invoked must have passed acceptance: its verifiable
/// type is assignable to or from the getter's return type, or the
/// combination is declared as an inclusion.
///
/// # Panics (debug builds only)
/// Panics if neither holds.
#[inline]
pub fn check_pair_accepted<I: TypeIntrospector + ?Sized>(
    introspector: &I,
    tables: &DescriptorTables,
    pair: &AccessorPair,
    verifiable: &TypeRef,
) {
    if cfg!(debug_assertions) {
        let returns = &pair.getter.returns;
        let accepted = introspector.is_assignable(returns, verifiable)
            || introspector.is_assignable(verifiable, returns)
            || tables.includes(verifiable, returns);
        debug_assert!(
            accepted,
            "Contract violation: pair {} invoked with unverifiable type {}",
            pair,
            verifiable
        );
    }
}
