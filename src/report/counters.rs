// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Outcome counting.

use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

/// The five outcome kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The pair round-tripped.
    Success,
    /// The pair was not attempted.
    Warning,
    /// The pair was attempted and read back the wrong thing.
    Glitch,
    /// A candidate object could not be verified.
    Caution,
    /// A candidate object was deliberately left out.
    Skip,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutcomeKind::Success => "success",
            OutcomeKind::Warning => "warning",
            OutcomeKind::Glitch => "glitch",
            OutcomeKind::Caution => "caution",
            OutcomeKind::Skip => "skip",
        })
    }
}

/// Outcome counts.
///
/// `verifications` counts every attempted pair, so it includes glitches;
/// successes are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounters {
    pub verifications: usize,
    pub warnings: usize,
    pub glitches: usize,
    pub cautions: usize,
    pub skips: usize,
}

impl OutcomeCounters {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Success => self.verifications += 1,
            OutcomeKind::Glitch => {
                self.verifications += 1;
                self.glitches += 1;
            }
            OutcomeKind::Warning => self.warnings += 1,
            OutcomeKind::Caution => self.cautions += 1,
            OutcomeKind::Skip => self.skips += 1,
        }
    }

    pub fn successes(&self) -> usize {
        self.verifications.saturating_sub(self.glitches)
    }

    /// Do the counts match what was anticipated?
    pub fn compute_result(&self, anticipated: &Anticipated) -> bool {
        self.warnings == anticipated.warnings
            && self.glitches == anticipated.glitches
            && anticipated.cautions.map_or(true, |cautions| self.cautions == cautions)
    }
}

impl AddAssign for OutcomeCounters {
    fn add_assign(&mut self, other: Self) {
        self.verifications += other.verifications;
        self.warnings += other.warnings;
        self.glitches += other.glitches;
        self.cautions += other.cautions;
        self.skips += other.skips;
    }
}

impl fmt::Display for OutcomeCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} verification(s) ({} succeeded), {} warning(s), {} glitch(es), {} caution(s), {} skip(s)",
            self.verifications,
            self.successes(),
            self.warnings,
            self.glitches,
            self.cautions,
            self.skips
        )
    }
}

/// The counts a run is expected to produce. An object never records
/// cautions, so object checks compare them only when given; population
/// checks read a missing count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anticipated {
    pub warnings: usize,
    pub glitches: usize,
    pub cautions: Option<usize>,
}

impl Anticipated {
    /// No warnings, no glitches, no cautions.
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn new(warnings: usize, glitches: usize) -> Self {
        Self {
            warnings,
            glitches,
            cautions: None,
        }
    }

    pub fn with_cautions(mut self, cautions: usize) -> Self {
        self.cautions = Some(cautions);
        self
    }

    /// The same expectation with cautions always compared.
    pub fn with_cautions_required(self) -> Self {
        Self {
            cautions: Some(self.cautions.unwrap_or(0)),
            ..self
        }
    }
}

impl fmt::Display for Anticipated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} warning(s), {} glitch(es)", self.warnings, self.glitches)?;
        if let Some(cautions) = self.cautions {
            write!(f, ", {} caution(s)", cautions)?;
        }
        Ok(())
    }
}
