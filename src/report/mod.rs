// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Verification reports for single objects and whole populations.

mod counters;

use serde::Serialize;

use crate::error::{EngineError, Glitch, Warning};

pub use counters::{Anticipated, OutcomeCounters, OutcomeKind};

/// One non-success, kept for the human reading the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: OutcomeKind,
    /// Type, or `Type::setter` for pair-level findings.
    pub subject: String,
    pub category: String,
    pub message: String,
}

/// Outcomes for one object.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectReport {
    pub type_name: String,
    pub counters: OutcomeCounters,
    pub findings: Vec<Finding>,
}

impl ObjectReport {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.counters.record(OutcomeKind::Success);
    }

    pub fn record_warning(&mut self, subject: &str, warning: &Warning) {
        self.counters.record(OutcomeKind::Warning);
        self.findings.push(Finding {
            kind: OutcomeKind::Warning,
            subject: subject.to_string(),
            category: warning.category().to_string(),
            message: warning.to_string(),
        });
    }

    pub fn record_glitch(&mut self, subject: &str, glitch: &Glitch) {
        self.counters.record(OutcomeKind::Glitch);
        self.findings.push(Finding {
            kind: OutcomeKind::Glitch,
            subject: subject.to_string(),
            category: glitch.category().to_string(),
            message: glitch.to_string(),
        });
    }

    /// Findings of one kind.
    pub fn findings_of(&self, kind: OutcomeKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    pub fn compute_result(&self, anticipated: &Anticipated) -> bool {
        self.counters.compute_result(anticipated)
    }

    /// Fail unless the counts are exactly what was anticipated.
    pub fn ensure(&self, anticipated: &Anticipated) -> Result<(), EngineError> {
        ensure_counts(&self.type_name, &self.counters, anticipated, &self.findings)
    }
}

/// Outcomes for a population of candidate types.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulationReport {
    pub namespace: String,
    pub objects: Vec<ObjectReport>,
    /// Object counters plus population-level cautions and skips.
    pub counters: OutcomeCounters,
    /// Population-level findings only; object findings stay with their
    /// object.
    pub findings: Vec<Finding>,
}

impl PopulationReport {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn fold_object(&mut self, report: ObjectReport) {
        self.counters += report.counters;
        self.objects.push(report);
    }

    pub fn record_caution(&mut self, subject: &str, reason: impl Into<String>) {
        self.counters.record(OutcomeKind::Caution);
        self.findings.push(Finding {
            kind: OutcomeKind::Caution,
            subject: subject.to_string(),
            category: "caution".to_string(),
            message: reason.into(),
        });
    }

    pub fn record_skip(&mut self, subject: &str, reason: impl Into<String>) {
        self.counters.record(OutcomeKind::Skip);
        self.findings.push(Finding {
            kind: OutcomeKind::Skip,
            subject: subject.to_string(),
            category: "skip".to_string(),
            message: reason.into(),
        });
    }

    /// Every finding: population-level first, then per object.
    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .chain(self.objects.iter().flat_map(|o| o.findings.iter()))
    }

    /// Cautions always count here: a candidate that could not be examined
    /// must be anticipated.
    pub fn compute_result(&self, anticipated: &Anticipated) -> bool {
        self.counters
            .compute_result(&anticipated.with_cautions_required())
    }

    pub fn ensure(&self, anticipated: &Anticipated) -> Result<(), EngineError> {
        let anticipated = anticipated.with_cautions_required();
        let subject = if self.namespace.is_empty() {
            "population".to_string()
        } else {
            format!("population '{}'", self.namespace)
        };
        let findings: Vec<Finding> = self.all_findings().cloned().collect();
        ensure_counts(&subject, &self.counters, &anticipated, &findings)
    }
}

fn ensure_counts(
    subject: &str,
    counters: &OutcomeCounters,
    anticipated: &Anticipated,
    findings: &[Finding],
) -> Result<(), EngineError> {
    if counters.compute_result(anticipated) {
        return Ok(());
    }
    let mut detail = format!("expected {}, found {}", anticipated, counters);
    for finding in findings {
        detail.push_str(&format!(
            "\n  {} [{}] {}: {}",
            finding.kind, finding.category, finding.subject, finding.message
        ));
    }
    Err(EngineError::AnticipationMismatch {
        subject: subject.to_string(),
        detail,
    })
}
