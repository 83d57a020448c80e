// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boxed terminal views of reports, pairs and descriptor tables.

use accessor_probe::engine::MemberDescriptor;
use accessor_probe::{
    AccessorPair, Anticipated, Category, DescriptorTables, Finding, OutcomeKind, PopulationReport,
    Warning,
};

use super::display::*;

/// Findings longer than this are cut in the boxed view.
const MESSAGE_WIDTH: usize = BOX_WIDTH - 10;

pub fn population(report: &PopulationReport, anticipated: &Anticipated) {
    let label = if report.namespace.is_empty() {
        "POPULATION".to_string()
    } else {
        format!("POPULATION {}", report.namespace)
    };
    section_top(&label);

    for object in &report.objects {
        let kind = if object.counters.glitches > 0 {
            OutcomeKind::Glitch
        } else if object.counters.warnings > 0 {
            OutcomeKind::Warning
        } else {
            OutcomeKind::Success
        };
        row(&format!(
            " {} {}  {}",
            outcome_badge(kind),
            pad_right(&object.type_name, 36),
            themed(GRAY, &[DIM], &format!("{} pair(s)", object.counters.verifications))
        ));
    }

    let findings: Vec<&Finding> = report.all_findings().collect();
    if !findings.is_empty() {
        section_mid("FINDINGS");
        for finding in findings {
            finding_rows(finding);
        }
    }

    section_mid("SUMMARY");
    row(&format!(" {}", summary_line(&report.counters, anticipated)));
    let verdict = if report.compute_result(anticipated) {
        themed(GREEN, &[BOLD], "as anticipated")
    } else {
        themed(RED, &[BOLD], &format!("anticipated {}", anticipated))
    };
    row(&format!(" {}", verdict));
    section_bot();
}

fn finding_rows(finding: &Finding) {
    row(&format!(
        " {} {} {}",
        outcome_badge(finding.kind),
        finding.subject,
        themed(GRAY, &[], &format!("({})", finding.category))
    ));
    row(&format!(
        "        {}",
        themed(GRAY, &[DIM], &truncate(&finding.message, MESSAGE_WIDTH))
    ));
}

/// One discovered pair and what preparing it produced.
pub struct PairView {
    pub pair: AccessorPair,
    pub prepared: Result<MemberDescriptor, Warning>,
}

pub fn pairs(type_name: &str, views: &[PairView], rejected: &[Warning]) {
    section_top(&format!("PAIRS {}", type_name));
    if views.is_empty() {
        row(&themed(GRAY, &[DIM], " no accessor pairs"));
    }
    for view in views {
        row(&format!(
            " {} ⇄ {}",
            themed(BLUE, &[BOLD], &view.pair.setter.name),
            themed(BLUE, &[BOLD], &view.pair.getter.name)
        ));
        match &view.prepared {
            Ok(descriptor) => row(&format!(
                "        {} declared {}, verified as {}, {} pass(es)",
                outcome_badge(OutcomeKind::Success),
                descriptor.declared,
                descriptor.verifiable,
                descriptor.pass_count()
            )),
            Err(warning) => row(&format!(
                "        {} {}",
                outcome_badge(OutcomeKind::Warning),
                truncate(&warning.to_string(), MESSAGE_WIDTH - 8)
            )),
        }
    }

    if !rejected.is_empty() {
        section_mid("REJECTED");
        for warning in rejected {
            row(&format!(
                " {} {}",
                outcome_badge(OutcomeKind::Warning),
                truncate(&warning.to_string(), MESSAGE_WIDTH)
            ));
        }
    }
    section_bot();
}

pub fn tables(name: &str, tables: &DescriptorTables) {
    section_top(&format!("DESCRIPTORS {}", name));
    for (index, category) in Category::ALL.into_iter().enumerate() {
        if index > 0 {
            section_mid(category.as_str());
        } else {
            row(&themed(CYAN, &[BOLD], &format!(" {}", category)));
        }
        let entries = tables.entries(category);
        if entries.is_empty() {
            row(&themed(GRAY, &[DIM], "   (empty)"));
        }
        for (primary, secondary, declaration) in entries {
            let key = match secondary {
                Some(secondary) => format!("{} / {}", primary, secondary),
                None => primary.to_string(),
            };
            row(&format!(
                "   {} {}",
                pad_right(&key, 48),
                themed(MAGENTA, &[], &declaration.to_string())
            ));
        }
    }
    section_bot();
}
