// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Round trips that pass, and the ways they fail.

use super::common::{
    categories, faulty_registry, inspect, instantiate, toggle_sets, Fault, Faulty, Toggle, SEED,
};
use accessor_probe::{
    object_ref, Anticipated, EngineError, Glitch, OutcomeKind, Scalar, TypeRef, Verifier,
};

const FAULTY: &str = "fixtures::Faulty";

#[test]
fn well_behaved_string_pair_succeeds() {
    let registry = faulty_registry(TypeRef::Str, Fault::None);
    let object = instantiate(&registry, FAULTY);
    let report = inspect(&registry, &object);

    assert_eq!(report.type_name, FAULTY);
    assert_eq!(report.counters.verifications, 1);
    assert_eq!(report.counters.successes(), 1);
    assert!(report.findings.is_empty());
}

#[test]
fn boolean_pair_is_set_twice() {
    let registry = faulty_registry(TypeRef::Str, Fault::None);
    let object = instantiate(&registry, Toggle::NAME);
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.verifications, 1);
    assert_eq!(report.counters.glitches, 0);
    assert_eq!(toggle_sets(&object), 2);
}

#[test]
fn constant_boolean_getter_is_caught() {
    for constant in [true, false] {
        let registry =
            faulty_registry(TypeRef::Primitive(Scalar::Bool), Fault::ReturnsConstant(constant));
        let object = instantiate(&registry, FAULTY);
        let report = inspect(&registry, &object);

        assert_eq!(report.counters.glitches, 1, "constant {constant}");
        assert_eq!(categories(&report), vec!["not equal"]);
    }
}

#[test]
fn perturbed_value_is_not_equal() {
    let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
    let object = instantiate(&registry, FAULTY);
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.glitches, 1);
    let finding = report.findings_of(OutcomeKind::Glitch).next().unwrap();
    assert_eq!(finding.subject, "fixtures::Faulty::set_value");
    assert_eq!(finding.category, "not equal");
    assert!(finding.message.contains("get_value"), "{}", finding.message);
}

#[test]
fn null_read_back_is_not_same() {
    let registry = faulty_registry(TypeRef::Str, Fault::ReturnsNull);
    let object = instantiate(&registry, FAULTY);
    let report = inspect(&registry, &object);

    assert_eq!(categories(&report), vec!["not same"]);
}

#[test]
fn panicking_setter_is_an_invocation_glitch() {
    let registry = faulty_registry(TypeRef::Primitive(Scalar::I32), Fault::SetterPanics);
    let object = instantiate(&registry, FAULTY);
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.glitches, 1);
    let finding = &report.findings[0];
    assert_eq!(finding.category, "invocation");
    assert!(finding.message.contains("set_value refuses everything"), "{}", finding.message);
}

#[test]
fn scalar_parameters_are_verified_through_their_nullable_form() {
    for scalar in Scalar::ALL {
        let registry = faulty_registry(TypeRef::Primitive(scalar), Fault::None);
        let object = instantiate(&registry, FAULTY);
        let report = inspect(&registry, &object);
        assert_eq!(
            (report.counters.verifications, report.counters.glitches),
            (1, 0),
            "{scalar}: {:?}",
            report.findings
        );
    }
}

#[test]
fn unregistered_object_type_is_a_warning() {
    let registry = faulty_registry(TypeRef::Str, Fault::None);
    let object = object_ref(Faulty::new("fixtures::Unregistered", Fault::None));
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.verifications, 0);
    assert_eq!(categories(&report), vec!["unknown type"]);
}

#[test]
fn borrowed_object_is_reported_not_panicked_on() {
    let registry = faulty_registry(TypeRef::Str, Fault::None);
    let object = instantiate(&registry, FAULTY);
    let _guard = object.borrow_mut();
    let report = inspect(&registry, &object);

    assert_eq!(report.type_name, "<borrowed object>");
    assert_eq!(report.counters.glitches, 1);
}

#[test]
fn verify_object_enforces_anticipated_counts() {
    let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
    let cache = super::common::builtin_cache();
    let verifier = Verifier::new(&registry, &cache).with_seed(Some(SEED));

    let object = instantiate(&registry, FAULTY);
    let err = verifier
        .verify_object(&object, &Anticipated::clean(), false)
        .unwrap_err();
    match err {
        EngineError::AnticipationMismatch { subject, detail } => {
            assert_eq!(subject, FAULTY);
            assert!(detail.contains("1 glitch(es)"), "{detail}");
            assert!(detail.contains("not equal"), "{detail}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let object = instantiate(&registry, FAULTY);
    let report = verifier
        .verify_object(&object, &Anticipated::new(0, 1), false)
        .unwrap();
    assert_eq!(report.counters.glitches, 1);
}

#[test]
fn seeded_runs_repeat_their_messages() {
    let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
    let first = inspect(&registry, &instantiate(&registry, FAULTY));
    let second = inspect(&registry, &instantiate(&registry, FAULTY));
    assert_eq!(first.findings, second.findings);
}

#[test]
fn glitch_messages_name_both_values() {
    let glitch = Glitch::NotEqual {
        setter: "set_value".into(),
        getter: "get_value".into(),
        expected: "\"a\"".into(),
        actual: "\"a!\"".into(),
    };
    let message = glitch.to_string();
    assert!(message.contains("\"a\""));
    assert!(message.contains("\"a!\""));
}
