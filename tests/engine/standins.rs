// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interface-typed parameters and the identity rule.

use super::common::{categories, faulty_registry, inspect, instantiate, Fault, HANDLER};
use accessor_probe::engine::{assert_round_trip, is_stand_in, StandIn};
use accessor_probe::{MemberInfo, TypeRef, Value};

#[test]
fn stored_stand_in_round_trips_by_identity() {
    let registry = faulty_registry(TypeRef::named(HANDLER), Fault::None);
    let object = instantiate(&registry, "fixtures::Faulty");
    let report = inspect(&registry, &object);

    assert_eq!(report.counters.verifications, 1);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
}

#[test]
fn rewrapped_stand_in_is_a_proxy_mismatch() {
    let registry = faulty_registry(TypeRef::named(HANDLER), Fault::Rewraps);
    let object = instantiate(&registry, "fixtures::Faulty");
    let report = inspect(&registry, &object);

    assert_eq!(categories(&report), vec!["proxy mismatch"]);
    assert!(report.findings[0].message.contains("stand-in fixtures::Handler#"));
}

#[test]
fn dropped_stand_in_is_not_same() {
    let registry = faulty_registry(TypeRef::named(HANDLER), Fault::ReturnsNull);
    let object = instantiate(&registry, "fixtures::Faulty");
    let report = inspect(&registry, &object);
    assert_eq!(categories(&report), vec!["not same"]);
}

#[test]
fn stand_in_answers_interface_members_neutrally() {
    let handle = MemberInfo::new(
        "handle",
        vec![TypeRef::Str],
        TypeRef::Primitive(accessor_probe::Scalar::Bool),
    );
    let value = Value::object(StandIn::new(HANDLER, vec![handle]));
    assert!(is_stand_in(&value));

    let object = value.as_object().unwrap();
    let answer = object
        .borrow_mut()
        .invoke("handle", &[Value::Str("event".into())])
        .unwrap();
    assert_eq!(answer, Value::Bool(false));
}

#[test]
fn identity_wins_over_equality() {
    let a = Value::object(StandIn::new(HANDLER, Vec::new()));
    assert!(assert_round_trip("set_h", "get_h", &a, &a.clone()).is_ok());

    let b = Value::object(StandIn::new(HANDLER, Vec::new()));
    let err = assert_round_trip("set_h", "get_h", &a, &b).unwrap_err();
    assert_eq!(err.category(), "proxy mismatch");
}
