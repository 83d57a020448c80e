// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::common::{builtin_cache, faulty_registry, instantiate, Fault};
use accessor_probe::engine::discover_pairs;
use accessor_probe::{
    AccessorConventions, MemberInfo, PopulationVerifier, Scalar, TypeRef, Verifier,
};
use proptest::prelude::*;

fn members() -> Vec<MemberInfo> {
    let i64 = TypeRef::Primitive(Scalar::I64);
    let bool = TypeRef::Primitive(Scalar::Bool);
    vec![
        MemberInfo::setter("set_id", i64.clone()),
        MemberInfo::getter("get_id", i64.clone()),
        MemberInfo::setter("set_open", bool.clone()),
        MemberInfo::getter("is_open", bool),
        MemberInfo::setter("set_size", i64.clone()),
        MemberInfo::setter("set_size", TypeRef::Str),
        MemberInfo::getter("get_size", i64),
        MemberInfo::setter("set_note", TypeRef::Str),
        MemberInfo::getter("get_label", TypeRef::Str),
        MemberInfo::getter("get_label", TypeRef::Str),
        MemberInfo::setter("set_label", TypeRef::Str),
        MemberInfo::getter("to_string", TypeRef::Str),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Declaration order of members never changes what is discovered.
    #[test]
    fn discovery_ignores_member_order(shuffled in Just(members()).prop_shuffle()) {
        let conventions = AccessorConventions::default();
        let expected = discover_pairs("T", &members(), &conventions);
        prop_assert_eq!(discover_pairs("T", &shuffled, &conventions), expected);
    }

    /// A well-behaved accessor passes for every scalar type and seed.
    #[test]
    fn faithful_accessors_always_pass(
        scalar in prop::sample::select(Scalar::ALL.to_vec()),
        boxed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let ty = if boxed { TypeRef::Boxed(scalar) } else { TypeRef::Primitive(scalar) };
        let registry = faulty_registry(ty, Fault::None);
        let cache = builtin_cache();
        let object = instantiate(&registry, "fixtures::Faulty");
        let report = Verifier::new(&registry, &cache)
            .with_seed(Some(seed))
            .inspect(&object, false)
            .unwrap();
        prop_assert_eq!(report.counters.verifications, 1);
        prop_assert_eq!(report.counters.glitches, 0);
        prop_assert_eq!(report.counters.warnings, 0);
    }

    /// A getter that alters what it was given is always caught.
    #[test]
    fn altered_values_are_always_caught(seed in any::<u64>()) {
        let registry = faulty_registry(TypeRef::Str, Fault::Perturbs);
        let cache = builtin_cache();
        let object = instantiate(&registry, "fixtures::Faulty");
        let report = Verifier::new(&registry, &cache)
            .with_seed(Some(seed))
            .inspect(&object, false)
            .unwrap();
        prop_assert_eq!(report.counters.glitches, 1);
    }

    /// Every candidate ends in exactly one population outcome, and the
    /// totals do not depend on the seed.
    #[test]
    fn population_totals_are_seed_independent(seed in any::<u64>()) {
        let registry = super::common::population_registry();
        let cache = builtin_cache();
        let report = PopulationVerifier::new(Verifier::new(&registry, &cache).with_seed(Some(seed)))
            .parallel(false)
            .verify_namespace("zoo")
            .unwrap();
        let examined = report.objects.len() + report.counters.cautions + report.counters.skips;
        prop_assert_eq!(examined, 10);
        prop_assert_eq!(report.counters.verifications, 6);
        prop_assert_eq!(report.counters.glitches, 0);
    }
}
