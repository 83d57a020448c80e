// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Setter/getter pairing by naming convention.

use std::collections::BTreeMap;
use std::fmt;

use super::AccessorConventions;
use crate::error::Warning;
use crate::model::MemberInfo;

/// A setter and the getter that should read back what it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorPair {
    pub setter: MemberInfo,
    pub getter: MemberInfo,
}

impl AccessorPair {
    /// Declared type of the setter's first parameter.
    pub fn parameter(&self) -> Option<&crate::model::TypeRef> {
        self.setter.params.first()
    }
}

impl fmt::Display for AccessorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.setter, self.getter)
    }
}

/// Pair up the members of a type.
///
/// Every setter yields exactly one entry: a pair or the reason it has none.
/// Overloaded names yield one ambiguity warning per name instead. Entries
/// come out ordered by the member name they concern.
pub fn discover_pairs(
    type_name: &str,
    members: &[MemberInfo],
    conventions: &AccessorConventions,
) -> Vec<Result<AccessorPair, Warning>> {
    let mut setters: BTreeMap<&str, Vec<&MemberInfo>> = BTreeMap::new();
    let mut getters: BTreeMap<&str, Vec<&MemberInfo>> = BTreeMap::new();
    for member in members {
        if conventions.is_setter(&member.name) {
            setters.entry(member.name.as_str()).or_default().push(member);
        } else if conventions.is_getter(&member.name) {
            getters.entry(member.name.as_str()).or_default().push(member);
        }
    }

    let mut found: Vec<(&str, Result<AccessorPair, Warning>)> = Vec::new();

    for (&name, candidates) in &getters {
        if candidates.len() > 1 {
            found.push((
                name,
                Err(Warning::AmbiguousGetter {
                    type_name: type_name.to_string(),
                    name: name.to_string(),
                    count: candidates.len(),
                }),
            ));
        }
    }

    for (&name, candidates) in &setters {
        let setter = match candidates.as_slice() {
            [single] => *single,
            _ => {
                found.push((
                    name,
                    Err(Warning::AmbiguousSetter {
                        type_name: type_name.to_string(),
                        name: name.to_string(),
                        count: candidates.len(),
                    }),
                ));
                continue;
            }
        };

        if setter.params.is_empty() {
            found.push((
                name,
                Err(Warning::NoParameters {
                    type_name: type_name.to_string(),
                    setter: name.to_string(),
                }),
            ));
            continue;
        }

        let Some(property) = conventions.property_of(name) else {
            continue;
        };

        let mut outcome = Lookup::Missing;
        for boolean in [false, true] {
            outcome = lookup_getter(&getters, &conventions.getter_name(property, boolean));
            if !matches!(outcome, Lookup::Missing) {
                break;
            }
        }

        match outcome {
            Lookup::Found(getter) => found.push((
                name,
                Ok(AccessorPair {
                    setter: setter.clone(),
                    getter: getter.clone(),
                }),
            )),
            // Already reported as an ambiguous getter
            Lookup::Ambiguous => {}
            Lookup::Missing => found.push((
                name,
                Err(Warning::NoGetter {
                    type_name: type_name.to_string(),
                    setter: name.to_string(),
                }),
            )),
        }
    }

    found.sort_by(|a, b| a.0.cmp(b.0));
    found.into_iter().map(|(_, outcome)| outcome).collect()
}

enum Lookup<'a> {
    Found(&'a MemberInfo),
    Ambiguous,
    Missing,
}

fn lookup_getter<'a>(getters: &BTreeMap<&str, Vec<&'a MemberInfo>>, name: &str) -> Lookup<'a> {
    match getters.get(name).map(Vec::as_slice) {
        Some([single]) if single.params.is_empty() => Lookup::Found(*single),
        Some([_]) | None => Lookup::Missing,
        Some(_) => Lookup::Ambiguous,
    }
}
