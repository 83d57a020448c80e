// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for type spellings.
//!
//! Descriptor documents and catalogs carry type names as free text, so the
//! parser sees whatever a user typed.

#![no_main]

use accessor_probe::TypeRef;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|spelling: &str| {
    // Cap length to keep nesting from timing out
    if spelling.len() > 256 {
        return;
    }

    let Ok(ty) = spelling.parse::<TypeRef>() else {
        return;
    };

    // INVARIANT 1: the displayed form parses back to the same type
    let canonical = ty.to_string();
    assert_eq!(canonical.parse::<TypeRef>().as_ref(), Ok(&ty), "{spelling:?}");

    // INVARIANT 2: counterparts are involutive
    if let Some(other) = ty.counterpart() {
        assert_eq!(other.counterpart(), Some(ty.clone()));
    }

    // INVARIANT 3: only references collapse under Option<>
    if ty.is_reference() {
        let wrapped = format!("Option<{}>", canonical);
        assert_eq!(wrapped.parse::<TypeRef>(), Ok(ty));
    }
});
