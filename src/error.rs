// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, by severity.
//!
//! | Severity          | Type          | Effect                                   |
//! |-------------------|---------------|------------------------------------------|
//! | fatal             | `EngineError` | run stops, nothing after it is meaningful |
//! | recoverable-skip  | `Warning`     | counted, pair not attempted              |
//! | recoverable-fail  | `Glitch`      | counted, pair attempted and wrong        |
//!
//! Cautions and skips are population-scope outcomes and are recorded
//! directly as findings; they never travel as errors.
//!
//! Inside the engine the three travel together as [`Failure`] so `?` works
//! across synthesis, resolution and invocation.

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::model::{InvokeError, TypeRef};

/// Fatal conditions.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("descriptor cache '{name}' was queried before it was loaded")]
    CacheNotLoaded { name: String },

    #[error("descriptor cache '{name}' is unusable: {reason}")]
    CacheFailed { name: String, reason: String },

    #[error("{subject}: {detail}")]
    AnticipationMismatch { subject: String, detail: String },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// A pair (or object) that was not verified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("{type_name}: setter '{name}' is overloaded {count} times; cannot pick one")]
    AmbiguousSetter {
        type_name: String,
        name: String,
        count: usize,
    },

    #[error("{type_name}: getter '{name}' is overloaded {count} times; cannot pick one")]
    AmbiguousGetter {
        type_name: String,
        name: String,
        count: usize,
    },

    #[error("{type_name}: setter '{setter}' takes no parameters; nothing to verify")]
    NoParameters { type_name: String, setter: String },

    #[error("{type_name}: setter '{setter}' has no corresponding getter")]
    NoGetter { type_name: String, setter: String },

    #[error("{type_name}: pair '{setter}'/'{getter}' excluded by {rule}")]
    Excluded {
        type_name: String,
        setter: String,
        getter: String,
        rule: String,
    },

    #[error("'{member}': type '{type_name}' cannot be found")]
    TypeNotFound { member: String, type_name: String },

    #[error(
        "'{member}': cannot resolve a concrete type for '{declared}'; \
         declare a substitute.setter.type for it"
    )]
    Unresolvable { member: String, declared: TypeRef },

    #[error("'{setter}'/'{getter}' not verifiable: parameter {parameter} vs return {returns}")]
    NotVerifiable {
        setter: String,
        getter: String,
        parameter: TypeRef,
        returns: TypeRef,
    },

    #[error("cannot instantiate abstract type '{type_ref}'; declare a substitute.setter.type for it")]
    AbstractType { type_ref: TypeRef },

    #[error("endless loop synthesizing '{type_ref}': recursion depth {depth} reached")]
    EndlessLoop { type_ref: TypeRef, depth: usize },

    #[error("cannot instantiate '{class}' ({tried} constructor(s) tried): {cause}")]
    Instantiation {
        class: String,
        tried: usize,
        cause: String,
    },

    #[error("object type '{type_name}' is unknown to the introspector")]
    UnknownObjectType { type_name: String },
}

impl Warning {
    /// Short message category, stable across message wording changes.
    pub fn category(&self) -> &'static str {
        match self {
            Warning::AmbiguousSetter { .. } => "ambiguous setter",
            Warning::AmbiguousGetter { .. } => "ambiguous getter",
            Warning::NoParameters { .. } => "setter without parameters",
            Warning::NoGetter { .. } => "no corresponding getter",
            Warning::Excluded { .. } => "excluded",
            Warning::TypeNotFound { .. } => "type not found",
            Warning::Unresolvable { .. } => "unresolvable type",
            Warning::NotVerifiable { .. } => "not verifiable",
            Warning::AbstractType { .. } => "abstract type",
            Warning::EndlessLoop { .. } => "endless loop",
            Warning::Instantiation { .. } => "instantiation",
            Warning::UnknownObjectType { .. } => "unknown type",
        }
    }
}

/// A pair that was verified and found wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Glitch {
    #[error("'{getter}' returned null after '{setter}' was given {expected}")]
    NotSame {
        setter: String,
        getter: String,
        expected: String,
    },

    #[error(
        "'{getter}' did not return the stand-in given to '{setter}': \
         set {expected}, got {actual}"
    )]
    ProxyMismatch {
        setter: String,
        getter: String,
        expected: String,
        actual: String,
    },

    #[error("'{getter}' returned {actual} after '{setter}' was given {expected}")]
    NotEqual {
        setter: String,
        getter: String,
        expected: String,
        actual: String,
    },

    #[error("invoking '{member}' with {argument_type} failed: {source}")]
    Invocation {
        member: String,
        argument_type: TypeRef,
        #[source]
        source: InvokeError,
    },
}

impl Glitch {
    pub fn category(&self) -> &'static str {
        match self {
            Glitch::NotSame { .. } => "not same",
            Glitch::ProxyMismatch { .. } => "proxy mismatch",
            Glitch::NotEqual { .. } => "not equal",
            Glitch::Invocation { .. } => "invocation",
        }
    }
}

/// Any reason a pair did not end in success.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Fatal(#[from] EngineError),

    #[error(transparent)]
    Warning(#[from] Warning),

    #[error(transparent)]
    Glitch(#[from] Glitch),
}
