// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `#[derive(Probe)]`: make plain Rust types testable by accessor-probe.
//!
//! On a struct with named fields the derive writes `Instance` and `Bean`:
//! every field becomes a `set_<field>` / `get_<field>` pair (`is_<field>` for
//! `bool` and `Option<bool>`), invoked through the field type's `Reflect`
//! impl. On a fieldless enum it writes `Reflect` and `ProbeEnum`.
//!
//! # Example
//!
//! ```ignore
//! use accessor_probe::Probe;
//!
//! #[derive(Probe, Default)]
//! #[probe(name = "shop::Order", implements = "shop::Entity", default)]
//! struct Order {
//!     id: i64,
//!     paid: bool,
//!     #[probe(readonly)]
//!     created: String,
//!     #[probe(skip)]
//!     cache: Vec<u8>,
//! }
//!
//! #[derive(Probe, Clone, Copy)]
//! #[probe(name = "shop::Status")]
//! enum Status {
//!     Open,
//!     Closed,
//! }
//! ```
//!
//! Generated code names the runtime crate as `::accessor_probe`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

mod attrs;
mod bean;
mod enums;

/// Derive accessor-probe support for a struct or a fieldless enum.
///
/// # Container attributes
///
/// - `#[probe(name = "ns::Name")]` - registered type name (default: the
///   Rust identifier)
/// - `#[probe(implements = "A, B")]` - supertypes (structs only)
/// - `#[probe(default)]` - register `Default::default` as the zero-argument
///   constructor (structs only)
///
/// # Field attributes
///
/// - `#[probe(skip)]` - no accessors for this field
/// - `#[probe(readonly)]` - getter only
/// - `#[probe(writeonly)]` - setter only
/// - `#[probe(ty = "Handler")]` - declared type override, in `TypeRef`
///   spelling; the field's `Reflect` impl still does the conversion
#[proc_macro_derive(Probe, attributes(probe))]
pub fn derive_probe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = match &input.data {
        Data::Struct(data) => bean::derive(&input, data),
        Data::Enum(data) => enums::derive(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Probe)] supports structs and enums, not unions",
        )),
    };
    expanded.unwrap_or_else(syn::Error::into_compile_error).into()
}
