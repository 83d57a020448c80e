// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `#[derive(Probe)]` on fieldless enums: `Reflect` + `ProbeEnum`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attrs::ContainerAttrs;

pub fn derive(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;
    if container.default || !container.implements.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "enums only accept `#[probe(name = \"..\")]`",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Probe)] does not support generic enums",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Probe)] needs at least one variant",
        ));
    }

    let ident = &input.ident;
    let type_name = container
        .name
        .as_ref()
        .map_or_else(|| ident.unraw().to_string(), syn::LitStr::value);

    let mut variants = Vec::with_capacity(data.variants.len());
    let mut constants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "#[derive(Probe)] enums must be fieldless",
            ));
        }
        variants.push(&variant.ident);
        constants.push(variant.ident.unraw().to_string());
    }

    Ok(quote! {
        impl ::accessor_probe::Reflect for #ident {
            fn type_ref() -> ::accessor_probe::TypeRef {
                ::accessor_probe::TypeRef::named(#type_name)
            }

            fn to_value(&self) -> ::accessor_probe::Value {
                let constant = match self {
                    #(#ident::#variants => #constants,)*
                };
                ::accessor_probe::Value::Enum {
                    type_name: #type_name.to_string(),
                    constant: constant.to_string(),
                }
            }

            fn from_value(
                value: &::accessor_probe::Value,
            ) -> ::core::result::Result<Self, ::accessor_probe::ValueMismatch> {
                if let ::accessor_probe::Value::Enum { type_name, constant } = value {
                    if type_name == #type_name {
                        match constant.as_str() {
                            #(#constants => return ::core::result::Result::Ok(#ident::#variants),)*
                            _ => {}
                        }
                    }
                }
                ::core::result::Result::Err(::accessor_probe::ValueMismatch::new(
                    <Self as ::accessor_probe::Reflect>::type_ref(),
                    value,
                ))
            }
        }

        impl ::accessor_probe::ProbeEnum for #ident {
            const NAME: &'static str = #type_name;

            fn constants() -> &'static [&'static str] {
                &[#(#constants),*]
            }
        }
    })
}
