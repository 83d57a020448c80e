// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `#[probe(...)]` attribute parsing.

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

/// Container-level `#[probe(...)]` settings.
#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<LitStr>,
    pub implements: Vec<String>,
    pub default: bool,
}

/// Field-level `#[probe(...)]` settings.
#[derive(Default)]
pub struct FieldAttrs {
    pub skip: bool,
    pub readonly: bool,
    pub writeonly: bool,
    pub ty: Option<LitStr>,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = ContainerAttrs::default();
        for meta in probe_metas(attrs)? {
            match &meta {
                Meta::Path(path) if path.is_ident("default") => result.default = true,
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    result.name = Some(string_value(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("implements") => {
                    let list = string_value(&nv.value)?;
                    result.implements.extend(
                        list.value()
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string),
                    );
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `name = \"..\"`, `implements = \"..\"` or `default`",
                    ))
                }
            }
        }
        Ok(result)
    }
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = FieldAttrs::default();
        for meta in probe_metas(attrs)? {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                Meta::Path(path) if path.is_ident("readonly") => result.readonly = true,
                Meta::Path(path) if path.is_ident("writeonly") => result.writeonly = true,
                Meta::NameValue(nv) if nv.path.is_ident("ty") => {
                    result.ty = Some(string_value(&nv.value)?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `skip`, `readonly`, `writeonly` or `ty = \"..\"`",
                    ))
                }
            }
        }
        if result.readonly && result.writeonly {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "a field cannot be both `readonly` and `writeonly`",
            ));
        }
        Ok(result)
    }
}

fn probe_metas(attrs: &[Attribute]) -> syn::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("probe")) {
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn string_value(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}
