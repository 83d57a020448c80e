// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `#[derive(Probe)]` on structs: `Instance` + `Bean`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataStruct, DeriveInput, Fields, GenericArgument, PathArguments, Type};

use crate::attrs::{ContainerAttrs, FieldAttrs};

struct Property<'a> {
    ident: &'a syn::Ident,
    ty: &'a Type,
    name: String,
    attrs: FieldAttrs,
}

impl Property<'_> {
    fn setter(&self) -> Option<String> {
        (!self.attrs.readonly).then(|| format!("set_{}", self.name))
    }

    fn getter(&self) -> Option<String> {
        let prefix = if is_boolean(self.ty) { "is_" } else { "get_" };
        (!self.attrs.writeonly).then(|| format!("{}{}", prefix, self.name))
    }

    /// Expression for the declared `TypeRef`.
    fn declared(&self) -> TokenStream {
        let ty = self.ty;
        match &self.attrs.ty {
            Some(spelling) => quote! {
                match <::accessor_probe::TypeRef as ::core::str::FromStr>::from_str(#spelling) {
                    ::core::result::Result::Ok(ty) => ty,
                    ::core::result::Result::Err(_) => ::accessor_probe::TypeRef::named(#spelling),
                }
            },
            None => quote! { <#ty as ::accessor_probe::Reflect>::type_ref() },
        }
    }
}

pub fn derive(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Probe)] does not support generic structs",
        ));
    }
    let fields = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => return derive_fields(input, Vec::new()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Probe)] needs named fields to derive accessor names",
            ))
        }
    };

    let mut properties = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        properties.push(Property {
            ident,
            ty: &field.ty,
            name: ident.unraw().to_string(),
            attrs,
        });
    }
    derive_fields(input, properties)
}

fn derive_fields(input: &DeriveInput, properties: Vec<Property<'_>>) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;
    let ident = &input.ident;
    let type_name = container
        .name
        .as_ref()
        .map_or_else(|| ident.unraw().to_string(), syn::LitStr::value);

    let mut arms = Vec::new();
    let mut members = Vec::new();
    for property in &properties {
        let field = property.ident;
        let ty = property.ty;
        let declared = property.declared();

        if let Some(setter) = property.setter() {
            arms.push(quote! {
                #setter => {
                    ::accessor_probe::InvokeError::check_arity(member, args, 1)?;
                    self.#field = <#ty as ::accessor_probe::Reflect>::from_value(&args[0]).map_err(
                        |source| ::accessor_probe::InvokeError::Argument {
                            member: member.to_string(),
                            source,
                        },
                    )?;
                    ::core::result::Result::Ok(::accessor_probe::Value::Unit)
                }
            });
            members.push(quote! {
                .member(::accessor_probe::MemberInfo::setter(#setter, #declared))
            });
        }
        if let Some(getter) = property.getter() {
            arms.push(quote! {
                #getter => {
                    ::accessor_probe::InvokeError::check_arity(member, args, 0)?;
                    ::core::result::Result::Ok(<#ty as ::accessor_probe::Reflect>::to_value(&self.#field))
                }
            });
            members.push(quote! {
                .member(::accessor_probe::MemberInfo::getter(#getter, #declared))
            });
        }
    }

    let field_idents: Vec<_> = properties.iter().map(|p| p.ident).collect();
    let field_names: Vec<_> = properties.iter().map(|p| p.name.as_str()).collect();
    let supertypes = &container.implements;
    let constructor = container.default.then(|| {
        quote! {
            .constructor(::accessor_probe::ConstructorInfo::nullary(|| {
                ::accessor_probe::object_ref(<#ident as ::core::default::Default>::default())
            }))
        }
    });

    Ok(quote! {
        impl ::accessor_probe::Instance for #ident {
            fn type_name(&self) -> &str {
                #type_name
            }

            #[allow(unused_variables)]
            fn invoke(
                &mut self,
                member: &str,
                args: &[::accessor_probe::Value],
            ) -> ::core::result::Result<::accessor_probe::Value, ::accessor_probe::InvokeError> {
                match member {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::accessor_probe::InvokeError::NoSuchMember {
                        type_name: #type_name.to_string(),
                        member: member.to_string(),
                    }),
                }
            }

            fn render(&self) -> String {
                let fields: ::std::vec::Vec<String> = ::std::vec![
                    #(::std::format!(
                        "{}: {}",
                        #field_names,
                        ::accessor_probe::Reflect::to_value(&self.#field_idents).render()
                    )),*
                ];
                ::std::format!("{} {{ {} }}", #type_name, fields.join(", "))
            }

            #[allow(unused_variables)]
            fn equals(&self, other: &dyn ::accessor_probe::Instance) -> bool {
                match other.as_any().downcast_ref::<Self>() {
                    ::core::option::Option::Some(other) => {
                        true #(&& ::accessor_probe::Reflect::to_value(&self.#field_idents)
                            .equals(&::accessor_probe::Reflect::to_value(&other.#field_idents)))*
                    }
                    ::core::option::Option::None => false,
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl ::accessor_probe::Bean for #ident {
            fn type_info() -> ::accessor_probe::TypeInfo {
                ::accessor_probe::TypeInfo::class(#type_name)
                    #(.extends(#supertypes))*
                    #(#members)*
                    #constructor
            }
        }
    })
}

/// `bool` and `Option<bool>` get `is_` getters.
fn is_boolean(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    if last.ident == "bool" {
        return true;
    }
    if last.ident != "Option" {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => matches!(
            args.args.first(),
            Some(GenericArgument::Type(inner)) if is_boolean(inner)
        ),
        _ => false,
    }
}
