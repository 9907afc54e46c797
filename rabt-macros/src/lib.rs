//! Derive macros for Rabt DI.
//!
//! `#[derive(Component)]` writes the `Component::shape` of a struct with
//! named fields. Every field becomes a parameter of one constructor, in
//! declaration order:
//! - `Arc<T>` fields are object-kind parameters resolved by the container
//! - other fields are value-kind parameters filled from constructor arguments
//!
//! Field attributes:
//! - `#[component(value)]`: value-kind even when the field is an `Arc`
//! - `#[component(property)]`: not a parameter; default-initialized and
//!   assignable with `with_property_value`
//! - `#[component(skip)]`: not a parameter; default-initialized
//!
//! Struct attribute `#[component(provides = "dyn Trait")]`, repeatable,
//! declares the capabilities the component can be bound to.

use darling::ast::Data;
use darling::util::Flag;
use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, GenericArgument, Ident, PathArguments, Type, parse_macro_input};

#[derive(FromField)]
#[darling(attributes(component))]
struct ComponentField {
    ident: Option<Ident>,
    ty: Type,
    value: Flag,
    property: Flag,
    skip: Flag,
}

#[derive(FromDeriveInput)]
#[darling(attributes(component), supports(struct_named))]
struct ComponentInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<(), ComponentField>,
    #[darling(multiple)]
    provides: Vec<Type>,
}

#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

/// The `T` of an `Arc<T>` field type.
fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let component = ComponentInput::from_derive_input(input)?;

    if !component.generics.params.is_empty() {
        return Err(darling::Error::custom(
            "Component cannot be derived for generic structs",
        )
        .with_span(&component.generics));
    }

    let ident = &component.ident;
    let fields = match &component.data {
        Data::Struct(fields) => &fields.fields,
        Data::Enum(_) => {
            return Err(darling::Error::unsupported_shape("enum").with_span(ident));
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut params = Vec::new();
    let mut inits = Vec::new();
    let mut properties = Vec::new();

    for field in fields {
        let Some(name) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let label = name.unraw().to_string();

        let excluded = [&field.value, &field.property, &field.skip]
            .iter()
            .filter(|flag| flag.is_present())
            .count();
        if excluded > 1 {
            errors.push(
                darling::Error::custom("use only one of `value`, `property` and `skip`")
                    .with_span(name),
            );
            continue;
        }

        if field.skip.is_present() {
            inits.push(quote! { #name: ::core::default::Default::default() });
            continue;
        }

        if field.property.is_present() {
            inits.push(quote! { #name: ::core::default::Default::default() });
            properties.push(quote! {
                .property(#label, |__this: &mut #ident, __value: #ty| __this.#name = __value)
            });
            continue;
        }

        match arc_inner(ty) {
            Some(inner) if !field.value.is_present() => {
                params.push(quote! { ::rabt::Param::object::<#inner>(#label) });
                inits.push(quote! { #name: __args.object::<#inner>(#label)? });
            }
            _ => {
                params.push(quote! { ::rabt::Param::value::<#ty>(#label) });
                inits.push(quote! { #name: __args.value::<#ty>(#label)? });
            }
        }
    }

    errors.finish()?;

    let provides = component.provides.iter().map(|capability| {
        quote! {
            .provides(|__this: ::std::sync::Arc<#ident>| -> ::std::sync::Arc<#capability> { __this })
        }
    });

    Ok(quote! {
        impl ::rabt::Component for #ident {
            #[allow(unused_variables)]
            fn shape() -> ::rabt::Shape<Self> {
                ::rabt::Shape::new()
                    .constructor([#(#params),*], |__args: &::rabt::Args| {
                        ::core::result::Result::Ok(#ident { #(#inits),* })
                    })
                    #(#properties)*
                    #(#provides)*
            }
        }
    })
}
