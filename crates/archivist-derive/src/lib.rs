//! Derive macros for `archivist`.
//!
//! - `#[derive(Describe)]` on structs with named fields (or unit structs)
//!   implements `Describe` and `Field`. Field attributes:
//!   `#[archive(rename = "key")]`, `#[archive(skip)]`.
//! - `#[derive(Variant)]` on enums whose alternatives are unit or hold a
//!   single unnamed field implements `Variant` and `Field`. Every
//!   alternative needs `#[archive(tag = N)]`; the enum may declare
//!   `#[archive(tag_width = "u16")]` (default `"u8"`).
//!
//! Both derives expect the type to implement `Default`.

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Error, Fields, GenericParam,
    Generics, Ident, LitInt, LitStr, Result, Type,
};

#[proc_macro_derive(Describe, attributes(archive))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_describe(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Variant, attributes(archive))]
pub fn derive_variant(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_variant(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

// ----------------------------------------------------------------------------
// Describe

#[derive(Default)]
struct FieldAttrs {
    rename: Option<LitStr>,
    skip: bool,
}

fn field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("archive")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                out.rename = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(out)
}

fn expand_describe(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    name,
                    "Describe needs named fields to derive keys from",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "Describe can only be derived for structs; use Variant for enums",
            ))
        }
    };

    let mut seen = HashSet::new();
    let mut calls = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = attrs
            .rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));
        if !seen.insert(key.value()) {
            return Err(Error::new_spanned(
                &key,
                format!("duplicate archive key `{}`", key.value()),
            ));
        }
        calls.push(quote! {
            ::archivist::Archive::field(__ar, #key, &mut self.#ident)?;
        });
    }

    let generics = with_field_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::archivist::Describe for #name #ty_generics #where_clause {
            fn describe<__A: ::archivist::Archive>(
                &mut self,
                __ar: &mut __A,
            ) -> ::core::result::Result<(), ::archivist::ArchiveError> {
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::archivist::Field for #name #ty_generics #where_clause {
            fn visit<__A: ::archivist::Archive>(
                __ar: &mut __A,
                __key: ::archivist::FieldKey,
                __value: &mut Self,
            ) -> ::core::result::Result<(), ::archivist::ArchiveError> {
                ::archivist::Archive::nested(__ar, __key, __value)
            }
        }
    })
}

// ----------------------------------------------------------------------------
// Variant

#[derive(Clone, Copy)]
enum Width {
    U8,
    U16,
}

impl Width {
    fn max(self) -> u16 {
        match self {
            Width::U8 => u8::MAX.into(),
            Width::U16 => u16::MAX,
        }
    }

    fn tokens(self) -> TokenStream2 {
        match self {
            Width::U8 => quote!(::archivist::TagWidth::U8),
            Width::U16 => quote!(::archivist::TagWidth::U16),
        }
    }
}

struct Alternative<'a> {
    ident: &'a Ident,
    tag: u16,
    payload: Option<&'a Type>,
}

fn enum_width(attrs: &[Attribute]) -> Result<Width> {
    let mut width = Width::U8;
    for attr in attrs.iter().filter(|a| a.path().is_ident("archive")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag_width") {
                let lit: LitStr = meta.value()?.parse()?;
                width = match lit.value().as_str() {
                    "u8" => Width::U8,
                    "u16" => Width::U16,
                    _ => return Err(Error::new_spanned(lit, "tag_width must be \"u8\" or \"u16\"")),
                };
                Ok(())
            } else {
                Err(meta.error("expected `tag_width = \"u8\" | \"u16\"`"))
            }
        })?;
    }
    Ok(width)
}

fn alternative_tag(variant: &syn::Variant) -> Result<u16> {
    let mut tag = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("archive")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let lit: LitInt = meta.value()?.parse()?;
                tag = Some(lit.base10_parse::<u16>()?);
                Ok(())
            } else {
                Err(meta.error("expected `tag = <integer>`"))
            }
        })?;
    }
    tag.ok_or_else(|| {
        Error::new_spanned(
            &variant.ident,
            "missing `#[archive(tag = N)]` on alternative",
        )
    })
}

fn expand_variant(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(Error::new_spanned(
            name,
            "Variant can only be derived for enums; use Describe for structs",
        ));
    };
    if data.variants.is_empty() {
        return Err(Error::new_spanned(name, "Variant needs at least one alternative"));
    }
    let width = enum_width(&input.attrs)?;

    let mut seen = HashSet::new();
    let mut alternatives = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        let tag = alternative_tag(variant)?;
        if tag > width.max() {
            return Err(Error::new_spanned(
                &variant.ident,
                format!("tag {tag} does not fit the declared tag width"),
            ));
        }
        if !seen.insert(tag) {
            return Err(Error::new_spanned(
                &variant.ident,
                format!("duplicate tag {tag}"),
            ));
        }
        let payload = match &variant.fields {
            Fields::Unit => None,
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => Some(&fields.unnamed[0].ty),
            _ => {
                return Err(Error::new_spanned(
                    &variant.ident,
                    "alternatives must be unit or hold exactly one unnamed field",
                ))
            }
        };
        alternatives.push(Alternative {
            ident: &variant.ident,
            tag,
            payload,
        });
    }

    let tags: Vec<u16> = alternatives.iter().map(|alt| alt.tag).collect();
    let tag_arms = alternatives.iter().map(|alt| {
        let (ident, tag) = (alt.ident, alt.tag);
        match alt.payload {
            Some(_) => quote!(Self::#ident(..) => #tag,),
            None => quote!(Self::#ident => #tag,),
        }
    });
    let with_tag_arms = alternatives.iter().map(|alt| {
        let (ident, tag) = (alt.ident, alt.tag);
        match alt.payload {
            Some(ty) => quote! {
                #tag => ::core::option::Option::Some(
                    Self::#ident(<#ty as ::core::default::Default>::default())
                ),
            },
            None => quote!(#tag => ::core::option::Option::Some(Self::#ident),),
        }
    });
    let payload_arms = alternatives.iter().map(|alt| {
        let ident = alt.ident;
        match alt.payload {
            Some(_) => quote! {
                Self::#ident(__payload) => ::archivist::variant::payload(__ar, __payload),
            },
            None => quote!(Self::#ident => ::core::result::Result::Ok(()),),
        }
    });
    let width = width.tokens();

    let generics = with_field_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::archivist::Variant for #name #ty_generics #where_clause {
            const TAG_WIDTH: ::archivist::TagWidth = #width;
            const TAGS: &'static [::archivist::Tag] = &[#(#tags),*];

            fn tag(&self) -> ::archivist::Tag {
                match self {
                    #(#tag_arms)*
                }
            }

            fn with_tag(__tag: ::archivist::Tag) -> ::core::option::Option<Self> {
                match __tag {
                    #(#with_tag_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn describe_payload<__A: ::archivist::Archive>(
                &mut self,
                __ar: &mut __A,
            ) -> ::core::result::Result<(), ::archivist::ArchiveError> {
                match self {
                    #(#payload_arms)*
                }
            }
        }

        impl #impl_generics ::archivist::Field for #name #ty_generics #where_clause {
            fn visit<__A: ::archivist::Archive>(
                __ar: &mut __A,
                __key: ::archivist::FieldKey,
                __value: &mut Self,
            ) -> ::core::result::Result<(), ::archivist::ArchiveError> {
                ::archivist::Archive::variant(__ar, __key, __value)
            }
        }
    })
}

/// Adds `T: Field` for every type parameter.
fn with_field_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::archivist::Field));
        }
    }
    generics
}
