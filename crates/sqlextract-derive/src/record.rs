//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Result};

use crate::common::syn_types::{is_visible, option_inner};

/// One `key = "value"` pair from `#[tag(...)]`.
struct TagAttr {
    key: String,
    value: LitStr,
}

/// Collect the `#[tag(...)]` pairs of a field, in declaration order.
///
/// Several `#[tag]` attributes may be stacked; keys may repeat (the first one
/// is used at runtime).
fn get_field_tags(field: &syn::Field) -> Result<Vec<TagAttr>> {
    let mut tags = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("tag") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let Some(ident) = meta.path.get_ident() else {
                return Err(meta.error("tag key must be a single identifier"));
            };
            let key = ident.unraw().to_string();
            let value: LitStr = meta.value()?.parse()?;
            tags.push(TagAttr { key, value });
            Ok(())
        })?;
    }

    Ok(tags)
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut field_exprs = Vec::new();

    for field in fields {
        let tags = get_field_tags(field)?;
        if tags.is_empty() {
            continue;
        }

        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();
        let visible = is_visible(&field.vis);

        let tag_exprs = tags.iter().map(|t| {
            let key = &t.key;
            let value = &t.value;
            quote! { ::sqlextract::Tag::new(#key, #value) }
        });

        // Only `Option<T>` fields have a present/absent state; anything else is
        // described as plain and never bound.
        let slot = if option_inner(&field.ty).is_some() {
            quote! { ::sqlextract::Slot::from_option(&self.#field_ident) }
        } else {
            quote! { ::sqlextract::Slot::Plain }
        };

        field_exprs.push(quote! {
            ::sqlextract::Field::new(
                #field_name,
                #visible,
                {
                    const TAGS: &[::sqlextract::Tag] = &[#(#tag_exprs),*];
                    TAGS
                },
                #slot,
            )
        });
    }

    Ok(quote! {
        impl #impl_generics ::sqlextract::Record for #name #ty_generics #where_clause {
            fn shape(&self) -> ::sqlextract::Shape<'_> {
                ::sqlextract::Shape::Struct(::std::vec![#(#field_exprs),*])
            }
        }
    })
}
