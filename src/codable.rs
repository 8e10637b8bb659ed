use crate::classify::Classification;
use crate::init;
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;

pub(crate) fn serialize(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let name = ident.unraw().to_string();
    let this = quote!(self);

    let keys = c.coding_keys();
    let len = Literal::usize_unsuffixed(keys.len());
    let fields = keys.iter().map(|(field, key)| {
        let read = field.read(&this);
        quote! {
            ::serde::ser::SerializeStruct::serialize_field(&mut __state, #key, &#read)?;
        }
    });

    quote! {
        impl ::serde::Serialize for #ident {
            fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: ::serde::Serializer,
            {
                let mut __state = ::serde::Serializer::serialize_struct(__serializer, #name, #len)?;
                #(#fields)*
                ::serde::ser::SerializeStruct::end(__state)
            }
        }
    }
}

/// Decodes into a keyed helper struct, then assembles the value. Every keyed
/// field takes its decoded value; unkeyed fields fall back to their default.
pub(crate) fn deserialize(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let name = ident.unraw().to_string();
    let keys_ident = format_ident!("__{}Keys", ident);

    let keys = c.coding_keys();
    let key_fields = keys.iter().map(|(field, key)| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            #[serde(rename = #key)]
            #ident: #ty,
        }
    });

    let construct = init::construct(c, |field| {
        let ident = &field.ident;
        let keyed = keys.iter().any(|(keyed, _)| keyed.ident == *ident);
        match &field.default {
            Some(default) if !keyed => quote!(#default),
            _ => quote!(__keys.#ident),
        }
    });

    quote! {
        impl<'de> ::serde::Deserialize<'de> for #ident {
            fn deserialize<__D>(__deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: ::serde::Deserializer<'de>,
            {
                #[derive(::serde::Deserialize)]
                #[serde(rename = #name)]
                struct #keys_ident {
                    #(#key_fields)*
                }

                let __keys = <#keys_ident as ::serde::Deserialize>::deserialize(__deserializer)?;
                ::core::result::Result::Ok(#construct)
            }
        }
    }
}
