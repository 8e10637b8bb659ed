use crate::classify::Classification;
use crate::member::{Field, Special};
use proc_macro2::TokenStream;
use quote::quote;

/// The memberwise `new`, unless the declaration already has one.
pub(crate) fn initializer(c: &Classification) -> TokenStream {
    if c.has(Special::Init) {
        return TokenStream::new();
    }

    let ident = &c.ident;
    let vis = c.options.init.resolve(&c.vis);

    let required = |field: &&Field| field.default.is_none();
    let defaulted = |field: &&Field| field.default.is_some();
    let params = c
        .non_mutating()
        .filter(required)
        .chain(c.non_mutating().filter(defaulted))
        .chain(c.mutating().filter(required))
        .chain(c.mutating().filter(defaulted))
        .chain(c.plain_required())
        .map(param);

    let construct = construct(c, |field| {
        let ident = &field.ident;
        match &field.default {
            None => quote!(#ident),
            Some(default) if field.is_tracked() => quote!(#ident.unwrap_or_else(|| #default)),
            Some(default) => quote!(#default),
        }
    });

    quote! {
        #[allow(dead_code)]
        impl #ident {
            #vis fn new(#(#params),*) -> Self {
                #construct
            }
        }
    }
}

fn param(field: &Field) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    if field.default.is_some() {
        quote!(#ident: ::core::option::Option<#ty>)
    } else {
        quote!(#ident: #ty)
    }
}

/// A `Self { .. }` expression taking each field's value from `value`; tracked
/// fields go into a fresh storage in container order.
pub(crate) fn construct<F>(c: &Classification, value: F) -> TokenStream
where
    F: Fn(&Field) -> TokenStream,
{
    let storage = c.storage_ident();
    let plain = c.plain().map(|field| {
        let ident = &field.ident;
        let value = value(field);
        quote!(#ident: #value)
    });
    let args = c.tracked().map(&value);

    quote! {
        Self {
            #(#plain,)*
            __storage: ::std::sync::Arc::new(#storage::new(#(#args),*)),
        }
    }
}
