use crate::classify::Classification;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

/// `Name(a: .., b: ..)`, with non-mutating, mutating, then plain fields.
pub(crate) fn display(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let this = quote!(self);

    let names: Vec<String> = c
        .described()
        .map(|field| format!("{}: {{}}", field.name()))
        .collect();
    let format = format!("{}({})", ident.unraw(), names.join(", "));
    let reads = c.described().map(|field| field.read(&this));

    quote! {
        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                ::core::write!(f, #format #(, #reads)*)
            }
        }
    }
}

pub(crate) fn debug(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let name = ident.unraw().to_string();
    let this = quote!(self);

    let names = c.described().map(|field| field.name());
    let reads = c.described().map(|field| field.read(&this));

    quote! {
        impl ::core::fmt::Debug for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                f.debug_struct(#name)
                    #(
                        .field(#names, &#reads)
                    )*
                    .finish()
            }
        }
    }
}
