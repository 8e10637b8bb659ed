use crate::classify::Classification;
use proc_macro2::TokenStream;
use quote::quote;

/// Plain fields first, then the shared-storage fast path, then tracked
/// fields.
pub(crate) fn partial_eq(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let this = quote!(self);
    let other = quote!(other);

    let compare = |field: &crate::member::Field| {
        let lhs = field.read(&this);
        let rhs = field.read(&other);
        quote! {
            if #lhs != #rhs {
                return false;
            }
        }
    };
    let plain = c.plain().map(compare);
    let tracked = c.non_mutating().chain(c.mutating()).map(compare);

    quote! {
        impl ::core::cmp::PartialEq for #ident {
            fn eq(&self, other: &Self) -> bool {
                #(#plain)*
                if ::std::sync::Arc::ptr_eq(&self.__storage, &other.__storage) {
                    return true;
                }
                #(#tracked)*
                true
            }
        }
    }
}

pub(crate) fn eq(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    quote! {
        impl ::core::cmp::Eq for #ident {}
    }
}

pub(crate) fn hash(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let this = quote!(self);
    let reads = c.described().map(|field| field.read(&this));

    quote! {
        impl ::core::hash::Hash for #ident {
            fn hash<__H: ::core::hash::Hasher>(&self, state: &mut __H) {
                #(
                    ::core::hash::Hash::hash(&#reads, state);
                )*
            }
        }
    }
}
