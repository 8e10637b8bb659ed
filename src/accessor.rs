use crate::attr;
use crate::classify::Classification;
use crate::member::Field;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Getters for every tracked field and copy-on-write setters for the mutating
/// ones, in declaration order.
pub(crate) fn accessors(c: &Classification) -> TokenStream {
    let accessors: Vec<TokenStream> = c.tracked().map(|field| accessor(c, field)).collect();
    if accessors.iter().all(TokenStream::is_empty) {
        return TokenStream::new();
    }

    let ident = &c.ident;
    quote! {
        #[allow(dead_code)]
        impl #ident {
            #(#accessors)*
        }
    }
}

fn accessor(c: &Classification, field: &Field) -> TokenStream {
    let vis = &field.vis;
    let ident = &field.ident;
    let ty = &field.ty;
    let docs = field.attrs.iter().filter(|attr| attr::is_doc(attr));

    let mut tokens = TokenStream::new();
    if !c.has_method(ident) {
        tokens.extend(quote! {
            #(#docs)*
            #vis fn #ident(&self) -> &#ty {
                &self.__storage.#ident
            }
        });
    }
    if !field.is_mutating() {
        return tokens;
    }

    let setter_vis = field.setter_vis();
    let set = format_ident!("set_{}", ident);
    if !c.has_method(&set) {
        tokens.extend(quote! {
            #setter_vis fn #set(&mut self, #ident: #ty) {
                ::std::sync::Arc::make_mut(&mut self.__storage).#ident = #ident;
            }
        });
    }
    let get_mut = format_ident!("{}_mut", ident);
    if !c.has_method(&get_mut) {
        tokens.extend(quote! {
            #setter_vis fn #get_mut(&mut self) -> &mut #ty {
                &mut ::std::sync::Arc::make_mut(&mut self.__storage).#ident
            }
        });
    }
    tokens
}
