use crate::classify::Classification;
use crate::member::Field;
use proc_macro2::TokenStream;
use quote::quote;

/// The shared container holding every tracked field, in declaration order.
///
/// `Clone` is the copy taken by `Arc::make_mut` when a mutation finds the
/// container shared with another value.
pub(crate) fn storage(c: &Classification) -> TokenStream {
    let storage = c.storage_ident();
    let fields: Vec<&Field> = c.tracked().collect();
    let idents: Vec<_> = fields.iter().map(|field| &field.ident).collect();
    let tys: Vec<_> = fields.iter().map(|field| &field.ty).collect();

    quote! {
        #[derive(Clone)]
        struct #storage {
            #(
                #idents: #tys,
            )*
        }

        #[allow(dead_code)]
        impl #storage {
            fn new(#(#idents: #tys),*) -> Self {
                #storage {
                    #(#idents),*
                }
            }
        }
    }
}

/// The private field through which the struct reaches its storage.
pub(crate) fn storage_field(c: &Classification) -> TokenStream {
    let storage = c.storage_ident();
    quote! {
        __storage: ::std::sync::Arc<#storage>
    }
}
