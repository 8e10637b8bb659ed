use crate::classify::Classification;
use proc_macro2::TokenStream;
use quote::quote;

pub(crate) fn cow_box(c: &Classification) -> TokenStream {
    let ident = &c.ident;
    let krate = c.krate();

    quote! {
        impl #krate::CowBox for #ident {
            fn is_identical(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.__storage, &other.__storage)
            }
        }
    }
}
