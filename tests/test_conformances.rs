use quote::quote;

mod support;

fn account() -> proc_macro2::TokenStream {
    quote! {
        #[derive(Clone, CowBox, PartialEq, Eq, Hash, Debug, Display)]
        struct Account {
            active: bool,
            #[cow_box(mutating)]
            balance: i64,
            #[cow_box(non_mutating)]
            id: u64,
        }
    }
}

#[test]
fn test_partial_eq() {
    let file = support::expand(quote!(), account());

    let expected = quote! {
        impl ::core::cmp::PartialEq for Account {
            fn eq(&self, other: &Self) -> bool {
                if self.active != other.active {
                    return false;
                }
                if ::std::sync::Arc::ptr_eq(&self.__storage, &other.__storage) {
                    return true;
                }
                if self.__storage.id != other.__storage.id {
                    return false;
                }
                if self.__storage.balance != other.__storage.balance {
                    return false;
                }
                true
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "PartialEq").unwrap(), expected);

    let expected = quote! {
        impl ::core::cmp::Eq for Account {}
    };
    support::assert_item(support::trait_impl(&file, "Eq").unwrap(), expected);
}

#[test]
fn test_hash() {
    let file = support::expand(quote!(), account());

    let expected = quote! {
        impl ::core::hash::Hash for Account {
            fn hash<__H: ::core::hash::Hasher>(&self, state: &mut __H) {
                ::core::hash::Hash::hash(&self.__storage.id, state);
                ::core::hash::Hash::hash(&self.__storage.balance, state);
                ::core::hash::Hash::hash(&self.active, state);
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "Hash").unwrap(), expected);
}

#[test]
fn test_describe() {
    let file = support::expand(quote!(), account());

    let expected = quote! {
        impl ::core::fmt::Display for Account {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                ::core::write!(
                    f,
                    "Account(id: {}, balance: {}, active: {})",
                    self.__storage.id,
                    self.__storage.balance,
                    self.active
                )
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "Display").unwrap(), expected);

    let expected = quote! {
        impl ::core::fmt::Debug for Account {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                f.debug_struct("Account")
                    .field("id", &self.__storage.id)
                    .field("balance", &self.__storage.balance)
                    .field("active", &self.active)
                    .finish()
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "Debug").unwrap(), expected);
}

#[test]
fn test_identical() {
    let file = support::expand(quote!(), account());
    let expected = quote! {
        impl ::cowbox::CowBox for Account {
            fn is_identical(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.__storage, &other.__storage)
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "CowBox").unwrap(), expected);

    let file = support::expand(quote!(crate = "crate::reexport::cowbox"), account());
    let expected = quote! {
        impl crate::reexport::cowbox::CowBox for Account {
            fn is_identical(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.__storage, &other.__storage)
            }
        }
    };
    support::assert_item(support::trait_impl(&file, "CowBox").unwrap(), expected);
}

#[test]
fn test_derive_list() {
    let file = support::expand(
        quote!(),
        quote! {
            #[derive(Clone, cowbox::CowBox, std::fmt::Debug)]
            #[repr(C)]
            struct Row {
                #[cow_box(mutating)]
                cells: Vec<u8>,
            }
        },
    );

    let expected = quote! {
        #[derive(Clone)]
        #[repr(C)]
        struct Row {
            __storage: ::std::sync::Arc<__RowStorage>,
        }
    };
    support::assert_item(support::item_struct(&file, "Row").unwrap(), expected);
    assert!(support::trait_impl(&file, "CowBox").is_some());
    assert!(support::trait_impl(&file, "Debug").is_some());
    assert!(support::trait_impl(&file, "PartialEq").is_none());
    assert!(support::trait_impl(&file, "Display").is_none());
}
