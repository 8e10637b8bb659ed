use quote::{quote, ToTokens};

mod support;

#[test]
fn test_docs_and_setter_visibility() {
    let file = support::expand(
        quote!(),
        quote! {
            pub struct Profile {
                /// Shown on the profile page.
                #[cow_box(mutating, set = "pub(crate)")]
                pub bio: String,
                #[serde(rename = "created_at")]
                #[cow_box(non_mutating)]
                pub(crate) created: u64,
            }
        },
    );

    let expected = quote! {
        #[allow(dead_code)]
        impl Profile {
            /// Shown on the profile page.
            pub fn bio(&self) -> &String {
                &self.__storage.bio
            }
            pub(crate) fn set_bio(&mut self, bio: String) {
                ::std::sync::Arc::make_mut(&mut self.__storage).bio = bio;
            }
            pub(crate) fn bio_mut(&mut self) -> &mut String {
                &mut ::std::sync::Arc::make_mut(&mut self.__storage).bio
            }
            pub(crate) fn created(&self) -> &u64 {
                &self.__storage.created
            }
        }
    };

    let impls = support::inherent_impls(&file);
    support::assert_item(impls[0], expected);
}

#[test]
fn test_no_tracked_fields() {
    let file = support::expand(
        quote!(),
        quote! {
            struct Plain {
                value: i32,
            }
        },
    );

    let expected = quote! {
        #[derive(Clone)]
        struct __PlainStorage {}
    };
    support::assert_item(support::item_struct(&file, "__PlainStorage").unwrap(), expected);
    // storage impl and initializer only
    assert_eq!(support::inherent_impls(&file).len(), 2);
}

#[test]
fn test_user_accessor_wins() {
    let file = support::expand_declaration(quote! {
        struct Gauge {
            #[cow_box(mutating)]
            level: u8,
        }

        impl Gauge {
            fn set_level(&mut self, level: u8) {
                ::std::sync::Arc::make_mut(&mut self.__storage).level = level.min(100);
            }
        }
    });

    let expected = quote! {
        #[allow(dead_code)]
        impl Gauge {
            fn level(&self) -> &u8 {
                &self.__storage.level
            }
            fn level_mut(&mut self) -> &mut u8 {
                &mut ::std::sync::Arc::make_mut(&mut self.__storage).level
            }
        }
    };

    let impls = support::inherent_impls(&file);
    support::assert_item(impls[0], expected);
    let user = impls[1].to_token_stream().to_string();
    assert!(user.contains("level . min (100)"));
}
