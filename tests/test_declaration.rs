use quote::quote;

mod support;

#[test]
fn test_custom_members() {
    let file = support::expand_declaration(quote! {
        #[cow_box(init = "pub")]
        #[derive(Clone, PartialEq, Display, Debug)]
        pub struct Temperature {
            #[cow_box(mutating)]
            celsius: f64,
        }

        impl Temperature {
            pub fn new(celsius: f64) -> Self {
                Self {
                    __storage: ::std::sync::Arc::new(__TemperatureStorage::new(celsius.max(-273.15))),
                }
            }

            pub fn fahrenheit(&self) -> f64 {
                self.celsius() * 9.0 / 5.0 + 32.0
            }
        }

        impl ::std::fmt::Display for Temperature {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{} °C", self.celsius())
            }
        }

        fn freezing() -> Temperature {
            Temperature::new(0.0)
        }
    });

    assert_eq!(
        support::outline(&file),
        [
            "struct Temperature",
            "impl Temperature",
            "impl Temperature",
            "impl Display",
            "fn freezing",
            "struct __TemperatureStorage",
            "impl __TemperatureStorage",
            "impl PartialEq",
            "impl Debug",
        ],
    );

    // user-written new survives unchanged and no second one is generated
    let impls = support::inherent_impls(&file);
    assert_eq!(impls.len(), 3);
    let display = support::trait_impl(&file, "Display").unwrap();
    let expected = quote! {
        impl ::std::fmt::Display for Temperature {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{} °C", self.celsius())
            }
        }
    };
    support::assert_item(display, expected);

    let expected = quote! {
        #[derive(Clone)]
        pub struct Temperature {
            __storage: ::std::sync::Arc<__TemperatureStorage>,
        }
    };
    support::assert_item(support::item_struct(&file, "Temperature").unwrap(), expected);
}

#[test]
fn test_type_options_on_struct() {
    let file = support::expand_declaration(quote! {
        #[cow_box(init = "pub(crate)", keys(id))]
        #[derive(Serialize)]
        struct Tagged {
            #[cow_box(non_mutating)]
            id: u32,
            label: String,
        }
    });

    let impls = support::inherent_impls(&file);
    let expected = quote! {
        #[allow(dead_code)]
        impl Tagged {
            pub(crate) fn new(id: u32, label: String) -> Self {
                Self {
                    label: label,
                    __storage: ::std::sync::Arc::new(__TaggedStorage::new(id)),
                }
            }
        }
    };
    support::assert_item(impls[impls.len() - 1], expected);

    let serialize = support::trait_impl(&file, "Serialize").unwrap();
    let expected = quote! {
        impl ::serde::Serialize for Tagged {
            fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: ::serde::Serializer,
            {
                let mut __state = ::serde::Serializer::serialize_struct(__serializer, "Tagged", 1)?;
                ::serde::ser::SerializeStruct::serialize_field(&mut __state, "id", &self.__storage.id)?;
                ::serde::ser::SerializeStruct::end(__state)
            }
        }
    };
    support::assert_item(serialize, expected);
}

#[test]
fn test_impls_for_other_types() {
    let file = support::expand_declaration(quote! {
        #[derive(PartialEq)]
        struct Left {
            #[cow_box(mutating)]
            value: i32,
        }

        impl PartialEq for Right {
            fn eq(&self, _: &Self) -> bool {
                true
            }
        }
    });

    let ours = file.items.iter().filter(|item| match item {
        syn::Item::Impl(imp) => {
            imp.trait_.is_some()
                && quote::ToTokens::to_token_stream(&imp.self_ty).to_string() == "Left"
        }
        _ => false,
    });
    assert_eq!(ours.count(), 1);
}
