use cowbox::{NOT_A_STRUCT, TRACKED_COMPUTED};
use proc_macro2::TokenStream;
use quote::quote;

mod support;

#[test]
fn test_not_a_struct() {
    let inputs = [
        quote! {
            enum Direction {
                North,
                South,
            }
        },
        quote! {
            union Bits {
                int: u32,
                float: f32,
            }
        },
        quote!(struct Meters(f64);),
        quote!(struct Marker;),
        quote! {
            struct Wrapper<T> {
                #[cow_box(mutating)]
                inner: T,
            }
        },
        quote! {
            struct Bounded where Self: Sized {
                value: u8,
            }
        },
        quote!(fn helper() {}),
    ];

    for input in inputs {
        let output: TokenStream = cowbox::expand(quote!(), input);
        let file: syn::File = syn::parse2(output.clone()).unwrap();
        assert_eq!(file.items.len(), 1, "{}", output);
        assert!(support::is_compile_error(&output, NOT_A_STRUCT), "{}", output);
    }
}

#[test]
fn test_tracked_computed() {
    let output: TokenStream = cowbox::expand_declaration(quote! {
        struct Invoice {
            #[cow_box(mutating)]
            lines: Vec<u32>,
        }

        impl Invoice {
            #[cow_box(non_mutating)]
            fn total(&self) -> u32 {
                self.lines().iter().sum()
            }
        }
    });
    assert!(support::is_compile_error(&output, TRACKED_COMPUTED));
}

#[test]
fn test_bad_markers() {
    let cases = [
        (
            quote! {
                struct Invoice {
                    #[cow_box(mutating)]
                    #[cow_box(non_mutating)]
                    total: u32,
                }
            },
            "a field is either `mutating` or `non_mutating`, not both",
        ),
        (
            quote! {
                struct Invoice {
                    #[cow_box(mutating, mutating)]
                    total: u32,
                }
            },
            "duplicate tracking marker",
        ),
        (
            quote! {
                struct Invoice {
                    #[cow_box(frozen)]
                    total: u32,
                }
            },
            "expected `mutating`, `non_mutating`, `default` or `set`",
        ),
        (
            quote! {
                struct Invoice {
                    #[cow_box(set = "pub")]
                    total: u32,
                }
            },
            "`set` is only allowed on `mutating` fields",
        ),
    ];

    for (input, message) in cases {
        let output: TokenStream = cowbox::expand(quote!(), input);
        assert!(support::is_compile_error(&output, message), "{}", output);
    }

    let output: TokenStream = cowbox::expand(
        quote!(inline),
        quote! {
            struct Invoice {
                total: u32,
            }
        },
    );
    assert!(support::is_compile_error(&output, "expected `init`, `keys` or `crate`"));
}

#[test]
fn test_empty_declaration() {
    let output: TokenStream = cowbox::expand_declaration(quote!());
    assert!(support::is_compile_error(&output, "expected a struct declaration"));
}
