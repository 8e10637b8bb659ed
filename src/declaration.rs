use proc_macro2::Span;
use syn::parse::{Parse, ParseStream, Result};
use syn::{Error, Item};

/// The input of `cow_box_decl!`: the target type followed by the items that
/// belong to it.
pub(crate) struct Declaration {
    pub target: Item,
    pub rest: Vec<Item>,
}

impl Parse for Declaration {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::new(Span::call_site(), "expected a struct declaration"));
        }
        let target: Item = input.parse()?;
        let mut rest = Vec::new();
        while !input.is_empty() {
            rest.push(input.parse()?);
        }
        Ok(Declaration { target, rest })
    }
}

#[test]
fn test_parse_declaration() {
    use quote::quote;

    let declaration: Declaration = syn::parse2(quote! {
        struct Point {
            x: i32,
        }

        impl Point {
            fn norm(&self) -> i32 {
                self.x().abs()
            }
        }

        fn helper() {}
    })
    .unwrap();

    assert!(matches!(declaration.target, Item::Struct(_)));
    assert_eq!(declaration.rest.len(), 2);
    assert!(matches!(declaration.rest[0], Item::Impl(_)));
    assert!(matches!(declaration.rest[1], Item::Fn(_)));

    assert!(syn::parse2::<Declaration>(quote!()).is_err());
}
