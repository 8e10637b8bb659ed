#![allow(dead_code)]

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{File, Item, ItemImpl, ItemStruct};

pub fn expand(args: TokenStream, input: TokenStream) -> File {
    let output: TokenStream = cowbox::expand(args, input);
    syn::parse2(output).unwrap()
}

pub fn expand_declaration(input: TokenStream) -> File {
    let output: TokenStream = cowbox::expand_declaration(input);
    syn::parse2(output).unwrap()
}

/// Compares after a round trip through syn on both sides, so that token
/// spacing does not depend on where the tokens came from.
pub fn assert_item(actual: impl ToTokens, expected: TokenStream) {
    let expected: Item = syn::parse2(expected).unwrap();
    assert_eq!(
        actual.to_token_stream().to_string(),
        expected.to_token_stream().to_string(),
    );
}

/// The impl of the trait whose last path segment is `name`.
pub fn trait_impl<'a>(file: &'a File, name: &str) -> Option<&'a ItemImpl> {
    file.items.iter().find_map(|item| match item {
        Item::Impl(imp) => {
            let (_, path, _) = imp.trait_.as_ref()?;
            if path.segments.last()?.ident == name {
                Some(imp)
            } else {
                None
            }
        }
        _ => None,
    })
}

/// Every impl block without a trait, in output order.
pub fn inherent_impls(file: &File) -> Vec<&ItemImpl> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(imp) if imp.trait_.is_none() => Some(imp),
            _ => None,
        })
        .collect()
}

pub fn item_struct<'a>(file: &'a File, name: &str) -> Option<&'a ItemStruct> {
    file.items.iter().find_map(|item| match item {
        Item::Struct(item) if item.ident == name => Some(item),
        _ => None,
    })
}

/// One line per top-level item, naming the struct or the implemented trait.
pub fn outline(file: &File) -> Vec<String> {
    file.items
        .iter()
        .map(|item| match item {
            Item::Struct(item) => format!("struct {}", item.ident),
            Item::Impl(imp) => match &imp.trait_ {
                Some((_, path, _)) => {
                    let name = &path.segments.last().unwrap().ident;
                    format!("impl {}", name)
                }
                None => format!("impl {}", imp.self_ty.to_token_stream()),
            },
            Item::Fn(item) => format!("fn {}", item.sig.ident),
            other => other.to_token_stream().to_string(),
        })
        .collect()
}

pub fn is_compile_error(output: &TokenStream, message: &str) -> bool {
    let output = output.to_string();
    output.contains("compile_error") && output.contains(message)
}
