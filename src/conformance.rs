use crate::classify::Classification;
use crate::member::Special;
use crate::{codable, describe, equatable, identical};
use proc_macro2::TokenStream;
use std::collections::BTreeSet;
use syn::punctuated::Punctuated;
use syn::{parse_quote, Attribute, Ident, Path, Result, Token};

/// Derive entries that the expansion implements itself, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Conformance {
    CowBox,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Display,
    Serialize,
    Deserialize,
}

impl Conformance {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        Some(match ident.to_string().as_str() {
            "CowBox" => Conformance::CowBox,
            "PartialEq" => Conformance::PartialEq,
            "Eq" => Conformance::Eq,
            "Hash" => Conformance::Hash,
            "Debug" => Conformance::Debug,
            "Display" => Conformance::Display,
            "Serialize" => Conformance::Serialize,
            "Deserialize" => Conformance::Deserialize,
            _ => return None,
        })
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.segments
            .last()
            .and_then(|segment| Conformance::from_ident(&segment.ident))
    }

    /// The user-written member that suppresses this conformance.
    pub fn special(self) -> Special {
        match self {
            Conformance::CowBox => Special::Identical,
            Conformance::PartialEq => Special::Equals,
            Conformance::Eq => Special::EqMarker,
            Conformance::Hash => Special::Hash,
            Conformance::Debug => Special::Debug,
            Conformance::Display => Special::Description,
            Conformance::Serialize => Special::Encode,
            Conformance::Deserialize => Special::Decode,
        }
    }

    pub fn synthesize(self, c: &Classification) -> TokenStream {
        match self {
            Conformance::CowBox => identical::cow_box(c),
            Conformance::PartialEq => equatable::partial_eq(c),
            Conformance::Eq => equatable::eq(c),
            Conformance::Hash => equatable::hash(c),
            Conformance::Debug => describe::debug(c),
            Conformance::Display => describe::display(c),
            Conformance::Serialize => codable::serialize(c),
            Conformance::Deserialize => codable::deserialize(c),
        }
    }
}

/// Splits the recognized entries out of every `#[derive(...)]`. Derive
/// attributes left empty are dropped.
pub(crate) fn take_derives(
    attrs: Vec<Attribute>,
) -> Result<(Vec<Attribute>, BTreeSet<Conformance>)> {
    let mut kept = Vec::new();
    let mut conformances = BTreeSet::new();

    for attr in attrs {
        if !attr.path().is_ident("derive") {
            kept.push(attr);
            continue;
        }
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        let mut rest = Vec::new();
        for path in paths {
            match Conformance::from_path(&path) {
                Some(conformance) => {
                    conformances.insert(conformance);
                }
                None => rest.push(path),
            }
        }
        if !rest.is_empty() {
            kept.push(parse_quote!(#[derive(#(#rest),*)]));
        }
    }

    Ok((kept, conformances))
}

#[test]
fn test_take_derives() {
    use quote::quote;

    let attrs: Vec<Attribute> = vec![
        parse_quote!(#[derive(Clone, PartialEq, serde::Serialize)]),
        parse_quote!(#[repr(C)]),
        parse_quote!(#[derive(cowbox::CowBox, Display)]),
    ];
    let (kept, conformances) = take_derives(attrs).unwrap();

    let expected = quote! {
        #[derive(Clone)]
        #[repr(C)]
    };
    assert_eq!(quote!(#(#kept)*).to_string(), expected.to_string());

    let conformances: Vec<_> = conformances.into_iter().collect();
    assert_eq!(
        conformances,
        [
            Conformance::CowBox,
            Conformance::PartialEq,
            Conformance::Display,
            Conformance::Serialize,
        ],
    );
}
