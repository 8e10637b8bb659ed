use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Error, LitStr, Result, Visibility};

/// Visibility of the generated initializer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum InitVisibility {
    /// Follows the struct, but never wider than `pub(crate)`.
    #[default]
    Inferred,
    /// `init = "pub(crate)"`
    WithCrate,
    /// `init = "pub"`
    WithPublic,
}

impl InitVisibility {
    pub fn parse(lit: &LitStr) -> Result<Self> {
        match lit.parse::<Visibility>()? {
            Visibility::Public(_) => Ok(InitVisibility::WithPublic),
            Visibility::Restricted(restricted)
                if restricted.in_token.is_none() && restricted.path.is_ident("crate") =>
            {
                Ok(InitVisibility::WithCrate)
            }
            _ => Err(Error::new(
                lit.span(),
                "expected `init = \"pub\"` or `init = \"pub(crate)\"`",
            )),
        }
    }

    pub fn resolve(self, type_vis: &Visibility) -> TokenStream {
        match self {
            InitVisibility::Inferred => match type_vis {
                Visibility::Public(_) => quote!(pub(crate)),
                _ => type_vis.to_token_stream(),
            },
            InitVisibility::WithCrate => quote!(pub(crate)),
            InitVisibility::WithPublic => quote!(pub),
        }
    }
}

#[test]
fn test_resolve() {
    use syn::parse_quote;

    let public: Visibility = parse_quote!(pub);
    let krate: Visibility = parse_quote!(pub(crate));
    let parent: Visibility = parse_quote!(pub(super));
    let private = Visibility::Inherited;

    let inferred = InitVisibility::Inferred;
    assert_eq!(inferred.resolve(&public).to_string(), "pub (crate)");
    assert_eq!(inferred.resolve(&krate).to_string(), "pub (crate)");
    assert_eq!(inferred.resolve(&parent).to_string(), "pub (super)");
    assert!(inferred.resolve(&private).is_empty());

    assert_eq!(InitVisibility::WithCrate.resolve(&private).to_string(), "pub (crate)");
    assert_eq!(InitVisibility::WithPublic.resolve(&krate).to_string(), "pub");
}

#[test]
fn test_parse() {
    use proc_macro2::Span;

    let parse = |s: &str| InitVisibility::parse(&LitStr::new(s, Span::call_site()));
    assert_eq!(parse("pub").unwrap(), InitVisibility::WithPublic);
    assert_eq!(parse("pub(crate)").unwrap(), InitVisibility::WithCrate);
    assert!(parse("pub(super)").is_err());
    assert!(parse("").is_err());
}
