use crate::print::Print;
use crate::visibility::InitVisibility;
use proc_macro2::{Span, TokenStream};
use ref_cast::RefCast;
use std::fmt::{self, Debug};
use syn::meta::ParseNestedMeta;
use syn::parse::{Parse, ParseStream, Parser};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{parenthesized, Attribute, Error, Expr, Ident, LitStr, Path, Result, Token, Visibility};

pub(crate) const ATTR: &str = "cow_box";

pub(crate) fn is_cow_box(attr: &Attribute) -> bool {
    attr.path().is_ident(ATTR)
}

pub(crate) fn is_doc(attr: &Attribute) -> bool {
    attr.path().is_ident("doc")
}

/// Serde helper attributes have no derive left to register them once the
/// serde entries are taken out of the derive list.
pub(crate) fn is_serde(attr: &Attribute) -> bool {
    attr.path().is_ident("serde")
}

/// Attributes that survive on the rewritten item.
pub(crate) fn strip(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| !is_cow_box(attr) && !is_serde(attr))
        .cloned()
        .collect()
}

/// Rejects `#[serde(...)]` on the struct itself.
pub(crate) fn check_type_serde(attrs: &[Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| is_serde(attr)) {
        Some(attr) => Err(Error::new(
            attr.span(),
            "`#[serde(...)]` is not supported on a `#[cow_box]` struct, use `#[cow_box(keys(...))]`",
        )),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tracking {
    Plain,
    Mutating,
    NonMutating,
}

/// The `#[cow_box(...)]` options of one field.
pub(crate) struct FieldAttrs {
    pub tracking: Tracking,
    pub default: Option<Expr>,
    pub setter: Option<Visibility>,
    /// From `#[serde(rename = "...")]`.
    pub rename: Option<String>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut tracking = None;
        let mut default = None;
        let mut setter = None;
        let mut rename = None;

        for attr in attrs.iter().filter(|attr| is_serde(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error(
                        "only `#[serde(rename = \"...\")]` is supported on fields of a `#[cow_box]` struct",
                    ))
                }
            })?;
        }

        for attr in attrs.iter().filter(|attr| is_cow_box(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("mutating") {
                    set_tracking(&mut tracking, Tracking::Mutating, &meta)
                } else if meta.path.is_ident("non_mutating") {
                    set_tracking(&mut tracking, Tracking::NonMutating, &meta)
                } else if meta.path.is_ident("default") {
                    let lit: LitStr = meta.value()?.parse()?;
                    default = Some(lit.parse::<Expr>()?);
                    Ok(())
                } else if meta.path.is_ident("set") {
                    let lit: LitStr = meta.value()?.parse()?;
                    setter = Some((lit.parse::<Visibility>()?, lit.span()));
                    Ok(())
                } else {
                    Err(meta.error(
                        "expected `mutating`, `non_mutating`, `default` or `set`",
                    ))
                }
            })?;
        }

        let tracking = tracking.map_or(Tracking::Plain, |(tracking, _)| tracking);
        let setter = match setter {
            Some((_, span)) if tracking != Tracking::Mutating => {
                return Err(Error::new(span, "`set` is only allowed on `mutating` fields"));
            }
            Some((vis, _)) => Some(vis),
            None => None,
        };

        Ok(FieldAttrs {
            tracking,
            default,
            setter,
            rename,
        })
    }
}

fn set_tracking(
    slot: &mut Option<(Tracking, Span)>,
    tracking: Tracking,
    meta: &ParseNestedMeta,
) -> Result<()> {
    if let Some((previous, _)) = slot {
        let message = if *previous == tracking {
            "duplicate tracking marker"
        } else {
            "a field is either `mutating` or `non_mutating`, not both"
        };
        return Err(meta.error(message));
    }
    *slot = Some((tracking, meta.path.span()));
    Ok(())
}

/// One entry of an explicit `keys(...)` list. Without `= "raw"` the key is
/// the field's serde rename or its name.
#[derive(Clone)]
pub(crate) struct CodingKey {
    pub field: Ident,
    pub name: Option<String>,
}

impl Parse for CodingKey {
    fn parse(input: ParseStream) -> Result<Self> {
        let field: Ident = input.parse()?;
        let name = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?.value())
        } else {
            None
        };
        Ok(CodingKey { field, name })
    }
}

impl Debug for CodingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CodingKey")
            .field("field", Print::ref_cast(&self.field))
            .field("name", &self.name)
            .finish()
    }
}

/// Type level options, from the attribute arguments or from a `#[cow_box(...)]`
/// attribute on the struct inside `cow_box_decl!`.
#[derive(Default)]
pub(crate) struct TypeOptions {
    pub init: InitVisibility,
    pub keys: Option<Vec<CodingKey>>,
    pub krate: Option<Path>,
}

impl TypeOptions {
    pub fn from_args(args: TokenStream) -> Result<Self> {
        let mut options = TypeOptions::default();
        syn::meta::parser(|meta| options.parse_meta(meta)).parse2(args)?;
        Ok(options)
    }

    /// Picks up `#[cow_box(...)]` attributes written on the struct itself.
    pub fn read_attrs(&mut self, attrs: &[Attribute]) -> Result<()> {
        for attr in attrs.iter().filter(|attr| is_cow_box(attr)) {
            if let syn::Meta::Path(_) = attr.meta {
                continue;
            }
            attr.parse_nested_meta(|meta| self.parse_meta(meta))?;
        }
        Ok(())
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> Result<()> {
        if meta.path.is_ident("init") {
            let lit: LitStr = meta.value()?.parse()?;
            self.init = InitVisibility::parse(&lit)?;
            Ok(())
        } else if meta.path.is_ident("keys") {
            let content;
            parenthesized!(content in meta.input);
            let keys = Punctuated::<CodingKey, Token![,]>::parse_terminated(&content)?;
            self.keys = Some(keys.into_iter().collect());
            Ok(())
        } else if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            self.krate = Some(lit.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `init`, `keys` or `crate`"))
        }
    }
}

#[test]
fn test_field_attrs() {
    use syn::parse_quote;

    let attrs: Vec<Attribute> = vec![
        parse_quote!(#[doc = " Number of visits."]),
        parse_quote!(#[cow_box(mutating, default = "0", set = "pub(crate)")]),
    ];
    let parsed = FieldAttrs::parse(&attrs).unwrap();
    assert_eq!(parsed.tracking, Tracking::Mutating);
    assert_eq!(format!("{:?}", Print::ref_cast(&parsed.default)), "`0`");
    assert_eq!(format!("{:?}", Print::ref_cast(&parsed.setter)), "`pub (crate)`");

    let attrs: Vec<Attribute> = vec![parse_quote!(#[allow(unused)])];
    let parsed = FieldAttrs::parse(&attrs).unwrap();
    assert_eq!(parsed.tracking, Tracking::Plain);
    assert!(parsed.default.is_none());
}

#[test]
fn test_field_attrs_conflict() {
    use syn::parse_quote;

    let attrs: Vec<Attribute> = vec![parse_quote!(#[cow_box(mutating, non_mutating)])];
    let err = FieldAttrs::parse(&attrs).err().unwrap();
    assert_eq!(
        err.to_string(),
        "a field is either `mutating` or `non_mutating`, not both",
    );

    let attrs: Vec<Attribute> = vec![parse_quote!(#[cow_box(non_mutating, set = "")])];
    let err = FieldAttrs::parse(&attrs).err().unwrap();
    assert_eq!(err.to_string(), "`set` is only allowed on `mutating` fields");
}

#[test]
fn test_type_options() {
    use quote::quote;

    let options = TypeOptions::from_args(quote! {
        init = "pub", keys(id, name = "full_name"), crate = "my::cowbox"
    })
    .unwrap();
    assert_eq!(options.init, InitVisibility::WithPublic);
    let keys = options.keys.unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].field, "id");
    assert!(keys[0].name.is_none());
    assert_eq!(keys[1].field, "name");
    assert_eq!(keys[1].name.as_deref(), Some("full_name"));
    assert_eq!(
        format!("{:?}", Print::ref_cast(&options.krate)),
        "`my :: cowbox`",
    );

    let options = TypeOptions::from_args(quote!(keys())).unwrap();
    assert!(options.keys.unwrap().is_empty());
    assert_eq!(options.init, InitVisibility::Inferred);

    let options = TypeOptions::from_args(quote!(keys(r#type,), init = "pub(crate)")).unwrap();
    assert_eq!(options.keys.unwrap()[0].field, "r#type");
    assert_eq!(options.init, InitVisibility::WithCrate);

    assert!(TypeOptions::from_args(quote!(keys(a::b))).is_err());
}

#[test]
fn test_serde_rename() {
    use syn::parse_quote;

    let attrs: Vec<Attribute> = vec![
        parse_quote!(#[serde(rename = "kind")]),
        parse_quote!(#[cow_box(mutating)]),
    ];
    let parsed = FieldAttrs::parse(&attrs).unwrap();
    assert_eq!(parsed.rename.as_deref(), Some("kind"));
    assert!(strip(&attrs).is_empty());

    let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(skip)])];
    let err = FieldAttrs::parse(&attrs).err().unwrap();
    assert_eq!(
        err.to_string(),
        "only `#[serde(rename = \"...\")]` is supported on fields of a `#[cow_box]` struct",
    );

    let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(deny_unknown_fields)])];
    assert!(check_type_serde(&attrs).is_err());
}
