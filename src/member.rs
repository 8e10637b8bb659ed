use crate::attr::Tracking;
use crate::print::Print;
use proc_macro2::TokenStream;
use quote::quote;
use ref_cast::RefCast;
use std::fmt::{self, Debug};
use syn::ext::IdentExt;
use syn::{Attribute, Expr, Ident, Type, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MemberKind {
    MutatingTracked,
    NonMutatingTracked,
    PlainStored,
    Computed,
    Static,
    Special(Special),
}

/// User-written members that replace a synthesized one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Special {
    Init,
    Equals,
    EqMarker,
    Hash,
    Debug,
    Description,
    Decode,
    Encode,
    Identical,
}

/// A stored field of the target struct.
#[derive(Clone)]
pub(crate) struct Field {
    pub kind: MemberKind,
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub ty: Type,
    pub default: Option<Expr>,
    pub setter: Option<Visibility>,
    pub rename: Option<String>,
}

impl Field {
    pub fn new(ident: Ident, field: &syn::Field, tracking: Tracking) -> Self {
        let kind = match tracking {
            Tracking::Mutating => MemberKind::MutatingTracked,
            Tracking::NonMutating => MemberKind::NonMutatingTracked,
            Tracking::Plain => MemberKind::PlainStored,
        };
        Field {
            kind,
            attrs: Vec::new(),
            vis: field.vis.clone(),
            ident,
            ty: field.ty.clone(),
            default: None,
            setter: None,
            rename: None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::MutatingTracked | MemberKind::NonMutatingTracked
        )
    }

    pub fn is_mutating(&self) -> bool {
        self.kind == MemberKind::MutatingTracked
    }

    /// Name as users see it, without any `r#` prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Reads the current value from `receiver`, which is `self` or `other`.
    pub fn read(&self, receiver: &TokenStream) -> TokenStream {
        let ident = &self.ident;
        if self.is_tracked() {
            quote!(#receiver.__storage.#ident)
        } else {
            quote!(#receiver.#ident)
        }
    }

    /// Serialized key when no explicit one is given.
    pub fn key(&self) -> String {
        self.rename.clone().unwrap_or_else(|| self.name())
    }

    pub fn setter_vis(&self) -> &Visibility {
        self.setter.as_ref().unwrap_or(&self.vis)
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("vis", Print::ref_cast(&self.vis))
            .field("ident", Print::ref_cast(&self.ident))
            .field("ty", Print::ref_cast(&self.ty))
            .field("default", Print::ref_cast(&self.default))
            .finish()
    }
}

/// A member of the declaration that is not a stored field.
#[derive(Clone)]
pub(crate) struct Member {
    pub kind: MemberKind,
    pub ident: Option<Ident>,
}

impl Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Member")
            .field("kind", &self.kind)
            .field("ident", Print::ref_cast(&self.ident))
            .finish()
    }
}

#[test]
fn test_field_debug() {
    use syn::parse_quote;

    let field: syn::Field = parse_quote!(pub r#type: Option<String>);
    let ident = field.ident.clone().unwrap();
    let mut field = Field::new(ident, &field, Tracking::Mutating);
    field.default = Some(parse_quote!(None));

    assert_eq!(field.name(), "type");
    assert_eq!(field.key(), "type");
    assert!(field.is_tracked());
    assert!(field.is_mutating());
    assert_eq!(
        format!("{:?}", field),
        "Field { kind: MutatingTracked, vis: `pub`, ident: `r#type`, \
         ty: `Option < String >`, default: `None` }",
    );
}
