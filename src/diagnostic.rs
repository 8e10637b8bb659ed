use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Error, Item};

pub const NOT_A_STRUCT: &str =
    "`#[cow_box]` can only be applied to a struct with named fields and no generic parameters";

pub const TRACKED_COMPUTED: &str =
    "`#[cow_box(...)]` markers can only be applied to stored fields of the struct";

pub(crate) fn not_a_struct(span: Span) -> Error {
    Error::new(span, NOT_A_STRUCT)
}

pub(crate) fn tracked_computed(span: Span) -> Error {
    Error::new(span, TRACKED_COMPUTED)
}

/// The keyword that introduces `item`.
pub(crate) fn introducer(item: &Item) -> Span {
    match item {
        Item::Struct(item) => item.struct_token.span,
        Item::Enum(item) => item.enum_token.span,
        Item::Union(item) => item.union_token.span,
        Item::Trait(item) => item.trait_token.span,
        Item::Fn(item) => item.sig.fn_token.span,
        Item::Impl(item) => item.impl_token.span,
        Item::Mod(item) => item.mod_token.span,
        Item::Type(item) => item.type_token.span,
        Item::Const(item) => item.const_token.span,
        Item::Static(item) => item.static_token.span,
        other => other.span(),
    }
}
