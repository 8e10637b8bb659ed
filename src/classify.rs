use crate::attr::{self, CodingKey, FieldAttrs, TypeOptions};
use crate::conformance::{self, Conformance};
use crate::diagnostic;
use crate::member::{Field, Member, MemberKind, Special};
use crate::print::Print;
use quote::format_ident;
use ref_cast::RefCast;
use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use syn::spanned::Spanned;
use syn::{
    parse_quote, Attribute, Error, Fields, Ident, ImplItem, Item, ItemImpl, Path, Result, Type,
    Visibility,
};

/// Everything the synthesizers need to know about one target struct.
pub(crate) struct Classification {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub fields: Vec<Field>,
    pub members: Vec<Member>,
    pub rest: Vec<Item>,
    pub conformances: BTreeSet<Conformance>,
    pub method_names: BTreeSet<String>,
    pub options: TypeOptions,
}

pub(crate) fn classify(
    target: Item,
    rest: Vec<Item>,
    mut options: TypeOptions,
) -> Result<Classification> {
    let item = match target {
        Item::Struct(item) => item,
        other => return Err(diagnostic::not_a_struct(diagnostic::introducer(&other))),
    };
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(diagnostic::not_a_struct(item.struct_token.span));
    }
    let named = match item.fields {
        Fields::Named(named) => named,
        Fields::Unnamed(_) | Fields::Unit => {
            return Err(diagnostic::not_a_struct(item.struct_token.span));
        }
    };

    options.read_attrs(&item.attrs)?;
    attr::check_type_serde(&item.attrs)?;
    let (attrs, conformances) = conformance::take_derives(attr::strip(&item.attrs))?;

    let mut fields = Vec::new();
    for field in &named.named {
        let ident = match &field.ident {
            Some(ident) => ident.clone(),
            None => return Err(diagnostic::not_a_struct(item.struct_token.span)),
        };
        let parsed = FieldAttrs::parse(&field.attrs)?;
        let mut classified = Field::new(ident, field, parsed.tracking);
        classified.attrs = attr::strip(&field.attrs);
        classified.default = parsed.default;
        classified.setter = parsed.setter;
        classified.rename = parsed.rename;
        fields.push(classified);
    }

    if let Some(keys) = &options.keys {
        let mut seen = BTreeSet::new();
        for key in keys {
            if !fields.iter().any(|field| field.ident == key.field) {
                let message = format!("no field named `{}`", key.field);
                return Err(Error::new(key.field.span(), message));
            }
            if !seen.insert(key.field.to_string()) {
                let message = format!("duplicate key for field `{}`", key.field);
                return Err(Error::new(key.field.span(), message));
            }
        }
    }

    let mut members = Vec::new();
    let mut method_names = BTreeSet::new();
    for rest_item in &rest {
        let imp = match rest_item {
            Item::Impl(imp) if implements(imp, &item.ident) => imp,
            _ => continue,
        };
        match &imp.trait_ {
            None => classify_inherent(imp, &mut members, &mut method_names)?,
            Some((_, path, _)) => {
                if let Some(conformance) = Conformance::from_path(path) {
                    members.push(Member {
                        kind: MemberKind::Special(conformance.special()),
                        ident: None,
                    });
                }
            }
        }
    }

    let classification = Classification {
        attrs,
        vis: item.vis,
        ident: item.ident,
        fields,
        members,
        rest,
        conformances,
        method_names,
        options,
    };
    check_key_names(&classification)?;
    Ok(classification)
}

/// Two fields may not serialize under the same key.
fn check_key_names(c: &Classification) -> Result<()> {
    if !c.conformances.contains(&Conformance::Serialize)
        && !c.conformances.contains(&Conformance::Deserialize)
    {
        return Ok(());
    }
    let mut seen = BTreeSet::new();
    for (field, key) in c.coding_keys() {
        if !seen.insert(key.clone()) {
            let message = format!("duplicate serialized key `{}`", key);
            return Err(Error::new(field.ident.span(), message));
        }
    }
    Ok(())
}

fn classify_inherent(
    imp: &ItemImpl,
    members: &mut Vec<Member>,
    method_names: &mut BTreeSet<String>,
) -> Result<()> {
    for impl_item in &imp.items {
        let (attrs, member) = match impl_item {
            ImplItem::Fn(f) => {
                let ident = f.sig.ident.clone();
                method_names.insert(ident.to_string());
                let kind = if f.sig.receiver().is_some() {
                    MemberKind::Computed
                } else if ident == "new" {
                    MemberKind::Special(Special::Init)
                } else {
                    MemberKind::Static
                };
                let member = Member {
                    kind,
                    ident: Some(ident),
                };
                (&f.attrs, member)
            }
            ImplItem::Const(c) => {
                let member = Member {
                    kind: MemberKind::Static,
                    ident: Some(c.ident.clone()),
                };
                (&c.attrs, member)
            }
            ImplItem::Type(t) => {
                let member = Member {
                    kind: MemberKind::Static,
                    ident: Some(t.ident.clone()),
                };
                (&t.attrs, member)
            }
            _ => continue,
        };
        if let Some(marker) = attrs.iter().find(|attr| attr::is_cow_box(attr)) {
            return Err(diagnostic::tracked_computed(marker.span()));
        }
        members.push(member);
    }
    Ok(())
}

/// Whether `imp` is an impl block for the type named `ident`.
fn implements(imp: &ItemImpl, ident: &Ident) -> bool {
    match &*imp.self_ty {
        Type::Path(ty) => {
            ty.qself.is_none()
                && ty
                    .path
                    .segments
                    .last()
                    .map_or(false, |segment| segment.ident == *ident && segment.arguments.is_none())
        }
        _ => false,
    }
}

impl Debug for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Classification")
            .field("vis", Print::ref_cast(&self.vis))
            .field("ident", Print::ref_cast(&self.ident))
            .field("fields", &self.fields)
            .field("members", &self.members)
            .field("conformances", &self.conformances)
            .field("init", &self.options.init)
            .field("keys", &self.options.keys)
            .finish()
    }
}

impl Classification {
    pub fn non_mutating(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| field.kind == MemberKind::NonMutatingTracked)
    }

    pub fn mutating(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| field.kind == MemberKind::MutatingTracked)
    }

    /// Storage fields, in declaration order.
    pub fn tracked(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_tracked())
    }

    pub fn plain(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| field.kind == MemberKind::PlainStored)
    }

    pub fn plain_required(&self) -> impl Iterator<Item = &Field> {
        self.plain().filter(|field| field.default.is_none())
    }

    #[cfg(test)]
    pub fn plain_defaulted(&self) -> impl Iterator<Item = &Field> {
        self.plain().filter(|field| field.default.is_some())
    }

    /// Non-mutating, then mutating, then plain fields.
    pub fn described(&self) -> impl Iterator<Item = &Field> {
        self.non_mutating().chain(self.mutating()).chain(self.plain())
    }

    pub fn has(&self, special: Special) -> bool {
        self.members
            .iter()
            .any(|member| member.kind == MemberKind::Special(special))
    }

    /// Listed in the derive list and not already written by the user.
    pub fn wants(&self, conformance: Conformance) -> bool {
        self.conformances.contains(&conformance) && !self.has(conformance.special())
    }

    pub fn has_method(&self, name: &Ident) -> bool {
        self.method_names.contains(&name.to_string())
    }

    pub fn storage_ident(&self) -> Ident {
        format_ident!("__{}Storage", self.ident)
    }

    pub fn krate(&self) -> Path {
        match &self.options.krate {
            Some(krate) => krate.clone(),
            None => parse_quote!(::cowbox),
        }
    }

    /// Fields paired with their serialized key, in encoding order.
    pub fn coding_keys(&self) -> Vec<(&Field, String)> {
        match &self.options.keys {
            Some(keys) => keys
                .iter()
                .filter_map(|CodingKey { field, name }| {
                    let field = self.fields.iter().find(|f| f.ident == *field)?;
                    let key = name.clone().unwrap_or_else(|| field.key());
                    Some((field, key))
                })
                .collect(),
            None => self.described().map(|field| (field, field.key())).collect(),
        }
    }
}

#[cfg(test)]
fn classify_tokens(input: proc_macro2::TokenStream) -> Result<Classification> {
    let declaration: crate::declaration::Declaration = syn::parse2(input)?;
    classify(declaration.target, declaration.rest, TypeOptions::default())
}

#[test]
fn test_partitions() {
    use quote::quote;

    let classification = classify_tokens(quote! {
        pub struct Account {
            #[cow_box(non_mutating)]
            pub id: u64,
            #[cow_box(mutating)]
            pub owner: String,
            pub active: bool,
            #[cow_box(non_mutating, default = "1")]
            pub version: u32,
            #[cow_box(default = "Vec::new()")]
            pub notes: Vec<String>,
            #[cow_box(mutating, default = "0")]
            pub balance: i64,
        }
    })
    .unwrap();

    let names = |fields: Vec<&Field>| -> Vec<String> {
        fields.into_iter().map(Field::name).collect()
    };

    assert_eq!(names(classification.non_mutating().collect()), ["id", "version"]);
    assert_eq!(names(classification.mutating().collect()), ["owner", "balance"]);
    assert_eq!(
        names(classification.tracked().collect()),
        ["id", "owner", "version", "balance"],
    );
    assert_eq!(names(classification.plain_required().collect()), ["active"]);
    assert_eq!(names(classification.plain_defaulted().collect()), ["notes"]);
    assert_eq!(
        names(classification.described().collect()),
        ["id", "version", "owner", "balance", "active", "notes"],
    );
    assert_eq!(classification.storage_ident(), "__AccountStorage");
}

#[test]
fn test_members() {
    use quote::quote;

    let classification = classify_tokens(quote! {
        #[derive(Clone, PartialEq, Display)]
        struct Account {
            #[cow_box(mutating)]
            owner: String,
        }

        impl Account {
            const KIND: &'static str = "account";

            fn new(owner: String) -> Self {
                unimplemented!()
            }

            fn shout(&self) -> String {
                self.owner().to_uppercase()
            }

            fn zero() -> i64 {
                0
            }
        }

        impl PartialEq for Account {
            fn eq(&self, other: &Self) -> bool {
                self.owner() == other.owner()
            }
        }

        impl std::fmt::Debug for Other {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                Ok(())
            }
        }
    })
    .unwrap();

    let kinds: Vec<MemberKind> = classification.members.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [
            MemberKind::Static,
            MemberKind::Special(Special::Init),
            MemberKind::Computed,
            MemberKind::Static,
            MemberKind::Special(Special::Equals),
        ],
    );
    assert!(classification.has(Special::Init));
    assert!(classification.has(Special::Equals));
    assert!(!classification.has(Special::Debug));
    assert!(!classification.wants(Conformance::PartialEq));
    assert!(classification.wants(Conformance::Display));
    assert!(classification.has_method(&format_ident!("shout")));
    assert_eq!(classification.rest.len(), 3);
}

#[test]
fn test_rejects() {
    use crate::diagnostic::{NOT_A_STRUCT, TRACKED_COMPUTED};
    use quote::quote;

    let rejected = [
        quote!(enum Shape { Circle, Square }),
        quote!(union Bits { f: f32, u: u32 }),
        quote!(struct Pair(u8, u8);),
        quote!(struct Unit;),
        quote!(struct Wrapper<T> { value: T }),
        quote!(trait Shape {}),
    ];
    for input in rejected {
        let err = classify_tokens(input).err().unwrap();
        assert_eq!(err.to_string(), NOT_A_STRUCT);
    }

    let err = classify_tokens(quote! {
        struct Account {
            owner: String,
        }

        impl Account {
            #[cow_box(mutating)]
            fn balance(&self) -> i64 {
                0
            }
        }
    })
    .err()
    .unwrap();
    assert_eq!(err.to_string(), TRACKED_COMPUTED);
}

#[test]
fn test_coding_keys() {
    use quote::quote;

    let declaration: crate::declaration::Declaration = syn::parse2(quote! {
        struct Account {
            #[cow_box(mutating)]
            owner: String,
            #[cow_box(non_mutating)]
            id: u64,
        }
    })
    .unwrap();
    let options = TypeOptions::from_args(quote!(keys(owner = "holder"))).unwrap();
    let classification = classify(declaration.target, declaration.rest, options).unwrap();
    let keys: Vec<(String, String)> = classification
        .coding_keys()
        .into_iter()
        .map(|(field, key)| (field.name(), key))
        .collect();
    assert_eq!(keys, [("owner".to_owned(), "holder".to_owned())]);

    let declaration: crate::declaration::Declaration = syn::parse2(quote! {
        struct Account {
            #[cow_box(mutating)]
            owner: String,
        }
    })
    .unwrap();
    let options = TypeOptions::from_args(quote!(keys(missing))).unwrap();
    let err = classify(declaration.target, declaration.rest, options)
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "no field named `missing`");
}

#[test]
fn test_key_conflicts() {
    use quote::quote;

    let classify_with = |args: proc_macro2::TokenStream, input: proc_macro2::TokenStream| {
        let declaration: crate::declaration::Declaration = syn::parse2(input).unwrap();
        let options = TypeOptions::from_args(args).unwrap();
        classify(declaration.target, declaration.rest, options)
    };

    let err = classify_with(
        quote!(keys(id, id)),
        quote! {
            struct Account {
                #[cow_box(non_mutating)]
                id: u64,
            }
        },
    )
    .err()
    .unwrap();
    assert_eq!(err.to_string(), "duplicate key for field `id`");

    let err = classify_with(
        quote!(),
        quote! {
            #[derive(Serialize)]
            struct Account {
                #[cow_box(non_mutating)]
                id: u64,
                #[serde(rename = "id")]
                legacy_id: u64,
            }
        },
    )
    .err()
    .unwrap();
    assert_eq!(err.to_string(), "duplicate serialized key `id`");

    let classification = classify_with(
        quote!(keys(kind, id = "identifier")),
        quote! {
            struct Account {
                #[cow_box(non_mutating)]
                id: u64,
                #[serde(rename = "type")]
                kind: String,
            }
        },
    )
    .unwrap();
    let keys: Vec<String> = classification
        .coding_keys()
        .into_iter()
        .map(|(_, key)| key)
        .collect();
    assert_eq!(keys, ["type", "identifier"]);

    let err = classify_with(
        quote!(),
        quote! {
            #[serde(rename_all = "camelCase")]
            struct Account {
                id: u64,
            }
        },
    )
    .err()
    .unwrap();
    assert!(err.to_string().starts_with("`#[serde(...)]` is not supported"));
}
