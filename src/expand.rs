use crate::attr::TypeOptions;
use crate::classify::{classify, Classification};
use crate::declaration::Declaration;
use crate::{accessor, init, storage};

use proc_macro2::{self, TokenStream};
use quote::quote;
use syn::{Item, Result};

/// Expands `#[cow_box(args)]` applied to `input`.
///
/// ```
/// use quote::quote;
///
/// let output: proc_macro2::TokenStream = cowbox::expand(
///     quote!(),
///     quote! {
///         struct Counter {
///             #[cow_box(mutating)]
///             value: u64,
///         }
///     },
/// );
/// assert!(output.to_string().contains("make_mut"));
/// ```
pub fn expand<TokenStream>(args: TokenStream, input: TokenStream) -> TokenStream
where
    TokenStream: Into<proc_macro2::TokenStream> + From<proc_macro2::TokenStream>,
{
    let output = expand_attribute(args.into(), input.into());
    output.unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Expands the body of `cow_box_decl! { ... }`: a struct followed by the
/// items that belong to it.
pub fn expand_declaration<TokenStream>(input: TokenStream) -> TokenStream
where
    TokenStream: Into<proc_macro2::TokenStream> + From<proc_macro2::TokenStream>,
{
    let output = expand_items(input.into());
    output.unwrap_or_else(syn::Error::into_compile_error).into()
}

fn expand_attribute(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let options = TypeOptions::from_args(args)?;
    let target: Item = syn::parse2(input)?;
    let classification = classify(target, Vec::new(), options)?;
    Ok(synthesize(&classification))
}

fn expand_items(input: TokenStream) -> Result<TokenStream> {
    let Declaration { target, rest } = syn::parse2(input)?;
    let classification = classify(target, rest, TypeOptions::default())?;
    Ok(synthesize(&classification))
}

fn synthesize(c: &Classification) -> TokenStream {
    let definition = definition(c);
    let accessors = accessor::accessors(c);
    let rest = &c.rest;
    let storage = storage::storage(c);
    let initializer = init::initializer(c);
    let conformances = c
        .conformances
        .iter()
        .filter(|conformance| c.wants(**conformance))
        .map(|conformance| conformance.synthesize(c));

    quote! {
        #definition
        #accessors
        #(#rest)*
        #storage
        #initializer
        #(#conformances)*
    }
}

fn definition(c: &Classification) -> TokenStream {
    let attrs = &c.attrs;
    let vis = &c.vis;
    let ident = &c.ident;
    let plain = c.plain().map(|field| {
        let attrs = &field.attrs;
        let vis = &field.vis;
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            #(#attrs)*
            #vis #ident: #ty
        }
    });
    let storage_field = storage::storage_field(c);

    quote! {
        #(#attrs)*
        #vis struct #ident {
            #(#plain,)*
            #storage_field,
        }
    }
}
