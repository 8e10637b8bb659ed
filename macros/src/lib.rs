//! Procedural macros for the `cowbox` crate. See its documentation for the
//! full description of the generated code.

extern crate proc_macro;

use proc_macro::TokenStream;

/// Moves the `#[cow_box(mutating)]` and `#[cow_box(non_mutating)]` fields of
/// a struct into shared copy-on-write storage.
///
/// ```
/// use cowbox_macros::cow_box;
///
/// #[cow_box]
/// #[derive(Clone)]
/// struct Counter {
///     #[cow_box(mutating)]
///     value: u64,
/// }
///
/// let mut a = Counter::new(1);
/// let b = a.clone();
/// a.set_value(2);
/// assert_eq!(*a.value(), 2);
/// assert_eq!(*b.value(), 1);
/// ```
#[proc_macro_attribute]
pub fn cow_box(args: TokenStream, input: TokenStream) -> TokenStream {
    let output: TokenStream = cowbox::expand(args, input);
    trace("cow_box", &output);
    output
}

/// Like `#[cow_box]`, but takes the struct together with its impl blocks so
/// that user-written members replace the generated ones.
///
/// ```
/// cowbox_macros::cow_box_decl! {
///     #[cow_box(init = "pub(crate)")]
///     #[derive(Clone, PartialEq)]
///     struct Temperature {
///         #[cow_box(mutating)]
///         celsius: f64,
///     }
///
///     impl Temperature {
///         fn fahrenheit(&self) -> f64 {
///             self.celsius() * 9.0 / 5.0 + 32.0
///         }
///     }
/// }
///
/// let t = Temperature::new(100.0);
/// assert_eq!(t.fahrenheit(), 212.0);
/// ```
#[proc_macro]
pub fn cow_box_decl(input: TokenStream) -> TokenStream {
    let output: TokenStream = cowbox::expand_declaration(input);
    trace("cow_box_decl", &output);
    output
}

/// Prints every expansion to stderr when `COWBOX_DEBUG` is set.
fn trace(name: &str, output: &TokenStream) {
    if std::env::var_os("COWBOX_DEBUG").is_some() {
        eprintln!("[{}] {}", name, output);
    }
}
