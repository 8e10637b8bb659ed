use quote::ToTokens;
use ref_cast::RefCast;
use std::fmt::{self, Debug};

/// Debug-prints any syntax node as its token string.
#[derive(RefCast)]
#[repr(transparent)]
pub(crate) struct Print<T>(T);

impl<T: ToTokens> Debug for Print<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens = self.0.to_token_stream();
        if tokens.is_empty() {
            f.write_str("_")
        } else {
            write!(f, "`{}`", tokens)
        }
    }
}

#[test]
fn test_print() {
    use syn::{parse_quote, Type, Visibility};

    let ty: Type = parse_quote!(Vec<String>);
    assert_eq!(format!("{:?}", Print::ref_cast(&ty)), "`Vec < String >`");

    let vis = Visibility::Inherited;
    assert_eq!(format!("{:?}", Print::ref_cast(&vis)), "_");

    let missing: Option<Type> = None;
    assert_eq!(format!("{:?}", Print::ref_cast(&missing)), "_");
}
