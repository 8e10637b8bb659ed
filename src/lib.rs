//! Copy-on-write storage for structs, synthesized at compile time
//! ==============================================================
//!
//! *Annotate the fields of a struct that should live in shared storage and
//! this crate rewrites the struct so that copying it only bumps a reference
//! count, while writing to it never disturbs another copy.*
//!
//! # Programming model
//!
//! ```ignore
//! use cowbox::CowBox;
//! use cowbox_macros::cow_box;
//!
//! #[cow_box]
//! #[derive(Clone, CowBox, PartialEq, Display)]
//! pub struct Person {
//!     #[cow_box(non_mutating)]
//!     pub id: String,
//!     #[cow_box(mutating)]
//!     pub name: String,
//!     pub tag: bool,
//! }
//!
//! let mut a = Person::new("x".to_owned(), "Ada".to_owned(), true);
//! let b = a.clone();
//! assert!(a.is_identical(&b));
//!
//! a.set_name("Grace".to_owned());
//! assert!(!a.is_identical(&b));
//! assert_eq!(b.name(), "Ada");
//! ```
//!
//! Fields marked `#[cow_box(non_mutating)]` or `#[cow_box(mutating)]` move
//! into a private `Arc`-backed storage struct. Each of them gets a getter
//! returning a reference into the storage. Mutating fields additionally get
//! `set_field` and `field_mut`, which clone the storage first if any other
//! value still shares it. All other fields stay ordinary struct fields.
//!
//! A memberwise `new` is generated, taking non-mutating tracked fields,
//! mutating tracked fields and then plain fields. Fields with a
//! `#[cow_box(default = "expr")]` are passed as `Option`, or for plain fields
//! left out entirely.
//!
//! # Derive list
//!
//! `#[cow_box]` must come before `#[derive]`. It takes over these entries and
//! generates them by hand so that they look through the storage:
//!
//! - `CowBox` implements [`CowBox`] with a storage identity check.
//! - `PartialEq` compares plain fields, then short-circuits on shared storage,
//!   then compares tracked fields. `Eq` and `Hash` follow the same fields.
//! - `Display` renders `Person(id: x, name: Ada, tag: true)`, so every field
//!   must implement `Display` itself. A `Vec<_>` field, for example, needs a
//!   hand-written impl inside `cow_box_decl!` instead. `Debug` uses
//!   `debug_struct` with the same field order.
//! - `Serialize` and `Deserialize` write and read every field by name, or the
//!   keys listed in `#[cow_box(keys(...))]`. A field's
//!   `#[serde(rename = "...")]` changes its key; no other serde attribute is
//!   accepted.
//!
//! Every other derive, such as `Clone`, is left in place.
//!
//! # Type options
//!
//! | Option | Meaning |
//! |:------ |:------- |
//! | `init = "pub"` / `init = "pub(crate)"` | Visibility of `new`. By default it follows the struct, capped at `pub(crate)`. |
//! | `keys(a, b = "raw")` | The serialized keys, in order. |
//! | `crate = "path"` | Path to this crate in generated code. |
//!
//! # Declarations with impl blocks
//!
//! `cow_box_decl! { ... }` takes the struct together with its impl blocks.
//! A user-written `fn new`, accessor, or trait impl for a derive-list entry
//! then replaces the generated one.

#![allow(clippy::needless_pass_by_value)]

mod accessor;
mod attr;
mod classify;
mod codable;
mod conformance;
mod declaration;
mod describe;
mod diagnostic;
mod equatable;
mod expand;
mod identical;
mod init;
mod member;
mod print;
mod runtime;
mod storage;
mod visibility;

pub use diagnostic::{NOT_A_STRUCT, TRACKED_COMPUTED};
pub use expand::{expand, expand_declaration};
pub use runtime::CowBox;
