//! Canonical identities and dynamic values shared by the matching engine and
//! the proxy cache.
//!
//! Every type and member a mock can talk about is declared once in a
//! [`TypeCatalog`], which hands out interned [`TypeRef`] and [`MemberRef`]
//! handles. Two handles compare equal iff they name the same declaration, so
//! downstream crates can use them directly as hash/equality keys.

/// Type and member declarations plus assignability rules.
pub mod catalog;
/// Catalog declaration errors.
pub mod error;
/// Interned handles and declaration records.
pub mod ids;
/// Dynamic argument and return values.
pub mod value;

pub use catalog::TypeCatalog;
pub use error::CatalogError;
pub use ids::{Builtin, MemberDecl, MemberRef, TypeDecl, TypeKind, TypeRef};
pub use value::{ObjectRef, Value};
