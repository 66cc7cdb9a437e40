use thiserror::Error;

use crate::ids::{MemberRef, TypeRef};

/// Errors raised while declaring types and members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
	/// A handle that was never issued by this catalog.
	#[error("unknown type handle: {0}")]
	UnknownType(TypeRef),
	/// A handle that was never issued by this catalog.
	#[error("unknown member handle: {0}")]
	UnknownMember(MemberRef),
	/// Type names are unique within a catalog.
	#[error("type already declared: {0}")]
	DuplicateType(String),
	/// Same owner, name and parameter list as an existing member.
	#[error("member already declared: {0}")]
	DuplicateMember(String),
	/// A base type must be a class.
	#[error("not a class: {0}")]
	NotAClass(String),
	/// Implemented or extended types must be interfaces.
	#[error("not an interface: {0}")]
	NotAnInterface(String),
	/// Members can only be declared on classes and interfaces.
	#[error("cannot declare members on {0}")]
	NotAnOwner(String),
}
