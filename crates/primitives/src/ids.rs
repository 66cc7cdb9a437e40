use std::fmt;

/// Interned handle to a type declared in a [`TypeCatalog`](crate::TypeCatalog).
///
/// Handles are canonical: declaring or interning the same type always yields
/// the same handle, so equality and hashing are plain integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef(pub(crate) u32);

impl TypeRef {
	/// Root of the type hierarchy; every type is assignable to it.
	pub const OBJECT: TypeRef = TypeRef(0);
	/// Type of the null literal.
	pub const NULL: TypeRef = TypeRef(1);
	pub const BOOL: TypeRef = TypeRef(2);
	pub const INT: TypeRef = TypeRef(3);
	pub const FLOAT: TypeRef = TypeRef(4);
	pub const STR: TypeRef = TypeRef(5);

	/// Returns the underlying index.
	#[inline]
	pub fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeRef({})", self.0)
	}
}

/// Interned handle to a member (method or property accessor).
///
/// Overloads are distinct members: two methods sharing a name but differing
/// in parameter types get different handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberRef(pub(crate) u32);

impl MemberRef {
	/// Returns the underlying index.
	#[inline]
	pub fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for MemberRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "MemberRef({})", self.0)
	}
}

/// Primitive types known to every catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
	Object,
	Null,
	Bool,
	Int,
	Float,
	Str,
}

impl Builtin {
	pub(crate) const ALL: [Builtin; 6] = [
		Builtin::Object,
		Builtin::Null,
		Builtin::Bool,
		Builtin::Int,
		Builtin::Float,
		Builtin::Str,
	];

	pub(crate) fn name(self) -> &'static str {
		match self {
			Builtin::Object => "Object",
			Builtin::Null => "Null",
			Builtin::Bool => "Bool",
			Builtin::Int => "Int",
			Builtin::Float => "Float",
			Builtin::Str => "Str",
		}
	}
}

/// Shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
	Builtin(Builtin),
	/// A class with an optional base class and implemented interfaces.
	Class {
		base: Option<TypeRef>,
		interfaces: Vec<TypeRef>,
	},
	/// An interface extending zero or more interfaces.
	Interface { extends: Vec<TypeRef> },
	/// Homogeneous sequence, interned per element type.
	Sequence { elem: TypeRef },
}

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
	pub name: String,
	pub kind: TypeKind,
}

impl TypeDecl {
	/// Returns true for types whose values may be null.
	pub fn is_reference(&self) -> bool {
		!matches!(
			self.kind,
			TypeKind::Builtin(Builtin::Bool | Builtin::Int | Builtin::Float)
		)
	}
}

/// A declared member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
	/// Declaring type.
	pub owner: TypeRef,
	pub name: String,
	/// Declared parameter types, in order.
	pub params: Vec<TypeRef>,
	/// Declared return type.
	pub ret: TypeRef,
}

impl MemberDecl {
	/// Number of declared parameters.
	#[inline]
	pub fn arity(&self) -> usize {
		self.params.len()
	}
}
