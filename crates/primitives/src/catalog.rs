use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::CatalogError;
use crate::ids::{Builtin, MemberDecl, MemberRef, TypeDecl, TypeKind, TypeRef};
use crate::value::Value;


/// Owner of every type and member declaration a mock can refer to.
///
/// The catalog is the single source of canonical identity: handles are only
/// minted here, and interning (`sequence_of`) guarantees that structurally
/// identical requests return the same handle. Declarations are append-only,
/// so a handle stays valid for the catalog's lifetime.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
	types: Vec<TypeDecl>,
	by_name: FxHashMap<String, TypeRef>,
	sequences: FxHashMap<TypeRef, TypeRef>,
	members: Vec<MemberDecl>,
	by_owner: FxHashMap<TypeRef, Vec<MemberRef>>,
}

impl Default for TypeCatalog {
	fn default() -> Self {
		Self::new()
	}
}

impl TypeCatalog {
	/// Creates a catalog holding only the builtin types.
	pub fn new() -> Self {
		let mut catalog = Self {
			types: Vec::with_capacity(Builtin::ALL.len()),
			by_name: FxHashMap::default(),
			sequences: FxHashMap::default(),
			members: Vec::new(),
			by_owner: FxHashMap::default(),
		};
		for builtin in Builtin::ALL {
			catalog.push_type(builtin.name().to_string(), TypeKind::Builtin(builtin));
		}
		debug_assert_eq!(catalog.type_named("Str"), Some(TypeRef::STR));
		catalog
	}

	fn push_type(&mut self, name: String, kind: TypeKind) -> TypeRef {
		let ty = TypeRef(self.types.len() as u32);
		self.by_name.insert(name.clone(), ty);
		self.types.push(TypeDecl { name, kind });
		ty
	}

	fn check_name(&self, name: &str) -> Result<(), CatalogError> {
		if self.by_name.contains_key(name) {
			return Err(CatalogError::DuplicateType(name.to_string()));
		}
		Ok(())
	}

	/// Declares a class. A missing base means the class derives from `Object`.
	pub fn declare_class(
		&mut self,
		name: impl Into<String>,
		base: Option<TypeRef>,
		interfaces: &[TypeRef],
	) -> Result<TypeRef, CatalogError> {
		let name = name.into();
		self.check_name(&name)?;
		if let Some(base) = base
			&& !matches!(self.decl(base)?.kind, TypeKind::Class { .. })
		{
			return Err(CatalogError::NotAClass(self.decl(base)?.name.clone()));
		}
		self.check_interfaces(interfaces)?;
		Ok(self.push_type(
			name,
			TypeKind::Class {
				base,
				interfaces: interfaces.to_vec(),
			},
		))
	}

	/// Declares an interface extending `extends`.
	pub fn declare_interface(
		&mut self,
		name: impl Into<String>,
		extends: &[TypeRef],
	) -> Result<TypeRef, CatalogError> {
		let name = name.into();
		self.check_name(&name)?;
		self.check_interfaces(extends)?;
		Ok(self.push_type(
			name,
			TypeKind::Interface {
				extends: extends.to_vec(),
			},
		))
	}

	fn check_interfaces(&self, interfaces: &[TypeRef]) -> Result<(), CatalogError> {
		for &iface in interfaces {
			let decl = self.decl(iface)?;
			if !matches!(decl.kind, TypeKind::Interface { .. }) {
				return Err(CatalogError::NotAnInterface(decl.name.clone()));
			}
		}
		Ok(())
	}

	/// Interns the sequence type with element type `elem`.
	pub fn sequence_of(&mut self, elem: TypeRef) -> Result<TypeRef, CatalogError> {
		if let Some(&seq) = self.sequences.get(&elem) {
			return Ok(seq);
		}
		let name = format!("Seq<{}>", self.decl(elem)?.name);
		let seq = self.push_type(name, TypeKind::Sequence { elem });
		self.sequences.insert(elem, seq);
		Ok(seq)
	}

	/// Returns the already-interned sequence type over `elem`, if any.
	pub fn find_sequence(&self, elem: TypeRef) -> Option<TypeRef> {
		self.sequences.get(&elem).copied()
	}

	/// Declares a method on a class or interface.
	pub fn declare_method(
		&mut self,
		owner: TypeRef,
		name: impl Into<String>,
		params: &[TypeRef],
		ret: TypeRef,
	) -> Result<MemberRef, CatalogError> {
		let name = name.into();
		let owner_decl = self.decl(owner)?;
		if !matches!(
			owner_decl.kind,
			TypeKind::Class { .. } | TypeKind::Interface { .. }
		) {
			return Err(CatalogError::NotAnOwner(owner_decl.name.clone()));
		}
		for &param in params {
			self.decl(param)?;
		}
		self.decl(ret)?;

		let duplicate = self
			.by_owner
			.get(&owner)
			.into_iter()
			.flatten()
			.any(|&m| self.members[m.index()].name == name && self.members[m.index()].params == params);
		if duplicate {
			return Err(CatalogError::DuplicateMember(format!(
				"{}.{}({})",
				owner_decl.name,
				name,
				self.join_names(params)
			)));
		}

		let member = MemberRef(self.members.len() as u32);
		self.members.push(MemberDecl {
			owner,
			name,
			params: params.to_vec(),
			ret,
		});
		self.by_owner.entry(owner).or_default().push(member);
		Ok(member)
	}

	/// Returns the declaration behind `ty`.
	pub fn decl(&self, ty: TypeRef) -> Result<&TypeDecl, CatalogError> {
		self.types.get(ty.index()).ok_or(CatalogError::UnknownType(ty))
	}

	/// Returns the declaration behind `member`.
	pub fn member(&self, member: MemberRef) -> Result<&MemberDecl, CatalogError> {
		self.members
			.get(member.index())
			.ok_or(CatalogError::UnknownMember(member))
	}

	/// Looks up a type by its declared name.
	pub fn type_named(&self, name: &str) -> Option<TypeRef> {
		self.by_name.get(name).copied()
	}

	/// Returns the type name, or `"?"` for foreign handles.
	pub fn type_name(&self, ty: TypeRef) -> &str {
		self.types.get(ty.index()).map_or("?", |d| d.name.as_str())
	}

	fn join_names(&self, types: &[TypeRef]) -> String {
		types
			.iter()
			.map(|&t| self.type_name(t))
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Short diagnostic form, e.g. `IFoo.Echo(Int)`.
	pub fn describe_member(&self, member: MemberRef) -> String {
		match self.member(member) {
			Ok(decl) => format!(
				"{}.{}({})",
				self.type_name(decl.owner),
				decl.name,
				self.join_names(&decl.params)
			),
			Err(_) => member.to_string(),
		}
	}

	/// Returns true if a value of type `from` can be passed where `to` is declared.
	pub fn is_assignable(&self, from: TypeRef, to: TypeRef) -> bool {
		if from == to || to == TypeRef::OBJECT {
			return true;
		}
		let Some(from_decl) = self.types.get(from.index()) else {
			return false;
		};
		match &from_decl.kind {
			TypeKind::Builtin(Builtin::Null) => self.types.get(to.index()).is_some_and(TypeDecl::is_reference),
			TypeKind::Builtin(Builtin::Int) => to == TypeRef::FLOAT,
			TypeKind::Builtin(_) => false,
			TypeKind::Sequence { elem } => match self.types.get(to.index()).map(|d| &d.kind) {
				Some(TypeKind::Sequence { elem: target }) => self.is_assignable(*elem, *target),
				_ => false,
			},
			TypeKind::Class { base, interfaces } => {
				interfaces.iter().any(|&i| self.is_assignable(i, to))
					|| base.is_some_and(|b| self.is_assignable(b, to))
			}
			TypeKind::Interface { extends } => extends.iter().any(|&i| self.is_assignable(i, to)),
		}
	}

	/// Members declared on `ty`, its base chain, and every implemented interface.
	///
	/// Own members come first, then the base chain, then interfaces in
	/// declaration order. Each member appears once.
	pub fn members_of(&self, ty: TypeRef) -> Vec<MemberRef> {
		let mut out = Vec::new();
		let mut seen = FxHashSet::default();
		let mut stack = vec![ty];
		while let Some(current) = stack.pop() {
			if !seen.insert(current) {
				continue;
			}
			if let Some(own) = self.by_owner.get(&current) {
				out.extend(own.iter().copied());
			}
			match self.types.get(current.index()).map(|d| &d.kind) {
				Some(TypeKind::Class { base, interfaces }) => {
					stack.extend(interfaces.iter().rev().copied());
					stack.extend(base.iter().copied());
				}
				Some(TypeKind::Interface { extends }) => stack.extend(extends.iter().rev().copied()),
				_ => {}
			}
		}
		out
	}

	/// Returns true if `member` is reachable from `ty` (see [`members_of`](Self::members_of)).
	pub fn has_member(&self, ty: TypeRef, member: MemberRef) -> bool {
		self.members_of(ty).contains(&member)
	}

	/// Every declared class and interface, in declaration order.
	pub fn nominal_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
		self.types
			.iter()
			.enumerate()
			.filter(|(_, d)| matches!(d.kind, TypeKind::Class { .. } | TypeKind::Interface { .. }))
			.map(|(i, _)| TypeRef(i as u32))
	}

	/// Every declared type, builtins included.
	pub fn all_types(&self) -> impl Iterator<Item = TypeRef> + '_ {
		(0..self.types.len()).map(|i| TypeRef(i as u32))
	}

	/// Value returned for an unmatched call in loose mode.
	///
	/// Value types default to zero, sequences to an empty sequence, and
	/// everything else to null.
	pub fn default_value(&self, ty: TypeRef) -> Value {
		match self.types.get(ty.index()).map(|d| &d.kind) {
			Some(TypeKind::Builtin(Builtin::Bool)) => Value::Bool(false),
			Some(TypeKind::Builtin(Builtin::Int)) => Value::Int(0),
			Some(TypeKind::Builtin(Builtin::Float)) => Value::Float(0.0),
			Some(TypeKind::Sequence { elem }) => Value::seq(*elem, Vec::<Value>::new()),
			_ => Value::Null,
		}
	}
}
