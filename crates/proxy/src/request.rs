use decoy_primitives::{CatalogError, MemberRef, TypeCatalog, TypeKind, TypeRef};

use crate::error::ProxyError;
use crate::key::{CacheKey, GenerationOptions};

/// Builds [`CacheKey`]s after checking them against a catalog.
///
/// The plain `CacheKey` constructors trust their input; these reject foreign
/// handles, non-class bases, non-interface interface entries, and method
/// targets that nothing in the request declares.
#[derive(Debug, Clone, Copy)]
pub struct ProxyRequest<'a> {
	catalog: &'a TypeCatalog,
}

impl<'a> ProxyRequest<'a> {
	pub fn new(catalog: &'a TypeCatalog) -> Self {
		Self { catalog }
	}

	fn check_base(&self, base: TypeRef) -> Result<(), ProxyError> {
		let decl = self.catalog.decl(base)?;
		match decl.kind {
			TypeKind::Class { .. } => Ok(()),
			_ => Err(CatalogError::NotAClass(decl.name.clone()).into()),
		}
	}

	fn check_interfaces(&self, interfaces: &[TypeRef]) -> Result<(), ProxyError> {
		for &iface in interfaces {
			let decl = self.catalog.decl(iface)?;
			if !matches!(decl.kind, TypeKind::Interface { .. }) {
				return Err(CatalogError::NotAnInterface(decl.name.clone()).into());
			}
		}
		Ok(())
	}

	/// Validated [`CacheKey::for_method`].
	///
	/// `member` must be reachable from `base` or from one of `interfaces`.
	pub fn for_method(
		&self,
		member: MemberRef,
		base: Option<TypeRef>,
		interfaces: &[TypeRef],
		options: Option<GenerationOptions>,
	) -> Result<CacheKey, ProxyError> {
		self.catalog.member(member)?;
		if let Some(base) = base {
			self.check_base(base)?;
		}
		self.check_interfaces(interfaces)?;

		let declared = base
			.iter()
			.chain(interfaces)
			.any(|&ty| self.catalog.has_member(ty, member));
		if !declared {
			let scope = base
				.iter()
				.chain(interfaces)
				.map(|&ty| self.catalog.type_name(ty))
				.collect::<Vec<_>>();
			return Err(ProxyError::MissingMember {
				member: self.catalog.describe_member(member),
				scope: if scope.is_empty() {
					"an empty request".to_string()
				} else {
					scope.join(", ")
				},
			});
		}
		Ok(CacheKey::for_method(member, base, interfaces.iter().copied(), options))
	}

	/// Validated [`CacheKey::for_type`]; `ty` must be a class or interface.
	pub fn for_type(
		&self,
		ty: TypeRef,
		interfaces: &[TypeRef],
		options: Option<GenerationOptions>,
	) -> Result<CacheKey, ProxyError> {
		let decl = self.catalog.decl(ty)?;
		if !matches!(decl.kind, TypeKind::Class { .. } | TypeKind::Interface { .. }) {
			return Err(CatalogError::NotAnOwner(decl.name.clone()).into());
		}
		self.check_interfaces(interfaces)?;
		Ok(CacheKey::for_type(ty, interfaces.iter().copied(), options))
	}

	/// Validated [`CacheKey::for_type_with_base`].
	pub fn for_type_with_base(
		&self,
		ty: TypeRef,
		base: TypeRef,
		interfaces: &[TypeRef],
		options: Option<GenerationOptions>,
	) -> Result<CacheKey, ProxyError> {
		let decl = self.catalog.decl(ty)?;
		if !matches!(decl.kind, TypeKind::Class { .. } | TypeKind::Interface { .. }) {
			return Err(CatalogError::NotAnOwner(decl.name.clone()).into());
		}
		self.check_base(base)?;
		self.check_interfaces(interfaces)?;
		Ok(CacheKey::for_type_with_base(ty, base, interfaces.iter().copied(), options))
	}
}
