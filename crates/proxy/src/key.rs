use std::fmt;
use std::hash::{Hash, Hasher};

use decoy_primitives::{MemberRef, TypeRef};
use rustc_hash::FxHasher;


/// What a proxy is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
	/// A single intercepted method.
	Member(MemberRef),
	/// A whole class or interface.
	Type(TypeRef),
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Target::Member(m) => write!(f, "{m}"),
			Target::Type(t) => write!(f, "{t}"),
		}
	}
}

/// Generator configuration that takes part in cache identity.
///
/// Opaque to the cache beyond equality and hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GenerationOptions {
	/// Name of the interception hook consulted during generation.
	pub hook: Option<String>,
	/// Attribute names copied from the target onto the generated type.
	pub mirrored_attributes: Vec<String>,
	/// Extra types whose members are mixed into the proxy.
	pub mixins: Vec<TypeRef>,
}

impl GenerationOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
		self.hook = Some(hook.into());
		self
	}

	pub fn mirror_attribute(mut self, name: impl Into<String>) -> Self {
		self.mirrored_attributes.push(name.into());
		self
	}

	pub fn with_mixin(mut self, ty: TypeRef) -> Self {
		self.mixins.push(ty);
		self
	}
}

/// Identity of one proxy generation request.
///
/// Two keys are equal iff target, base type, the ordered interface list and
/// options are all equal. Interface order is significant. The hash is
/// computed once at construction.
#[derive(Debug, Clone)]
pub struct CacheKey {
	target: Target,
	base: Option<TypeRef>,
	interfaces: Box<[TypeRef]>,
	options: Option<GenerationOptions>,
	hash: u64,
}

const MULTIPLIER: u64 = 29;

fn component<T: Hash + ?Sized>(value: &T) -> u64 {
	let mut hasher = FxHasher::default();
	value.hash(&mut hasher);
	hasher.finish()
}

impl CacheKey {
	fn new(
		target: Target,
		base: Option<TypeRef>,
		interfaces: impl IntoIterator<Item = TypeRef>,
		options: Option<GenerationOptions>,
	) -> Self {
		let interfaces: Box<[TypeRef]> = interfaces.into_iter().collect();
		let mut hash = component(&target);
		for iface in &*interfaces {
			hash = hash.wrapping_add(MULTIPLIER).wrapping_add(component(iface));
		}
		if let Some(options) = &options {
			hash = MULTIPLIER.wrapping_mul(hash).wrapping_add(component(options));
		}
		if let Some(base) = &base {
			hash = MULTIPLIER.wrapping_mul(hash).wrapping_add(component(base));
		}
		Self {
			target,
			base,
			interfaces,
			options,
			hash,
		}
	}

	/// Key for a proxy of a single method.
	pub fn for_method(
		member: MemberRef,
		base: Option<TypeRef>,
		interfaces: impl IntoIterator<Item = TypeRef>,
		options: Option<GenerationOptions>,
	) -> Self {
		Self::new(Target::Member(member), base, interfaces, options)
	}

	/// Key for a proxy of a whole type with no base type.
	pub fn for_type(
		ty: TypeRef,
		interfaces: impl IntoIterator<Item = TypeRef>,
		options: Option<GenerationOptions>,
	) -> Self {
		Self::new(Target::Type(ty), None, interfaces, options)
	}

	/// Key for a proxy of a whole type deriving from `base`.
	pub fn for_type_with_base(
		ty: TypeRef,
		base: TypeRef,
		interfaces: impl IntoIterator<Item = TypeRef>,
		options: Option<GenerationOptions>,
	) -> Self {
		Self::new(Target::Type(ty), Some(base), interfaces, options)
	}

	pub fn target(&self) -> Target {
		self.target
	}

	pub fn base(&self) -> Option<TypeRef> {
		self.base
	}

	pub fn interfaces(&self) -> &[TypeRef] {
		&self.interfaces
	}

	pub fn options(&self) -> Option<&GenerationOptions> {
		self.options.as_ref()
	}

	/// The combined hash fed to [`Hash`].
	pub fn hash_code(&self) -> u64 {
		self.hash
	}
}

impl PartialEq for CacheKey {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
			&& self.base == other.base
			&& self.target == other.target
			&& self.interfaces == other.interfaces
			&& self.options == other.options
	}
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.hash);
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.target)?;
		if let Some(base) = self.base {
			write!(f, " : {base}")?;
		}
		if !self.interfaces.is_empty() {
			write!(f, " [")?;
			for (i, iface) in self.interfaces.iter().enumerate() {
				if i > 0 {
					write!(f, ", ")?;
				}
				write!(f, "{iface}")?;
			}
			write!(f, "]")?;
		}
		if self.options.is_some() {
			write!(f, " +options")?;
		}
		Ok(())
	}
}
