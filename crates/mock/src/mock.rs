use std::sync::Arc;

use decoy_matcher::{CallPattern, Matcher};
use decoy_primitives::{CatalogError, MemberRef, TypeCatalog, TypeKind, TypeRef, Value};
use parking_lot::Mutex;

use crate::behavior::{Behavior, MockSettings};
use crate::error::MockError;
use crate::invocation::Invocation;
use crate::overload;
use crate::registry::SetupRegistry;
use crate::resolver::{Resolution, resolve};
use crate::setup::{Response, Setup};


/// A test double for one class or interface.
///
/// Configure with [`setup`](Self::setup) (exclusive access), then exercise
/// with [`call`](Self::call) or [`invoke`](Self::invoke). Interleaving is
/// fine: a call observes every setup registered before it.
pub struct Mock {
	catalog: Arc<TypeCatalog>,
	ty: TypeRef,
	members: Vec<MemberRef>,
	settings: MockSettings,
	registry: SetupRegistry,
	history: Mutex<Vec<Invocation>>,
}

impl std::fmt::Debug for Mock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mock")
			.field("name", &self.name())
			.field("behavior", &self.settings.behavior)
			.field("setups", &self.registry.len())
			.finish_non_exhaustive()
	}
}

impl Mock {
	/// Creates a mock of `ty`, which must be a class or interface.
	///
	/// Fails with [`MockError::AmbiguousOverload`] when two overloads of the
	/// type could accept the same arguments with neither more specific.
	pub fn new(catalog: Arc<TypeCatalog>, ty: TypeRef, settings: MockSettings) -> Result<Self, MockError> {
		let decl = catalog.decl(ty)?;
		if !matches!(decl.kind, TypeKind::Class { .. } | TypeKind::Interface { .. }) {
			return Err(CatalogError::NotAnOwner(decl.name.clone()).into());
		}
		overload::check_overloads(&catalog, ty)?;
		let members = catalog.members_of(ty);
		tracing::debug!(
			ty = %decl.name,
			members = members.len(),
			behavior = ?settings.behavior,
			"mock created"
		);
		Ok(Self {
			catalog,
			ty,
			members,
			settings,
			registry: SetupRegistry::new(),
			history: Mutex::new(Vec::new()),
		})
	}

	/// Shorthand for a mock with [`Behavior::Strict`].
	pub fn strict(catalog: Arc<TypeCatalog>, ty: TypeRef) -> Result<Self, MockError> {
		Self::new(catalog, ty, MockSettings::strict())
	}

	/// Shorthand for a mock with [`Behavior::Loose`].
	pub fn loose(catalog: Arc<TypeCatalog>, ty: TypeRef) -> Result<Self, MockError> {
		Self::new(catalog, ty, MockSettings::loose())
	}

	pub fn behavior(&self) -> Behavior {
		self.settings.behavior
	}

	pub fn mocked_type(&self) -> TypeRef {
		self.ty
	}

	pub fn catalog(&self) -> &TypeCatalog {
		&self.catalog
	}

	pub fn registry(&self) -> &SetupRegistry {
		&self.registry
	}

	/// Diagnostics label: the configured name or the mocked type's name.
	pub fn name(&self) -> &str {
		self.settings
			.name
			.as_deref()
			.unwrap_or_else(|| self.catalog.type_name(self.ty))
	}

	fn missing(&self, member: String) -> MockError {
		MockError::MissingMember {
			owner: self.catalog.type_name(self.ty).to_string(),
			member,
		}
	}

	/// Looks up the only member called `name`.
	///
	/// Overloaded names are ambiguous here; use [`member_with`](Self::member_with).
	pub fn member(&self, name: &str) -> Result<MemberRef, MockError> {
		let mut found = Vec::new();
		for &m in &self.members {
			if self.catalog.member(m)?.name == name {
				found.push(m);
			}
		}
		match found.as_slice() {
			[] => Err(self.missing(name.to_string())),
			[only] => Ok(*only),
			_ => Err(MockError::AmbiguousOverload {
				name: name.to_string(),
				candidates: found.iter().map(|&m| self.catalog.describe_member(m)).collect(),
			}),
		}
	}

	/// Looks up the overload of `name` declared with exactly `params`.
	pub fn member_with(&self, name: &str, params: &[TypeRef]) -> Result<MemberRef, MockError> {
		for &m in &self.members {
			let decl = self.catalog.member(m)?;
			if decl.name == name && decl.params == params {
				return Ok(m);
			}
		}
		let params = params
			.iter()
			.map(|&t| self.catalog.type_name(t))
			.collect::<Vec<_>>()
			.join(", ");
		Err(self.missing(format!("{name}({params})")))
	}

	/// Checks that `member` belongs to the mocked type and returns the member
	/// that answers its signature (see [`overload::overrider`]).
	fn canonical(&self, member: MemberRef) -> Result<MemberRef, MockError> {
		if !self.members.contains(&member) {
			return Err(self.missing(self.catalog.describe_member(member)));
		}
		overload::overrider(&self.catalog, &self.members, member)
	}

	fn build_matchers(&self, member: MemberRef, pattern: CallPattern) -> Result<Vec<Matcher>, MockError> {
		let decl = self.catalog.member(member)?;
		let invalid = |source| MockError::InvalidSetup {
			member: self.catalog.describe_member(member),
			source,
		};
		let matchers = pattern.build(decl.arity()).map_err(invalid)?;
		for (matcher, &param) in matchers.iter().zip(&decl.params) {
			matcher.check_param(param, &self.catalog).map_err(invalid)?;
		}
		Ok(matchers)
	}

	/// Registers a setup for `member`.
	///
	/// The pattern is built now: operands are snapshotted and any matcher
	/// construction error is reported here rather than at call time, as are
	/// matchers no argument of the declared parameter type could satisfy.
	/// A setup on a member that another member overrides is registered on the
	/// overriding member.
	pub fn setup(&mut self, member: MemberRef, pattern: CallPattern, response: Response) -> Result<(), MockError> {
		let member = self.canonical(member)?;
		let matchers = self.build_matchers(member, pattern)?;
		let setup = Setup::new(member, matchers, response);
		tracing::debug!(mock = %self.name(), setup = %setup.describe(&self.catalog), "setup registered");
		self.registry.register(setup);
		Ok(())
	}

	fn respond(&self, invocation: &Invocation) -> Result<Value, MockError> {
		match resolve(&self.registry, invocation, self.settings.behavior, &self.catalog)? {
			Resolution::Matched(setup) => match setup.response() {
				Response::Return(value) => Ok(value.clone()),
				Response::Compute(f) => Ok(f(invocation.args())),
				Response::Throw(message) => Err(MockError::Thrown {
					member: self.catalog.describe_member(invocation.member()),
					message: message.clone(),
				}),
			},
			Resolution::Default => {
				let ret = self.catalog.member(invocation.member())?.ret;
				Ok(self.settings.default_value.value_for(&self.catalog, ret))
			}
		}
	}

	/// Answers one call to an already-bound member.
	///
	/// The call is recorded whether or not a setup answers it.
	pub fn invoke(&self, invocation: Invocation) -> Result<Value, MockError> {
		let member = self.canonical(invocation.member())?;
		let invocation = invocation.rebind(member);
		let result = self.respond(&invocation);
		if self.settings.record_invocations {
			self.history.lock().push(invocation);
		}
		result
	}

	/// Binds `name` to an overload by the arguments' runtime types, then invokes it.
	pub fn call(&self, name: &str, args: impl IntoIterator<Item = impl Into<Value>>) -> Result<Value, MockError> {
		let args: Vec<Value> = args.into_iter().map(Into::into).collect();
		let arg_types: Vec<TypeRef> = args.iter().map(|a| a.runtime_type(&self.catalog)).collect();
		let member = overload::bind(&self.catalog, self.ty, &self.members, name, &arg_types)?;
		self.invoke(Invocation::new(&self.catalog, member, args))
	}

	/// Calls with no arguments.
	pub fn call0(&self, name: &str) -> Result<Value, MockError> {
		self.call(name, std::iter::empty::<Value>())
	}

	/// Received invocations, oldest first.
	pub fn invocations(&self) -> Vec<Invocation> {
		self.history.lock().clone()
	}

	/// Counts received calls to `member` whose arguments match `pattern`.
	pub fn verify(&self, member: MemberRef, pattern: CallPattern) -> Result<usize, MockError> {
		let member = self.canonical(member)?;
		let matchers = self.build_matchers(member, pattern)?;
		let expected = Setup::new(member, matchers, Response::Return(Value::Null));
		Ok(self
			.history
			.lock()
			.iter()
			.filter(|inv| expected.matches(inv, &self.catalog))
			.count())
	}
}
