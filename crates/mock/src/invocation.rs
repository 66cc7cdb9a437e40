use decoy_primitives::{MemberRef, TypeCatalog, TypeRef, Value};

/// One concrete call received by a mock.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
	member: MemberRef,
	args: Vec<Value>,
	arg_types: Vec<TypeRef>,
}

impl Invocation {
	/// Captures a call, computing each argument's runtime type.
	pub fn new(catalog: &TypeCatalog, member: MemberRef, args: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		let args: Vec<Value> = args.into_iter().map(Into::into).collect();
		let arg_types = args.iter().map(|a| a.runtime_type(catalog)).collect();
		Self { member, args, arg_types }
	}

	/// Retargets the call at `member`, which must share the original's signature.
	pub(crate) fn rebind(mut self, member: MemberRef) -> Self {
		self.member = member;
		self
	}

	pub fn member(&self) -> MemberRef {
		self.member
	}

	pub fn args(&self) -> &[Value] {
		&self.args
	}

	/// Runtime types, positionally aligned with [`args`](Self::args).
	pub fn arg_types(&self) -> &[TypeRef] {
		&self.arg_types
	}

	/// Diagnostic form, e.g. `IFoo.Echo(1)`.
	pub fn describe(&self, catalog: &TypeCatalog) -> String {
		let args = self.args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
		match catalog.member(self.member) {
			Ok(decl) => format!("{}.{}({args})", catalog.type_name(decl.owner), decl.name),
			Err(_) => format!("{}({args})", self.member),
		}
	}
}
