use std::fmt;
use std::sync::Arc;

use decoy_matcher::Matcher;
use decoy_primitives::{MemberRef, TypeCatalog, Value};

use crate::invocation::Invocation;

/// What a matched setup does with the call.
#[derive(Clone)]
pub enum Response {
	Return(Value),
	/// Computes the return value from the call arguments.
	Compute(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>),
	/// Fails the call with [`MockError::Thrown`](crate::MockError::Thrown).
	Throw(String),
}

impl Response {
	pub fn returns(value: impl Into<Value>) -> Self {
		Response::Return(value.into())
	}

	pub fn computes(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
		Response::Compute(Arc::new(f))
	}

	pub fn throws(message: impl Into<String>) -> Self {
		Response::Throw(message.into())
	}
}

impl fmt::Debug for Response {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Response::Return(v) => f.debug_tuple("Return").field(v).finish(),
			Response::Compute(_) => f.write_str("Compute(..)"),
			Response::Throw(msg) => f.debug_tuple("Throw").field(msg).finish(),
		}
	}
}

/// A registered rule: one matcher per parameter of `member`, plus a response.
#[derive(Debug, Clone)]
pub struct Setup {
	member: MemberRef,
	matchers: Vec<Matcher>,
	response: Response,
}

impl Setup {
	pub fn new(member: MemberRef, matchers: Vec<Matcher>, response: Response) -> Self {
		Self {
			member,
			matchers,
			response,
		}
	}

	pub fn member(&self) -> MemberRef {
		self.member
	}

	pub fn matchers(&self) -> &[Matcher] {
		&self.matchers
	}

	pub fn response(&self) -> &Response {
		&self.response
	}

	/// Returns true if every matcher accepts its positional argument.
	pub fn matches(&self, invocation: &Invocation, catalog: &TypeCatalog) -> bool {
		invocation.member() == self.member
			&& invocation.args().len() == self.matchers.len()
			&& self
				.matchers
				.iter()
				.zip(invocation.args().iter().zip(invocation.arg_types()))
				.all(|(m, (value, &ty))| m.matches(value, ty, catalog))
	}

	/// Diagnostic form, e.g. `Echo(any(Int))`.
	pub fn describe(&self, catalog: &TypeCatalog) -> String {
		let name = catalog.member(self.member).map_or("?", |d| d.name.as_str());
		let matchers = self
			.matchers
			.iter()
			.map(|m| m.display(catalog).to_string())
			.collect::<Vec<_>>()
			.join(", ");
		format!("{name}({matchers})")
	}
}
