use decoy_primitives::TypeCatalog;

use crate::behavior::Behavior;
use crate::error::MockError;
use crate::invocation::Invocation;
use crate::registry::SetupRegistry;
use crate::setup::Setup;


/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
	Matched(&'a Setup),
	/// No setup matched and the mock is loose: answer with the default value.
	Default,
}

impl<'a> Resolution<'a> {
	pub fn setup(self) -> Option<&'a Setup> {
		match self {
			Resolution::Matched(setup) => Some(setup),
			Resolution::Default => None,
		}
	}
}

/// Selects the setup that answers `invocation`.
///
/// The newest setup for the invocation's exact member whose matchers all
/// accept the arguments wins. With none, strict mocks fail with
/// [`MockError::NoSetup`] and loose mocks get [`Resolution::Default`].
pub fn resolve<'a>(
	registry: &'a SetupRegistry,
	invocation: &Invocation,
	behavior: Behavior,
	catalog: &TypeCatalog,
) -> Result<Resolution<'a>, MockError> {
	let candidates = registry.lookup(invocation.member());
	if let Some((index, setup)) = candidates
		.iter()
		.enumerate()
		.rev()
		.find(|(_, s)| s.matches(invocation, catalog))
	{
		tracing::trace!(
			member = %catalog.describe_member(invocation.member()),
			index,
			candidates = candidates.len(),
			"setup matched"
		);
		return Ok(Resolution::Matched(setup));
	}

	match behavior {
		Behavior::Strict => Err(MockError::NoSetup {
			invocation: invocation.describe(catalog),
		}),
		Behavior::Loose => {
			tracing::trace!(
				member = %catalog.describe_member(invocation.member()),
				candidates = candidates.len(),
				"no setup matched, using default"
			);
			Ok(Resolution::Default)
		}
	}
}
