use decoy_matcher::MatcherError;
use decoy_primitives::CatalogError;
use thiserror::Error;

/// Coarse classification of a [`MockError`], stable for assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
	NoSetup,
	AmbiguousOverload,
	MissingMember,
	InvalidSetup,
	Thrown,
	Catalog,
	Settings,
}

/// Failures surfaced by mocks. All are recoverable and reported to the caller.
#[derive(Error, Debug)]
pub enum MockError {
	/// A strict mock received a call that no setup matches.
	#[error("no setup matches {invocation}")]
	NoSetup { invocation: String },
	/// More than one overload could accept the same arguments.
	#[error("ambiguous overload {name}: candidates {candidates:?}")]
	AmbiguousOverload { name: String, candidates: Vec<String> },
	/// The member does not exist on the mocked type.
	#[error("{member} is not a member of {owner}")]
	MissingMember { owner: String, member: String },
	/// A setup's matchers could not be built.
	#[error("invalid setup for {member}")]
	InvalidSetup {
		member: String,
		#[source]
		source: MatcherError,
	},
	/// The matched setup responds by failing.
	#[error("{member} threw: {message}")]
	Thrown { member: String, message: String },
	#[error(transparent)]
	Catalog(#[from] CatalogError),
	#[error("invalid mock settings")]
	Settings(#[from] toml::de::Error),
}

impl MockError {
	pub fn reason(&self) -> Reason {
		match self {
			MockError::NoSetup { .. } => Reason::NoSetup,
			MockError::AmbiguousOverload { .. } => Reason::AmbiguousOverload,
			MockError::MissingMember { .. } => Reason::MissingMember,
			MockError::InvalidSetup { .. } => Reason::InvalidSetup,
			MockError::Thrown { .. } => Reason::Thrown,
			MockError::Catalog(_) => Reason::Catalog,
			MockError::Settings(_) => Reason::Settings,
		}
	}
}
