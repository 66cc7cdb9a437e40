use decoy_primitives::Value;
use thiserror::Error;

use crate::matcher::RangeMode;

/// Errors raised while turning matcher expressions into matchers.
#[derive(Error, Debug)]
pub enum MatcherError {
	/// A parameter slot received more than one matcher expression.
	#[error("argument {slot} has more than one matcher")]
	MultipleMatchers { slot: usize },
	/// A parameter slot below the member's arity was never given a matcher.
	#[error("argument {slot} has no matcher")]
	MissingMatcher { slot: usize },
	/// More matchers were declared than the member has parameters.
	#[error("expected {expected} argument matchers, got {actual}")]
	ArityMismatch { expected: usize, actual: usize },
	/// Range bounds that no value could satisfy under the chosen mode.
	#[error("invalid {mode} range: {low}..{high}")]
	InvalidRange {
		low: Value,
		high: Value,
		mode: RangeMode,
	},
	/// Pattern text failed to compile.
	#[error("invalid pattern {pattern:?}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
	/// A value of the wrong kind: a pattern source that is not text, or a
	/// range bound the parameter type cannot hold.
	#[error("{what} must be {expected}, got {value}")]
	TypeMismatch {
		what: &'static str,
		expected: String,
		value: Value,
	},
}
