//! Declarative matcher surface used when writing setups.
//!
//! ```rust,ignore
//! let pattern = CallPattern::new()
//!     .arg(expr::range(1, 5, RangeMode::Inclusive))
//!     .arg(expr::pattern("[a-d]+"));
//! ```

use decoy_primitives::{ObjectRef, TypeRef, Value};

use crate::factory::{MatcherExpr, Operand};
use crate::matcher::{PatternFlags, Predicate, RangeMode};

/// Matches any argument assignable to `ty`.
pub fn any(ty: TypeRef) -> MatcherExpr {
	MatcherExpr::Any(ty)
}

/// Matches arguments equal to `value`, captured now.
pub fn value(value: impl Into<Operand>) -> MatcherExpr {
	MatcherExpr::Value(value.into())
}

/// Alias of [`value`].
pub fn equals(expected: impl Into<Operand>) -> MatcherExpr {
	value(expected)
}

/// Matches arguments for which `test` returns true, evaluated per call.
pub fn predicate(test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> MatcherExpr {
	MatcherExpr::Predicate(Predicate::new(test))
}

/// Like [`predicate`], with a label for diagnostics.
pub fn predicate_labeled(
	label: &str,
	test: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> MatcherExpr {
	MatcherExpr::Predicate(Predicate::new(test).labeled(label))
}

/// Matches arguments between `low` and `high`; both bounds are captured now.
pub fn range(low: impl Into<Operand>, high: impl Into<Operand>, mode: RangeMode) -> MatcherExpr {
	MatcherExpr::Range {
		low: low.into(),
		high: high.into(),
		mode,
	}
}

/// Matches text arguments containing `text` as a regular expression.
pub fn pattern(text: impl Into<Operand>) -> MatcherExpr {
	pattern_with(text, PatternFlags::empty())
}

/// Like [`pattern`], compiled with `flags`.
pub fn pattern_with(text: impl Into<Operand>, flags: PatternFlags) -> MatcherExpr {
	MatcherExpr::Pattern {
		text: text.into(),
		flags,
	}
}

/// Matches only the given object instance.
pub fn identity(obj: &ObjectRef) -> MatcherExpr {
	MatcherExpr::Identity(obj.clone())
}
