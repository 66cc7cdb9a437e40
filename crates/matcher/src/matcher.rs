use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use decoy_primitives::{ObjectRef, TypeCatalog, TypeRef, Value};
use regex::Regex;

use crate::error::MatcherError;


/// Bound handling for [`Matcher::Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeMode {
	/// `low <= value <= high`
	Inclusive,
	/// `low < value < high`
	Exclusive,
}

impl fmt::Display for RangeMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RangeMode::Inclusive => write!(f, "inclusive"),
			RangeMode::Exclusive => write!(f, "exclusive"),
		}
	}
}

bitflags! {
	/// Compile-time options for [`Matcher::Pattern`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct PatternFlags: u8 {
		const IGNORE_CASE = 1 << 0;
		/// `^`/`$` match at line boundaries.
		const MULTI_LINE = 1 << 1;
		/// `.` also matches `\n`.
		const DOT_ALL = 1 << 2;
		/// Whitespace and `#` comments in the pattern are ignored.
		const IGNORE_WHITESPACE = 1 << 3;
	}
}

/// A deferred single-argument test, run on every candidate call.
#[derive(Clone)]
pub struct Predicate {
	test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
	label: Option<Arc<str>>,
}

impl Predicate {
	pub fn new(test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
		Self {
			test: Arc::new(test),
			label: None,
		}
	}

	/// Attaches a label shown in diagnostics instead of `<predicate>`.
	pub fn labeled(mut self, label: impl Into<Arc<str>>) -> Self {
		self.label = Some(label.into());
		self
	}

	#[inline]
	pub fn eval(&self, value: &Value) -> bool {
		(self.test)(value)
	}
}

impl fmt::Debug for Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Predicate")
			.field(&self.label.as_deref().unwrap_or("<predicate>"))
			.finish()
	}
}

/// A compiled, unanchored text pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
	regex: Regex,
	flags: PatternFlags,
}

impl Pattern {
	pub(crate) fn new(regex: Regex, flags: PatternFlags) -> Self {
		Self { regex, flags }
	}

	/// Pattern text as written at construction.
	pub fn source(&self) -> &str {
		self.regex.as_str()
	}

	pub fn flags(&self) -> PatternFlags {
		self.flags
	}

	/// Returns true if the pattern occurs anywhere in `text`.
	#[inline]
	pub fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}
}

/// Tests a single call argument.
///
/// The set of kinds is closed; build matchers through
/// [`MatcherExpr`](crate::MatcherExpr) rather than directly so that operands
/// are snapshotted and ranges validated.
#[derive(Debug, Clone)]
pub enum Matcher {
	/// Accepts any argument whose runtime type is assignable to the type.
	Any(TypeRef),
	/// Value equality with a captured, non-sequence value.
	Equals(Value),
	/// Deferred closure over the live argument.
	Predicate(Predicate),
	/// Ordered bounds captured at construction.
	Range {
		low: Value,
		high: Value,
		mode: RangeMode,
	},
	/// Unanchored search in text arguments.
	Pattern(Pattern),
	/// Same object instance as the captured reference.
	Identity(ObjectRef),
	/// Same length and pairwise-equal elements, in order.
	SequenceEquals(Vec<Value>),
}

impl Matcher {
	/// Returns true if `value`, whose runtime type is `runtime`, is accepted.
	pub fn matches(&self, value: &Value, runtime: TypeRef, catalog: &TypeCatalog) -> bool {
		match self {
			Matcher::Any(declared) => catalog.is_assignable(runtime, *declared),
			Matcher::Equals(expected) => value == expected,
			Matcher::Predicate(predicate) => predicate.eval(value),
			Matcher::Range { low, high, mode } => in_range(value, low, high, *mode),
			Matcher::Pattern(pattern) => value.as_str().is_some_and(|text| pattern.is_match(text)),
			Matcher::Identity(expected) => value
				.as_object()
				.is_some_and(|actual| actual.same_instance(expected)),
			Matcher::SequenceEquals(expected) => value
				.as_items()
				.is_some_and(|actual| actual.len() == expected.len() && actual.iter().zip(expected).all(|(a, e)| a == e)),
		}
	}

	/// Declared type for [`Matcher::Any`], used for overload diagnostics.
	pub fn declared_type(&self) -> Option<TypeRef> {
		match self {
			Matcher::Any(ty) => Some(*ty),
			_ => None,
		}
	}

	/// Rejects matchers that no argument of the declared `param` type could satisfy.
	///
	/// Range bounds must be values of `param`, and an exclusive integer range
	/// must leave at least one integer between its bounds. Patterns need a
	/// parameter that can hold text.
	pub fn check_param(&self, param: TypeRef, catalog: &TypeCatalog) -> Result<(), MatcherError> {
		match self {
			Matcher::Range { low, high, mode } => {
				for bound in [low, high] {
					if !catalog.is_assignable(bound.runtime_type(catalog), param) {
						return Err(MatcherError::TypeMismatch {
							what: "range bound",
							expected: catalog.type_name(param).to_string(),
							value: bound.clone(),
						});
					}
				}
				if *mode == RangeMode::Exclusive
					&& param == TypeRef::INT
					&& let (Some(lo), Some(hi)) = (low.as_int(), high.as_int())
					&& hi.saturating_sub(lo) <= 1
				{
					return Err(MatcherError::InvalidRange {
						low: low.clone(),
						high: high.clone(),
						mode: *mode,
					});
				}
				Ok(())
			}
			Matcher::Pattern(pattern) if !catalog.is_assignable(TypeRef::STR, param) => {
				Err(MatcherError::TypeMismatch {
					what: "pattern parameter",
					expected: "text".to_string(),
					value: Value::Str(pattern.source().to_string()),
				})
			}
			_ => Ok(()),
		}
	}

	/// Human-readable form resolving type names through `catalog`.
	pub fn display<'a>(&'a self, catalog: &'a TypeCatalog) -> MatcherDisplay<'a> {
		MatcherDisplay {
			matcher: self,
			catalog,
		}
	}
}

fn in_range(value: &Value, low: &Value, high: &Value, mode: RangeMode) -> bool {
	let (Some(from_low), Some(to_high)) = (value.natural_cmp(low), value.natural_cmp(high)) else {
		return false;
	};
	match mode {
		RangeMode::Inclusive => from_low != Ordering::Less && to_high != Ordering::Greater,
		RangeMode::Exclusive => from_low == Ordering::Greater && to_high == Ordering::Less,
	}
}

/// Helper returned by [`Matcher::display`].
pub struct MatcherDisplay<'a> {
	matcher: &'a Matcher,
	catalog: &'a TypeCatalog,
}

impl fmt::Display for MatcherDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.matcher {
			Matcher::Any(ty) => write!(f, "any({})", self.catalog.type_name(*ty)),
			Matcher::Equals(value) => write!(f, "eq({value})"),
			Matcher::Predicate(p) => write!(f, "is({})", p.label.as_deref().unwrap_or("<predicate>")),
			Matcher::Range { low, high, mode } => write!(f, "range({low}..{high}, {mode})"),
			Matcher::Pattern(p) => {
				write!(f, "pattern(/{}/", p.source())?;
				if p.flags.contains(PatternFlags::IGNORE_CASE) {
					write!(f, "i")?;
				}
				if p.flags.contains(PatternFlags::MULTI_LINE) {
					write!(f, "m")?;
				}
				if p.flags.contains(PatternFlags::DOT_ALL) {
					write!(f, "s")?;
				}
				if p.flags.contains(PatternFlags::IGNORE_WHITESPACE) {
					write!(f, "x")?;
				}
				write!(f, ")")
			}
			Matcher::Identity(obj) => write!(f, "same({})", Value::Object(obj.clone())),
			Matcher::SequenceEquals(items) => {
				write!(f, "seq[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
		}
	}
}
