use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use decoy_primitives::{ObjectRef, TypeRef, Value};
use parking_lot::RwLock;
use regex::RegexBuilder;

use crate::error::MatcherError;
use crate::matcher::{Matcher, Pattern, PatternFlags, Predicate, RangeMode};


/// A shared, mutable variable that matcher expressions may read.
///
/// Setups referencing a variable read it once, when the setup is registered.
/// Later [`set`](Self::set) calls do not affect registered matchers.
#[derive(Debug, Clone)]
pub struct Variable(Arc<RwLock<Value>>);

impl Variable {
	pub fn new(value: impl Into<Value>) -> Self {
		Self(Arc::new(RwLock::new(value.into())))
	}

	pub fn get(&self) -> Value {
		self.0.read().clone()
	}

	pub fn set(&self, value: impl Into<Value>) {
		*self.0.write() = value.into();
	}
}

/// A sub-expression whose value is captured at matcher construction.
pub enum Operand {
	Literal(Value),
	/// Read once at construction.
	Variable(Variable),
	/// Called exactly once at construction.
	Computed(Box<dyn FnOnce() -> Value + Send>),
}

impl Operand {
	/// Wraps a side-effect-free computation.
	pub fn computed(f: impl FnOnce() -> Value + Send + 'static) -> Self {
		Operand::Computed(Box::new(f))
	}

	/// Evaluates the operand, consuming it.
	pub fn snapshot(self) -> Value {
		match self {
			Operand::Literal(value) => value,
			Operand::Variable(var) => var.get(),
			Operand::Computed(f) => f(),
		}
	}
}

impl fmt::Debug for Operand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Operand::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			Operand::Variable(var) => f.debug_tuple("Variable").field(var).finish(),
			Operand::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}

impl From<Value> for Operand {
	fn from(v: Value) -> Self {
		Operand::Literal(v)
	}
}

impl From<&Variable> for Operand {
	fn from(v: &Variable) -> Self {
		Operand::Variable(v.clone())
	}
}

macro_rules! operand_from_literal {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Operand {
				fn from(v: $ty) -> Self {
					Operand::Literal(Value::from(v))
				}
			}

			impl From<$ty> for MatcherExpr {
				fn from(v: $ty) -> Self {
					MatcherExpr::Value(Operand::Literal(Value::from(v)))
				}
			}
		)*
	};
}

operand_from_literal!(bool, i32, i64, f64, &str, String);

/// Declarative matcher for one parameter slot.
#[derive(Debug)]
pub enum MatcherExpr {
	/// Any argument assignable to the statically declared type.
	Any(TypeRef),
	/// Equality with a captured value; sequences compare element-wise.
	Value(Operand),
	Predicate(Predicate),
	Range {
		low: Operand,
		high: Operand,
		mode: RangeMode,
	},
	Pattern {
		text: Operand,
		flags: PatternFlags,
	},
	Identity(ObjectRef),
}

impl From<Value> for MatcherExpr {
	fn from(v: Value) -> Self {
		MatcherExpr::Value(Operand::Literal(v))
	}
}

impl From<&Variable> for MatcherExpr {
	fn from(v: &Variable) -> Self {
		MatcherExpr::Value(Operand::Variable(v.clone()))
	}
}

impl From<ObjectRef> for MatcherExpr {
	fn from(v: ObjectRef) -> Self {
		MatcherExpr::Value(Operand::Literal(Value::Object(v)))
	}
}

impl MatcherExpr {
	/// Builds the matcher, evaluating every operand exactly once.
	///
	/// Predicate bodies are not run. Ranges whose bounds cannot be ordered,
	/// or whose `low` does not precede `high` under the mode, are rejected.
	pub fn build(self) -> Result<Matcher, MatcherError> {
		match self {
			MatcherExpr::Any(ty) => Ok(Matcher::Any(ty)),
			MatcherExpr::Value(operand) => Ok(match operand.snapshot() {
				Value::Seq { items, .. } => Matcher::SequenceEquals(items),
				value => Matcher::Equals(value),
			}),
			MatcherExpr::Predicate(predicate) => Ok(Matcher::Predicate(predicate)),
			MatcherExpr::Range { low, high, mode } => {
				let low = low.snapshot();
				let high = high.snapshot();
				let valid = match (low.natural_cmp(&high), mode) {
					(Some(Ordering::Less), _) => true,
					(Some(Ordering::Equal), RangeMode::Inclusive) => true,
					_ => false,
				};
				if !valid {
					return Err(MatcherError::InvalidRange { low, high, mode });
				}
				Ok(Matcher::Range { low, high, mode })
			}
			MatcherExpr::Pattern { text, flags } => {
				let text = match text.snapshot() {
					Value::Str(text) => text,
					other => {
						return Err(MatcherError::TypeMismatch {
							what: "pattern source",
							expected: "text".to_string(),
							value: other,
						});
					}
				};
				let regex = RegexBuilder::new(&text)
					.case_insensitive(flags.contains(PatternFlags::IGNORE_CASE))
					.multi_line(flags.contains(PatternFlags::MULTI_LINE))
					.dot_matches_new_line(flags.contains(PatternFlags::DOT_ALL))
					.ignore_whitespace(flags.contains(PatternFlags::IGNORE_WHITESPACE))
					.build()
					.map_err(|source| MatcherError::InvalidPattern {
						pattern: text.clone(),
						source,
					})?;
				Ok(Matcher::Pattern(Pattern::new(regex, flags)))
			}
			MatcherExpr::Identity(obj) => Ok(Matcher::Identity(obj)),
		}
	}
}

/// The argument list of a setup: one matcher expression per parameter.
///
/// Slots are filled positionally with [`arg`](Self::arg) or explicitly with
/// [`arg_at`](Self::arg_at). Filling a slot twice, leaving one empty, or
/// naming one past the member's arity is reported when the pattern is
/// built, not when it is declared.
#[derive(Debug, Default)]
pub struct CallPattern {
	entries: Vec<(usize, MatcherExpr)>,
	next: usize,
}

impl CallPattern {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a matcher for the next parameter.
	pub fn arg(self, expr: impl Into<MatcherExpr>) -> Self {
		let slot = self.next;
		self.arg_at(slot, expr)
	}

	/// Adds a matcher for parameter `slot`.
	pub fn arg_at(mut self, slot: usize, expr: impl Into<MatcherExpr>) -> Self {
		self.entries.push((slot, expr.into()));
		self.next = self.next.max(slot.saturating_add(1));
		self
	}

	/// Number of declared slots, filled or not.
	pub fn len(&self) -> usize {
		self.next
	}

	pub fn is_empty(&self) -> bool {
		self.next == 0
	}

	/// Builds one matcher per parameter of a member with `arity` parameters.
	pub fn build(self, arity: usize) -> Result<Vec<Matcher>, MatcherError> {
		if self.next > arity {
			return Err(MatcherError::ArityMismatch {
				expected: arity,
				actual: self.next,
			});
		}
		let mut slots: Vec<Vec<MatcherExpr>> = (0..arity).map(|_| Vec::new()).collect();
		for (slot, expr) in self.entries {
			slots[slot].push(expr);
		}
		if let Some(slot) = slots.iter().position(|exprs| exprs.len() > 1) {
			return Err(MatcherError::MultipleMatchers { slot });
		}
		if let Some(slot) = slots.iter().position(Vec::is_empty) {
			return Err(MatcherError::MissingMatcher { slot });
		}
		slots.into_iter().flatten().map(MatcherExpr::build).collect()
	}
}
