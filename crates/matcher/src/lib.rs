//! Argument matchers for mock setups.
//!
//! A [`Matcher`] tests one call argument. Matchers are never written by hand:
//! setups declare a [`MatcherExpr`] per parameter (usually through the
//! functions in [`expr`]) and the factory turns a [`CallPattern`] into the
//! per-parameter matcher list when the setup is registered.
//!
//! Construction has two distinct evaluation strategies:
//! - range bounds, pattern text and plain values are [`Operand`]s, read once
//!   at construction and frozen into the matcher;
//! - predicate bodies are stored unevaluated and run on every candidate call.

pub mod error;
pub mod expr;
pub mod factory;
pub mod matcher;

pub use error::MatcherError;
pub use factory::{CallPattern, MatcherExpr, Operand, Variable};
pub use matcher::{Matcher, MatcherDisplay, Pattern, PatternFlags, Predicate, RangeMode};
