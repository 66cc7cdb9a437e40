//! End-to-end matcher behavior through a mocked interface.

use std::sync::Arc;

use decoy_matcher::{CallPattern, Operand, PatternFlags, RangeMode, Variable, expr};
use decoy_mock::{Mock, MockSettings, Reason, Response};
use decoy_primitives::{ObjectRef, TypeCatalog, TypeRef, Value};

struct Foo {
	catalog: Arc<TypeCatalog>,
	ifoo: TypeRef,
	bar: TypeRef,
	baz: TypeRef,
}

/// `IFoo { Echo(Int) -> Int; Execute(Str) -> Str; DoTypeOverload(Bar|Baz) -> Bool; DoAddition(Seq<Int>) -> Int }`
fn foo() -> Foo {
	let mut catalog = TypeCatalog::new();
	let ifoo = catalog.declare_interface("IFoo", &[]).unwrap();
	let bar = catalog.declare_class("Bar", None, &[]).unwrap();
	let baz = catalog.declare_class("Baz", None, &[]).unwrap();
	let ints = catalog.sequence_of(TypeRef::INT).unwrap();
	catalog.declare_method(ifoo, "Echo", &[TypeRef::INT], TypeRef::INT).unwrap();
	catalog.declare_method(ifoo, "Execute", &[TypeRef::STR], TypeRef::STR).unwrap();
	catalog.declare_method(ifoo, "DoTypeOverload", &[bar], TypeRef::BOOL).unwrap();
	catalog.declare_method(ifoo, "DoTypeOverload", &[baz], TypeRef::BOOL).unwrap();
	catalog.declare_method(ifoo, "DoAddition", &[ints], TypeRef::INT).unwrap();
	Foo {
		catalog: Arc::new(catalog),
		ifoo,
		bar,
		baz,
	}
}

fn mock(f: &Foo, settings: MockSettings) -> Mock {
	Mock::new(f.catalog.clone(), f.ifoo, settings).unwrap()
}

fn on(mock: &mut Mock, name: &str, pattern: CallPattern, response: Response) {
	let member = mock.member(name).unwrap();
	mock.setup(member, pattern, response).unwrap();
}

#[test]
fn matches_any_parameter_value() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	on(&mut m, "Echo", CallPattern::new().arg(expr::any(TypeRef::INT)), Response::returns(5));
	on(&mut m, "Execute", CallPattern::new().arg(expr::any(TypeRef::STR)), Response::returns("foo"));

	assert_eq!(m.call("Echo", [5]).unwrap(), Value::Int(5));
	assert_eq!(m.call("Echo", [25]).unwrap(), Value::Int(5));
	assert_eq!(m.call("Execute", ["hello"]).unwrap(), Value::from("foo"));
	assert_eq!(m.call("Execute", [Value::Null]).unwrap(), Value::from("foo"));
}

#[test]
fn matches_predicate_parameter() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	let int = |v: &Value| v.as_int().unwrap_or_default();
	on(
		&mut m,
		"Echo",
		CallPattern::new().arg(expr::predicate(move |v| int(v) < 5 && int(v) > 0)),
		Response::returns(1),
	);
	on(&mut m, "Echo", CallPattern::new().arg(expr::predicate(move |v| int(v) <= 0)), Response::returns(0));
	on(&mut m, "Echo", CallPattern::new().arg(expr::predicate(move |v| int(v) >= 5)), Response::returns(2));

	for (arg, expected) in [(3, 1), (0, 0), (-5, 0), (5, 2), (6, 2)] {
		assert_eq!(m.call("Echo", [arg]).unwrap(), Value::Int(expected), "Echo({arg})");
	}
}

#[test]
fn matches_ranges() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	on(&mut m, "Echo", CallPattern::new().arg(expr::range(1, 5, RangeMode::Inclusive)), Response::returns(1));
	on(&mut m, "Echo", CallPattern::new().arg(expr::range(6, 10, RangeMode::Exclusive)), Response::returns(2));

	for (arg, expected) in [(1, 1), (2, 1), (5, 1), (7, 2), (9, 2), (6, 0), (10, 0)] {
		assert_eq!(m.call("Echo", [arg]).unwrap(), Value::Int(expected), "Echo({arg})");
	}
}

#[test]
fn strict_mock_does_not_match_out_of_range() {
	let f = foo();
	let mut m = mock(&f, MockSettings::strict());
	on(&mut m, "Echo", CallPattern::new().arg(expr::range(1, 5, RangeMode::Exclusive)), Response::returns(1));

	assert_eq!(m.call("Echo", [2]).unwrap(), Value::Int(1));
	let err = m.call("Echo", [1]).unwrap_err();
	assert_eq!(err.reason(), Reason::NoSetup);
}

#[test]
fn ranges_can_include_variables_and_computed_bounds() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	let from = Variable::new(1);
	let to_range = || Value::Int(5);
	on(
		&mut m,
		"Echo",
		CallPattern::new().arg(expr::range(&from, Operand::computed(to_range), RangeMode::Inclusive)),
		Response::returns(1),
	);
	assert_eq!(m.call("Echo", [1]).unwrap(), Value::Int(1));
}

#[test]
fn ranges_are_eagerly_evaluated() {
	let f = foo();
	let mut m = mock(&f, MockSettings::loose());
	let from = Variable::new("a");
	let to = Variable::new("d");
	on(
		&mut m,
		"Execute",
		CallPattern::new().arg(expr::range(&from, &to, RangeMode::Inclusive)),
		Response::returns("ack"),
	);
	assert_eq!(m.call("Execute", ["b"]).unwrap(), Value::from("ack"));

	from.set("c");
	assert_eq!(m.call("Execute", ["b"]).unwrap(), Value::from("ack"));
}

#[test]
fn regex_matches_and_eagerly_evaluates() {
	let f = foo();
	let mut m = mock(&f, MockSettings::loose());
	let reg = Variable::new("[a-d]+");
	on(
		&mut m,
		"Execute",
		CallPattern::new().arg(expr::pattern_with(&reg, PatternFlags::IGNORE_CASE)),
		Response::returns("foo"),
	);
	on(&mut m, "Execute", CallPattern::new().arg(expr::pattern(&reg)), Response::returns("bar"));

	assert_eq!(m.call("Execute", ["b"]).unwrap(), Value::from("bar"));
	assert_eq!(m.call("Execute", ["abc"]).unwrap(), Value::from("bar"));
	assert_eq!(m.call("Execute", ["B"]).unwrap(), Value::from("foo"));
	assert_eq!(m.call("Execute", ["BC"]).unwrap(), Value::from("foo"));

	reg.set("[c-d]+");

	assert_eq!(m.call("Execute", ["b"]).unwrap(), Value::from("bar"));
	assert_eq!(m.call("Execute", ["B"]).unwrap(), Value::from("foo"));
}

#[test]
fn matches_even_numbers_with_predicate() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	let is_even = expr::predicate_labeled("even", |v| v.as_int().is_some_and(|i| i % 2 == 0));
	on(&mut m, "Echo", CallPattern::new().arg(is_even), Response::returns(1));
	assert_eq!(m.call("Echo", [2]).unwrap(), Value::Int(1));
	assert_eq!(m.call("Echo", [3]).unwrap(), Value::Int(0));
}

#[test]
fn matches_different_overloads_with_any() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	let on_bar = m.member_with("DoTypeOverload", &[f.bar]).unwrap();
	let on_baz = m.member_with("DoTypeOverload", &[f.baz]).unwrap();
	m.setup(on_bar, CallPattern::new().arg(expr::any(f.bar)), Response::returns(true))
		.unwrap();
	m.setup(on_baz, CallPattern::new().arg(expr::any(f.baz)), Response::returns(false))
		.unwrap();

	assert_eq!(m.call("DoTypeOverload", [ObjectRef::empty(f.bar)]).unwrap(), Value::Bool(true));
	assert_eq!(m.call("DoTypeOverload", [ObjectRef::empty(f.baz)]).unwrap(), Value::Bool(false));
	assert_eq!(
		m.member("DoTypeOverload").unwrap_err().reason(),
		Reason::AmbiguousOverload
	);
}

#[test]
fn matches_same_reference_only() {
	let f = foo();
	let mut m = mock(&f, MockSettings::strict());
	let a = ObjectRef::empty(f.bar);
	let b = ObjectRef::empty(f.bar);
	let on_bar = m.member_with("DoTypeOverload", &[f.bar]).unwrap();
	m.setup(on_bar, CallPattern::new().arg(expr::identity(&a)), Response::returns(true))
		.unwrap();

	assert_eq!(m.call("DoTypeOverload", [a.clone()]).unwrap(), Value::Bool(true));
	assert_eq!(m.call("DoTypeOverload", [b]).unwrap_err().reason(), Reason::NoSetup);
}

#[test]
fn matches_sequence_parameter_value() {
	let f = foo();
	let mut m = mock(&f, MockSettings::default());
	on(
		&mut m,
		"DoAddition",
		CallPattern::new().arg(Value::seq(TypeRef::INT, [2, 4, 6])),
		Response::returns(12),
	);

	assert_eq!(m.call("DoAddition", [Value::seq(TypeRef::INT, [2, 4, 6])]).unwrap(), Value::Int(12));
	for other in [vec![2, 4], vec![2, 4, 5], vec![2, 4, 6, 8]] {
		assert_eq!(
			m.call("DoAddition", [Value::seq(TypeRef::INT, other.clone())]).unwrap(),
			Value::Int(0),
			"DoAddition({other:?})"
		);
	}
}
