//! Overload binding for name-based calls.
//!
//! Overloads are distinct members, so a setup never matches a call bound to
//! a sibling overload. Binding picks the member a call targets:
//!
//! 1. Candidates share the name and arity and accept every runtime type.
//! 2. An exact candidate (parameter types equal the runtime types) wins.
//! 3. Otherwise the unique candidate more specific than all others wins.
//! 4. Anything else is [`MockError::AmbiguousOverload`].
//!
//! The winner is then mapped to its [`overrider`], so a signature declared
//! on a base and redeclared on a derived owner resolves to the derived one.
//!
//! [`check_overloads`] rejects, up front, overload pairs that some argument
//! types could reach through widening without either being more specific.

use decoy_primitives::{MemberDecl, MemberRef, TypeCatalog, TypeRef};

use crate::error::MockError;


/// Returns true if every parameter of `a` is assignable to the matching one of `b`.
pub fn is_more_specific(catalog: &TypeCatalog, a: &MemberDecl, b: &MemberDecl) -> bool {
	a.arity() == b.arity()
		&& a.params
			.iter()
			.zip(&b.params)
			.all(|(&pa, &pb)| catalog.is_assignable(pa, pb))
}

/// Resolves which of `members` a call to `name` with `arg_types` targets.
///
/// `owner` only names the mocked type in errors.
pub fn bind(
	catalog: &TypeCatalog,
	owner: TypeRef,
	members: &[MemberRef],
	name: &str,
	arg_types: &[TypeRef],
) -> Result<MemberRef, MockError> {
	let mut candidates: Vec<(MemberRef, &MemberDecl)> = Vec::new();
	for &member in members {
		let decl = catalog.member(member)?;
		if decl.name == name
			&& decl.arity() == arg_types.len()
			&& arg_types
				.iter()
				.zip(&decl.params)
				.all(|(&arg, &param)| catalog.is_assignable(arg, param))
		{
			candidates.push((member, decl));
		}
	}

	if candidates.is_empty() {
		let args = arg_types
			.iter()
			.map(|&t| catalog.type_name(t))
			.collect::<Vec<_>>()
			.join(", ");
		return Err(MockError::MissingMember {
			owner: catalog.type_name(owner).to_string(),
			member: format!("{name}({args})"),
		});
	}

	if let Some(&(member, _)) = candidates.iter().find(|(_, d)| d.params == arg_types) {
		return overrider(catalog, members, member);
	}

	let best: Vec<MemberRef> = candidates
		.iter()
		.filter(|(_, a)| candidates.iter().all(|(_, b)| is_more_specific(catalog, a, b)))
		.map(|&(m, _)| m)
		.collect();
	match best.as_slice() {
		[first, ..] => overrider(catalog, members, *first),
		[] => Err(MockError::AmbiguousOverload {
			name: name.to_string(),
			candidates: candidates.iter().map(|&(m, _)| catalog.describe_member(m)).collect(),
		}),
	}
}

/// Returns the member that answers calls to `member`'s signature.
///
/// Members of `members` sharing `member`'s name and parameter list collapse
/// onto the one whose owner derives from every other owner. Without such an
/// owner, as when two unrelated interfaces declare the same method and
/// nothing overrides it, the signature is ambiguous.
pub fn overrider(catalog: &TypeCatalog, members: &[MemberRef], member: MemberRef) -> Result<MemberRef, MockError> {
	let decl = catalog.member(member)?;
	let mut same: Vec<(MemberRef, TypeRef)> = Vec::new();
	for &m in members {
		let other = catalog.member(m)?;
		if other.name == decl.name && other.params == decl.params {
			same.push((m, other.owner));
		}
	}
	if same.len() <= 1 {
		return Ok(member);
	}
	same
		.iter()
		.find(|&&(_, owner)| same.iter().all(|&(_, other)| catalog.is_assignable(owner, other)))
		.map(|&(m, _)| m)
		.ok_or_else(|| MockError::AmbiguousOverload {
			name: decl.name.clone(),
			candidates: same.iter().map(|&(m, _)| catalog.describe_member(m)).collect(),
		})
}

/// Rejects overload pairs of `ty` that can be reached by the same argument
/// types without either pair member being more specific.
///
/// Null is not considered a witness: a null argument to such overloads is
/// reported by [`bind`] when the call happens.
pub fn check_overloads(catalog: &TypeCatalog, ty: TypeRef) -> Result<(), MockError> {
	let members = catalog.members_of(ty);
	let decls = members
		.iter()
		.map(|&m| catalog.member(m).map(|d| (m, d)))
		.collect::<Result<Vec<_>, _>>()?;

	for (i, &(ma, a)) in decls.iter().enumerate() {
		for &(mb, b) in &decls[i + 1..] {
			if a.name != b.name || a.arity() != b.arity() {
				continue;
			}
			if a.params == b.params {
				overrider(catalog, &members, ma)?;
				continue;
			}
			if is_more_specific(catalog, a, b) || is_more_specific(catalog, b, a) {
				continue;
			}
			let reachable = a.params.iter().zip(&b.params).all(|(&pa, &pb)| {
				catalog.all_types().any(|t| {
					t != TypeRef::NULL && catalog.is_assignable(t, pa) && catalog.is_assignable(t, pb)
				})
			});
			if reachable {
				return Err(MockError::AmbiguousOverload {
					name: a.name.clone(),
					candidates: vec![catalog.describe_member(ma), catalog.describe_member(mb)],
				});
			}
		}
	}
	Ok(())
}
