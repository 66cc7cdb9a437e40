use decoy_primitives::MemberRef;
use rustc_hash::FxHashMap;

use crate::setup::Setup;

/// Append-only setups of one mock, grouped by exact member identity.
///
/// Within a member, registration order is preserved; resolution scans it
/// back to front so that later setups shadow earlier overlapping ones.
#[derive(Debug, Default, Clone)]
pub struct SetupRegistry {
	by_member: FxHashMap<MemberRef, Vec<Setup>>,
	len: usize,
}

impl SetupRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, setup: Setup) {
		self.by_member.entry(setup.member()).or_default().push(setup);
		self.len += 1;
	}

	/// Setups for `member` in registration order.
	pub fn lookup(&self, member: MemberRef) -> &[Setup] {
		self.by_member.get(&member).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Total number of registered setups.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Members with at least one setup, sorted by handle.
	pub fn members(&self) -> Vec<MemberRef> {
		let mut members: Vec<_> = self.by_member.keys().copied().collect();
		members.sort();
		members
	}
}
