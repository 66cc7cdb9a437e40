use std::any::Any;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{GeneratorError, ProxyError};
use crate::key::CacheKey;

#[cfg(test)]
mod tests;

/// Type-erased generated artifact stored by [`ProxyCache::global`].
pub type ArtifactHandle = Arc<dyn Any + Send + Sync>;

/// Per-key slot. `None` until a generation succeeds.
type Slot<A> = Arc<Mutex<Option<A>>>;

/// Cache of generated proxy artifacts keyed by [`CacheKey`].
///
/// Ensures at most one successful generation per key using a two-level lock:
/// the map lock is held only to find or insert a key's slot, and the slot lock
/// is held for the duration of that key's generation. Concurrent first
/// requests for one key wait on the slot; requests for other keys proceed.
///
/// Entries are never evicted.
pub struct ProxyCache<A> {
	slots: Mutex<FxHashMap<CacheKey, Slot<A>>>,
}

impl<A> Default for ProxyCache<A> {
	fn default() -> Self {
		Self {
			slots: Mutex::new(FxHashMap::default()),
		}
	}
}

impl<A> std::fmt::Debug for ProxyCache<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProxyCache")
			.field("keys", &self.slots.lock().len())
			.finish_non_exhaustive()
	}
}

impl<A: Clone> ProxyCache<A> {
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&self, key: &CacheKey) -> Slot<A> {
		self.slots.lock().entry(key.clone()).or_default().clone()
	}

	fn existing(&self, key: &CacheKey) -> Option<Slot<A>> {
		self.slots.lock().get(key).cloned()
	}

	/// Returns the artifact for `key`, running `generate` if none exists yet.
	///
	/// On generator failure nothing is stored and the error is returned; the
	/// next request for the key runs its generator again.
	pub fn get_or_create<E>(
		&self,
		key: &CacheKey,
		generate: impl FnOnce(&CacheKey) -> Result<A, E>,
	) -> Result<A, ProxyError>
	where
		E: Into<GeneratorError>,
	{
		let slot = self.slot(key);
		let mut artifact = slot.lock();
		if let Some(existing) = artifact.as_ref() {
			tracing::trace!(%key, "proxy cache hit");
			return Ok(existing.clone());
		}

		tracing::debug!(%key, "generating proxy");
		match generate(key) {
			Ok(generated) => {
				*artifact = Some(generated.clone());
				Ok(generated)
			}
			Err(err) => {
				let source = err.into();
				tracing::warn!(%key, error = %source, "proxy generation failed");
				Err(ProxyError::Generation {
					key: key.clone(),
					source,
				})
			}
		}
	}

	/// Returns the artifact for `key` without generating.
	///
	/// Waits if a generation for `key` is in flight.
	pub fn get(&self, key: &CacheKey) -> Option<A> {
		self.existing(key)?.lock().clone()
	}

	/// Returns true if an artifact for `key` has been generated.
	pub fn contains(&self, key: &CacheKey) -> bool {
		self.existing(key).is_some_and(|slot| slot.lock().is_some())
	}

	/// Number of keys with a generated artifact.
	pub fn len(&self) -> usize {
		let slots: Vec<Slot<A>> = self.slots.lock().values().cloned().collect();
		slots.iter().filter(|slot| slot.lock().is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl ProxyCache<ArtifactHandle> {
	/// The process-wide cache, created on first use.
	pub fn global() -> &'static Self {
		static GLOBAL: LazyLock<ProxyCache<ArtifactHandle>> = LazyLock::new(ProxyCache::new);
		&GLOBAL
	}
}
