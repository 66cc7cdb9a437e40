use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, mpsc};
use std::thread;
use std::time::Duration;

use decoy_primitives::{TypeCatalog, TypeRef};
use pretty_assertions::assert_eq;

use super::*;
use crate::key::GenerationOptions;

fn keys() -> (CacheKey, CacheKey) {
	let mut catalog = TypeCatalog::new();
	let ifoo = catalog.declare_interface("IFoo", &[]).unwrap();
	let ibar = catalog.declare_interface("IBar", &[]).unwrap();
	(
		CacheKey::for_type(ifoo, [ibar], None),
		CacheKey::for_type(ibar, [ifoo], Some(GenerationOptions::new())),
	)
}

#[test]
fn generates_once_and_reuses_artifact() {
	let (key, _) = keys();
	let cache = ProxyCache::<Arc<str>>::new();
	let calls = AtomicUsize::new(0);
	let generate = |_: &CacheKey| {
		calls.fetch_add(1, Ordering::SeqCst);
		Ok::<_, GeneratorError>(Arc::from("FooProxy"))
	};

	let first = cache.get_or_create(&key, generate).unwrap();
	let second = cache.get_or_create(&key, generate).unwrap();
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert_eq!(cache.len(), 1);
	assert!(cache.contains(&key));
	assert_eq!(cache.get(&key).as_deref(), Some("FooProxy"));
}

#[test]
fn equal_keys_built_separately_share_an_entry() {
	let mut catalog = TypeCatalog::new();
	let ifoo = catalog.declare_interface("IFoo", &[]).unwrap();
	let cache = ProxyCache::<u32>::new();
	let a = CacheKey::for_type(ifoo, [TypeRef::OBJECT], None);
	let b = CacheKey::for_type(ifoo, [TypeRef::OBJECT], None);

	assert_eq!(cache.get_or_create(&a, |_| Ok::<_, String>(1)).unwrap(), 1);
	assert_eq!(cache.get_or_create(&b, |_| Ok::<_, String>(2)).unwrap(), 1);
}

#[test]
fn failed_generation_is_not_cached() {
	let (key, _) = keys();
	let cache = ProxyCache::<u32>::new();

	let err = cache
		.get_or_create(&key, |_| Err::<u32, _>("generator crashed"))
		.unwrap_err();
	assert!(matches!(&err, ProxyError::Generation { key: failed, .. } if *failed == key));
	assert_eq!(err.to_string(), format!("proxy generation failed for {key}"));
	assert!(!cache.contains(&key));
	assert!(cache.is_empty());
	assert_eq!(cache.get(&key), None);

	assert_eq!(cache.get_or_create(&key, |_| Ok::<_, String>(7)).unwrap(), 7);
	assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_first_requests_generate_once() {
	const THREADS: usize = 8;
	let (key, _) = keys();
	let cache = ProxyCache::<Arc<usize>>::new();
	let calls = AtomicUsize::new(0);
	let barrier = Barrier::new(THREADS);

	let results: Vec<Arc<usize>> = thread::scope(|s| {
		let handles: Vec<_> = (0..THREADS)
			.map(|_| {
				s.spawn(|| {
					barrier.wait();
					cache
						.get_or_create(&key, |_| {
							let n = calls.fetch_add(1, Ordering::SeqCst);
							thread::sleep(Duration::from_millis(20));
							Ok::<_, String>(Arc::new(n))
						})
						.unwrap()
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
}

#[test]
fn other_keys_are_not_blocked_by_inflight_generation() {
	let (slow_key, fast_key) = keys();
	let cache = ProxyCache::<&'static str>::new();
	let (started_tx, started_rx) = mpsc::channel();
	let (release_tx, release_rx) = mpsc::channel::<()>();

	thread::scope(|s| {
		let cache = &cache;
		let slow_key = &slow_key;
		let slow = s.spawn(move || {
			cache.get_or_create(slow_key, |_| {
				started_tx.send(()).unwrap();
				release_rx.recv().unwrap();
				Ok::<_, String>("slow")
			})
		});

		started_rx.recv().unwrap();
		assert_eq!(cache.get_or_create(&fast_key, |_| Ok::<_, String>("fast")).unwrap(), "fast");
		assert!(cache.contains(&fast_key));

		release_tx.send(()).unwrap();
		assert_eq!(slow.join().unwrap().unwrap(), "slow");
	});
	assert_eq!(cache.len(), 2);
}

#[test]
fn global_cache_stores_type_erased_artifacts() {
	let mut catalog = TypeCatalog::new();
	let iglobal = catalog.declare_interface("IGlobalOnly", &[]).unwrap();
	let key = CacheKey::for_type(
		iglobal,
		[],
		Some(GenerationOptions::new().with_hook("global-cache-test")),
	);

	let artifact = ProxyCache::global()
		.get_or_create(&key, |_| Ok::<ArtifactHandle, String>(Arc::new(42u64)))
		.unwrap();
	assert_eq!(artifact.downcast_ref::<u64>(), Some(&42));

	let again = ProxyCache::global()
		.get_or_create(&key, |_| Err::<ArtifactHandle, _>("must not run"))
		.unwrap();
	assert!(Arc::ptr_eq(&artifact, &again));
}

#[test]
fn panicking_generator_leaves_slot_retryable() {
	let (key, _) = keys();
	let cache = ProxyCache::<u32>::new();

	let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
		cache.get_or_create(&key, |_| -> Result<u32, String> { panic!("generator exploded") })
	}));
	assert!(outcome.is_err());
	assert!(!cache.contains(&key));

	assert_eq!(cache.get_or_create(&key, |_| Ok::<_, String>(3)).unwrap(), 3);
	assert_eq!(cache.get(&key), Some(3));
}
