//! Process-wide cache of opened GeoPackages, keyed by source.
//!
//! Every entry is either a shared handle or [`CacheEntry::Uncached`], which records that the
//! source was loaded by a layer that opted out of caching. Entries live until [`HandleCache::clear`]
//! is called; there is no eviction.
//!
//! Loads are coalesced: while a source is being fetched and opened, every further request for the
//! same key waits for that one load instead of starting another. The load itself runs as its own
//! task, so it completes and fills the cache even if every waiter goes away.

use crate::GeoPackageHandle;
use anyhow::{Result, anyhow};
use dashmap::{DashMap, mapref::entry::Entry};
use futures::{
	FutureExt,
	future::{BoxFuture, Shared},
};
use std::{
	fmt::Debug,
	sync::{Arc, LazyLock},
};

type LoadResult = Result<GeoPackageHandle, Arc<anyhow::Error>>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

static GLOBAL_CACHE: LazyLock<Arc<HandleCache>> = LazyLock::new(|| Arc::new(HandleCache::new()));

/// Value stored for a source key.
#[derive(Clone, Debug)]
pub enum CacheEntry {
	/// An opened GeoPackage, shared with every layer that uses the same source.
	Handle(GeoPackageHandle),
	/// The source was loaded with caching disabled. Never satisfies a lookup.
	Uncached,
}

/// How [`HandleCache::get_or_load`] obtained its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOrigin {
	/// The handle was already in the cache.
	Cached,
	/// This call started the load.
	Loaded,
	/// This call waited for a load another caller had started.
	Joined,
}

#[derive(Default)]
pub struct HandleCache {
	entries: DashMap<String, CacheEntry>,
	in_flight: DashMap<String, SharedLoad>,
}

impl HandleCache {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The cache shared by all runtimes that were not given their own.
	#[must_use]
	pub fn global() -> Arc<HandleCache> {
		GLOBAL_CACHE.clone()
	}

	/// Returns the cached handle for `key`. `Uncached` entries count as missing.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<GeoPackageHandle> {
		match self.entries.get(key)?.value() {
			CacheEntry::Handle(handle) => Some(handle.clone()),
			CacheEntry::Uncached => None,
		}
	}

	#[must_use]
	pub fn entry(&self, key: &str) -> Option<CacheEntry> {
		self.entries.get(key).map(|entry| entry.value().clone())
	}

	#[must_use]
	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	pub fn insert(&self, key: &str, handle: GeoPackageHandle) {
		self.entries.insert(key.to_string(), CacheEntry::Handle(handle));
	}

	/// Records that `key` was loaded without caching.
	///
	/// A handle cached by another layer stays in place.
	pub fn mark_uncached(&self, key: &str) {
		self.entries.entry(key.to_string()).or_insert(CacheEntry::Uncached);
	}

	/// Number of entries, including `Uncached` markers.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of loads currently running.
	#[must_use]
	pub fn loads_in_flight(&self) -> usize {
		self.in_flight.len()
	}

	/// Drops all entries. Running loads are not affected and still store their result.
	pub fn clear(&self) {
		self.entries.clear();
	}

	/// Returns the handle for `key`, running `load` if it is neither cached nor already loading.
	///
	/// A successful load is stored before any waiter is woken. A failed load stores nothing, so a
	/// later call tries again. Must be called from within a Tokio runtime.
	pub async fn get_or_load<F>(self: &Arc<Self>, key: &str, load: F) -> Result<(GeoPackageHandle, LoadOrigin)>
	where
		F: FnOnce() -> BoxFuture<'static, Result<GeoPackageHandle>>,
	{
		if let Some(handle) = self.get(key) {
			return Ok((handle, LoadOrigin::Cached));
		}

		let (shared, origin) = match self.in_flight.entry(key.to_string()) {
			Entry::Occupied(entry) => {
				log::debug!("joining running load of '{key}'");
				(entry.get().clone(), LoadOrigin::Joined)
			}
			Entry::Vacant(entry) => {
				// the previous load may have finished between the lookup above and taking the entry
				if let Some(handle) = self.get(key) {
					return Ok((handle, LoadOrigin::Cached));
				}
				let shared = self.spawn_load(key.to_string(), load());
				entry.insert(shared.clone());
				(shared, LoadOrigin::Loaded)
			}
		};

		let handle = shared.await.map_err(|e| anyhow!("{e:#}"))?;
		Ok((handle, origin))
	}

	fn spawn_load(self: &Arc<Self>, key: String, load: BoxFuture<'static, Result<GeoPackageHandle>>) -> SharedLoad {
		let guard = InFlightGuard {
			cache: Arc::clone(self),
			key,
		};
		let task = tokio::spawn(async move {
			let result = load.await;
			if let Ok(handle) = &result {
				guard.cache.insert(&guard.key, handle.clone());
			}
			drop(guard);
			result.map_err(Arc::new)
		});

		async move {
			match task.await {
				Ok(result) => result,
				Err(e) => Err(Arc::new(anyhow!("load task failed: {e}"))),
			}
		}
		.boxed()
		.shared()
	}
}

/// Removes the in-flight entry of a load when the load task ends, also if it panics.
struct InFlightGuard {
	cache: Arc<HandleCache>,
	key: String,
}

impl Drop for InFlightGuard {
	fn drop(&mut self) {
		self.cache.in_flight.remove(&self.key);
	}
}

impl Debug for HandleCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HandleCache")
			.field("entries", &self.entries.len())
			.field("in_flight", &self.in_flight.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MockGeoPackage;
	use std::{
		sync::atomic::{AtomicUsize, Ordering},
		time::Duration,
	};

	fn handle() -> GeoPackageHandle {
		Arc::new(MockGeoPackage::new())
	}

	#[test]
	fn uncached_entries_never_satisfy_lookups() {
		let cache = HandleCache::new();
		cache.mark_uncached("a.gpkg");
		assert!(matches!(cache.entry("a.gpkg"), Some(CacheEntry::Uncached)));
		assert!(cache.get("a.gpkg").is_none());
		assert!(!cache.contains("a.gpkg"));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn mark_uncached_keeps_existing_handle() {
		let cache = HandleCache::new();
		let h = handle();
		cache.insert("a.gpkg", h.clone());
		cache.mark_uncached("a.gpkg");
		assert!(Arc::ptr_eq(&cache.get("a.gpkg").unwrap(), &h));
	}

	#[test]
	fn insert_replaces_uncached_marker() {
		let cache = HandleCache::new();
		cache.mark_uncached("a.gpkg");
		cache.insert("a.gpkg", handle());
		assert!(cache.contains("a.gpkg"));

		cache.clear();
		assert!(cache.is_empty());
	}

	#[tokio::test]
	async fn concurrent_loads_are_coalesced() -> Result<()> {
		let cache = Arc::new(HandleCache::new());
		let loads = Arc::new(AtomicUsize::new(0));

		let load = |loads: Arc<AtomicUsize>| {
			move || -> BoxFuture<'static, Result<GeoPackageHandle>> {
				async move {
					loads.fetch_add(1, Ordering::SeqCst);
					tokio::time::sleep(Duration::from_millis(20)).await;
					Ok(handle())
				}
				.boxed()
			}
		};

		let (a, b) = tokio::join!(
			cache.get_or_load("a.gpkg", load(loads.clone())),
			cache.get_or_load("a.gpkg", load(loads.clone())),
		);
		let (a, origin_a) = a?;
		let (b, origin_b) = b?;

		assert_eq!(loads.load(Ordering::SeqCst), 1);
		assert!(Arc::ptr_eq(&a, &b));
		assert_eq!(origin_a, LoadOrigin::Loaded);
		assert_eq!(origin_b, LoadOrigin::Joined);
		assert_eq!(cache.loads_in_flight(), 0);

		let (c, origin_c) = cache.get_or_load("a.gpkg", load(loads.clone())).await?;
		assert!(Arc::ptr_eq(&a, &c));
		assert_eq!(origin_c, LoadOrigin::Cached);
		assert_eq!(loads.load(Ordering::SeqCst), 1);
		Ok(())
	}

	#[tokio::test]
	async fn failed_loads_are_not_cached() {
		let cache = Arc::new(HandleCache::new());

		let result = cache
			.get_or_load("bad.gpkg", || {
				async { Result::<GeoPackageHandle>::Err(anyhow!("not a GeoPackage")) }.boxed()
			})
			.await;
		assert_eq!(result.unwrap_err().to_string(), "not a GeoPackage");
		assert!(cache.is_empty());
		assert_eq!(cache.loads_in_flight(), 0);

		let (_, origin) = cache
			.get_or_load("bad.gpkg", || async { Ok(handle()) }.boxed())
			.await
			.unwrap();
		assert_eq!(origin, LoadOrigin::Loaded);
		assert!(cache.contains("bad.gpkg"));
	}

	async fn panicking_load() -> Result<GeoPackageHandle> {
		panic!("library bug")
	}

	#[tokio::test]
	async fn panicking_loads_can_be_retried() -> Result<()> {
		let cache = Arc::new(HandleCache::new());

		let error = cache
			.get_or_load("a.gpkg", || panicking_load().boxed())
			.await
			.unwrap_err();
		assert!(error.to_string().starts_with("load task failed"), "{error}");
		assert_eq!(cache.loads_in_flight(), 0);
		assert!(cache.is_empty());

		let (_, origin) = cache.get_or_load("a.gpkg", || async { Ok(handle()) }.boxed()).await?;
		assert_eq!(origin, LoadOrigin::Loaded);
		assert!(cache.contains("a.gpkg"));
		Ok(())
	}
}
