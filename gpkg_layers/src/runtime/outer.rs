use super::{EventBus, RuntimeBuilder, RuntimeInner};
use crate::{AssetLocator, GeoPackageHandle, GeoPackageOpener, HandleCache, LoadOrigin};
use anyhow::{Context, Result};
use futures::FutureExt;
use gpkg_core::io::DataLocation;
use std::{sync::Arc, time::Instant};

/// Shared services for GeoPackage layers.
///
/// Once created, the runtime is immutable and cheap to clone (Arc-based). All layers created with
/// clones of one runtime share its cache and its event bus.
#[derive(Clone)]
pub struct GeoPackageRuntime {
	pub(crate) inner: Arc<RuntimeInner>,
}

impl GeoPackageRuntime {
	/// Create a runtime with the process-wide cache and the default readers.
	///
	/// Equivalent to `GeoPackageRuntime::builder(opener).build()`
	#[must_use]
	pub fn new(opener: Arc<dyn GeoPackageOpener>) -> Self {
		Self::builder(opener).build()
	}

	#[must_use]
	pub fn builder(opener: Arc<dyn GeoPackageOpener>) -> RuntimeBuilder {
		RuntimeBuilder::new(opener)
	}

	#[must_use]
	pub fn opener(&self) -> &Arc<dyn GeoPackageOpener> {
		&self.inner.opener
	}

	#[must_use]
	pub fn cache(&self) -> &Arc<HandleCache> {
		&self.inner.cache
	}

	/// Get the event bus
	///
	/// Use the event bus to subscribe to layer events or emit custom events.
	#[must_use]
	pub fn events(&self) -> &EventBus {
		&self.inner.event_bus
	}

	/// Tells the GeoPackage library where to fetch its assets from.
	pub fn set_asset_locator(&self, locator: &AssetLocator) {
		log::trace!("set asset locator {locator:?}");
		self.inner.opener.set_asset_locator(locator);
	}

	/// Returns the cached handle for `location` without loading anything.
	///
	/// Always `None` if `no_cache` is set.
	#[must_use]
	pub fn cached(&self, location: &DataLocation, no_cache: bool) -> Option<GeoPackageHandle> {
		if no_cache {
			return None;
		}
		let source = location.to_string();
		let handle = self.inner.cache.get(&source)?;
		self.report_cache_hit(&source);
		Some(handle)
	}

	/// Returns the GeoPackage at `location`, fetching and opening it if needed.
	///
	/// With caching, concurrent calls for one location share one load and the result is kept in
	/// the cache. With `no_cache` every call loads its own handle and the cache only records that
	/// the location was loaded.
	pub async fn load(&self, location: &DataLocation, no_cache: bool) -> Result<GeoPackageHandle> {
		let source = location.to_string();

		if no_cache {
			let handle = self.fetch_and_open(location, false).await?;
			self.inner.cache.mark_uncached(&source);
			return Ok(handle);
		}

		let runtime = self.clone();
		let owned_location = location.clone();
		let (handle, origin) = self
			.inner
			.cache
			.get_or_load(&source, move || {
				async move { runtime.fetch_and_open(&owned_location, true).await }.boxed()
			})
			.await?;

		if origin == LoadOrigin::Cached {
			self.report_cache_hit(&source);
		}
		Ok(handle)
	}

	async fn fetch_and_open(&self, location: &DataLocation, cached: bool) -> Result<GeoPackageHandle> {
		let source = location.to_string();
		log::debug!("loading GeoPackage {source}");
		let start = Instant::now();

		let result = async {
			let reader = (self.inner.reader_factory)(location)?;
			let data = reader.read_all().await?;
			log::trace!("read {} bytes from {}", data.len(), reader.get_name());
			self.inner.opener.open(data).await
		}
		.await
		.with_context(|| format!("loading GeoPackage '{source}'"));

		match &result {
			Ok(_) => {
				let elapsed = start.elapsed();
				log::debug!("loading GeoPackage {source}: {elapsed:?}");
				self.inner.event_bus.loaded(&source, elapsed, cached);
			}
			Err(e) => {
				log::warn!("{e:#}");
				self.inner.event_bus.load_failed(&source, e);
			}
		}
		result
	}

	fn report_cache_hit(&self, source: &str) {
		log::info!("GeoPackage {source} was loaded, pulling from cache");
		self.inner.event_bus.cache_hit(source);
	}
}

impl std::fmt::Debug for GeoPackageRuntime {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeoPackageRuntime")
			.field("opener", &self.inner.opener)
			.field("cache", &self.inner.cache)
			.finish_non_exhaustive()
	}
}
