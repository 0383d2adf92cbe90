//! Builder pattern for constructing `GeoPackageRuntime` instances

use super::{EventBus, GeoPackageRuntime, RuntimeInner};
use crate::{GeoPackageOpener, HandleCache};
use anyhow::Result;
use gpkg_core::io::{DataLocation, DataReader};
use std::sync::Arc;

/// Creates a reader for the bytes at a location.
pub type ReaderFactory = Arc<dyn Fn(&DataLocation) -> Result<DataReader> + Send + Sync>;

/// Builder for creating customized `GeoPackageRuntime` instances
///
/// # Examples
///
/// ```no_run
/// use gpkg_layers::{GeoPackageRuntime, MockOpener, MockSources};
/// use std::sync::Arc;
///
/// let sources = MockSources::new();
/// let runtime = GeoPackageRuntime::builder(Arc::new(MockOpener::new()))
///     .with_private_cache()
///     .reader_factory(sources.reader_factory())
///     .build();
/// ```
pub struct RuntimeBuilder {
	opener: Arc<dyn GeoPackageOpener>,
	cache: Option<Arc<HandleCache>>,
	reader_factory: Option<ReaderFactory>,
	event_bus: Option<EventBus>,
}

impl RuntimeBuilder {
	#[must_use]
	pub fn new(opener: Arc<dyn GeoPackageOpener>) -> Self {
		Self {
			opener,
			cache: None,
			reader_factory: None,
			event_bus: None,
		}
	}

	/// Use `cache` instead of the process-wide cache.
	#[must_use]
	pub fn cache(mut self, cache: Arc<HandleCache>) -> Self {
		self.cache = Some(cache);
		self
	}

	/// Use a new cache that only this runtime and its clones see.
	#[must_use]
	pub fn with_private_cache(self) -> Self {
		self.cache(Arc::new(HandleCache::new()))
	}

	/// Replace how source locations are read.
	///
	/// By default URLs are fetched over HTTP(S) and paths are read from disk.
	#[must_use]
	pub fn reader_factory(mut self, factory: ReaderFactory) -> Self {
		self.reader_factory = Some(factory);
		self
	}

	/// Emit events on an existing bus.
	#[must_use]
	pub fn event_bus(mut self, event_bus: EventBus) -> Self {
		self.event_bus = Some(event_bus);
		self
	}

	#[must_use]
	pub fn build(self) -> GeoPackageRuntime {
		GeoPackageRuntime {
			inner: Arc::new(RuntimeInner {
				opener: self.opener,
				cache: self.cache.unwrap_or_else(HandleCache::global),
				reader_factory: self.reader_factory.unwrap_or_else(default_reader_factory),
				event_bus: self.event_bus.unwrap_or_default(),
			}),
		}
	}
}

fn default_reader_factory() -> ReaderFactory {
	Arc::new(|location: &DataLocation| location.to_reader())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MockOpener;

	#[test]
	fn defaults_to_global_cache() {
		let runtime = RuntimeBuilder::new(Arc::new(MockOpener::new())).build();
		assert!(Arc::ptr_eq(runtime.cache(), &HandleCache::global()));
	}

	#[test]
	fn private_cache() {
		let runtime = RuntimeBuilder::new(Arc::new(MockOpener::new()))
			.with_private_cache()
			.build();
		assert!(!Arc::ptr_eq(runtime.cache(), &HandleCache::global()));
	}

	#[test]
	fn shared_event_bus() {
		let bus = EventBus::new();
		let runtime = RuntimeBuilder::new(Arc::new(MockOpener::new()))
			.event_bus(bus.clone())
			.build();
		bus.subscribe(|_| {});
		assert_eq!(format!("{:?}", runtime.events()), "EventBus(1 listeners)");
	}
}
