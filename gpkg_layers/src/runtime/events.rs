//! Event system for layer events
//!
//! Layers report what happens to their GeoPackages on a shared event bus:
//! - Logging events
//! - Loads, cache hits and load failures
//! - Tile rendering failures
//! - Feature ingestion results and failures

use arc_swap::ArcSwap;
use gpkg_core::TileCoord;
use std::{sync::Arc, time::Duration};

/// Event types that can be emitted by the runtime
#[derive(Debug, Clone)]
pub enum Event {
	/// Logging event with level and message
	Log {
		level: LogLevel,
		target: String,
		message: String,
	},

	/// A GeoPackage was fetched and opened.
	Loaded {
		source: String,
		elapsed: Duration,
		cached: bool,
	},

	/// A layer attached to a GeoPackage that was already in the cache.
	CacheHit { source: String },

	/// Fetching or opening a GeoPackage failed.
	LoadFailed { source: String, message: String },

	/// Rendering a tile failed.
	TileFailed {
		layer: String,
		coord: TileCoord,
		message: String,
	},

	/// A feature layer handed its features to the sink.
	FeaturesAdded { layer: String, count: usize },

	/// A feature layer could not load its features.
	FeaturesFailed { layer: String, message: String },
}

/// Log level for logging events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

/// Unique identifier for event listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type EventListener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Thread-safe event bus for layer events
///
/// Listeners are called synchronously, in the order they were registered, on the task that
/// emits the event. Emitting is lock-free.
#[derive(Clone)]
pub struct EventBus {
	listeners: Arc<ArcSwap<Vec<EventListener>>>,
}

impl EventBus {
	#[must_use]
	pub fn new() -> Self {
		Self {
			listeners: Arc::new(ArcSwap::from_pointee(Vec::new())),
		}
	}

	/// Register an event listener that is called for all events emitted on this bus.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&Event) + Send + Sync + 'static,
	{
		let listener: EventListener = Arc::new(listener);
		let id = self.listeners.load().len();
		self.listeners.rcu(|old| {
			let mut new = (**old).clone();
			new.push(listener.clone());
			new
		});
		ListenerId(id)
	}

	/// Emit an event to all listeners
	///
	/// A panicking listener does not stop the others.
	pub fn emit(&self, event: Event) {
		let listeners = self.listeners.load();
		for listener in listeners.iter() {
			let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
				listener(&event);
			}));
		}
	}

	pub fn log(&self, level: LogLevel, target: &str, message: String) {
		self.emit(Event::Log {
			level,
			target: target.to_string(),
			message,
		});
	}

	pub fn loaded(&self, source: &str, elapsed: Duration, cached: bool) {
		self.emit(Event::Loaded {
			source: source.to_string(),
			elapsed,
			cached,
		});
	}

	pub fn cache_hit(&self, source: &str) {
		self.emit(Event::CacheHit {
			source: source.to_string(),
		});
	}

	pub fn load_failed(&self, source: &str, error: &anyhow::Error) {
		self.emit(Event::LoadFailed {
			source: source.to_string(),
			message: format!("{error:#}"),
		});
	}

	pub fn tile_failed(&self, layer: &str, coord: TileCoord, error: &anyhow::Error) {
		self.emit(Event::TileFailed {
			layer: layer.to_string(),
			coord,
			message: format!("{error:#}"),
		});
	}

	pub fn features_added(&self, layer: &str, count: usize) {
		self.emit(Event::FeaturesAdded {
			layer: layer.to_string(),
			count,
		});
	}

	pub fn features_failed(&self, layer: &str, error: &anyhow::Error) {
		self.emit(Event::FeaturesFailed {
			layer: layer.to_string(),
			message: format!("{error:#}"),
		});
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "EventBus({} listeners)", self.listeners.load().len())
	}
}

/// Adapter to forward log crate events to the event bus
pub struct LogAdapter {
	event_bus: EventBus,
}

impl LogAdapter {
	#[must_use]
	pub fn new(event_bus: EventBus) -> Self {
		Self { event_bus }
	}
}

impl log::Log for LogAdapter {
	fn enabled(&self, _metadata: &log::Metadata) -> bool {
		true
	}

	fn log(&self, record: &log::Record) {
		let level = match record.level() {
			log::Level::Error => LogLevel::Error,
			log::Level::Warn => LogLevel::Warn,
			log::Level::Info => LogLevel::Info,
			log::Level::Debug => LogLevel::Debug,
			log::Level::Trace => LogLevel::Trace,
		};

		self.event_bus.log(level, record.target(), format!("{}", record.args()));
	}

	fn flush(&self) {}
}

impl EventBus {
	/// Create a log adapter that forwards log crate events to the event bus
	#[must_use]
	pub fn create_log_adapter(&self) -> LogAdapter {
		LogAdapter::new(self.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::anyhow;
	use std::sync::Mutex;

	fn capture(bus: &EventBus) -> Arc<Mutex<Vec<Event>>> {
		let captured = Arc::new(Mutex::new(Vec::new()));
		let captured_clone = captured.clone();
		bus.subscribe(move |event| captured_clone.lock().unwrap().push(event.clone()));
		captured
	}

	#[test]
	fn subscribe_and_emit() {
		let bus = EventBus::new();
		let counter = Arc::new(Mutex::new(0));
		let counter_clone = counter.clone();

		let id = bus.subscribe(move |_event| {
			*counter_clone.lock().unwrap() += 1;
		});
		assert_eq!(id, ListenerId(0));

		bus.cache_hit("a.gpkg");
		bus.cache_hit("b.gpkg");
		assert_eq!(*counter.lock().unwrap(), 2);
	}

	#[test]
	fn clones_share_listeners() {
		let bus1 = EventBus::new();
		let bus2 = bus1.clone();
		let captured = capture(&bus1);

		bus2.features_added("rivers", 12);

		let events = captured.lock().unwrap();
		assert!(matches!(&events[0], Event::FeaturesAdded { layer, count: 12 } if layer == "rivers"));
	}

	#[test]
	fn panicking_listener_does_not_stop_others() {
		let bus = EventBus::new();
		bus.subscribe(|_event| panic!("listener panic"));
		let captured = capture(&bus);

		bus.loaded("a.gpkg", Duration::from_millis(5), true);

		assert_eq!(captured.lock().unwrap().len(), 1);
	}

	#[test]
	fn failure_events_carry_the_error_chain() {
		let bus = EventBus::new();
		let captured = capture(&bus);

		let error = anyhow!("connection refused").context("fetching 'a.gpkg'");
		bus.load_failed("a.gpkg", &error);
		bus.tile_failed("roads", TileCoord { level: 3, x: 1, y: 2 }, &error);

		let events = captured.lock().unwrap();
		match &events[0] {
			Event::LoadFailed { source, message } => {
				assert_eq!(source, "a.gpkg");
				assert_eq!(message, "fetching 'a.gpkg': connection refused");
			}
			other => panic!("unexpected event {other:?}"),
		}
		assert!(matches!(&events[1], Event::TileFailed { coord, .. } if coord.level == 3));
	}

	#[test]
	fn log_adapter_maps_levels() {
		use log::Log;

		let bus = EventBus::new();
		let captured = capture(&bus);
		let adapter = bus.create_log_adapter();
		assert!(adapter.enabled(&log::MetadataBuilder::new().level(log::Level::Info).build()));

		for level in [log::Level::Error, log::Level::Warn, log::Level::Trace] {
			let record = log::Record::builder()
				.level(level)
				.target("gpkg")
				.args(format_args!("msg"))
				.build();
			adapter.log(&record);
		}

		let levels: Vec<LogLevel> = captured
			.lock()
			.unwrap()
			.iter()
			.filter_map(|event| match event {
				Event::Log { level, target, .. } if target == "gpkg" => Some(*level),
				_ => None,
			})
			.collect();
		assert_eq!(levels, [LogLevel::Error, LogLevel::Warn, LogLevel::Trace]);
	}
}
