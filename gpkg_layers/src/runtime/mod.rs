//! Services shared by all layers of a map.
//!
//! The runtime bundles:
//! - the GeoPackage library (an opener)
//! - the handle cache, by default the process-wide one
//! - the reader factory that turns source locations into byte readers
//! - the event bus
//!
//! # Example
//!
//! ```no_run
//! use gpkg_layers::{GeoPackageRuntime, MockOpener};
//! use std::sync::Arc;
//!
//! let runtime = GeoPackageRuntime::builder(Arc::new(MockOpener::new()))
//!     .with_private_cache()
//!     .build();
//!
//! runtime.events().subscribe(|event| {
//!     println!("{:?}", event);
//! });
//! ```

mod builder;
mod events;
mod inner;
mod outer;

pub use builder::{ReaderFactory, RuntimeBuilder};
pub use events::{Event, EventBus, ListenerId, LogAdapter, LogLevel};
pub(crate) use inner::RuntimeInner;
pub use outer::GeoPackageRuntime;
