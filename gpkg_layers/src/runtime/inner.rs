use super::{EventBus, ReaderFactory};
use crate::{GeoPackageOpener, HandleCache};
use std::sync::Arc;

pub(crate) struct RuntimeInner {
	pub(crate) opener: Arc<dyn GeoPackageOpener>,
	pub(crate) cache: Arc<HandleCache>,
	pub(crate) reader_factory: ReaderFactory,
	pub(crate) event_bus: EventBus,
}
