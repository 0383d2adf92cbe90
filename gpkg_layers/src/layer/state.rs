//! Load state of a layer's GeoPackage.
//!
//! The state lives in a `watch` channel. Tile requests subscribe and sleep until the state leaves
//! [`LoadState::Loading`]; detaching the layer or dropping it wakes them as well.

use crate::GeoPackageHandle;
use anyhow::{Result, anyhow, bail};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone, Debug)]
pub enum LoadState {
	/// The layer is not attached to a map.
	Detached,
	Loading,
	Ready(GeoPackageHandle),
	Failed(Arc<anyhow::Error>),
}

#[derive(Clone, Debug)]
pub(crate) struct HandleState {
	tx: Arc<watch::Sender<LoadState>>,
}

impl HandleState {
	pub(crate) fn new() -> Self {
		let (tx, _rx) = watch::channel(LoadState::Detached);
		Self { tx: Arc::new(tx) }
	}

	pub(crate) fn set(&self, state: LoadState) {
		self.tx.send_replace(state);
	}

	/// Stores the result of a load, unless the layer stopped waiting for it.
	pub(crate) fn finish_loading(&self, result: Result<GeoPackageHandle>) {
		self.tx.send_if_modified(|state| {
			if !matches!(state, LoadState::Loading) {
				return false;
			}
			*state = match result {
				Ok(handle) => LoadState::Ready(handle),
				Err(e) => LoadState::Failed(Arc::new(e)),
			};
			true
		});
	}

	pub(crate) fn current(&self) -> LoadState {
		self.tx.borrow().clone()
	}

	pub(crate) fn subscribe(&self) -> HandleWaiter {
		HandleWaiter(self.tx.subscribe())
	}
}

/// Waits for the GeoPackage of one layer.
#[derive(Clone, Debug)]
pub(crate) struct HandleWaiter(watch::Receiver<LoadState>);

impl HandleWaiter {
	/// Suspends until loading has finished and returns the handle.
	pub(crate) async fn ready(&mut self, layer: &str) -> Result<GeoPackageHandle> {
		let state = self
			.0
			.wait_for(|state| !matches!(state, LoadState::Loading))
			.await
			.map_err(|_| anyhow!("layer '{layer}' was dropped"))?
			.clone();

		match state {
			LoadState::Ready(handle) => Ok(handle),
			LoadState::Failed(e) => bail!("GeoPackage of layer '{layer}' failed to load: {e:#}"),
			LoadState::Detached | LoadState::Loading => bail!("layer '{layer}' is not attached to a map"),
		}
	}
}
