//! Raster tiles from a GeoPackage tile table.
//!
//! A [`TileLayer`] obtains its GeoPackage when it is attached to a map and renders every requested
//! tile into a fresh bitmap of the configured tile size. Requests that arrive while the
//! GeoPackage is still loading wait for it.
//!
//! In a Web Mercator map tiles are rendered by their grid address. In a geographic
//! (`EPSG:4326`) map the tile's corners are unprojected to longitude/latitude and the GeoPackage
//! renders that box, reprojected to `EPSG:4326`.
//!
//! # Example
//!
//! ```
//! use gpkg_core::{Crs, TileCoord, TileSize};
//! use gpkg_layers::{GeoPackageHandle, GeoPackageRuntime, MockGeoPackage, MockOpener, TileLayer, TileLayerOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = GeoPackageRuntime::new(Arc::new(MockOpener::new()));
//!     let gpkg: GeoPackageHandle = Arc::new(MockGeoPackage::new());
//!     let options = TileLayerOptions::new("ortho", gpkg).with_tile_size(TileSize::new(512, 256));
//!
//!     let mut layer = TileLayer::new(options, runtime);
//!     layer.on_add(Arc::new(Crs::WebMercator))?;
//!
//!     let tile = layer.tile(TileCoord::new(3, 4, 2)?).await?;
//!     assert_eq!(tile.dimensions(), (512, 256));
//!     Ok(())
//! }
//! ```

use super::{HandleState, HandleWaiter, LayerSource, LoadState, MapView, TileLayerOptions};
use crate::{EventBus, GeoPackageHandle, GeoPackageRuntime};
use anyhow::{Context, Result, anyhow};
use gpkg_core::{GeoBBox, TileCoord, TileSize};
use image::RgbaImage;
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};

/// Receives a finished tile, or the reason there is none. Called exactly once per request.
pub type TileCallback = Box<dyn FnOnce(Result<RgbaImage>) + Send + 'static>;

pub struct TileLayer {
	options: TileLayerOptions,
	runtime: GeoPackageRuntime,
	state: HandleState,
	attachment: Option<Attachment>,
}

struct Attachment {
	map: Arc<dyn MapView>,
	tokio: Handle,
	load_task: Option<JoinHandle<()>>,
}

impl TileLayer {
	/// Creates a detached layer and points the GeoPackage library to the layer's asset locator.
	pub fn new(options: TileLayerOptions, runtime: GeoPackageRuntime) -> Self {
		runtime.set_asset_locator(&options.asset_locator);
		Self {
			options,
			runtime,
			state: HandleState::new(),
			attachment: None,
		}
	}

	#[must_use]
	pub fn options(&self) -> &TileLayerOptions {
		&self.options
	}

	#[must_use]
	pub fn tile_size(&self) -> TileSize {
		self.options.tile_size
	}

	/// Attaches the layer to `map`.
	///
	/// A handle given as source is used directly. A location is taken from the cache if possible,
	/// otherwise it is loaded in the background. Must be called from within a Tokio runtime.
	pub fn on_add(&mut self, map: Arc<dyn MapView>) -> Result<()> {
		let tokio = Handle::try_current().context("attaching a tile layer requires a Tokio runtime")?;
		self.on_remove();

		let load_task = match &self.options.source {
			LayerSource::Handle(handle) => {
				self.state.set(LoadState::Ready(handle.clone()));
				None
			}
			LayerSource::Location(location) => {
				if let Some(handle) = self.runtime.cached(location, self.options.no_cache) {
					self.state.set(LoadState::Ready(handle));
					None
				} else {
					self.state.set(LoadState::Loading);
					let runtime = self.runtime.clone();
					let location = location.clone();
					let no_cache = self.options.no_cache;
					let state = self.state.clone();
					Some(tokio.spawn(async move {
						state.finish_loading(runtime.load(&location, no_cache).await);
					}))
				}
			}
		};

		log::debug!("attached tile layer '{}'", self.options.layer_name);
		self.attachment = Some(Attachment { map, tokio, load_task });
		Ok(())
	}

	/// Detaches the layer. A running load is abandoned and waiting tile requests fail.
	pub fn on_remove(&mut self) {
		if let Some(attachment) = self.attachment.take() {
			if let Some(task) = attachment.load_task {
				task.abort();
			}
			log::debug!("detached tile layer '{}'", self.options.layer_name);
		}
		self.state.set(LoadState::Detached);
	}

	/// True once the GeoPackage is available.
	#[must_use]
	pub fn is_loaded(&self) -> bool {
		matches!(self.state.current(), LoadState::Ready(_))
	}

	#[must_use]
	pub fn state(&self) -> LoadState {
		self.state.current()
	}

	/// Waits until the GeoPackage is available.
	pub async fn wait_loaded(&self) -> Result<GeoPackageHandle> {
		self.state.subscribe().ready(&self.options.layer_name).await
	}

	/// Renders the tile at `coord`.
	pub async fn tile(&self, coord: TileCoord) -> Result<RgbaImage> {
		let renderer = self.renderer(self.attachment()?);
		renderer.render(coord).await
	}

	/// Renders the tile at `coord` in the background and passes the result to `done`.
	pub fn create_tile(&self, coord: TileCoord, done: TileCallback) {
		match self.attachment() {
			Ok(attachment) => {
				let renderer = self.renderer(attachment);
				attachment.tokio.spawn(async move {
					done(renderer.render(coord).await);
				});
			}
			Err(e) => done(Err(e)),
		}
	}

	fn attachment(&self) -> Result<&Attachment> {
		self
			.attachment
			.as_ref()
			.ok_or_else(|| anyhow!("layer '{}' is not attached to a map", self.options.layer_name))
	}

	fn renderer(&self, attachment: &Attachment) -> TileRenderer {
		TileRenderer {
			layer_name: self.options.layer_name.clone(),
			tile_size: self.options.tile_size,
			map: attachment.map.clone(),
			waiter: self.state.subscribe(),
			events: self.runtime.events().clone(),
		}
	}
}

impl Drop for TileLayer {
	fn drop(&mut self) {
		self.on_remove();
	}
}

impl std::fmt::Debug for TileLayer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileLayer")
			.field("options", &self.options)
			.field("state", &self.state.current())
			.finish_non_exhaustive()
	}
}

/// Everything one tile request needs, detached from the layer's lifetime.
struct TileRenderer {
	layer_name: String,
	tile_size: TileSize,
	map: Arc<dyn MapView>,
	waiter: HandleWaiter,
	events: EventBus,
}

impl TileRenderer {
	async fn render(self, coord: TileCoord) -> Result<RgbaImage> {
		let TileRenderer {
			layer_name,
			tile_size,
			map,
			mut waiter,
			events,
		} = self;

		let mut canvas = RgbaImage::new(tile_size.width, tile_size.height);

		let result = async {
			let handle = waiter.ready(&layer_name).await?;
			draw(&handle, map.as_ref(), &layer_name, coord, tile_size, &mut canvas).await
		}
		.await
		.with_context(|| format!("rendering tile {coord} of layer '{layer_name}'"));

		match result {
			Ok(()) => {
				log::trace!("rendered tile {coord} of layer '{layer_name}'");
				Ok(canvas)
			}
			Err(e) => {
				log::warn!("{e:#}");
				events.tile_failed(&layer_name, coord, &e);
				Err(e)
			}
		}
	}
}

async fn draw(
	handle: &GeoPackageHandle,
	map: &dyn MapView,
	table: &str,
	coord: TileCoord,
	tile_size: TileSize,
	canvas: &mut RgbaImage,
) -> Result<()> {
	let crs = map.crs();
	if crs.is_geographic() {
		let nw = map.unproject(&coord.nw_pixel(&tile_size), coord.level);
		let se = map.unproject(&coord.se_pixel(&tile_size), coord.level);
		let bbox = GeoBBox::from_corners(nw, se);
		handle.projected_tile(table, &bbox, coord.level, crs.code(), canvas).await
	} else {
		handle.xyz_tile(table, &coord, canvas).await
	}
}
