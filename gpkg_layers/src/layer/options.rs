use super::LayerSource;
use crate::{AssetLocator, FeatureStyle};
use gpkg_core::TileSize;

/// Options of a [`TileLayer`](crate::TileLayer).
#[derive(Clone, Debug)]
pub struct TileLayerOptions {
	/// Name of the tile table inside the GeoPackage.
	pub layer_name: String,
	pub source: LayerSource,
	/// Load the GeoPackage for this layer alone, without taking it from or storing it in the cache.
	pub no_cache: bool,
	pub tile_size: TileSize,
	pub asset_locator: AssetLocator,
}

impl TileLayerOptions {
	pub fn new(layer_name: &str, source: impl Into<LayerSource>) -> Self {
		Self {
			layer_name: layer_name.to_string(),
			source: source.into(),
			no_cache: false,
			tile_size: TileSize::default(),
			asset_locator: AssetLocator::default(),
		}
	}

	#[must_use]
	pub fn with_no_cache(mut self, no_cache: bool) -> Self {
		self.no_cache = no_cache;
		self
	}

	#[must_use]
	pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
		self.tile_size = tile_size;
		self
	}

	#[must_use]
	pub fn with_asset_locator(mut self, asset_locator: AssetLocator) -> Self {
		self.asset_locator = asset_locator;
		self
	}
}

/// Options of a [`FeatureLayer`](crate::FeatureLayer).
#[derive(Clone, Debug)]
pub struct FeatureLayerOptions {
	/// Name of the feature table inside the GeoPackage.
	pub layer_name: String,
	pub source: LayerSource,
	pub no_cache: bool,
	pub style: FeatureStyle,
	pub asset_locator: AssetLocator,
}

impl FeatureLayerOptions {
	pub fn new(layer_name: &str, source: impl Into<LayerSource>) -> Self {
		Self {
			layer_name: layer_name.to_string(),
			source: source.into(),
			no_cache: false,
			style: FeatureStyle::default(),
			asset_locator: AssetLocator::default(),
		}
	}

	#[must_use]
	pub fn with_no_cache(mut self, no_cache: bool) -> Self {
		self.no_cache = no_cache;
		self
	}

	#[must_use]
	pub fn with_style(mut self, style: FeatureStyle) -> Self {
		self.style = style;
		self
	}

	#[must_use]
	pub fn with_asset_locator(mut self, asset_locator: AssetLocator) -> Self {
		self.asset_locator = asset_locator;
		self
	}
}
