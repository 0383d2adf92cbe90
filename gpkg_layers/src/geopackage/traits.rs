use crate::AssetLocator;
use anyhow::Result;
use async_trait::async_trait;
use gpkg_core::{Blob, GeoBBox, TileCoord};
use image::RgbaImage;
use serde_json::{Map, Value};
use std::{fmt::Debug, sync::Arc};

/// One feature as emitted by the library. Besides `geometry`, `id` and `properties` it may
/// carry any other fields.
pub type RawFeature = Map<String, Value>;

/// Iterator over the features of one table.
pub type FeatureIterator<'a> = Box<dyn Iterator<Item = Result<RawFeature>> + Send + 'a>;

/// A shared, opened GeoPackage.
pub type GeoPackageHandle = Arc<dyn GeoPackage>;

/// An opened GeoPackage.
///
/// Handles are shared between all layers that use the same cached source, so implementations
/// must be usable through `&self` from several tasks at once.
#[async_trait]
pub trait GeoPackage: Debug + Send + Sync {
	/// Renders the tile at `coord` of the standard web tile grid into `canvas`.
	///
	/// The target size is the size of `canvas`.
	async fn xyz_tile(&self, table: &str, coord: &TileCoord, canvas: &mut RgbaImage) -> Result<()>;

	/// Renders the area `bbox` (longitude/latitude in degrees) of `table`, reprojected to
	/// `projection`, into `canvas`.
	async fn projected_tile(
		&self,
		table: &str,
		bbox: &GeoBBox,
		zoom: u8,
		projection: &str,
		canvas: &mut RgbaImage,
	) -> Result<()>;

	/// Iterates all features of a feature table as GeoJSON objects.
	fn iterate_geojson_features(&self, table: &str) -> Result<FeatureIterator<'_>>;
}

/// Turns GeoPackage bytes into a [`GeoPackageHandle`].
#[async_trait]
pub trait GeoPackageOpener: Debug + Send + Sync {
	/// Opens a GeoPackage from its complete file contents.
	async fn open(&self, data: Blob) -> Result<GeoPackageHandle>;

	/// Tells the library where to fetch its auxiliary binary assets from.
	///
	/// Libraries without such assets can ignore the call.
	fn set_asset_locator(&self, _locator: &AssetLocator) {}
}
