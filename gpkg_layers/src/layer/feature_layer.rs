//! Vector features from a GeoPackage feature table.

use super::{FeatureLayerOptions, LayerSource};
use crate::{Feature, FeatureSink, GeoPackageHandle, GeoPackageRuntime};
use anyhow::{Context, Result};

/// Feeds all features of one GeoPackage table into a [`FeatureSink`] when attached.
///
/// ```
/// use gpkg_layers::{
///     Feature, FeatureLayer, FeatureLayerOptions, GeoPackageHandle, GeoPackageRuntime, MockGeoPackage, MockOpener,
/// };
/// use serde_json::json;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let raw = json!({"id": 1, "geometry": null, "properties": {}});
///     let gpkg: GeoPackageHandle =
///         Arc::new(MockGeoPackage::new().with_features("roads", vec![raw.as_object().unwrap().clone()]));
///
///     let runtime = GeoPackageRuntime::new(Arc::new(MockOpener::new()));
///     let mut layer = FeatureLayer::new(FeatureLayerOptions::new("roads", gpkg), runtime);
///
///     let mut features: Vec<Feature> = Vec::new();
///     assert_eq!(layer.on_add(&mut features).await?, 1);
///     assert_eq!(features[0].id, Some(json!(1)));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FeatureLayer {
	options: FeatureLayerOptions,
	runtime: GeoPackageRuntime,
	handle: Option<GeoPackageHandle>,
}

impl FeatureLayer {
	/// Creates a detached layer and points the GeoPackage library to the layer's asset locator.
	pub fn new(options: FeatureLayerOptions, runtime: GeoPackageRuntime) -> Self {
		runtime.set_asset_locator(&options.asset_locator);
		Self {
			options,
			runtime,
			handle: None,
		}
	}

	#[must_use]
	pub fn options(&self) -> &FeatureLayerOptions {
		&self.options
	}

	#[must_use]
	pub fn is_loaded(&self) -> bool {
		self.handle.is_some()
	}

	/// Obtains the GeoPackage and adds every feature of the layer's table to `sink`, one call per
	/// feature. Returns the number of features added.
	///
	/// Runs once per attach. If loading or iterating fails, `sink.load_failed` is called and the
	/// error is returned; features added before the failure stay added.
	pub async fn on_add(&mut self, sink: &mut dyn FeatureSink) -> Result<usize> {
		let layer = self.options.layer_name.clone();

		match self.add_features(sink).await {
			Ok(count) => {
				log::debug!("added {count} features of layer '{layer}'");
				self.runtime.events().features_added(&layer, count);
				Ok(count)
			}
			Err(e) => {
				log::warn!("{e:#}");
				sink.load_failed(&e);
				self.runtime.events().features_failed(&layer, &e);
				Err(e)
			}
		}
	}

	/// Forgets the GeoPackage. Features already added to a sink are not touched.
	pub fn on_remove(&mut self) {
		self.handle = None;
	}

	async fn add_features(&mut self, sink: &mut dyn FeatureSink) -> Result<usize> {
		let handle = match &self.options.source {
			LayerSource::Handle(handle) => handle.clone(),
			LayerSource::Location(location) => self.runtime.load(location, self.options.no_cache).await?,
		};
		self.handle = Some(handle.clone());

		let table = &self.options.layer_name;
		let features = handle
			.iterate_geojson_features(table)
			.with_context(|| format!("reading features of table '{table}'"))?;

		let mut count = 0;
		for raw in features {
			let raw = raw.with_context(|| format!("reading feature {count} of table '{table}'"))?;
			sink.add_data(Feature::from_raw(raw), &self.options.style);
			count += 1;
		}
		Ok(count)
	}
}
