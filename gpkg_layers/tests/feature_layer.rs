use anyhow::Result;
use gpkg_core::{Blob, Crs};
use gpkg_layers::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

const URL: &str = "https://example.org/rivers.gpkg";

#[derive(Default)]
struct RecordingSink {
	features: Vec<Feature>,
	failures: Vec<String>,
}

impl FeatureSink for RecordingSink {
	fn add_data(&mut self, feature: Feature, _style: &FeatureStyle) {
		self.features.push(feature);
	}

	fn load_failed(&mut self, error: &anyhow::Error) {
		self.failures.push(format!("{error:#}"));
	}
}

fn raw_features(count: usize) -> Vec<RawFeature> {
	(0..count)
		.map(|i| {
			json!({
				"id": i,
				"geometry": {"type": "Point", "coordinates": [i, -(i as i64)]},
				"properties": {"name": format!("river {i}")},
				"srs_id": 4326,
				"table": "rivers",
			})
			.as_object()
			.unwrap()
			.clone()
		})
		.collect()
}

fn runtime_with(feature_count: usize) -> (MockSources, GeoPackageRuntime) {
	let sources = MockSources::new().with_file(URL, mock_gpkg_bytes());
	let opener =
		MockOpener::with_package(move || MockGeoPackage::new().with_features("rivers", raw_features(feature_count)));
	let runtime = GeoPackageRuntime::builder(Arc::new(opener))
		.with_private_cache()
		.reader_factory(sources.reader_factory())
		.build();
	(sources, runtime)
}

#[tokio::test]
async fn adds_each_feature_once_without_extra_fields() -> Result<()> {
	let (_, runtime) = runtime_with(5);
	let mut layer = FeatureLayer::new(FeatureLayerOptions::new("rivers", URL), runtime);

	let mut sink = RecordingSink::default();
	assert_eq!(layer.on_add(&mut sink).await?, 5);
	assert_eq!(sink.features.len(), 5);
	assert!(sink.failures.is_empty());

	for (i, feature) in sink.features.iter().enumerate() {
		assert_eq!(feature.kind, FeatureType::Feature);
		assert_eq!(feature.id, Some(json!(i)));
		assert_eq!(feature.properties, json!({"name": format!("river {i}")}));

		let Value::Object(object) = feature.to_json() else {
			panic!("feature is not an object");
		};
		let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
		keys.sort_unstable();
		assert_eq!(keys, ["geometry", "id", "properties", "type"]);
	}
	Ok(())
}

#[tokio::test]
async fn empty_tables_add_nothing() -> Result<()> {
	let (_, runtime) = runtime_with(0);
	let mut layer = FeatureLayer::new(FeatureLayerOptions::new("rivers", URL), runtime);

	let mut sink = RecordingSink::default();
	assert_eq!(layer.on_add(&mut sink).await?, 0);
	assert!(sink.features.is_empty());
	assert!(layer.is_loaded());
	Ok(())
}

#[tokio::test]
async fn tile_and_feature_layers_share_the_cache() -> Result<()> {
	let (sources, runtime) = runtime_with(2);

	let mut tiles = TileLayer::new(TileLayerOptions::new("rivers_tiles", URL), runtime.clone());
	tiles.on_add(Arc::new(Crs::WebMercator))?;
	let handle = tiles.wait_loaded().await?;

	let mut features = FeatureLayer::new(FeatureLayerOptions::new("rivers", URL), runtime.clone());
	let mut sink = RecordingSink::default();
	features.on_add(&mut sink).await?;

	assert_eq!(sink.features.len(), 2);
	assert_eq!(sources.reads(), 1);
	assert!(Arc::ptr_eq(&handle, &runtime.cache().get(URL).unwrap()));
	Ok(())
}

#[tokio::test]
async fn no_cache_feature_layers_leave_the_cache_empty() -> Result<()> {
	let (sources, runtime) = runtime_with(1);

	for _ in 0..2 {
		let mut layer = FeatureLayer::new(FeatureLayerOptions::new("rivers", URL).with_no_cache(true), runtime.clone());
		layer.on_add(&mut RecordingSink::default()).await?;
	}

	assert_eq!(sources.reads(), 2);
	assert!(!runtime.cache().contains(URL));
	assert!(matches!(runtime.cache().entry(URL), Some(CacheEntry::Uncached)));
	Ok(())
}

#[tokio::test]
async fn load_failures_reach_the_sink() {
	let sources = MockSources::new().with_file(URL, Blob::from("<html>404</html>"));
	let runtime = GeoPackageRuntime::builder(Arc::new(MockOpener::new()))
		.with_private_cache()
		.reader_factory(sources.reader_factory())
		.build();
	let mut layer = FeatureLayer::new(FeatureLayerOptions::new("rivers", URL), runtime.clone());

	let mut sink = RecordingSink::default();
	assert!(layer.on_add(&mut sink).await.is_err());
	assert!(!layer.is_loaded());
	assert!(sink.features.is_empty());
	assert_eq!(
		sink.failures,
		["loading GeoPackage 'https://example.org/rivers.gpkg': file is not a GeoPackage (16 bytes without SQLite header)"]
	);
	assert!(runtime.cache().is_empty());
}
