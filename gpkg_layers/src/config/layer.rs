use crate::{AssetLocator, FeatureLayerOptions, FeatureStyle, TileLayerOptions};
use anyhow::Result;
use gpkg_core::{TileSize, io::DataLocation};
use serde::Deserialize;

/// A tile layer in a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerConfig {
	/// Name of the tile table inside the GeoPackage.
	pub layer_name: String,

	/// URL or path of the GeoPackage. Relative paths are relative to the configuration file.
	pub url: DataLocation,

	pub no_cache: bool,

	/// A number for square tiles or `[width, height]`. Defaults to 256.
	pub tile_size: TileSize,

	/// Where the GeoPackage library fetches its assets from, if not from the default location.
	pub asset_base_url: Option<String>,
}

impl TileLayerConfig {
	pub fn resolve_paths(&mut self, base: &DataLocation) -> Result<()> {
		self.url.resolve(base)
	}

	#[must_use]
	pub fn to_options(&self) -> TileLayerOptions {
		TileLayerOptions::new(&self.layer_name, self.url.clone())
			.with_no_cache(self.no_cache)
			.with_tile_size(self.tile_size)
			.with_asset_locator(asset_locator(self.asset_base_url.as_deref()))
	}
}

impl<'de> Deserialize<'de> for TileLayerConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(deny_unknown_fields)]
		struct TileLayerConfigHelper {
			layer_name: String,
			url: String,
			#[serde(default)]
			no_cache: bool,
			#[serde(default)]
			tile_size: TileSize,
			asset_base_url: Option<String>,
		}

		let helper = TileLayerConfigHelper::deserialize(deserializer)?;
		Ok(TileLayerConfig {
			layer_name: helper.layer_name,
			url: DataLocation::parse(&helper.url),
			no_cache: helper.no_cache,
			tile_size: helper.tile_size,
			asset_base_url: helper.asset_base_url,
		})
	}
}

/// A feature layer in a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayerConfig {
	/// Name of the feature table inside the GeoPackage.
	pub layer_name: String,
	pub url: DataLocation,
	pub no_cache: bool,
	pub style: FeatureStyle,
	pub asset_base_url: Option<String>,
}

impl FeatureLayerConfig {
	pub fn resolve_paths(&mut self, base: &DataLocation) -> Result<()> {
		self.url.resolve(base)
	}

	#[must_use]
	pub fn to_options(&self) -> FeatureLayerOptions {
		FeatureLayerOptions::new(&self.layer_name, self.url.clone())
			.with_no_cache(self.no_cache)
			.with_style(self.style.clone())
			.with_asset_locator(asset_locator(self.asset_base_url.as_deref()))
	}
}

impl<'de> Deserialize<'de> for FeatureLayerConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(deny_unknown_fields)]
		struct FeatureLayerConfigHelper {
			layer_name: String,
			url: String,
			#[serde(default)]
			no_cache: bool,
			#[serde(default)]
			style: FeatureStyle,
			asset_base_url: Option<String>,
		}

		let helper = FeatureLayerConfigHelper::deserialize(deserializer)?;
		Ok(FeatureLayerConfig {
			layer_name: helper.layer_name,
			url: DataLocation::parse(&helper.url),
			no_cache: helper.no_cache,
			style: helper.style,
			asset_base_url: helper.asset_base_url,
		})
	}
}

fn asset_locator(base_url: Option<&str>) -> AssetLocator {
	base_url.map_or_else(AssetLocator::default, AssetLocator::from_base_url)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::LayerSource;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case("layer_name: a\nurl: a.gpkg", TileSize::square(256))]
	#[case("layer_name: a\nurl: a.gpkg\ntile_size: 512", TileSize::square(512))]
	#[case("layer_name: a\nurl: a.gpkg\ntile_size: [512, 128]", TileSize::new(512, 128))]
	fn tile_sizes(#[case] yaml: &str, #[case] expected: TileSize) {
		let config: TileLayerConfig = serde_yaml_ng::from_str(yaml).unwrap();
		assert_eq!(config.tile_size, expected);
	}

	#[rstest]
	#[case("layer_name: a\nurl: a.gpkg\ntile_size: 0")]
	#[case("layer_name: a\nurl: a.gpkg\nzoom: 3")]
	#[case("url: a.gpkg")]
	fn invalid_tile_layers(#[case] yaml: &str) {
		assert!(serde_yaml_ng::from_str::<TileLayerConfig>(yaml).is_err());
	}

	#[test]
	fn tile_layer_options() {
		let config: TileLayerConfig = serde_yaml_ng::from_str(
			"layer_name: ortho\nurl: https://example.org/a.gpkg\nno_cache: true\nasset_base_url: /static/",
		)
		.unwrap();

		let options = config.to_options();
		assert_eq!(options.layer_name, "ortho");
		assert!(options.no_cache);
		assert_eq!(options.asset_locator.locate("sql-wasm.wasm"), "/static/sql-wasm.wasm");
		assert_eq!(options.source.key().as_deref(), Some("https://example.org/a.gpkg"));
	}

	#[test]
	fn feature_layer_options() {
		let config: FeatureLayerConfig =
			serde_yaml_ng::from_str("layer_name: rivers\nurl: rivers.gpkg\nstyle:\n  point:\n    radius: 5").unwrap();

		let options = config.to_options();
		assert!(!options.no_cache);
		assert_eq!(options.style.point.radius, 5.0);
		assert_eq!(options.style.path.color, "#00F");
		assert!(matches!(options.source, LayerSource::Location(DataLocation::Path(_))));
		assert_eq!(
			options.asset_locator.locate("sql-wasm.wasm"),
			"https://unpkg.com/@ngageoint/geopackage@4.1.0/dist/sql-wasm.wasm"
		);
	}
}
