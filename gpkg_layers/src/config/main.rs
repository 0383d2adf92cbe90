use super::{FeatureLayerConfig, TileLayerConfig};
use crate::{FeatureLayer, GeoPackageRuntime, TileLayer};
use anyhow::{Context, Result};
use gpkg_core::io::DataLocation;
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// List of tile layers
	#[serde(default, rename = "tiles")]
	pub tile_layers: Vec<TileLayerConfig>,

	/// List of feature layers
	#[serde(default, rename = "features")]
	pub feature_layers: Vec<FeatureLayerConfig>,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parse from a file path and resolve relative layer URLs against the file's directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut cfg = Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;

		let base = path.parent().unwrap_or(Path::new("."));
		cfg.resolve_paths(&DataLocation::from(base))?;
		Ok(cfg)
	}

	pub fn resolve_paths(&mut self, base: &DataLocation) -> Result<()> {
		for tile_layer in &mut self.tile_layers {
			tile_layer.resolve_paths(base)?;
		}

		for feature_layer in &mut self.feature_layers {
			feature_layer.resolve_paths(base)?;
		}

		Ok(())
	}

	/// Creates a detached tile layer for every configured tile layer.
	#[must_use]
	pub fn build_tile_layers(&self, runtime: &GeoPackageRuntime) -> Vec<TileLayer> {
		self
			.tile_layers
			.iter()
			.map(|config| TileLayer::new(config.to_options(), runtime.clone()))
			.collect()
	}

	/// Creates a detached feature layer for every configured feature layer.
	#[must_use]
	pub fn build_feature_layers(&self, runtime: &GeoPackageRuntime) -> Vec<FeatureLayer> {
		self
			.feature_layers
			.iter()
			.map(|config| FeatureLayer::new(config.to_options(), runtime.clone()))
			.collect()
	}
}
