//! Scripted in-memory GeoPackage.
//!
//! `MockGeoPackage` fills every rendered canvas with one colour, serves features from tables
//! registered up front and records every call, so layer behaviour can be checked without a real
//! GeoPackage library.

use crate::{FeatureIterator, GeoPackage, RawFeature};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use gpkg_core::{GeoBBox, TileCoord};
use image::{Rgba, RgbaImage};
use std::{
	collections::{HashMap, HashSet},
	sync::{Mutex, PoisonError},
};

/// A call received by a [`MockGeoPackage`].
#[derive(Clone, Debug, PartialEq)]
pub enum MockCall {
	XyzTile {
		table: String,
		coord: TileCoord,
		width: u32,
		height: u32,
	},
	ProjectedTile {
		table: String,
		bbox: GeoBBox,
		zoom: u8,
		projection: String,
		width: u32,
		height: u32,
	},
	Features {
		table: String,
	},
}

#[derive(Debug)]
pub struct MockGeoPackage {
	color: Rgba<u8>,
	tables: HashMap<String, Vec<Result<RawFeature, String>>>,
	broken_tables: HashSet<String>,
	calls: Mutex<Vec<MockCall>>,
}

impl MockGeoPackage {
	#[must_use]
	pub fn new() -> Self {
		Self {
			color: Rgba([255, 0, 0, 255]),
			tables: HashMap::new(),
			broken_tables: HashSet::new(),
			calls: Mutex::new(Vec::new()),
		}
	}

	/// Colour every rendered tile is filled with.
	#[must_use]
	pub fn with_color(mut self, color: Rgba<u8>) -> Self {
		self.color = color;
		self
	}

	/// Registers a feature table.
	#[must_use]
	pub fn with_features(mut self, table: &str, features: Vec<RawFeature>) -> Self {
		self.tables
			.entry(table.to_string())
			.or_default()
			.extend(features.into_iter().map(Ok));
		self
	}

	/// Makes the feature iterator of `table` yield an error after the features added so far.
	#[must_use]
	pub fn with_feature_error(mut self, table: &str, message: &str) -> Self {
		self.tables
			.entry(table.to_string())
			.or_default()
			.push(Err(message.to_string()));
		self
	}

	/// Makes every request for `table` fail.
	#[must_use]
	pub fn with_broken_table(mut self, table: &str) -> Self {
		self.broken_tables.insert(table.to_string());
		self
	}

	/// All calls received so far, in order.
	pub fn calls(&self) -> Vec<MockCall> {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}

	fn record(&self, call: MockCall) {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
	}

	fn check_table(&self, table: &str) -> Result<()> {
		if self.broken_tables.contains(table) {
			bail!("table '{table}' is corrupt");
		}
		Ok(())
	}

	fn paint(&self, canvas: &mut RgbaImage) {
		for pixel in canvas.pixels_mut() {
			*pixel = self.color;
		}
	}
}

impl Default for MockGeoPackage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl GeoPackage for MockGeoPackage {
	async fn xyz_tile(&self, table: &str, coord: &TileCoord, canvas: &mut RgbaImage) -> Result<()> {
		self.record(MockCall::XyzTile {
			table: table.to_string(),
			coord: *coord,
			width: canvas.width(),
			height: canvas.height(),
		});
		self.check_table(table)?;
		self.paint(canvas);
		Ok(())
	}

	async fn projected_tile(
		&self,
		table: &str,
		bbox: &GeoBBox,
		zoom: u8,
		projection: &str,
		canvas: &mut RgbaImage,
	) -> Result<()> {
		self.record(MockCall::ProjectedTile {
			table: table.to_string(),
			bbox: *bbox,
			zoom,
			projection: projection.to_string(),
			width: canvas.width(),
			height: canvas.height(),
		});
		self.check_table(table)?;
		self.paint(canvas);
		Ok(())
	}

	fn iterate_geojson_features(&self, table: &str) -> Result<FeatureIterator<'_>> {
		self.record(MockCall::Features {
			table: table.to_string(),
		});
		self.check_table(table)?;
		let features = self
			.tables
			.get(table)
			.ok_or_else(|| anyhow!("feature table '{table}' not found"))?;
		Ok(Box::new(
			features
				.iter()
				.map(|feature| feature.clone().map_err(|message| anyhow!(message))),
		))
	}
}
