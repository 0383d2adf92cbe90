use anyhow::{Result, ensure};
use serde::Deserialize;
use std::fmt::Debug;

/// Pixel dimensions of a tile bitmap.
///
/// In configuration files a tile size is written either as a single number (square tiles) or as
/// `[width, height]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "TileSizeValue")]
pub struct TileSize {
	pub width: u32,
	pub height: u32,
}

impl TileSize {
	/// Creates a tile size. Both dimensions must be positive.
	pub fn try_new(width: u32, height: u32) -> Result<Self> {
		ensure!(width > 0, "tile width must be positive");
		ensure!(height > 0, "tile height must be positive");
		Ok(Self { width, height })
	}

	/// Creates a tile size without validation. Zero dimensions produce empty bitmaps.
	#[must_use]
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	#[must_use]
	pub const fn square(size: u32) -> Self {
		Self::new(size, size)
	}
}

impl Default for TileSize {
	fn default() -> Self {
		Self::square(256)
	}
}

impl Debug for TileSize {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "TileSize({}x{})", self.width, self.height)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TileSizeValue {
	Square(u32),
	Rect([u32; 2]),
}

impl TryFrom<TileSizeValue> for TileSize {
	type Error = anyhow::Error;

	fn try_from(value: TileSizeValue) -> Result<Self> {
		match value {
			TileSizeValue::Square(size) => TileSize::try_new(size, size),
			TileSizeValue::Rect([width, height]) => TileSize::try_new(width, height),
		}
	}
}
