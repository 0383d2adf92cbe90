//! Tile addresses as requested by a tiled map layer.
//!
//! A [`TileCoord`] is the `(level, x, y)` triple a grid layer asks for when it needs a tile.
//! Rows count from the top, as in the XYZ scheme. Geographic extents are not computed here:
//! they depend on the map projection, see [`Crs`](crate::Crs).
//!
//! # Examples
//!
//! ```
//! use gpkg_core::{TileCoord, TileSize};
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//!
//! let nw = coord.nw_pixel(&TileSize::default());
//! assert_eq!((nw.x, nw.y), (1536.0, 1792.0));
//! ```

use crate::{PixelPoint, TileSize};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// A tile coordinate with zoom level, column and row.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The column of the tile.
	pub x: u32,
	/// The row of the tile, counted from the top.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord`.
	///
	/// Columns and rows are not limited to `2^level`: geographic grids are twice as wide as
	/// they are high, so the valid range depends on the map projection.
	///
	/// # Errors
	/// Returns an error if `level` > 31.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		Ok(TileCoord { level, x, y })
	}

	/// Pixel position of the north-west corner of this tile at its own zoom level.
	#[must_use]
	pub fn nw_pixel(&self, size: &TileSize) -> PixelPoint {
		PixelPoint::new(
			f64::from(self.x) * f64::from(size.width),
			f64::from(self.y) * f64::from(size.height),
		)
	}

	/// Pixel position of the south-east corner of this tile at its own zoom level.
	#[must_use]
	pub fn se_pixel(&self, size: &TileSize) -> PixelPoint {
		self.nw_pixel(size).add(f64::from(size.width), f64::from(size.height))
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y))
	}
}

impl fmt::Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn new_rejects_level_above_31() {
		assert!(TileCoord::new(31, 0, 0).is_ok());
		assert!(TileCoord::new(32, 0, 0).is_err());
	}

	#[rstest]
	#[case::square(TileSize::square(256), (768.0, 512.0), (1024.0, 768.0))]
	#[case::large(TileSize::square(512), (1536.0, 1024.0), (2048.0, 1536.0))]
	#[case::rect(TileSize::new(256, 128), (768.0, 256.0), (1024.0, 384.0))]
	fn corner_pixels(#[case] size: TileSize, #[case] nw: (f64, f64), #[case] se: (f64, f64)) {
		let coord = TileCoord::new(3, 3, 2).unwrap();
		assert_eq!(coord.nw_pixel(&size), PixelPoint::new(nw.0, nw.1));
		assert_eq!(coord.se_pixel(&size), PixelPoint::new(se.0, se.1));
	}

	#[test]
	fn formatting() {
		let coord = TileCoord::new(14, 8803, 5376).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(14, [8803, 5376])");
		assert_eq!(coord.to_string(), "14/8803/5376");
	}
}
