//! Coordinate reference systems of a host map.
//!
//! A map runs in exactly one of two projections. The projection decides how pixel positions at
//! a zoom level translate into longitude/latitude, and which kind of raster request a tile layer
//! sends to the GeoPackage renderer:
//!
//! - [`Crs::WebMercator`] (`EPSG:3857`): the standard web tile grid, one tile at zoom 0.
//! - [`Crs::Geographic`] (`EPSG:4326`): plate carrée, two tiles wide and one tile high at zoom 0.
//!
//! In both cases the world is `256 * 2^zoom` pixels high, independent of the tile size.
//!
//! ```
//! use gpkg_core::{Crs, PixelPoint};
//!
//! let nw = Crs::Geographic.unproject(&PixelPoint::new(0.0, 0.0), 0);
//! assert_eq!((nw.lng, nw.lat), (-180.0, 90.0));
//! ```

use crate::{LngLat, PixelPoint};
use std::{f64::consts::PI, fmt};

/// Projection used by a host map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Crs {
	/// Spherical Web Mercator, `EPSG:3857`.
	#[default]
	WebMercator,
	/// Longitude/latitude, `EPSG:4326`.
	Geographic,
}

impl Crs {
	/// The EPSG code of this projection, e.g. `"EPSG:4326"`.
	#[must_use]
	pub fn code(&self) -> &'static str {
		match self {
			Crs::WebMercator => "EPSG:3857",
			Crs::Geographic => "EPSG:4326",
		}
	}

	#[must_use]
	pub fn is_geographic(&self) -> bool {
		matches!(self, Crs::Geographic)
	}

	/// Size of the projected world in pixels at `zoom`.
	#[must_use]
	pub fn scale(zoom: u8) -> f64 {
		256.0 * 2.0f64.powi(i32::from(zoom))
	}

	/// Converts a pixel position at `zoom` into longitude/latitude.
	#[must_use]
	pub fn unproject(&self, point: &PixelPoint, zoom: u8) -> LngLat {
		let scale = Crs::scale(zoom);
		let x = point.x / scale;
		let y = point.y / scale;
		match self {
			Crs::WebMercator => LngLat::new(
				(x - 0.5) * 360.0,
				((PI * (1.0 - 2.0 * y)).exp().atan() / PI - 0.25) * 360.0,
			),
			Crs::Geographic => LngLat::new((x - 1.0) * 180.0, (0.5 - y) * 180.0),
		}
	}

}

impl fmt::Display for Crs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn web_mercator_world_corners() {
		let nw = Crs::WebMercator.unproject(&PixelPoint::new(0.0, 0.0), 0);
		assert_relative_eq!(nw.lng, -180.0);
		assert_relative_eq!(nw.lat, 85.051_128_779_806_59, epsilon = 1e-9);

		let se = Crs::WebMercator.unproject(&PixelPoint::new(256.0, 256.0), 0);
		assert_relative_eq!(se.lng, 180.0);
		assert_relative_eq!(se.lat, -85.051_128_779_806_59, epsilon = 1e-9);

		let center = Crs::WebMercator.unproject(&PixelPoint::new(512.0, 512.0), 2);
		assert_relative_eq!(center.lng, 0.0);
		assert_relative_eq!(center.lat, 0.0, epsilon = 1e-9);
	}

	#[test]
	fn geographic_world_is_two_tiles_wide() {
		let nw = Crs::Geographic.unproject(&PixelPoint::new(0.0, 0.0), 0);
		let mid = Crs::Geographic.unproject(&PixelPoint::new(256.0, 256.0), 0);
		let se = Crs::Geographic.unproject(&PixelPoint::new(512.0, 256.0), 0);
		assert_eq!((nw.lng, nw.lat), (-180.0, 90.0));
		assert_eq!((mid.lng, mid.lat), (0.0, -90.0));
		assert_eq!((se.lng, se.lat), (180.0, -90.0));
	}

	#[test]
	fn codes() {
		assert_eq!(Crs::WebMercator.to_string(), "EPSG:3857");
		assert_eq!(Crs::Geographic.to_string(), "EPSG:4326");
		assert!(Crs::Geographic.is_geographic());
		assert!(!Crs::default().is_geographic());
	}
}
