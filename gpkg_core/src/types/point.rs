//! Points in the two coordinate spaces a map layer deals with: map pixels at a zoom level and
//! geographic longitude/latitude.

use std::fmt::{self, Debug};

/// A point in map pixel space at some zoom level. The origin is the top-left corner of the
/// projected world.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
	pub x: f64,
	pub y: f64,
}

impl PixelPoint {
	#[must_use]
	pub fn new(x: f64, y: f64) -> PixelPoint {
		PixelPoint { x, y }
	}

	/// Returns a new point offset by `dx`, `dy`.
	#[must_use]
	pub fn add(&self, dx: f64, dy: f64) -> PixelPoint {
		PixelPoint {
			x: self.x + dx,
			y: self.y + dy,
		}
	}
}

impl Debug for PixelPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PixelPoint({}, {})", self.x, self.y)
	}
}

/// A geographic position in degrees.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct LngLat {
	/// Longitude in degrees.
	pub lng: f64,
	/// Latitude in degrees.
	pub lat: f64,
}

impl LngLat {
	#[must_use]
	pub fn new(lng: f64, lat: f64) -> LngLat {
		LngLat { lng, lat }
	}
}

impl Debug for LngLat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LngLat({}, {})", self.lng, self.lat)
	}
}
