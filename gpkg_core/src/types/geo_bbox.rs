use crate::LngLat;
use std::fmt::Debug;

/// A geographical bounding box (`GeoBBox`) represents a rectangular area on a map
/// defined by its minimum and maximum longitude (x) and latitude (y) coordinates.
///
/// # Examples
///
/// ```
/// use gpkg_core::{GeoBBox, LngLat};
///
/// let bbox = GeoBBox::from_corners(LngLat::new(-10.0, 5.0), LngLat::new(10.0, -5.0));
/// assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (-10.0, -5.0, 10.0, 5.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	/// West
	pub x_min: f64,
	/// South
	pub y_min: f64,
	/// East
	pub x_max: f64,
	/// North
	pub y_max: f64,
}

impl GeoBBox {
	/// Builds the box spanned by the north-west and south-east corners of a tile.
	///
	/// No range check is done: grid layers may request tiles whose corners fall slightly
	/// outside the world, and the box is handed to the renderer unchanged.
	#[must_use]
	pub fn from_corners(nw: LngLat, se: LngLat) -> GeoBBox {
		GeoBBox {
			x_min: nw.lng.min(se.lng),
			y_min: nw.lat.min(se.lat),
			x_max: nw.lng.max(se.lng),
			y_max: nw.lat.max(se.lat),
		}
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}
