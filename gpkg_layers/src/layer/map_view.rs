use gpkg_core::{Crs, LngLat, PixelPoint};

/// The parts of a host map a layer needs.
pub trait MapView: Send + Sync {
	/// The projection the map currently uses.
	fn crs(&self) -> Crs;

	/// Converts a pixel position at `zoom` into longitude/latitude.
	fn unproject(&self, point: &PixelPoint, zoom: u8) -> LngLat {
		self.crs().unproject(point, zoom)
	}
}

/// A map that is nothing but its projection.
impl MapView for Crs {
	fn crs(&self) -> Crs {
		*self
	}
}
