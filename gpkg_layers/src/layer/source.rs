use crate::GeoPackageHandle;
use gpkg_core::io::DataLocation;
use std::fmt::Debug;

/// Where a layer gets its GeoPackage from.
#[derive(Clone)]
pub enum LayerSource {
	/// An already opened GeoPackage. It bypasses the cache.
	Handle(GeoPackageHandle),
	/// A URL or file that is loaded when the layer is attached.
	Location(DataLocation),
}

impl LayerSource {
	/// The cache key of a location, `None` for handles.
	#[must_use]
	pub fn key(&self) -> Option<String> {
		match self {
			LayerSource::Handle(_) => None,
			LayerSource::Location(location) => Some(location.to_string()),
		}
	}
}

impl Debug for LayerSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LayerSource::Handle(handle) => write!(f, "Handle({handle:?})"),
			LayerSource::Location(location) => write!(f, "Location({location:?})"),
		}
	}
}

impl From<GeoPackageHandle> for LayerSource {
	fn from(handle: GeoPackageHandle) -> Self {
		LayerSource::Handle(handle)
	}
}

impl From<DataLocation> for LayerSource {
	fn from(location: DataLocation) -> Self {
		LayerSource::Location(location)
	}
}

impl From<&str> for LayerSource {
	fn from(location: &str) -> Self {
		LayerSource::Location(DataLocation::parse(location))
	}
}
