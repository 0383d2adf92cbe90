//! Where a GeoPackage library fetches its auxiliary binary assets (e.g. a compiled SQLite
//! module) from.

use std::{fmt::Debug, sync::Arc};

/// Base URL of the assets shipped with the reference GeoPackage library.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://unpkg.com/@ngageoint/geopackage@4.1.0/dist/";

/// Maps an asset filename to the URL it is loaded from.
#[derive(Clone)]
pub struct AssetLocator(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl AssetLocator {
	pub fn new<F>(locate: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		Self(Arc::new(locate))
	}

	/// Locates every asset directly below `base_url`.
	pub fn from_base_url(base_url: &str) -> Self {
		let base_url = base_url.to_string();
		Self::new(move |filename| format!("{base_url}{filename}"))
	}

	#[must_use]
	pub fn locate(&self, filename: &str) -> String {
		(self.0)(filename)
	}
}

impl Default for AssetLocator {
	fn default() -> Self {
		Self::from_base_url(DEFAULT_ASSET_BASE_URL)
	}
}

impl Debug for AssetLocator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "AssetLocator({})", self.locate("{filename}"))
	}
}
