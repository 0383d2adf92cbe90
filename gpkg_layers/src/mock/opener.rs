use super::MockGeoPackage;
use crate::{AssetLocator, GeoPackageHandle, GeoPackageOpener};
use anyhow::{Result, ensure};
use async_trait::async_trait;
use gpkg_core::Blob;
use std::{
	fmt::Debug,
	sync::{
		Arc, Mutex, PoisonError,
		atomic::{AtomicUsize, Ordering},
	},
};

/// Every GeoPackage is an SQLite database and starts with this header.
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Bytes that [`MockOpener`] accepts as a GeoPackage.
#[must_use]
pub fn mock_gpkg_bytes() -> Blob {
	Blob::from(SQLITE_HEADER.as_slice())
}

type PackageFactory = Box<dyn Fn() -> MockGeoPackage + Send + Sync>;

/// Opens every valid blob as a fresh [`MockGeoPackage`].
///
/// Each call to `open` creates a new handle, so tests can tell shared handles from separately
/// opened ones.
pub struct MockOpener {
	factory: PackageFactory,
	opens: AtomicUsize,
	asset_urls: Mutex<Vec<String>>,
}

impl MockOpener {
	#[must_use]
	pub fn new() -> Self {
		Self::with_package(MockGeoPackage::new)
	}

	/// Uses `factory` to build the GeoPackage returned by each `open`.
	pub fn with_package<F>(factory: F) -> Self
	where
		F: Fn() -> MockGeoPackage + Send + Sync + 'static,
	{
		Self {
			factory: Box::new(factory),
			opens: AtomicUsize::new(0),
			asset_urls: Mutex::new(Vec::new()),
		}
	}

	/// Number of successful opens.
	pub fn opens(&self) -> usize {
		self.opens.load(Ordering::SeqCst)
	}

	/// URL of `sql-wasm.wasm` for every asset locator set so far.
	pub fn asset_urls(&self) -> Vec<String> {
		self.asset_urls.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}
}

impl Default for MockOpener {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for MockOpener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockOpener").field("opens", &self.opens()).finish()
	}
}

#[async_trait]
impl GeoPackageOpener for MockOpener {
	async fn open(&self, data: Blob) -> Result<GeoPackageHandle> {
		ensure!(
			data.as_slice().starts_with(SQLITE_HEADER),
			"file is not a GeoPackage ({} bytes without SQLite header)",
			data.len()
		);
		self.opens.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new((self.factory)()))
	}

	fn set_asset_locator(&self, locator: &AssetLocator) {
		self
			.asset_urls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(locator.locate("sql-wasm.wasm"));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn opens_only_sqlite_files() {
		let opener = MockOpener::new();
		let a = opener.open(mock_gpkg_bytes()).await.unwrap();
		let b = opener.open(mock_gpkg_bytes()).await.unwrap();
		assert!(!Arc::ptr_eq(&a, &b));

		let error = opener.open(Blob::from("<html>")).await.unwrap_err();
		assert_eq!(error.to_string(), "file is not a GeoPackage (6 bytes without SQLite header)");
		assert_eq!(opener.opens(), 2);
	}

	#[test]
	fn records_asset_locators() {
		let opener = MockOpener::new();
		opener.set_asset_locator(&AssetLocator::from_base_url("/assets/"));
		assert_eq!(opener.asset_urls(), ["/assets/sql-wasm.wasm"]);
	}
}
