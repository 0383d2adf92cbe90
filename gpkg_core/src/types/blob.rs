//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] holding the raw bytes of
//! a GeoPackage as they were read from a URL or a file.
//!
//! # Examples
//!
//! ```rust
//! use gpkg_core::Blob;
//!
//! let blob = Blob::from(vec![0x53, 0x51, 0x4c]);
//! assert_eq!(blob.len(), 3);
//! assert_eq!(blob.as_slice(), &[0x53, 0x51, 0x4c]);
//! ```

use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Returns a reference to the underlying bytes.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_slice()
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(value: &str) -> Self {
		Blob(value.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(value: String) -> Self {
		Blob(value.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({} bytes)", self.0.len())
	}
}
