//! `DataLocation` says where the bytes of a GeoPackage live: behind an `http(s)` URL or in a
//! local file.
//!
//! The string form of a location is also the key under which a loaded GeoPackage is cached, so
//! two layers pointing at the same URL share one handle.

use super::{DataReader, DataReaderFile, DataReaderHttp};
use anyhow::{Result, anyhow};
use reqwest::Url;
use std::{
	fmt::Debug,
	path::{Component, Path, PathBuf},
};

/// Location of a GeoPackage.
///
/// ```
/// use gpkg_core::io::DataLocation;
///
/// let a = DataLocation::parse("https://example.org/rivers.gpkg");
/// let b = DataLocation::parse("./data/rivers.gpkg");
/// assert!(matches!(a, DataLocation::Url(_)));
/// assert!(matches!(b, DataLocation::Path(_)));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum DataLocation {
	/// An absolute URL with scheme and host.
	Url(Url),
	/// An absolute or relative filesystem path.
	Path(PathBuf),
}

impl DataLocation {
	/// Parses a location. Anything that is not an absolute URL with a host is a path.
	#[must_use]
	pub fn parse(input: &str) -> Self {
		match Url::parse(input) {
			Ok(url) if url.has_host() => DataLocation::Url(url),
			_ => DataLocation::Path(PathBuf::from(input)),
		}
	}

	/// Resolve this location against `base` in-place.
	///
	/// - URLs stay unchanged.
	/// - A path relative to a URL base becomes a URL via `base.join()`.
	/// - A path relative to a path base is joined and normalized.
	pub fn resolve(&mut self, base: &DataLocation) -> Result<()> {
		match (base, &mut *self) {
			(DataLocation::Url(base_url), DataLocation::Path(path)) => {
				let relative = path.to_str().ok_or(anyhow!("Invalid Path (non-utf8)"))?;
				*self = DataLocation::Url(base_url.join(relative)?);
			}
			(DataLocation::Path(base_path), DataLocation::Path(path)) => {
				*path = normalize(&base_path.join(&*path));
			}
			(_, DataLocation::Url(_)) => {}
		}
		Ok(())
	}

	/// Create a reader for the bytes at this location.
	pub fn to_reader(&self) -> Result<DataReader> {
		Ok(match self {
			DataLocation::Url(url) => DataReaderHttp::from_url(url.clone())?,
			DataLocation::Path(path) => DataReaderFile::open(path)?,
		})
	}
}

// Resolves `.` and `..` without touching the filesystem. Leading `..` of relative
// paths are kept.
fn normalize(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();
	let mut depth: usize = 0;
	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
			Component::CurDir => {}
			Component::ParentDir => {
				if depth > 0 {
					out.pop();
					depth -= 1;
				} else if !out.has_root() {
					out.push("..");
				}
			}
			Component::Normal(segment) => {
				out.push(segment);
				depth += 1;
			}
		}
	}
	out
}

impl std::fmt::Display for DataLocation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DataLocation::Url(url) => write!(f, "{url}"),
			DataLocation::Path(path) => write!(f, "{}", path.display()),
		}
	}
}

impl Debug for DataLocation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DataLocation::Url(url) => write!(f, "Url({url})"),
			DataLocation::Path(path) => write!(f, "Path({})", path.display()),
		}
	}
}

impl From<&str> for DataLocation {
	fn from(value: &str) -> Self {
		DataLocation::parse(value)
	}
}

impl From<String> for DataLocation {
	fn from(value: String) -> Self {
		DataLocation::parse(&value)
	}
}

impl From<PathBuf> for DataLocation {
	fn from(value: PathBuf) -> Self {
		DataLocation::Path(value)
	}
}

impl From<&Path> for DataLocation {
	fn from(value: &Path) -> Self {
		DataLocation::Path(value.to_path_buf())
	}
}

impl From<Url> for DataLocation {
	fn from(value: Url) -> Self {
		DataLocation::Url(value)
	}
}
