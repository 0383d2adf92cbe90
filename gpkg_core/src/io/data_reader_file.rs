//! Reads a GeoPackage from a local file.

use super::{DataReader, DataReaderTrait};
use crate::Blob;
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A struct that provides reading capabilities from a file.
#[derive(Debug)]
pub struct DataReaderFile {
	name: String,
	path: PathBuf,
}

impl DataReaderFile {
	/// Checks that `path` is an existing regular file and creates a reader for it.
	///
	/// Relative paths are taken relative to the current working directory.
	pub fn open(path: &Path) -> Result<DataReader> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "path {path:?} must be a file");

		let path = path.canonicalize()?;

		Ok(Box::new(DataReaderFile {
			name: path.to_string_lossy().to_string(),
			path,
		}))
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn read_all(&self) -> Result<Blob> {
		log::trace!("read file {:?}", self.path);
		let bytes = tokio::fs::read(&self.path)
			.await
			.with_context(|| format!("reading file '{}'", self.name))?;
		Ok(Blob::from(bytes))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[tokio::test]
	async fn read_all() -> Result<()> {
		let mut file = NamedTempFile::new()?;
		file.write_all(b"SQLite format 3\0")?;

		let reader = DataReaderFile::open(file.path())?;
		assert_eq!(reader.read_all().await?.as_slice(), b"SQLite format 3\0");
		assert_eq!(reader.get_name(), file.path().canonicalize()?.to_string_lossy());

		Ok(())
	}

	#[test]
	fn open_rejects_missing_files_and_directories() {
		assert!(DataReaderFile::open(Path::new("/definitely/not/here.gpkg")).is_err());

		let dir = tempfile::tempdir().unwrap();
		assert!(DataReaderFile::open(dir.path()).is_err());
	}
}
