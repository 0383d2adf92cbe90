//! This module defines the `DataReaderTrait`, the interface for reading a whole GeoPackage from
//! some source.
//!
//! # Examples
//!
//! ```rust
//! use gpkg_core::{io::{DataReader, DataReaderTrait}, Blob};
//! use anyhow::Result;
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct StaticReader {
//!     data: Vec<u8>,
//! }
//!
//! #[async_trait]
//! impl DataReaderTrait for StaticReader {
//!     async fn read_all(&self) -> Result<Blob> {
//!         Ok(Blob::from(self.data.clone()))
//!     }
//!
//!     fn get_name(&self) -> &str {
//!         "StaticReader"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let reader: DataReader = Box::new(StaticReader { data: vec![1, 2, 3] });
//!     assert_eq!(reader.read_all().await?.as_slice(), &[1, 2, 3]);
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Type alias for a boxed dynamic implementation of the `DataReaderTrait`.
pub type DataReader = Box<dyn DataReaderTrait>;

/// A source of GeoPackage bytes.
#[async_trait]
pub trait DataReaderTrait: Debug + Send + Sync {
	/// Reads all the data from the source.
	async fn read_all(&self) -> Result<Blob>;

	/// Gets the name of the data source, usually its URL or path.
	fn get_name(&self) -> &str;
}
