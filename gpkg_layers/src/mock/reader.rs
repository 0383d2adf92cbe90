//! In-memory GeoPackage sources.
//!
//! [`MockSources`] maps location strings to bytes and hands out readers through
//! [`MockSources::reader_factory`]. Reads can be held back behind a gate to test what layers do
//! while a GeoPackage is still loading.

use crate::ReaderFactory;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use dashmap::DashMap;
use gpkg_core::{
	Blob,
	io::{DataLocation, DataReader, DataReaderTrait},
};
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
use tokio::sync::Semaphore;

#[derive(Debug)]
pub struct MockReader {
	name: String,
	data: Blob,
	reads: Arc<AtomicUsize>,
	gate: Option<Arc<Semaphore>>,
}

#[async_trait]
impl DataReaderTrait for MockReader {
	async fn read_all(&self) -> Result<Blob> {
		if let Some(gate) = &self.gate {
			let _permit = gate.acquire().await.context("mock gate closed")?;
		}
		self.reads.fetch_add(1, Ordering::SeqCst);
		Ok(self.data.clone())
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[derive(Clone, Debug, Default)]
pub struct MockSources {
	files: Arc<DashMap<String, Blob>>,
	reads: Arc<AtomicUsize>,
	gate: Option<Arc<Semaphore>>,
}

impl MockSources {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Holds back every read until [`MockSources::open_gate`] is called.
	#[must_use]
	pub fn gated(mut self) -> Self {
		self.gate = Some(Arc::new(Semaphore::new(0)));
		self
	}

	/// Lets pending and future reads through.
	pub fn open_gate(&self) {
		if let Some(gate) = &self.gate {
			gate.add_permits(1);
		}
	}

	/// Serves `data` for `location`.
	#[must_use]
	pub fn with_file(self, location: &str, data: Blob) -> Self {
		self.files.insert(DataLocation::parse(location).to_string(), data);
		self
	}

	/// Number of completed reads.
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	/// A reader factory for [`crate::GeoPackageRuntime`] that serves the registered files.
	#[must_use]
	pub fn reader_factory(&self) -> ReaderFactory {
		let sources = self.clone();
		Arc::new(move |location: &DataLocation| -> Result<DataReader> {
			let name = location.to_string();
			let data = sources
				.files
				.get(&name)
				.map(|entry| entry.value().clone())
				.ok_or_else(|| anyhow!("no mock data at '{name}'"))?;
			Ok(Box::new(MockReader {
				name,
				data,
				reads: sources.reads.clone(),
				gate: sources.gate.clone(),
			}))
		})
	}
}
