//! GeoPackage map layers: raster tiles and vector features from GeoPackage files.
//!
//! This crate is the glue between a host map and a GeoPackage library:
//! - [`TileLayer`] renders tiles of a GeoPackage tile table into bitmaps.
//! - [`FeatureLayer`] feeds the features of a GeoPackage feature table into a [`FeatureSink`] as
//!   normalized GeoJSON.
//! - [`HandleCache`] shares opened GeoPackages between layers and makes concurrent loads of one
//!   source share a single download.
//!
//! Parsing GeoPackages and rendering their contents is left to an implementation of
//! [`GeoPackageOpener`] and [`GeoPackage`]. The [`mock`] implementations serve tests and demos.
//!
//! # Quick start
//! ```rust
//! use gpkg_core::{Crs, TileCoord};
//! use gpkg_layers::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sources = MockSources::new().with_file("https://example.org/ortho.gpkg", mock_gpkg_bytes());
//!     let runtime = GeoPackageRuntime::builder(Arc::new(MockOpener::new()))
//!         .reader_factory(sources.reader_factory())
//!         .build();
//!
//!     let mut layer = TileLayer::new(TileLayerOptions::new("ortho", "https://example.org/ortho.gpkg"), runtime);
//!     layer.on_add(Arc::new(Crs::WebMercator))?;
//!
//!     let tile = layer.tile(TileCoord::new(2, 1, 1)?).await?;
//!     assert_eq!(tile.dimensions(), (256, 256));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod feature;
pub mod geopackage;
pub mod layer;
pub mod mock;
pub mod runtime;

pub use cache::*;
pub use config::*;
pub use feature::*;
pub use geopackage::*;
pub use layer::*;
pub use mock::*;
pub use runtime::*;
