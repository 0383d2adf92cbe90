//! Shared building blocks for GeoPackage map layers.
//!
//! - [`types`]: tile coordinates, tile sizes, geographic bounding boxes and the two map
//!   projections a host map can run in.
//! - [`io`]: data locations (URL or filesystem path) and readers that fetch a whole
//!   GeoPackage into memory.

pub mod io;

pub mod types;
pub use types::*;
