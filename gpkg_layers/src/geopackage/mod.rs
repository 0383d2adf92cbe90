//! The seam to the GeoPackage library.
//!
//! Parsing GeoPackage files, querying tile and feature tables and rasterising tiles is the job
//! of an external library. This crate only talks to it through [`GeoPackageOpener`] and
//! [`GeoPackage`].

mod asset_locator;
pub use asset_locator::*;

mod traits;
pub use traits::*;
