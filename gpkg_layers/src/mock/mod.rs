//! Mocks of the external GeoPackage library and of GeoPackage sources.
//!
//! They let layers be exercised end to end without network access or a real GeoPackage
//! implementation.

mod geopackage;
mod opener;
mod reader;

pub use geopackage::*;
pub use opener::*;
pub use reader::*;
