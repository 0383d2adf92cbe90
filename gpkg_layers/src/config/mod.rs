//! YAML configuration of GeoPackage layers.
//!
//! ```yaml
//! tiles:
//!   - layer_name: ortho
//!     url: https://example.org/ortho.gpkg
//!     tile_size: [512, 256]
//! features:
//!   - layer_name: rivers
//!     url: ./rivers.gpkg
//!     no_cache: true
//!     style:
//!       path: { color: "#06c", weight: 3 }
//! ```

mod layer;
mod main;

pub use layer::{FeatureLayerConfig, TileLayerConfig};
pub use main::Config;
