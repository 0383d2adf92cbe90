//! Map layers backed by a GeoPackage.
//!
//! - [`TileLayer`] renders raster tiles.
//! - [`FeatureLayer`] adds vector features to a [`FeatureSink`](crate::FeatureSink).
//!
//! Both obtain their GeoPackage the same way when attached: a handle given in the options is used
//! as is; a location is taken from the runtime's cache or loaded.

mod feature_layer;
mod map_view;
mod options;
mod source;
mod state;
mod tile_layer;

pub use feature_layer::*;
pub use map_view::*;
pub use options::*;
pub use source::*;
pub use state::LoadState;
pub(crate) use state::{HandleState, HandleWaiter};
pub use tile_layer::*;
