//! Contains types like coordinates, bounding boxes (bboxes), projections and blobs.

mod blob;
pub use blob::*;

mod crs;
pub use crs::*;

mod geo_bbox;
pub use geo_bbox::*;

mod point;
pub use point::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_size;
pub use tile_size::*;
