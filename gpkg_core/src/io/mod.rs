//! Locating and reading the bytes of a GeoPackage.

mod data_location;
pub use data_location::*;

mod data_reader;
pub use data_reader::*;

mod data_reader_file;
pub use data_reader_file::*;

mod data_reader_http;
pub use data_reader_http::*;
