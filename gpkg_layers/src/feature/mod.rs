#[allow(clippy::module_inception)]
mod feature;
mod sink;
mod style;

pub use feature::*;
pub use sink::*;
pub use style::*;
