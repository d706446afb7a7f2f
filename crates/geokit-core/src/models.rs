pub mod extent;
pub mod raster;
pub mod srs;

pub use extent::Bounds;
pub use raster::{DataType, GeoTransform};
pub use srs::Srs;
