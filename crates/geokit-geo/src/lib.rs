//! GeoKit Geo - SRS bootstrap and quick in-memory datasets
//!
//! This crate wraps PROJ for spatial reference validation and builds small
//! vector and raster datasets without touching disk unless asked to.

pub mod raster;
pub mod srs;
pub mod vector;

pub use raster::{quick_raster, MemRaster, RasterSpec};
pub use srs::{ensure_environment, load_epsg, load_srs, validate_srs};
pub use vector::{quick_vector, validate_geometry, VectorSource};
