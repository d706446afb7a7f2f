//! GeoKit Grid - Block-based rescaling of 2-D numeric grids
//!
//! Upscaling replicates every cell into a block; downscaling averages each
//! block, optionally zero-padding grids whose shape is not a multiple of the
//! scale factor and correcting the edge cells so that padding never shows up
//! in the result.

pub mod error;
pub mod rescale;
pub mod scale;

pub use error::{RescaleError, Result};
pub use rescale::{downscale, padding, rescale, upscale, Rescaled};
pub use scale::{RescaleMode, ScaleFactor, Strictness};
