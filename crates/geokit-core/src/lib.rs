//! GeoKit Core - Domain errors, models, and configuration
//!
//! This crate holds the value types and the error hierarchy shared by the
//! geokit crates.

pub mod config;
pub mod error;
pub mod models;
pub mod util;

pub use error::{GeokitError, Result};
