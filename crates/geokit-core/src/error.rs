//! Error types for GeoKit

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeokitError {
    // Spatial reference errors
    #[error("Spatial reference error: {reason}")]
    Srs { reason: String },

    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    Geometry { reason: String },

    // Dataset errors
    #[error("Raster error: {reason}")]
    Raster { reason: String },

    #[error("Vector error: {reason}")]
    Vector { reason: String },

    #[error("Extent error: {reason}")]
    Extent { reason: String },

    #[error("Region mask error: {reason}")]
    RegionMask { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeokitError {
    pub fn srs(reason: impl Into<String>) -> Self {
        Self::Srs { reason: reason.into() }
    }

    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry { reason: reason.into() }
    }

    pub fn raster(reason: impl Into<String>) -> Self {
        Self::Raster { reason: reason.into() }
    }

    pub fn vector(reason: impl Into<String>) -> Self {
        Self::Vector { reason: reason.into() }
    }

    pub fn extent(reason: impl Into<String>) -> Self {
        Self::Extent { reason: reason.into() }
    }

    pub fn region_mask(reason: impl Into<String>) -> Self {
        Self::RegionMask { reason: reason.into() }
    }

    /// True for configuration problems, which callers treat as fatal
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigMissing { .. } | Self::ConfigInvalid { .. })
    }
}

pub type Result<T> = std::result::Result<T, GeokitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason() {
        let err = GeokitError::extent("x_min must be less than x_max");
        assert_eq!(err.to_string(), "Extent error: x_min must be less than x_max");

        let err = GeokitError::ConfigInvalid {
            key: "srs".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid configuration value for srs: not a number");
    }

    #[test]
    fn test_is_config() {
        assert!(GeokitError::ConfigMissing { key: "proj_data".to_string() }.is_config());
        assert!(!GeokitError::raster("boom").is_config());
        assert!(!GeokitError::region_mask("empty mask").is_config());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GeokitError = io.into();
        assert!(matches!(err, GeokitError::Io(_)));
    }
}
