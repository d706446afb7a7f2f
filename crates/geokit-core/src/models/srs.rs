//! Spatial reference system identity

use crate::error::{GeokitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spatial reference system identified by EPSG code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Srs {
    pub epsg: u32,
    pub name: String,
}

impl Default for Srs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Srs {
    pub fn new(epsg: u32, name: impl Into<String>) -> Self {
        Self { epsg, name: name.into() }
    }

    /// Build an SRS from a bare EPSG code, naming the well-known ones
    pub fn from_epsg(epsg: u32) -> Self {
        match epsg {
            4326 => Self::wgs84(),
            3857 => Self::web_mercator(),
            3035 => Self::new(3035, "ETRS89-extended / LAEA Europe"),
            _ => Self::new(epsg, format!("EPSG:{}", epsg)),
        }
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::new(4326, "WGS 84")
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::new(3857, "Web Mercator")
    }

    /// Authority string understood by PROJ, e.g. `EPSG:4326`
    pub fn authority(&self) -> String {
        format!("EPSG:{}", self.epsg)
    }
}

impl fmt::Display for Srs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{} ({})", self.epsg, self.name)
    }
}

impl FromStr for Srs {
    type Err = GeokitError;

    /// Parse `4326`, `EPSG:4326` or `urn:ogc:def:crs:EPSG::4326`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let code = match trimmed.rsplit_once(':') {
            Some((authority, code)) => {
                if !authority.to_ascii_uppercase().contains("EPSG") {
                    return Err(GeokitError::srs(format!(
                        "Unsupported authority in '{}': only EPSG codes are accepted",
                        trimmed
                    )));
                }
                code
            }
            None => trimmed,
        };

        code.parse::<u32>()
            .map(Self::from_epsg)
            .map_err(|_| GeokitError::srs(format!("Invalid EPSG code: '{}'", trimmed)))
    }
}
