//! Spatial reference loading and the PROJ environment check

use geokit_core::error::{GeokitError, Result};
use geokit_core::models::Srs;
use proj::Proj;
use std::env;
use std::path::Path;
use std::sync::OnceLock;

/// Outcome of the one-time PROJ check, shared by the whole process
static ENVIRONMENT: OnceLock<std::result::Result<Srs, String>> = OnceLock::new();

/// Parse an SRS identifier (`4326`, `EPSG:4326`, ...) and make sure PROJ knows it
pub fn load_srs(spec: &str) -> Result<Srs> {
    let srs: Srs = spec.parse()?;
    validate_srs(&srs)?;
    Ok(srs)
}

/// Load an SRS from a bare EPSG code
pub fn load_epsg(epsg: u32) -> Result<Srs> {
    let srs = Srs::from_epsg(epsg);
    validate_srs(&srs)?;
    Ok(srs)
}

/// Check that PROJ can instantiate the given SRS
pub fn validate_srs(srs: &Srs) -> Result<()> {
    let authority = srs.authority();
    Proj::new(&authority).map_err(|e| {
        GeokitError::srs(format!("Failed to load {}: {}", authority, e))
    })?;
    Ok(())
}

/// Point PROJ at a data directory before the environment check runs
pub fn configure_proj_data(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(GeokitError::ConfigInvalid {
            key: "proj_data".to_string(),
            reason: format!("{} is not a directory", dir.display()),
        });
    }
    if ENVIRONMENT.get().is_some() {
        tracing::warn!(
            "PROJ environment already checked; PROJ_DATA={} only affects new PROJ contexts",
            dir.display()
        );
    }
    env::set_var("PROJ_DATA", dir);
    // PROJ < 9.1 reads PROJ_LIB instead
    env::set_var("PROJ_LIB", dir);
    Ok(())
}

/// Verify once per process that PROJ can load WGS 84.
///
/// A failure here means the PROJ database is missing or unreadable, which is
/// a configuration problem rather than something a caller can retry.
pub fn ensure_environment() -> Result<&'static Srs> {
    let outcome = ENVIRONMENT.get_or_init(|| {
        let srs = Srs::wgs84();
        match validate_srs(&srs) {
            Ok(()) => {
                tracing::debug!("PROJ environment check passed with {}", srs);
                Ok(srs)
            }
            Err(e) => Err(e.to_string()),
        }
    });

    match outcome {
        Ok(srs) => Ok(srs),
        Err(reason) => Err(GeokitError::ConfigInvalid {
            key: "proj_data".to_string(),
            reason: format!(
                "PROJ did not load properly ({}). Check your 'PROJ_DATA' environment variable",
                reason
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_identifier() {
        let err = load_srs("not-an-srs").unwrap_err();
        assert!(matches!(err, GeokitError::Srs { .. }));
    }

    #[test]
    fn test_unsupported_authority() {
        assert!(load_srs("ESRI:54009").is_err());
    }

    #[test]
    fn test_configure_proj_data_requires_directory() {
        let err = configure_proj_data(Path::new("/nonexistent/proj/share")).unwrap_err();
        assert!(err.is_config());
    }
}
