use crate::error::{GeokitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GeoKit
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Default SRS as an EPSG code
    pub srs: ConfigValue<u32>,
    /// Whether downscaling rejects grids not divisible by the scale factor
    pub strict_rescale: ConfigValue<bool>,
    /// Directory holding the PROJ database, if not discoverable by default
    pub proj_data: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            srs: ConfigValue::new(4326, ConfigSource::Default),
            strict_rescale: ConfigValue::new(true, ConfigSource::Default),
            proj_data: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeokitError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeokitError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(srs) = file_config.srs {
            self.srs.update(srs, ConfigSource::File);
        }

        if let Some(strict) = file_config.strict_rescale {
            self.strict_rescale.update(strict, ConfigSource::File);
        }

        if let Some(proj_data) = file_config.proj_data {
            self.proj_data.update(Some(proj_data), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOKIT_SRS
        if let Ok(srs_str) = env::var("GEOKIT_SRS") {
            match srs_str.parse::<u32>() {
                Ok(srs) => self.srs.update(srs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOKIT_SRS value '{}': expected integer EPSG code",
                    srs_str
                ),
            }
        }

        // GEOKIT_STRICT_RESCALE
        if let Ok(strict_str) = env::var("GEOKIT_STRICT_RESCALE") {
            match parse_bool(&strict_str) {
                Ok(strict) => self.strict_rescale.update(strict, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOKIT_STRICT_RESCALE value '{}': expected true or false",
                    strict_str
                ),
            }
        }

        // GEOKIT_PROJ_DATA
        if let Ok(proj_data) = env::var("GEOKIT_PROJ_DATA") {
            if !proj_data.trim().is_empty() {
                self.proj_data.update(Some(proj_data), ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(srs) = overrides.srs {
            self.srs.update(srs, ConfigSource::Cli);
        }

        if let Some(strict) = overrides.strict_rescale {
            self.strict_rescale.update(strict, ConfigSource::Cli);
        }

        if let Some(proj_data) = overrides.proj_data {
            self.proj_data.update(Some(proj_data), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("srs".to_string(), (format!("EPSG:{}", self.srs.value), self.srs.source));

        map.insert(
            "strict_rescale".to_string(),
            (self.strict_rescale.value.to_string(), self.strict_rescale.source),
        );

        map.insert(
            "proj_data".to_string(),
            (
                self.proj_data.value.clone().unwrap_or_else(|| "(system default)".to_string()),
                self.proj_data.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    srs: Option<u32>,
    strict_rescale: Option<bool>,
    proj_data: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub srs: Option<u32>,
    pub strict_rescale: Option<bool>,
    pub proj_data: Option<String>,
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GeokitError::ConfigInvalid {
            key: "strict_rescale".to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.srs.value, 4326);
        assert_eq!(config.srs.source, ConfigSource::Default);
        assert!(config.strict_rescale.value);
        assert_eq!(config.proj_data.value, None);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
srs = 3857
strict_rescale = false
proj_data = "/opt/proj/share"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.srs.value, 3857);
        assert_eq!(config.srs.source, ConfigSource::File);
        assert!(!config.strict_rescale.value);
        assert_eq!(config.proj_data.value.as_deref(), Some("/opt/proj/share"));
    }

    #[test]
    fn test_load_from_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "srs = \"not a number\"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            srs: Some(32748),
            strict_rescale: Some(false),
            proj_data: None,
        });

        assert_eq!(config.srs.value, 32748);
        assert_eq!(config.srs.source, ConfigSource::Cli);
        assert!(!config.strict_rescale.value);
        assert_eq!(config.proj_data.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 3);
        let (srs_value, srs_source) = &map["srs"];
        assert_eq!(srs_value, "EPSG:4326");
        assert_eq!(*srs_source, ConfigSource::Default);
        assert_eq!(map["proj_data"].0, "(system default)");
    }
}
