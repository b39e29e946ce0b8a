//! Probe configuration
//!
//! The probe reads three settings: the primary table URI, the TOS region and
//! the fallback table URI. They are layered from built-in defaults, an
//! optional TOML file at ~/.config/lprobe/config.toml, and overrides from the
//! environment or command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Table opened first
pub const DEFAULT_URI: &str = "s3://data-analysis-demo-data/lance_catalog/default/imdb_top_1000";

/// Region used for the endpoint when none is configured
pub const DEFAULT_REGION: &str = "cn-beijing";

/// Table tried when the primary cannot be opened
pub const DEFAULT_FALLBACK_URI: &str =
    "s3://data-analysis-demo-data/lance_catalog/default/metadata_table";

/// Fully populated probe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeConfig {
    pub uri: String,
    pub region: String,
    pub fallback_uri: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            region: DEFAULT_REGION.to_string(),
            fallback_uri: DEFAULT_FALLBACK_URI.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Apply a layer of overrides; unset fields keep their current value
    pub fn with_overrides(mut self, overrides: &ProbeOverrides) -> Self {
        if let Some(uri) = &overrides.uri {
            self.uri = uri.clone();
        }
        if let Some(region) = &overrides.region {
            self.region = region.clone();
        }
        if let Some(fallback_uri) = &overrides.fallback_uri {
            self.fallback_uri = fallback_uri.clone();
        }
        self
    }
}

/// Optional settings from one configuration layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_uri: Option<String>,
}

/// On-disk configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Schema version for compatibility checks
    pub schema_version: u32,

    #[serde(default)]
    pub probe: ProbeOverrides,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            probe: ProbeOverrides::default(),
        }
    }
}

/// Locates and loads the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        Ok(Self {
            config_path: config_dir.join("lprobe").join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the configuration file
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: ConfigFile = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade lprobe.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }
}
