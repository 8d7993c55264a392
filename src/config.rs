//! Configuration for the value namespace.
//!
//! Read from `pql.toml`:
//!
//! ```toml
//! api_version = "v202405"
//! # namespace = "https://www.google.com/apis/ads/publisher/v202405"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PqlError, PqlResult};
use crate::value::{Coercer, DEFAULT_API_VERSION, NAMESPACE_BASE};

/// Name of the config file looked up by [`PqlConfig::discover`].
pub const CONFIG_FILE: &str = "pql.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PqlConfig {
    /// Publisher API version, e.g. `v202108`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Explicit namespace; overrides the one derived from `api_version`
    #[serde(default)]
    pub namespace: Option<String>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for PqlConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            namespace: None,
        }
    }
}

impl PqlConfig {
    pub fn builder() -> PqlConfigBuilder {
        PqlConfigBuilder::default()
    }

    pub fn from_toml_str(content: &str) -> PqlResult<Self> {
        toml::from_str(content).map_err(|e| PqlError::Config(e.to_string()))
    }

    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> PqlResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `./pql.toml`, then `<config dir>/pql/pql.toml`, else defaults.
    pub fn discover() -> PqlResult<Self> {
        match Self::candidates().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("pql").join(CONFIG_FILE));
        }
        paths
    }

    /// Namespace stamped on coerced values.
    pub fn namespace(&self) -> String {
        match &self.namespace {
            Some(ns) => ns.clone(),
            None => format!("{}{}", NAMESPACE_BASE, self.api_version),
        }
    }

    pub fn coercer(&self) -> Coercer {
        Coercer::new(self.namespace())
    }
}

/// Builder for PqlConfig
#[derive(Debug, Default)]
pub struct PqlConfigBuilder {
    config: PqlConfig,
}

impl PqlConfigBuilder {
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    pub fn build(self) -> PqlConfig {
        self.config
    }
}
