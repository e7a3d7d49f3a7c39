//! Portfolio configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Version;
use crate::error::PortfolioError;

/// Portfolio configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Declared format version assigned to newly created documents
    pub initial_version: Version,
    /// Version floor raised when the first portfolio entry is added
    pub min_version: Version,
    /// `E` value assumed for schema fields that do not declare one
    pub default_editable: bool,
    /// `V` value assumed for schema fields that do not declare one
    pub default_visible: bool,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            initial_version: Version::new(1, 4),
            min_version: Version::new(1, 7), // collections arrived in 1.7
            default_editable: false,
            default_visible: true,
        }
    }
}

impl PortfolioConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PortfolioError> {
        serde_json::from_str(json).map_err(|e| PortfolioError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// `Result<PortfolioConfig, PortfolioError>` with the parsed configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PortfolioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PortfolioError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!("Loaded portfolio config from {}", path.display());
        Ok(config)
    }
}
