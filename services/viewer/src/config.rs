//! Viewer configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use viewer_common::{Colormap, LatLngBounds, Variable};

/// Viewer configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Base URL of the raster-analysis backend API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the raster object store.
    #[serde(default = "default_storage_base")]
    pub storage_base: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Variable shown on startup.
    #[serde(default = "default_variable")]
    pub default_variable: Variable,

    /// Colormap applied on startup.
    #[serde(default = "default_colormap")]
    pub default_colormap: Colormap,

    /// Geographic bounds of the displayed region.
    #[serde(default = "default_bounds")]
    pub bounds: LatLngBounds,

    /// Rewrite raster URLs to the GCS JSON-API download form, for backends
    /// that fetch the URL directly and mishandle the plain-URL redirect.
    #[serde(default)]
    pub rewrite_gcs_urls: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            storage_base: default_storage_base(),
            timeout_secs: default_timeout_secs(),
            default_variable: default_variable(),
            default_colormap: default_colormap(),
            bounds: default_bounds(),
            rewrite_gcs_urls: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            tracing::warn!("Config file {} does not exist, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            anyhow::bail!("api_base must not be empty");
        }
        if self.storage_base.trim().is_empty() {
            anyhow::bail!("storage_base must not be empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 {
            anyhow::bail!("bounds must have positive extent");
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}

fn default_storage_base() -> String {
    "https://storage.googleapis.com/lis-olci-netcdfs".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_variable() -> Variable {
    Variable::Cdom
}

fn default_colormap() -> Colormap {
    Colormap::Turbo
}

fn default_bounds() -> LatLngBounds {
    LatLngBounds::long_island_sound()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.default_variable, Variable::Cdom);
        assert_eq!(config.default_colormap, Colormap::Turbo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing_with_partial_fields() {
        let yaml = r#"
api_base: https://api.example.org
default_variable: chl
"#;
        let config: ViewerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_base, "https://api.example.org");
        assert_eq!(config.default_variable, Variable::Chl);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_empty_api_base() {
        let config = ViewerConfig {
            api_base: "".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ViewerConfig::load("/nonexistent/viewer.yaml").unwrap();
        assert_eq!(config.storage_base, default_storage_base());
    }
}
