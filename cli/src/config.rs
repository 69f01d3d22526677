//! CLI Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Namespace used when `-n` is not given
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Kubeconfig context (current context when unset)
    #[serde(default)]
    pub context: Option<String>,

    /// Default output format
    #[serde(default = "default_format")]
    pub output: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_format() -> String {
    "table".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            context: None,
            output: default_format(),
            timeout: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(PathBuf::from).or_else(Self::default_config_path);

        let mut config = match config_path {
            Some(ref path) if path.exists() => Self::from_file(path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a config file, YAML or TOML by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config: {:?}", path))
        } else {
            toml::from_str(&content).with_context(|| format!("Invalid TOML config: {:?}", path))
        }
    }

    /// Get default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Get configuration directory
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("snapctl"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(namespace) = std::env::var("SNAPCTL_NAMESPACE") {
            self.namespace = namespace;
        }
        if let Ok(context) = std::env::var("SNAPCTL_CONTEXT") {
            self.context = Some(context);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<PathBuf> {
        let config_path = path
            .map(PathBuf::from)
            .or_else(Self::default_config_path)
            .context("No configuration path available")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(config_path)
    }
}
