//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use morphic_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings passed to the conversion engine
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// End converted text with a newline when it lacks one
    pub trailing_newline: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when neither verbosity flags nor RUST_LOG are given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            trailing_newline: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid TOML in {}: {}", path.display(), e)))?,
            _ => serde_json::from_str(&content)?,
        };

        config
            .engine
            .validate()
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then
    /// apply `MORPHIC_*` environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) if !path.exists() => {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.engine = config.engine.merge_with_env()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".morphic.yaml"),
            PathBuf::from(".morphic.json"),
            PathBuf::from(".morphic.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let morphic_dir = config_dir.join("morphic");
            paths.push(morphic_dir.join("config.yaml"));
            paths.push(morphic_dir.join("config.json"));
            paths.push(morphic_dir.join("config.toml"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".morphic.yaml"));
            paths.push(home_dir.join(".morphic.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.json_indent, 2);
        assert!(config.output.trailing_newline);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("morphic.yaml");
        fs::write(
            &path,
            "engine:\n  json_indent: 4\n  csv_delimiter: ';'\noutput:\n  color: false\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.engine.json_indent, 4);
        assert_eq!(config.engine.csv_delimiter, ';');
        assert!(!config.output.color);
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn test_load_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("morphic.toml");
        fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_invalid_engine_settings_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("morphic.json");
        fs::write(&path, "{\"engine\": {\"json_indent\": 500}}").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file() {
        let result = Config::load_with_file(Some(Path::new("/nonexistent/morphic.yaml")));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
