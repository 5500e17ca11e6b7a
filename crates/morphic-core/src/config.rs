//! Engine configuration
//!
//! Settings that change how the built-in converters render their output.
//! Values come from, in increasing precedence:
//! - Default values
//! - A configuration file (YAML, JSON or TOML, chosen by extension)
//! - `MORPHIC_*` environment variables

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`EngineConfig::json_indent`]
pub const ENV_JSON_INDENT: &str = "MORPHIC_JSON_INDENT";
/// Environment variable overriding [`EngineConfig::csv_delimiter`]
pub const ENV_CSV_DELIMITER: &str = "MORPHIC_CSV_DELIMITER";
/// Environment variable overriding [`EngineConfig::date_format`]
pub const ENV_DATE_FORMAT: &str = "MORPHIC_DATE_FORMAT";

const MAX_JSON_INDENT: usize = 16;

/// Settings for the built-in converters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spaces per indentation level in JSON output; 0 writes compact JSON
    pub json_indent: usize,

    /// Field delimiter for CSV, must be a single ASCII character
    pub csv_delimiter: char,

    /// chrono format string for dates; `None` or `"rfc3339"` means RFC 3339
    pub date_format: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            json_indent: 2,
            csv_delimiter: ',',
            date_format: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        let config: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content).map_err(|e| Error::Configuration {
                message: format!("Invalid TOML in {}: {}", path.display(), e),
                source: Some(e.into()),
            })?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply `MORPHIC_*` overrides from the process environment
    pub fn merge_with_env(self) -> Result<Self> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    pub fn merge_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(indent) = lookup(ENV_JSON_INDENT) {
            self.json_indent = indent.trim().parse().map_err(|e| Error::Configuration {
                message: format!("{ENV_JSON_INDENT} must be a non-negative integer, got '{indent}'"),
                source: Some(anyhow::Error::new(e)),
            })?;
        }

        if let Some(delimiter) = lookup(ENV_CSV_DELIMITER) {
            let mut chars = delimiter.chars();
            self.csv_delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::configuration(format!(
                        "{ENV_CSV_DELIMITER} must be a single character, got '{delimiter}'"
                    )))
                }
            };
        }

        if let Some(format) = lookup(ENV_DATE_FORMAT) {
            self.date_format = Some(format).filter(|f| !f.trim().is_empty());
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.csv_delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "CSV delimiter must be an ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if matches!(self.csv_delimiter, '"' | '\n' | '\r') {
            return Err(Error::configuration(
                "CSV delimiter cannot be a quote or line break",
            ));
        }
        if self.json_indent > MAX_JSON_INDENT {
            return Err(Error::configuration(format!(
                "JSON indent must be at most {MAX_JSON_INDENT}, got {}",
                self.json_indent
            )));
        }
        Ok(())
    }

    /// The CSV delimiter as the byte the csv crate expects
    pub fn csv_delimiter_byte(&self) -> u8 {
        if self.csv_delimiter.is_ascii() {
            self.csv_delimiter as u8
        } else {
            b','
        }
    }

    /// The configured date pattern, `None` when dates use RFC 3339
    pub fn date_pattern(&self) -> Option<&str> {
        self.date_format
            .as_deref()
            .filter(|f| !f.eq_ignore_ascii_case("rfc3339"))
    }
}
