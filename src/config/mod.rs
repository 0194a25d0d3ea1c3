// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for Tonal.
//!
//! Display and key-construction settings plus the log level, read from a
//! YAML or TOML file. Every field has a default, so an empty file is valid.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::RenderOptions;

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_ENV: &str = "TONAL_CONFIG";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TonalConfig {
    /// How notes and accidentals are printed
    pub display: RenderOptions,
    /// Key construction settings
    pub keys: KeyConfig,
    /// Logging settings
    pub log: LogConfig,
}

impl TonalConfig {
    /// Load from a `.yaml`/`.yml` or `.toml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => bail!("Unsupported config file extension: {:?}", path),
        }
        .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

/// Key construction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    /// Keep double-sharp and double-flat roots as spelled instead of
    /// moving them to the neighbouring natural
    pub allow_double_accidentals: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "warn", "tonal=debug")
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TonalConfig::default();
        assert!(!config.display.show_natural_sign);
        assert!(!config.display.ascii_accidentals);
        assert!(!config.keys.allow_double_accidentals);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
display:
  ascii_accidentals: true
keys:
  allow_double_accidentals: true
log:
  level: debug
"#;

        let config = TonalConfig::from_yaml(yaml).unwrap();
        assert!(config.display.ascii_accidentals);
        assert!(!config.display.show_natural_sign);
        assert!(config.keys.allow_double_accidentals);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[display]
show_natural_sign = true

[log]
level = "tonal=trace"
"#;

        let config = TonalConfig::from_toml(toml).unwrap();
        assert!(config.display.show_natural_sign);
        assert!(!config.keys.allow_double_accidentals);
        assert_eq!(config.log.level, "tonal=trace");
    }

    #[test]
    fn test_empty_documents_use_defaults() {
        assert_eq!(TonalConfig::from_yaml("").unwrap(), TonalConfig::default());
        assert_eq!(TonalConfig::from_toml("").unwrap(), TonalConfig::default());
    }

    #[test]
    fn test_bad_yaml() {
        assert!(TonalConfig::from_yaml("display: [1, 2").is_err());
        assert!(TonalConfig::from_yaml("display:\n  ascii_accidentals: maybe\n").is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = TonalConfig::default();
        config.display.ascii_accidentals = true;
        config.log.level = "info".to_string();

        let yaml = config.to_yaml().unwrap();
        let parsed = TonalConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();

        let yaml_path = dir.path().join("tonal.yaml");
        fs::write(&yaml_path, "display:\n  ascii_accidentals: true\n").unwrap();
        assert!(TonalConfig::load(&yaml_path).unwrap().display.ascii_accidentals);

        let toml_path = dir.path().join("tonal.toml");
        fs::write(&toml_path, "[keys]\nallow_double_accidentals = true\n").unwrap();
        assert!(TonalConfig::load(&toml_path).unwrap().keys.allow_double_accidentals);

        let ini_path = dir.path().join("tonal.ini");
        fs::write(&ini_path, "").unwrap();
        assert!(TonalConfig::load(&ini_path).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.yaml");

        let mut config = TonalConfig::default();
        config.keys.allow_double_accidentals = true;
        config.save(&path).unwrap();

        assert_eq!(TonalConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = TonalConfig::load("/nonexistent/tonal.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
