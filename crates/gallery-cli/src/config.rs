//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments (bounds flags override profiles)

use crate::error::{Error, Result};
use gallery_core::GalleryBounds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Profile used when neither flags nor the document name bounds
pub const DEFAULT_PROFILE: &str = "listing";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile applied when no bounds are given
    pub default_profile: String,

    /// Named bounds profiles
    pub profiles: BTreeMap<String, GalleryBounds>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("listing".to_string(), GalleryBounds::LISTING);
        profiles.insert("gallery".to_string(), GalleryBounds::GALLERY);

        Self {
            default_profile: DEFAULT_PROFILE.to_string(),
            profiles,
            output: OutputConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Serialization format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config: Config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".gallery.yaml"),
            PathBuf::from(".gallery.json"),
            PathBuf::from(".gallery.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let gallery_dir = config_dir.join("gallery");
            paths.push(gallery_dir.join("config.yaml"));
            paths.push(gallery_dir.join("config.json"));
            paths.push(gallery_dir.join("config.toml"));
        }

        paths
    }

    /// Look up a bounds profile by name
    pub fn profile(&self, name: &str) -> Result<GalleryBounds> {
        self.profiles
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownProfile {
                name: name.to_string(),
            })
    }

    /// Bounds of the default profile
    pub fn default_bounds(&self) -> Result<GalleryBounds> {
        self.profile(&self.default_profile)
    }

    /// Check that every profile is well formed and the default exists
    pub fn validate(&self) -> Result<()> {
        for (name, bounds) in &self.profiles {
            bounds
                .check()
                .map_err(|e| Error::config(format!("profile '{}': {}", name, e)))?;
        }

        if !self.profiles.contains_key(&self.default_profile) {
            return Err(Error::config(format!(
                "default profile '{}' is not defined",
                self.default_profile
            )));
        }

        if let Some(format) = &self.logging.format {
            if !matches!(format.to_lowercase().as_str(), "compact" | "full" | "json") {
                return Err(Error::config(format!("unknown log format '{}'", format)));
            }
        }

        Ok(())
    }

    /// Serialize in the format matching the file extension
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        let content = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_profiles() {
        let config = Config::default();
        assert_eq!(config.default_profile, "listing");
        assert_eq!(config.profile("listing").unwrap(), GalleryBounds::LISTING);
        assert_eq!(config.profile("gallery").unwrap(), GalleryBounds::GALLERY);
        assert_eq!(config.default_bounds().unwrap().max_images, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_profile() {
        let err = Config::default().profile("villa").unwrap_err();
        assert!(matches!(err, Error::UnknownProfile { ref name } if name == "villa"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "default_profile: gallery\nlogging:\n  format: json\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_profile, "gallery");
        assert_eq!(config.default_bounds().unwrap(), GalleryBounds::GALLERY);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert!(config.output.color);
    }

    #[test]
    fn test_rejects_inverted_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"profiles": {"listing": {"min_images": 10, "max_images": 4}}}"#,
        )
        .unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("profile 'listing'"));
    }

    #[test]
    fn test_rejects_missing_default_profile() {
        let config = Config {
            default_profile: "villa".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config
            .profiles
            .insert("villa".to_string(), GalleryBounds::new(10, 60).unwrap());
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
