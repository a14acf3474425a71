//! Configuration handling for the form driver

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{DEFAULT_DURATION_YEARS, MAX_DURATION_YEARS, MIN_DURATION_YEARS};

const OUTPUT_DIR_ENV: &str = "BIZPLAN_OUTPUT_DIR";
const ATTACHMENTS_DIR_ENV: &str = "BIZPLAN_ATTACHMENTS_DIR";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Where exported plans are written
    pub output_dir: Option<PathBuf>,
    /// Root of the attachment store
    pub attachments_dir: Option<PathBuf>,
    /// Plan duration for new sessions
    pub default_duration_years: Option<u8>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "bizplan", "bizplan-form")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = var(ATTACHMENTS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.attachments_dir = Some(PathBuf::from(dir));
        }
    }

    /// Export directory, defaulting to the working directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Attachment store root, defaulting to the platform data directory
    pub fn attachments_dir(&self) -> PathBuf {
        self.attachments_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join("attachments"))
                .unwrap_or_else(|| PathBuf::from("attachments"))
        })
    }

    /// Configured plan duration, clamped to the supported range
    pub fn duration_years(&self) -> u8 {
        self.default_duration_years
            .unwrap_or(DEFAULT_DURATION_YEARS)
            .clamp(MIN_DURATION_YEARS, MAX_DURATION_YEARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.output_dir.is_none());
        assert!(config.attachments_dir.is_none());
        assert!(config.default_duration_years.is_none());
        assert_eq!(config.output_dir(), PathBuf::from("."));
        assert_eq!(config.duration_years(), 3);
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            output_dir: Some(PathBuf::from("/tmp/plans")),
            attachments_dir: Some(PathBuf::from("/tmp/uploads")),
            default_duration_years: Some(5),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.output_dir, Some(PathBuf::from("/tmp/plans")));
        assert_eq!(parsed.attachments_dir, Some(PathBuf::from("/tmp/uploads")));
        assert_eq!(parsed.default_duration_years, Some(5));
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"default_duration_years": 2, "theme": "dark"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.duration_years(), 2);
    }

    #[test]
    fn test_duration_is_clamped() {
        let config = AppConfig {
            default_duration_years: Some(10),
            ..Default::default()
        };
        assert_eq!(config.duration_years(), 5);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig {
            output_dir: Some(PathBuf::from("from-file")),
            ..Default::default()
        };
        config.apply_env(|key| match key {
            OUTPUT_DIR_ENV => Some("from-env".to_string()),
            ATTACHMENTS_DIR_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.output_dir(), PathBuf::from("from-env"));
        assert!(config.attachments_dir.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            output_dir: Some(PathBuf::from("plans")),
            attachments_dir: None,
            default_duration_years: Some(4),
        };

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();

        assert_eq!(loaded.output_dir(), PathBuf::from("plans"));
        assert!(loaded.attachments_dir.is_none());
        assert_eq!(loaded.duration_years(), 4);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.default_duration_years.is_none());
    }

    #[test]
    fn test_load_returns_ok_without_file() {
        assert!(AppConfig::load().is_ok());
    }
}
