use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use teks_buffer::NewlineStyle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Newline encoding to use when writing documents back to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlinePreference {
    /// Keep whatever the document was opened with.
    #[default]
    Detect,
    Lf,
    Crlf,
    Cr,
}

impl NewlinePreference {
    /// The style to save with, given the style the document itself prefers.
    pub fn resolve(self, detected: NewlineStyle) -> NewlineStyle {
        match self {
            NewlinePreference::Detect => detected,
            NewlinePreference::Lf => NewlineStyle::Lf,
            NewlinePreference::Crlf => NewlineStyle::Crlf,
            NewlinePreference::Cr => NewlineStyle::Cr,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub newline: NewlinePreference,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/teks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/teks/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            newline: NewlinePreference::Crlf,
        };

        let toml_str = toml::to_string(&original).unwrap();
        assert_eq!(toml_str.trim(), r#"newline = "crlf""#);
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.newline, deserialized.newline);
    }

    #[test]
    fn test_missing_newline_defaults_to_detect() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.newline, NewlinePreference::Detect);
    }

    #[rstest]
    #[case(NewlinePreference::Detect, NewlineStyle::Cr, NewlineStyle::Cr)]
    #[case(NewlinePreference::Detect, NewlineStyle::Crlf, NewlineStyle::Crlf)]
    #[case(NewlinePreference::Lf, NewlineStyle::Crlf, NewlineStyle::Lf)]
    #[case(NewlinePreference::Crlf, NewlineStyle::Lf, NewlineStyle::Crlf)]
    #[case(NewlinePreference::Cr, NewlineStyle::Lf, NewlineStyle::Cr)]
    fn test_resolve_preference(
        #[case] preference: NewlinePreference,
        #[case] detected: NewlineStyle,
        #[case] expected: NewlineStyle,
    ) {
        assert_eq!(preference.resolve(detected), expected);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&config_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, r#"newline = "sideways""#).unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            newline: NewlinePreference::Cr,
        };
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded.newline, NewlinePreference::Cr);
    }
}
